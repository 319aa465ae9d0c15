use crate::error::SolveError;
use crate::kernel::{Kernel, LlpInstance};
use crate::state::StateVec;
use crate::types::{Weight, INF};

/// Parallel tree reduction (summation).
///
/// The state is an implicit binary tree of `n - 1` nodes over an input of
/// length `n` (odd lengths are rounded up with a zero element so every leaf
/// parent has a full pair). Leaf parents sum two adjacent input elements;
/// internal nodes sum their children; the lattice bottom is `-INF`
/// everywhere and each coordinate climbs straight to its subtree sum.
///
/// The output is the whole tree, root first, not just the root sum.
/// [`crate::algo::PrefixSum`] consumes it as its summation tree, so the
/// tree layout is part of the interface.
#[must_use]
pub struct Reduce {
    kernel: Kernel,
    n: usize,
    input: Vec<Weight>,
    g: StateVec<Weight>,
    temp_g: StateVec<Weight>,
}

impl Reduce {
    /// Build the instance around `input`, state at bottom.
    ///
    /// # Errors
    /// If the worker pool cannot be built.
    pub fn new(input: &[Weight]) -> Result<Self, SolveError> {
        // Round odd lengths up so leaf pairs are total; the extra zero leaf
        // does not change any sum.
        let n = input.len() + input.len() % 2;
        let mut padded = input.to_vec();
        padded.resize(n, 0);
        Ok(Self {
            kernel: Kernel::new(n)?,
            n,
            input: padded,
            g: StateVec::filled(n, -INF),
            temp_g: StateVec::filled(n, 0),
        })
    }

    /// Run to the fixed point and return the subtree-sum tree
    /// (`n - 1` entries; empty input gives an empty tree).
    ///
    /// # Errors
    /// Propagates worker failures.
    pub fn solve(self) -> Result<Vec<Weight>, SolveError> {
        if self.n == 0 {
            return Ok(Vec::new());
        }
        self.kernel.solve(&self)?;
        let mut tree = self.g.into_vec();
        tree.truncate(self.n - 1);
        Ok(tree)
    }
}

impl LlpInstance for Reduce {
    fn len(&self) -> usize {
        self.n
    }

    fn forbidden(&self, _forb_idx: usize, v: usize) -> bool {
        // SAFETY: collect phases read `g` (no writer in flight) and write
        // only this task's own `temp_g` slot.
        unsafe {
            let target = if v + 1 < self.n / 2 {
                // Internal node: combine the children.
                self.g.read(2 * v + 1) + self.g.read(2 * v + 2)
            } else if v + 1 < self.n {
                // Leaf parent: combine an adjacent input pair.
                let base = 2 * v + 2 - self.n;
                self.input[base] + self.input[base + 1]
            } else {
                return false;
            };
            if self.g.read(v) < target {
                self.temp_g.write(v, target);
                true
            } else {
                false
            }
        }
    }

    fn advance_step(&self, _step_idx: usize, v: usize) {
        // SAFETY: each wave task owns slot `v`; `temp_g` has no writer in
        // this phase.
        unsafe {
            let staged = self.temp_g.read(v);
            self.g.write(v, staged);
        }
    }
}

#[cfg(all(test, not(feature = "loom")))]
mod tests {
    use super::*;

    #[test]
    fn ten_elements() {
        let tree = Reduce::new(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]).unwrap().solve().unwrap();
        assert_eq!(tree, vec![55, 37, 18, 34, 3, 7, 11, 15, 19]);
    }

    #[test]
    fn eight_elements() {
        let tree = Reduce::new(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap().solve().unwrap();
        assert_eq!(tree, vec![36, 10, 26, 3, 7, 11, 15]);
    }

    #[test]
    fn odd_length_rounds_up() {
        let tree = Reduce::new(&[1, 2, 3, 4, 5, 6, 7]).unwrap().solve().unwrap();
        assert_eq!(tree.len(), 7);
        assert_eq!(tree[0], 28);
        assert_eq!(tree, vec![28, 10, 18, 3, 7, 11, 7]);
    }

    #[test]
    fn empty_input() {
        assert!(Reduce::new(&[]).unwrap().solve().unwrap().is_empty());
    }

    #[test]
    fn single_element() {
        assert_eq!(Reduce::new(&[42]).unwrap().solve().unwrap(), vec![42]);
    }

    #[test]
    fn negative_values() {
        let tree = Reduce::new(&[-5, 3, -2, -2]).unwrap().solve().unwrap();
        assert_eq!(tree, vec![-6, -2, -4]);
    }
}
