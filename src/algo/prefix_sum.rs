use crate::algo::Reduce;
use crate::error::SolveError;
use crate::kernel::{Kernel, LlpInstance};
use crate::state::StateVec;
use crate::types::{Weight, INF};

/// Parallel inclusive prefix sums.
///
/// The input is zero-padded to the next power of two `N`. A summation tree
/// `S` is precomputed with [`Reduce`], then a second tree `G` of `2N - 1`
/// nodes is filled top-down: `G[v]` is the sum of every input element
/// strictly before the leftmost leaf of `v`'s subtree. The root knows its
/// prefix is zero; a left child inherits its parent's prefix; a right child
/// adds its left sibling's subtree sum (from `S` for internal levels, from
/// the input at the leaf level). The output re-bases the leaf prefixes by
/// the elements themselves, which yields inclusive sums trimmed to the
/// original length.
#[must_use]
pub struct PrefixSum {
    kernel: Kernel,
    n_padded: usize,
    original_len: usize,
    input: Vec<Weight>,
    summation: Vec<Weight>,
    g: StateVec<Weight>,
    temp_g: StateVec<Weight>,
}

impl PrefixSum {
    /// Build the instance around `input`: pad, reduce, state at bottom.
    ///
    /// # Errors
    /// If the worker pool cannot be built, or the inner reduction fails.
    pub fn new(input: &[Weight]) -> Result<Self, SolveError> {
        let original_len = input.len();
        let n_padded = original_len.next_power_of_two();
        let mut padded = input.to_vec();
        padded.resize(n_padded, 0);

        let summation = Reduce::new(&padded)?.solve()?;

        let size = 2 * n_padded - 1;
        let mut bottom = vec![-INF; size];
        bottom[0] = 0;
        Ok(Self {
            kernel: Kernel::new(size)?,
            n_padded,
            original_len,
            input: padded,
            summation,
            g: StateVec::from_vec(bottom),
            temp_g: StateVec::filled(size, 0),
        })
    }

    /// Run to the fixed point and return the inclusive prefix sums,
    /// trimmed to the original input length.
    ///
    /// # Errors
    /// Propagates worker failures.
    pub fn solve(self) -> Result<Vec<Weight>, SolveError> {
        if self.original_len == 0 {
            return Ok(Vec::new());
        }
        self.kernel.solve(&self)?;
        let g = self.g.into_vec();
        let leaves = &g[self.n_padded - 1..];
        Ok(leaves
            .iter()
            .take(self.original_len)
            .zip(&self.input)
            .map(|(prefix, element)| prefix + element)
            .collect())
    }
}

impl LlpInstance for PrefixSum {
    fn len(&self) -> usize {
        2 * self.n_padded - 1
    }

    fn forbidden(&self, _forb_idx: usize, v: usize) -> bool {
        if v == 0 {
            return false;
        }
        // 1-based node number; its parent is node `node / 2`.
        let node = v + 1;
        let parent = node / 2 - 1;
        // SAFETY: collect phases read `g` (no writer in flight) and write
        // only this task's own `temp_g` slot.
        unsafe {
            let target = if node % 2 == 0 {
                // Left child: inherits the parent's prefix.
                self.g.read(parent)
            } else if node < self.n_padded {
                // Right child above the leaves: add the left sibling's
                // subtree sum.
                self.summation[node - 2] + self.g.read(parent)
            } else {
                // Right leaf: add the left sibling element itself.
                self.input[node - self.n_padded - 1] + self.g.read(parent)
            };
            let current = self.g.read(v);
            if current == -INF || current < target {
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
