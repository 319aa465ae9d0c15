use crate::bitset::BitSet;
use crate::error::SolveError;
use crate::graph::DiGraph;
use crate::kernel::{IndexPredicate, Kernel, LlpInstance};
use crate::state::StateVec;

/// Outer forbidden predicate: a neighbor's tree has a larger root.
const FORB_NEIGHBOR: usize = 0;
/// Inner forbidden predicate: not yet pointing straight at the root.
const FORB_JUMP: usize = 1;

const STEP_VMAX: usize = 0;
const STEP_HOOK_STAGE: usize = 1;
// Step 2 commits the staged hooks.

/// Connected components by hooking and pointer jumping.
///
/// `parent[v]` climbs toward the largest vertex index of `v`'s component.
/// A wave computes each vertex's neighborhood maximum (`vmax`), hooks every
/// root onto the largest `vmax` seen by its tree, then pointer-jumps the
/// forest into rooted stars with an inner fixed point, which is what the
/// kernel's second forbidden predicate and advance override exist for.
/// Every sub-step runs over all vertices, selected per step.
///
/// The input must be symmetric (every edge present in both directions);
/// the unweighted-undirected loader guarantees this. The outer predicate
/// is meaningless on genuinely directed graphs.
#[must_use]
pub struct FastComp<'g> {
    kernel: Kernel,
    graph: &'g DiGraph,
    parent: StateVec<usize>,
    vmax: StateVec<usize>,
    hook: StateVec<usize>,
    jump: StateVec<usize>,
    inner_wave: BitSet,
}

impl<'g> FastComp<'g> {
    /// Build the instance with every vertex its own root.
    ///
    /// # Errors
    /// If the worker pool cannot be built.
    pub fn new(graph: &'g DiGraph) -> Result<Self, SolveError> {
        let n = graph.len();
        Ok(Self {
            kernel: Kernel::new(n)?,
            graph,
            parent: StateVec::from_vec((0..n).collect()),
            vmax: StateVec::filled(n, 0),
            hook: StateVec::filled(n, 0),
            jump: StateVec::filled(n, 0),
            inner_wave: BitSet::new(n),
        })
    }

    /// Run to quiescence and return the representative vector: every vertex
    /// names the largest index in its component.
    ///
    /// # Errors
    /// Propagates worker failures.
    pub fn solve(self) -> Result<Vec<usize>, SolveError> {
        self.kernel.solve(&self)?;
        Ok(self.parent.into_vec())
    }
}

impl LlpInstance for FastComp<'_> {
    fn len(&self) -> usize {
        self.graph.len()
    }

    fn num_forbiddens(&self) -> usize {
        2
    }

    fn forbidden(&self, forb_idx: usize, v: usize) -> bool {
        match forb_idx {
            FORB_NEIGHBOR => {
                // SAFETY: collect phases read `parent` with no writer in
                // flight.
                let own = unsafe { self.parent.read(v) };
                self.graph.parents(v).iter().any(|&u| {
                    // SAFETY: as above.
                    own < unsafe { self.parent.read(u) }
                })
            }
            _ => {
                // SAFETY: reads `parent` with no writer in flight; writes
                // only this task's own `jump` slot.
                unsafe {
                    let p = self.parent.read(v);
                    let grandparent = self.parent.read(p);
                    if p != grandparent {
                        self.jump.write(v, grandparent);
                        true
                    } else {
                        false
                    }
                }
            }
        }
    }

    fn num_advance_steps(&self) -> usize {
        3
    }

    fn advance_step(&self, step_idx: usize, v: usize) {
        // SAFETY: step 0 reads `parent` and writes its own `vmax` slot;
        // step 1 reads `parent`/`vmax` and writes its own `hook` slot;
        // step 2 reads its own `parent`/`hook` slots and writes its own
        // `parent` slot. Each phase keeps readers and writers on disjoint
        // vectors (or disjoint slots), with the barrier in between.
        unsafe {
            match step_idx {
                STEP_VMAX => {
                    let mut highest = self.parent.read(v);
                    for &u in self.graph.parents(v) {
                        highest = highest.max(self.parent.read(u));
                    }
                    self.vmax.write(v, highest);
                }
                STEP_HOOK_STAGE => {
                    if self.parent.read(v) == v {
                        let mut target = self.vmax.read(v);
                        for u in 0..self.graph.len() {
                            if self.parent.read(u) == v {
                                target = target.max(self.vmax.read(u));
                            }
                        }
                        self.hook.write(v, target);
                    }
                }
                _ => {
                    if self.parent.read(v) == v {
                        self.parent.write(v, self.hook.read(v));
                    }
                }
            }
        }
    }

    fn selection_for_step(&self, _step_idx: usize) -> Option<IndexPredicate<'_>> {
        // Hooks need fresh `vmax` values for vertices outside the wave, so
        // every sub-step runs over the full domain.
        Some(Box::new(|_| true))
    }

    fn advance(&self, kernel: &Kernel, wave: &BitSet) -> Result<(), SolveError> {
        kernel.run_advance_steps(self, wave)?;
        // Inner fixed point: jump until the forest is rooted stars.
        while kernel.collect_forbidden(self, FORB_JUMP, &self.inner_wave)? {
            kernel.for_each_in(&self.inner_wave, |v| {
                // SAFETY: each task commits only its own `parent` slot from
                // its own staged `jump` slot.
                unsafe {
                    let staged = self.jump.read(v);
                    self.parent.write(v, staged);
                }
            })?;
        }
        Ok(())
    }
}

#[cfg(all(test, not(feature = "loom")))]
mod tests {
    use super::*;

    /// Symmetric helper: undirected edges on a directed representation.
    fn undirected(n: usize, edges: &[(usize, usize)]) -> DiGraph {
        let mut g = DiGraph::new(n);
        for &(a, b) in edges {
            g.add_edge(a, b, 1);
            g.add_edge(b, a, 1);
        }
        g
    }

    fn components(g: &DiGraph) -> Vec<usize> {
        FastComp::new(g).unwrap().solve().unwrap()
    }

    #[test]
    fn single_vertex() {
        assert_eq!(components(&undirected(1, &[])), vec![0]);
    }

    #[test]
    fn one_edge() {
        assert_eq!(components(&undirected(2, &[(0, 1)])), vec![1, 1]);
    }

    #[test]
    fn two_isolated_vertices() {
        assert_eq!(components(&undirected(2, &[])), vec![0, 1]);
    }

    #[test]
    fn triangle() {
        assert_eq!(components(&undirected(3, &[(0, 1), (1, 2), (0, 2)])), vec![2, 2, 2]);
    }

    #[test]
    fn two_components() {
        let g = undirected(
            10,
            &[(0, 1), (2, 3), (3, 4), (4, 5), (5, 6), (6, 7), (7, 8), (8, 9)],
        );
        assert_eq!(components(&g), vec![1, 1, 9, 9, 9, 9, 9, 9, 9, 9]);
    }

    #[test]
    fn star_rooted_everywhere() {
        let g = undirected(7, &[(0, 3), (1, 3), (2, 3), (4, 6), (5, 6)]);
        assert_eq!(components(&g), vec![3, 3, 3, 3, 6, 6, 6]);
    }

    #[test]
    fn long_chain() {
        let edges: Vec<(usize, usize)> = (0..63).map(|i| (i, i + 1)).collect();
        let g = undirected(64, &edges);
        assert_eq!(components(&g), vec![63; 64]);
    }
}
