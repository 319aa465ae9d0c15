use crate::error::SolveError;
use crate::graph::DiGraph;
use crate::kernel::{Kernel, LlpInstance};
use crate::state::StateVec;
use crate::sync::{AtomicBool, Ordering};
use crate::types::{safe_add, Weight, INF};

/// Single-source shortest paths over a weighted directed graph.
///
/// The lattice runs downward: `d[v]` starts at [`INF`] (`0` at the source)
/// and each advance commits the best staged relaxation over `v`'s parents.
/// Every vertex carries a budget of `n - 1` advances; a vertex that still
/// improves on its budget-exhausting advance proves a reachable negative
/// cycle, which is reported as an absent result rather than an error.
#[must_use]
pub struct BellmanFord<'g> {
    kernel: Kernel,
    graph: &'g DiGraph,
    d: StateVec<Weight>,
    temp_d: StateVec<Weight>,
    budget: StateVec<i64>,
    neg_cycle: AtomicBool,
}

/// Outcome of a [`BellmanFord`] solve.
#[must_use]
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    distances: Vec<Weight>,
    negative_cycle: bool,
}

impl ShortestPaths {
    /// Whether a negative cycle reachable from the source was detected.
    #[must_use]
    pub fn has_negative_cycle(&self) -> bool {
        self.negative_cycle
    }

    /// The distance vector, absent when a negative cycle was detected.
    /// Unreachable vertices hold [`INF`].
    pub fn distances(&self) -> Option<&[Weight]> {
        (!self.negative_cycle).then_some(self.distances.as_slice())
    }

    /// Like [`ShortestPaths::distances`], consuming the result.
    pub fn into_distances(self) -> Option<Vec<Weight>> {
        (!self.negative_cycle).then_some(self.distances)
    }

    /// The distance vector as left by the solve, regardless of detection.
    /// Meaningless as distances when a cycle was flagged; kept for
    /// diagnostics.
    #[must_use]
    pub fn raw_distances(&self) -> &[Weight] {
        &self.distances
    }
}

impl<'g> BellmanFord<'g> {
    /// Build the instance for distances from `source`, state at bottom.
    ///
    /// # Errors
    /// If the worker pool cannot be built.
    ///
    /// # Panics
    /// If `source` is out of range.
    pub fn new(graph: &'g DiGraph, source: usize) -> Result<Self, SolveError> {
        let n = graph.len();
        assert!(source < n, "source vertex {source} out of range for {n} vertices");
        let mut d = vec![INF; n];
        d[source] = 0;
        Ok(Self {
            kernel: Kernel::new(n)?,
            graph,
            d: StateVec::from_vec(d),
            temp_d: StateVec::filled(n, INF),
            budget: StateVec::filled(n, n as i64 - 1),
            neg_cycle: AtomicBool::new(false),
        })
    }

    /// Run to quiescence.
    ///
    /// # Errors
    /// Propagates worker failures.
    pub fn solve(self) -> Result<ShortestPaths, SolveError> {
        self.kernel.solve(&self)?;
        let negative_cycle = self.neg_cycle.load(Ordering::Relaxed);
        Ok(ShortestPaths { distances: self.d.into_vec(), negative_cycle })
    }
}

impl LlpInstance for BellmanFord<'_> {
    fn len(&self) -> usize {
        self.graph.len()
    }

    fn eligible(&self, v: usize) -> bool {
        // A vertex may spend its final budget unit: the advance that
        // overruns the budget is the negative-cycle witness.
        //
        // SAFETY: `budget` is written only in advance phases, never during
        // a collect.
        unsafe { self.budget.read(v) >= 0 }
    }

    fn forbidden(&self, _forb_idx: usize, v: usize) -> bool {
        // SAFETY: collect phases read `d` (no writer in flight) and write
        // only this task's own `temp_d` slot.
        unsafe {
            let current = self.d.read(v);
            let mut best = current;
            for &u in self.graph.parents(v) {
                let candidate = safe_add(self.d.read(u), self.graph.weight(u, v));
                if candidate < best {
                    best = candidate;
                }
            }
            if best < current {
                self.temp_d.write(v, best);
                true
            } else {
                false
            }
        }
    }

    fn advance_step(&self, _step_idx: usize, v: usize) {
        // SAFETY: each wave task owns `d[v]` and `budget[v]`; `temp_d` has
        // no writer in this phase.
        unsafe {
            let staged = self.temp_d.read(v);
            self.d.write(v, staged);
            let remaining = self.budget.read(v);
            if remaining == 0 {
                self.neg_cycle.store(true, Ordering::Relaxed);
            }
            self.budget.write(v, remaining - 1);
        }
    }
}
