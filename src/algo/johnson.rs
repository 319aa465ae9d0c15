use crate::error::SolveError;
use crate::graph::DiGraph;
use crate::kernel::{Kernel, LlpInstance};
use crate::state::StateVec;
use crate::sync::{AtomicBool, Ordering};
use crate::types::Weight;

/// Johnson's price function (vertex potentials) for reweighting.
///
/// Prices start at zero and climb: `v` is forbidden while some parent `u`
/// demands `price[v] >= price[u] - w(u, v)`. At the fixed point every
/// reweighted edge `w + price[u] - price[v]` is non-negative, which is what
/// lets Dijkstra run on arbitrary-weight graphs. A vertex whose price is
/// still rising after `n - 1` advances sits on a negative cycle; the solve
/// then yields no price function.
#[must_use]
pub struct Johnson<'g> {
    kernel: Kernel,
    graph: &'g DiGraph,
    price: StateVec<Weight>,
    new_price: StateVec<Weight>,
    budget: StateVec<i64>,
    neg_cycle: AtomicBool,
}

impl<'g> Johnson<'g> {
    /// Build the instance, prices at zero.
    ///
    /// # Errors
    /// If the worker pool cannot be built.
    pub fn new(graph: &'g DiGraph) -> Result<Self, SolveError> {
        let n = graph.len();
        Ok(Self {
            kernel: Kernel::new(n)?,
            graph,
            price: StateVec::filled(n, 0),
            new_price: StateVec::filled(n, 0),
            budget: StateVec::filled(n, n as i64 - 1),
            neg_cycle: AtomicBool::new(false),
        })
    }

    /// Run to quiescence; `None` means a negative cycle was detected.
    ///
    /// # Errors
    /// Propagates worker failures.
    pub fn solve(self) -> Result<Option<Vec<Weight>>, SolveError> {
        self.kernel.solve(&self)?;
        if self.neg_cycle.load(Ordering::Relaxed) {
            return Ok(None);
        }
        Ok(Some(self.price.into_vec()))
    }
}

impl LlpInstance for Johnson<'_> {
    fn len(&self) -> usize {
        self.graph.len()
    }

    fn eligible(&self, v: usize) -> bool {
        // SAFETY: `budget` is written only in advance phases, never during
        // a collect.
        unsafe { self.budget.read(v) >= 0 }
    }

    fn forbidden(&self, _forb_idx: usize, v: usize) -> bool {
        // SAFETY: collect phases read `price` (no writer in flight) and
        // write only this task's own `new_price` slot.
        unsafe {
            let current = self.price.read(v);
            let mut highest = current;
            for &u in self.graph.parents(v) {
                let demanded = self.price.read(u) - self.graph.weight(u, v);
                if demanded > highest {
                    highest = demanded;
                }
            }
            if highest > current {
                self.new_price.write(v, highest);
                true
            } else {
                false
            }
        }
    }

    fn advance_step(&self, _step_idx: usize, v: usize) {
        // SAFETY: each wave task owns `price[v]` and `budget[v]`;
        // `new_price` has no writer in this phase.
        unsafe {
            let staged = self.new_price.read(v);
            self.price.write(v, staged);
            let remaining = self.budget.read(v);
            if remaining == 0 {
                self.neg_cycle.store(true, Ordering::Relaxed);
            }
            self.budget.write(v, remaining - 1);
        }
    }
}
