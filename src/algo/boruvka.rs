use crate::bitset::BitSet;
use crate::error::SolveError;
use crate::graph::{Edge, UndirectedGraph};
use crate::kernel::{Kernel, LlpInstance};
use crate::state::StateVec;
use crate::types::{IndexSet, Weight};
use std::sync::{Mutex, PoisonError};

/// Outer forbidden predicate: the component has an outgoing edge.
const FORB_OUTGOING: usize = 0;
/// Inner forbidden predicate: the leader vector is not yet flat.
const FORB_JUMP: usize = 1;

/// Parallel Borůvka minimum spanning forest.
///
/// The state is a leader vector `p` running *downward*: `p[v]` starts at
/// `v` and sinks toward the smallest index of `v`'s merged component. A
/// component is forbidden while it has an edge leaving it. Each wave stages
/// the cheapest outgoing edge per forbidden component from an immutable
/// snapshot, commits the hooks (and the chosen edges into the spanning
/// set) sequentially in ascending leader order, then flattens the leader
/// forest by pointer jumping. Ties break on `(weight, u, v)`, so the
/// result is deterministic.
#[must_use]
pub struct Boruvka<'g> {
    kernel: Kernel,
    graph: &'g UndirectedGraph,
    p: StateVec<usize>,
    choice: StateVec<Option<Edge>>,
    jump: StateVec<usize>,
    inner_wave: BitSet,
    chosen: Mutex<IndexSet<Edge>>,
}

/// Outcome of a [`Boruvka`] solve: a minimum spanning forest.
#[must_use]
#[derive(Debug, Clone)]
pub struct SpanningForest {
    /// Component leader per vertex: the smallest index in its component.
    pub leaders: Vec<usize>,
    /// The forest's edges, deduplicated, in the order they were committed.
    pub edges: Vec<Edge>,
}

impl SpanningForest {
    /// Sum of the forest's edge weights.
    #[must_use]
    pub fn total_weight(&self) -> Weight {
        self.edges.iter().map(|e| e.weight).sum()
    }

    /// Number of distinct components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        let mut leaders: Vec<usize> = self.leaders.clone();
        leaders.sort_unstable();
        leaders.dedup();
        leaders.len()
    }
}

impl<'g> Boruvka<'g> {
    /// Build the instance with every vertex leading itself.
    ///
    /// # Errors
    /// If the worker pool cannot be built.
    pub fn new(graph: &'g UndirectedGraph) -> Result<Self, SolveError> {
        let n = graph.len();
        Ok(Self {
            kernel: Kernel::new(n)?,
            graph,
            p: StateVec::from_vec((0..n).collect()),
            choice: StateVec::filled(n, None),
            jump: StateVec::filled(n, 0),
            inner_wave: BitSet::new(n),
            chosen: Mutex::new(IndexSet::default()),
        })
    }

    /// Run to quiescence and return the spanning forest.
    ///
    /// # Errors
    /// Propagates worker failures.
    pub fn solve(self) -> Result<SpanningForest, SolveError> {
        self.kernel.solve(&self)?;
        let chosen = self.chosen.into_inner().unwrap_or_else(PoisonError::into_inner);
        Ok(SpanningForest { leaders: self.p.into_vec(), edges: chosen.into_iter().collect() })
    }

    /// The cheapest edge leaving the component led by `leader`, on the
    /// current snapshot of `p`. Reads only.
    ///
    /// # Safety
    /// Callable only in phases with no writer of `p` in flight.
    unsafe fn cheapest_outgoing(&self, leader: usize) -> Option<Edge> {
        let mut best: Option<Edge> = None;
        for member in 0..self.graph.len() {
            // SAFETY: forwarded from the caller.
            if unsafe { self.p.read(member) } != leader {
                continue;
            }
            for &edge_id in self.graph.incident(member) {
                let edge = self.graph.edges()[edge_id];
                // SAFETY: forwarded from the caller.
                if unsafe { self.p.read(edge.other(member)) } == leader {
                    continue;
                }
                if best.is_none_or(|b| edge < b) {
                    best = Some(edge);
                }
            }
        }
        best
    }
}

impl LlpInstance for Boruvka<'_> {
    fn len(&self) -> usize {
        self.graph.len()
    }

    fn num_forbiddens(&self) -> usize {
        2
    }

    fn forbidden(&self, forb_idx: usize, v: usize) -> bool {
        // SAFETY: collect phases read `p` (no writer in flight); the jump
        // variant writes only this task's own `jump` slot.
        unsafe {
            match forb_idx {
                FORB_OUTGOING => {
                    let leader = self.p.read(v);
                    self.cheapest_outgoing(leader).is_some()
                }
                _ => {
                    let parent = self.p.read(v);
                    let grandparent = self.p.read(parent);
                    if parent != grandparent {
                        self.jump.write(v, grandparent);
                        true
                    } else {
                        false
                    }
                }
            }
        }
    }

    fn advance_step(&self, _step_idx: usize, v: usize) {
        // The staging half of the wave: leaders pick their cheapest
        // outgoing edge against the frozen snapshot. The commit lives in
        // the `advance` override.
        //
        // SAFETY: this phase reads `p` and writes only this task's own
        // `choice` slot.
        unsafe {
            if self.p.read(v) != v {
                return;
            }
            let best = self.cheapest_outgoing(v);
            self.choice.write(v, best);
        }
    }

    fn advance(&self, kernel: &Kernel, wave: &BitSet) -> Result<(), SolveError> {
        // Stage the per-leader choices in parallel.
        kernel.run_advance_steps(self, wave)?;

        // Commit sequentially, in ascending leader order: record the edge
        // and hook the leader onto the smaller partner leader. Sequential
        // commits keep the edge set deterministic and let chains of hooks
        // resolve through the jump pass below.
        {
            let mut chosen = self.chosen.lock().unwrap_or_else(PoisonError::into_inner);
            for leader in wave.iter() {
                // SAFETY: single-threaded section between barriers.
                unsafe {
                    if self.p.read(leader) != leader {
                        continue;
                    }
                    let Some(edge) = self.choice.read(leader) else {
                        continue;
                    };
                    chosen.insert(edge);
                    let lu = self.p.read(edge.u);
                    let lv = self.p.read(edge.v);
                    let partner = if lu == leader { lv } else { lu };
                    if partner < leader {
                        self.p.write(leader, partner);
                    }
                }
            }
        }

        // Flatten the hook chains into a flat leader vector.
        while kernel.collect_forbidden(self, FORB_JUMP, &self.inner_wave)? {
            kernel.for_each_in(&self.inner_wave, |v| {
                // SAFETY: each task commits only its own `p` slot from its
                // own staged `jump` slot.
                unsafe {
                    let staged = self.jump.read(v);
                    self.p.write(v, staged);
                }
            })?;
        }
        Ok(())
    }
}
