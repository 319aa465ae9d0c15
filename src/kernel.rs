use crate::bitset::BitSet;
use crate::error::SolveError;
use crate::pool::WorkerPool;
use tracing::{debug, trace};

/// Predicate over indices, used by per-step selection overrides.
pub type IndexPredicate<'a> = Box<dyn Fn(usize) -> bool + Sync + 'a>;

/// The hook bundle an algorithm supplies to the [`Kernel`].
///
/// An instance owns a state vector over the dense index domain
/// `[0, len())`, sitting in a product lattice. The kernel repeatedly asks
/// which indices are *forbidden* (their local state violates the instance's
/// invariant) and tells the instance to *advance* them one monotone step,
/// until no eligible index is forbidden.
///
/// Hook contract, enforced by the kernel's phase schedule:
///
/// - [`forbidden`](LlpInstance::forbidden) runs in parallel over all
///   indices against a frozen state snapshot. It may *stage* a proposal in
///   a scratch slot owned by its index, and nothing else.
/// - [`advance_step`](LlpInstance::advance_step) runs in parallel over the
///   wave, one ordered sub-step at a time with a barrier between sub-steps.
///   Each invocation writes only coordinates owned by its index, and reads
///   only state no task of the same sub-step writes.
/// - A successful advance strictly raises every advanced coordinate in the
///   instance's lattice order, which is what bounds the outer loop.
pub trait LlpInstance: Sync {
    /// Size of the index domain.
    fn len(&self) -> usize;

    /// Whether the instance has an empty index domain.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether index `v` may be reported forbidden this iteration.
    fn eligible(&self, v: usize) -> bool {
        let _ = v;
        true
    }

    /// Number of forbidden-predicate variants (at least 1). Variant 0
    /// drives the outer loop; further variants serve instance-internal
    /// fixed points.
    fn num_forbiddens(&self) -> usize {
        1
    }

    /// Whether index `v` is forbidden under variant `forb_idx`. May stage a
    /// proposal for the advance to commit.
    fn forbidden(&self, forb_idx: usize, v: usize) -> bool;

    /// Number of ordered sub-steps per advance wave (at least 1).
    fn num_advance_steps(&self) -> usize {
        1
    }

    /// Perform sub-step `step_idx` on index `v`.
    fn advance_step(&self, step_idx: usize, v: usize);

    /// Index set override for sub-step `step_idx`.
    ///
    /// `None` runs the sub-step over the wave set; `Some(pred)` runs it
    /// over exactly the indices satisfying `pred` instead. The predicate is
    /// consulted after the previous sub-step's barrier.
    fn selection_for_step(&self, step_idx: usize) -> Option<IndexPredicate<'_>> {
        let _ = step_idx;
        None
    }

    /// Advance every index in `wave` by one monotone step.
    ///
    /// The default runs the declared sub-steps through
    /// [`Kernel::run_advance_steps`]. Instances with inner fixed points
    /// override this and drive the kernel themselves.
    ///
    /// # Errors
    /// Propagates worker failures from the kernel.
    fn advance(&self, kernel: &Kernel, wave: &BitSet) -> Result<(), SolveError>
    where
        Self: Sized,
    {
        kernel.run_advance_steps(self, wave)
    }
}

/// The LLP fixed-point driver.
///
/// Owns the worker pool and provides the bulk-synchronous operations the
/// instances are built from: parallel forbidden collection and the phased
/// advance. Dropping the kernel releases the pool.
#[must_use]
pub struct Kernel {
    pool: WorkerPool,
}

impl Kernel {
    /// Build a kernel for an index domain of size `n`.
    ///
    /// # Errors
    /// If the worker pool cannot be built.
    pub fn new(n: usize) -> Result<Self, SolveError> {
        Ok(Self { pool: WorkerPool::new(n)? })
    }

    /// Clear `out`, then mark every eligible index that is forbidden under
    /// variant `forb_idx`, in parallel against the current state snapshot.
    /// Returns whether any index was marked.
    ///
    /// No advance runs concurrently with a collect, so every predicate
    /// evaluation of one collect sees the same state.
    ///
    /// # Errors
    /// Propagates worker failures.
    pub fn collect_forbidden<I: LlpInstance>(
        &self,
        instance: &I,
        forb_idx: usize,
        out: &BitSet,
    ) -> Result<bool, SolveError> {
        debug_assert!(forb_idx < instance.num_forbiddens());
        out.clear();
        self.pool.invoke_range(0..instance.len(), |v| {
            if instance.eligible(v) && instance.forbidden(forb_idx, v) {
                out.set(v);
            }
        })?;
        Ok(!out.is_empty())
    }

    /// Run the instance's ordered advance sub-steps for one wave.
    ///
    /// Each sub-step is a parallel batch joined before the next begins:
    /// writes of sub-step `k` are visible to reads of sub-step `k + 1`.
    /// A sub-step runs over `wave`, unless the instance supplies a
    /// selection predicate for it.
    ///
    /// # Errors
    /// Propagates worker failures.
    pub fn run_advance_steps<I: LlpInstance>(
        &self,
        instance: &I,
        wave: &BitSet,
    ) -> Result<(), SolveError> {
        for step in 0..instance.num_advance_steps() {
            trace!(step, "advance sub-step");
            match instance.selection_for_step(step) {
                Some(select) => self.for_each_where(instance.len(), &select, |v| {
                    instance.advance_step(step, v);
                })?,
                None => self.for_each_in(wave, |v| instance.advance_step(step, v))?,
            }
        }
        Ok(())
    }

    /// Invoke `work` in parallel for every index in `set`, and join.
    ///
    /// # Errors
    /// Propagates worker failures.
    pub fn for_each_in<F>(&self, set: &BitSet, work: F) -> Result<(), SolveError>
    where
        F: Fn(usize) + Sync,
    {
        let indices: Vec<usize> = set.iter().collect();
        self.pool.invoke_indices(&indices, work)
    }

    /// Invoke `work` in parallel for every index in `[0, n)` satisfying
    /// `select`, and join.
    ///
    /// # Errors
    /// Propagates worker failures.
    pub fn for_each_where<F>(
        &self,
        n: usize,
        select: &IndexPredicate<'_>,
        work: F,
    ) -> Result<(), SolveError>
    where
        F: Fn(usize) + Sync,
    {
        self.pool.invoke_range(0..n, |v| {
            if select(v) {
                work(v);
            }
        })
    }

    /// Drive the default outer loop to the fixed point:
    /// collect the forbidden wave, advance it, repeat until empty.
    ///
    /// # Errors
    /// Propagates worker failures; the instance is left partially advanced
    /// and must be discarded.
    pub fn solve<I: LlpInstance>(&self, instance: &I) -> Result<(), SolveError> {
        let wave = BitSet::new(instance.len());
        let mut iterations = 0usize;
        while self.collect_forbidden(instance, 0, &wave)? {
            iterations += 1;
            debug!(iteration = iterations, forbidden = wave.cardinality(), "advance wave");
            instance.advance(self, &wave)?;
        }
        debug!(iterations, "fixed point reached");
        Ok(())
    }
}
