use crate::error::SolveError;
use std::any::Any;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};

/// Fixed-size worker pool executing index-keyed task batches.
///
/// The pool exposes a single primitive, *invoke-all-and-join*: dispatch one
/// unit of work per index and block until every unit has completed. Each
/// batch is a bulk-synchronous phase; the join doubles as the barrier that
/// publishes every write made inside the phase to the next one.
///
/// Work is distributed by recursive halving over [`rayon::join`], down to
/// single-index leaves, so any number of logical tasks shares the bounded
/// set of worker threads. The threads are released when the pool is
/// dropped, on every exit path.
#[must_use]
pub struct WorkerPool {
    pool: rayon::ThreadPool,
}

/// Worker cap, as a multiple of the machine's available parallelism.
const HARDWARE_MULTIPLIER: usize = 2;

impl WorkerPool {
    /// Build a pool sized for `task_hint` concurrent units of work, capped
    /// at a small multiple of the hardware parallelism.
    ///
    /// # Errors
    /// If the underlying thread pool cannot be built.
    pub fn new(task_hint: usize) -> Result<Self, SolveError> {
        let hardware = std::thread::available_parallelism().map_or(1, usize::from);
        let threads = task_hint.clamp(1, hardware * HARDWARE_MULTIPLIER);
        let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
        Ok(Self { pool })
    }

    /// Invoke `work` for every index in `range`, in parallel, and join.
    ///
    /// No ordering is guaranteed among the indices of one batch. Returns
    /// only once every unit has run; if any unit panics the whole batch
    /// fails with the first observed payload.
    ///
    /// # Errors
    /// [`SolveError::Worker`] if any unit of work panicked.
    pub fn invoke_range<F>(&self, range: Range<usize>, work: F) -> Result<(), SolveError>
    where
        F: Fn(usize) + Sync,
    {
        if range.is_empty() {
            return Ok(());
        }
        catch_batch(|| self.pool.install(|| join_range(range, &work)))
    }

    /// Invoke `work` for every index in `indices`, in parallel, and join.
    ///
    /// Same contract as [`WorkerPool::invoke_range`].
    ///
    /// # Errors
    /// [`SolveError::Worker`] if any unit of work panicked.
    pub fn invoke_indices<F>(&self, indices: &[usize], work: F) -> Result<(), SolveError>
    where
        F: Fn(usize) + Sync,
    {
        if indices.is_empty() {
            return Ok(());
        }
        catch_batch(|| self.pool.install(|| join_indices(indices, &work)))
    }
}

/// Run one batch, converting a worker panic into [`SolveError::Worker`].
///
/// `rayon::join` waits for both halves before resuming the unwind, so by
/// the time the payload reaches this frame every task of the batch has
/// finished and the failed task's partial writes are already published.
fn catch_batch(run: impl FnOnce()) -> Result<(), SolveError> {
    panic::catch_unwind(AssertUnwindSafe(run))
        .map_err(|payload| SolveError::Worker(panic_message(payload.as_ref())))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_owned()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "worker panicked with a non-string payload".to_owned()
    }
}

fn join_range<F>(range: Range<usize>, work: &F)
where
    F: Fn(usize) + Sync,
{
    match range.len() {
        0 => (),
        1 => work(range.start),
        _ => {
            let (left, right) = split_at_half(&range);
            rayon::join(|| join_range(left, work), || join_range(right, work));
        }
    }
}

fn join_indices<F>(indices: &[usize], work: &F)
where
    F: Fn(usize) + Sync,
{
    match indices {
        [] => (),
        &[index] => work(index),
        _ => {
            let (left, right) = indices.split_at(indices.len() / 2);
            rayon::join(|| join_indices(left, work), || join_indices(right, work));
        }
    }
}

#[inline]
fn split_at_half(range: &Range<usize>) -> (Range<usize>, Range<usize>) {
    let len = range.end.checked_sub(range.start).expect("split_at_half: inverted range");
    let mid = range.start + len / 2;
    (range.start..mid, mid..range.end)
}
