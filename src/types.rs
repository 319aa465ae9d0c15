use crate::sync::UnsafeCell;
use derive_more::{Deref, DerefMut};
use indexmap::IndexSet as _IndexSet;
use rustc_hash::FxBuildHasher;

/// Edge weight and state-vector value type.
///
/// All algorithm state lives in product lattices over `Weight` coordinates,
/// so a single signed integer type covers distances, prices, sums and the
/// tree values alike.
pub type Weight = i64;

/// Sentinel for "no edge" / "unreachable" / "not yet reached".
///
/// A quarter of the representable range so that one saturating addition of
/// two in-range values can never wrap (see [`safe_add`]).
pub const INF: Weight = Weight::MAX / 4;

/// Addition that saturates at `±INF`.
///
/// Anything already in the upper half of the sentinel range is treated as
/// unreachable and stays `INF`; finite sums are clamped into `[-INF, INF]`.
#[must_use]
pub fn safe_add(a: Weight, b: Weight) -> Weight {
    if a >= INF / 2 {
        return INF;
    }
    (a + b).clamp(-INF, INF)
}

/// `IndexSet` with a fast non-cryptographic hasher.
pub(crate) type IndexSet<T> = _IndexSet<T, FxBuildHasher>;

/// A minimal `UnsafeCell` wrapper that is `Sync` for shareable contents.
///
/// Used by [`crate::state::StateVec`] to allow many workers to address
/// disjoint slots of one state vector through a shared reference.
/// Correctness is ensured by scheduling: within any parallel phase each
/// slot has at most one writer and no reader that races a writer.
#[derive(Deref, DerefMut)]
#[repr(transparent)]
pub(crate) struct SyncUnsafeCell<T>(UnsafeCell<T>);

unsafe impl<T: Send + Sync> Sync for SyncUnsafeCell<T> {}

impl<T> SyncUnsafeCell<T> {
    pub(crate) fn new(val: T) -> Self {
        Self(UnsafeCell::new(val))
    }

    pub(crate) fn into_inner(self) -> T {
        self.0.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_add_saturates_high() {
        assert_eq!(safe_add(INF, 5), INF);
        assert_eq!(safe_add(INF, -5), INF);
        assert_eq!(safe_add(INF / 2, 0), INF);
    }

    #[test]
    fn safe_add_finite() {
        assert_eq!(safe_add(3, 4), 7);
        assert_eq!(safe_add(3, -4), -1);
    }

    #[test]
    fn safe_add_clamps_low() {
        assert_eq!(safe_add(-INF, -INF), -INF);
    }
}
