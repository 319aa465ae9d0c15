//! Parallel graph and array algorithms under one abstraction: the
//! lattice-linear-predicate (LLP) kernel.
//!
//! Every algorithm here is an instance of the same monotone fixed-point
//! iteration over a product lattice. An instance owns a state vector over
//! a dense index domain and supplies three things:
//! - a *forbidden predicate*: index `v` violates its local invariant and
//!   must move;
//! - an *advance step* (or several, ordered): raise `v` one monotone step
//!   in the lattice;
//! - optionally an *eligibility* filter and per-step index selections.
//!
//! The kernel drives the loop: collect every forbidden index in parallel,
//! advance the wave in barrier-separated sub-steps, repeat until no index
//! is forbidden. Strict monotone progress in a finite-height lattice is
//! what terminates it. Instances with inner fixed points (pointer jumping)
//! override the advance and reuse the same machinery.
//!
//! Shipped instances: reduction and prefix sums over arrays; Bellman–Ford
//! distances and Johnson's price function with negative-cycle detection;
//! connected components by hooking and pointer jumping; Borůvka's minimum
//! spanning forest; Gale–Shapley stable matching.
//!
//! Quick start:
//!
//! ```rust
//! use llp::algo::PrefixSum;
//!
//! let sums = PrefixSum::new(&[1, 2, 3, 4])?.solve()?;
//! assert_eq!(sums, vec![1, 3, 6, 10]);
//! # Ok::<(), llp::SolveError>(())
//! ```
//!
//! The `llp` binary exposes the same instances over text input files; see
//! [`dispatch`].

#![warn(missing_docs)]

/// The algorithm instances: one module per lattice.
pub mod algo;
/// The atomic index set used for forbidden waves.
pub mod bitset;
/// Name-keyed selection over the instances, for the CLI.
pub mod dispatch;
/// Error types for solving, loading and dispatching.
pub mod error;
/// Graph value types consumed by the instances.
pub mod graph;
/// The fixed-point driver and the instance hook trait.
pub mod kernel;
/// Text loaders for the dispatcher's input formats.
pub mod load;
/// The worker pool executing bulk-synchronous phases.
pub mod pool;
/// Interior-mutable per-index state vectors.
pub mod state;
mod sync;
/// Weights, sentinels and shared small helpers.
pub mod types;

pub use error::{DispatchError, LoadError, SolveError};
pub use kernel::{Kernel, LlpInstance};
pub use types::{safe_add, Weight, INF};
