//! The algorithm instances driven by the LLP kernel.
//!
//! Each instance binds a concrete lattice to the
//! [`LlpInstance`](crate::kernel::LlpInstance) hooks: its state vector and
//! bottom element, its forbidden predicate(s), and its advance step(s).
//! Instances are one-shot: construct, `solve`, and the consumed instance
//! projects its state into the caller-visible result.

mod bellman_ford;
mod boruvka;
mod fast_comp;
mod gale_shapley;
mod johnson;
mod prefix_sum;
mod reduce;

pub use bellman_ford::{BellmanFord, ShortestPaths};
pub use boruvka::{Boruvka, SpanningForest};
pub use fast_comp::FastComp;
pub use gale_shapley::{GaleShapley, MatchingProblem, UNMATCHED};
pub use johnson::Johnson;
pub use prefix_sum::PrefixSum;
pub use reduce::Reduce;
