//! Graph value types shared by the algorithm instances.
//!
//! Two representations, matching what the instances consume:
//! a dense weighted directed graph with per-vertex parent lists
//! ([`DiGraph`]), and a weighted undirected edge list with per-vertex
//! incidence ([`UndirectedGraph`]).

mod digraph;
mod undirected;

pub use digraph::DiGraph;
pub use undirected::{Edge, UndirectedGraph};
