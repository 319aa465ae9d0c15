use thiserror::Error;

/// Errors surfaced by the parallel solve machinery.
///
/// Negative-cycle detection is deliberately *not* an error: it is a
/// diagnostic result reported through the instance's output type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SolveError {
    /// A worker task panicked. The wave was abandoned at its barrier and the
    /// first observed payload is carried here; partial state mutations are
    /// not rolled back because instances are one-shot.
    #[error("worker task failed: {0}")]
    Worker(String),
    /// The backing thread pool could not be built.
    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Errors produced by the text loaders, before any worker starts.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The input file could not be opened or read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Malformed input: a bad token, wrong arity, a truncated file,
    /// trailing content, or an out-of-range vertex index.
    #[error("line {line}: {msg}")]
    Format {
        /// 1-based line number of the offending input line.
        line: usize,
        /// What was wrong with it.
        msg: String,
    },
    /// A structurally valid but unacceptable value, such as a negative
    /// element count or a non-positive problem size.
    #[error("line {line}: {msg}")]
    InvalidArgument {
        /// 1-based line number of the offending input line.
        line: usize,
        /// What was wrong with it.
        msg: String,
    },
}

/// Errors from the name-keyed dispatcher.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DispatchError {
    /// The algorithm name is not one of the dispatchable instances.
    #[error(
        "unknown algorithm {0:?} (expected one of: Reduce, PrefixSum, \
         BellmanFord, Johnson, FastComp, GaleShapley, Boruvka)"
    )]
    UnknownAlgorithm(String),
    /// The requested source vertex does not exist in the loaded graph.
    #[error("source vertex {requested} out of range for a graph with {vertices} vertices")]
    InvalidSource {
        /// Requested start vertex.
        requested: usize,
        /// Vertex count of the loaded graph.
        vertices: usize,
    },
    /// The input file was rejected by its loader.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// The solve itself failed.
    #[error(transparent)]
    Solve(#[from] SolveError),
}
