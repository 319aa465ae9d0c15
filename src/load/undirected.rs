use super::LineReader;
use crate::error::LoadError;
use crate::graph::DiGraph;
use std::io::BufRead;
use std::path::Path;

/// Load an unweighted undirected graph as a symmetric directed one: first
/// non-blank line holds `n`, then `n` lines of neighbors separated by
/// commas and/or whitespace (`*` or blank for none). Every neighbor pair
/// is inserted in both directions with weight 1; self-loops are skipped.
///
/// # Errors
/// [`LoadError`] on I/O failure or malformed content.
pub fn undirected_as_directed(path: impl AsRef<Path>) -> Result<DiGraph, LoadError> {
    parse(LineReader::open(path.as_ref())?)
}

fn parse<R: BufRead>(mut reader: LineReader<R>) -> Result<DiGraph, LoadError> {
    let n = reader.read_count("vertex count")?;
    let mut graph = DiGraph::new(n);

    for u in 0..n {
        let line = reader.require_line(&format!("neighbors for vertex {u}"))?;
        for value in reader.parse_loose(&line)? {
            let v = reader.check_vertex(value, n, "neighbor")?;
            if v == u {
                continue;
            }
            graph.add_edge(u, v, 1);
            graph.add_edge(v, u, 1);
        }
    }
    Ok(graph)
}
