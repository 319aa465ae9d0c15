use super::LineReader;
use crate::error::LoadError;
use crate::graph::UndirectedGraph;
use std::io::BufRead;
use std::path::Path;

/// Load a weighted undirected edge list: line 1 holds `n > 0`, line 2
/// holds `m >= 0`, then `m` lines of `u v w`.
///
/// # Errors
/// [`LoadError`] on I/O failure or malformed content.
pub fn weighted_edge_list(path: impl AsRef<Path>) -> Result<UndirectedGraph, LoadError> {
    parse(LineReader::open(path.as_ref())?)
}

fn parse<R: BufRead>(mut reader: LineReader<R>) -> Result<UndirectedGraph, LoadError> {
    let n = reader.read_count("vertex count")?;
    if n == 0 {
        return Err(reader.invalid_arg("vertex count must be positive"));
    }
    let m = reader.read_count("edge count")?;

    let mut graph = UndirectedGraph::new(n);
    for i in 0..m {
        let line = reader.require_line(&format!("edge {i}"))?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        let &[u, v, w] = fields.as_slice() else {
            return Err(reader.format_err(format!(
                "expected 3 values per edge, got {}",
                fields.len()
            )));
        };
        let u = reader.check_vertex(reader.parse_int(u)?, n, "endpoint")?;
        let v = reader.check_vertex(reader.parse_int(v)?, n, "endpoint")?;
        let w = reader.parse_int(w)?;
        graph.add_edge(u, v, w);
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn load(text: &str) -> Result<UndirectedGraph, LoadError> {
        parse(LineReader::new(Cursor::new(text.to_owned())))
    }

    #[test]
    fn edges_with_incidence() {
        let g = load("4\n3\n0 1 10\n0 2 6\n2 3 4\n").unwrap();
        assert_eq!(g.len(), 4);
        assert_eq!(g.edges().len(), 3);
        assert_eq!(g.incident(0).len(), 2);
        assert_eq!(g.incident(3).len(), 1);
        let e = g.edges()[2];
        assert_eq!((e.u, e.v, e.weight), (2, 3, 4));
    }

    #[test]
    fn zero_edges() {
        let g = load("2\n0\n").unwrap();
        assert!(g.edges().is_empty());
    }

    #[test]
    fn zero_vertices_rejected() {
        let err = load("0\n0\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidArgument { .. }), "{err}");
    }

    #[test]
    fn wrong_arity_rejected() {
        let err = load("2\n1\n0 1\n").unwrap_err();
        assert!(err.to_string().contains("3 values"), "{err}");
    }

    #[test]
    fn missing_edge_line_rejected() {
        let err = load("2\n2\n0 1 5\n").unwrap_err();
        assert!(err.to_string().contains("end of file"), "{err}");
    }

    #[test]
    fn out_of_range_endpoint_rejected() {
        let err = load("2\n1\n0 2 5\n").unwrap_err();
        assert!(err.to_string().contains("out of range"), "{err}");
    }
}
