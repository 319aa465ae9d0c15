use super::LineReader;
use crate::error::LoadError;
use crate::graph::DiGraph;
use std::io::BufRead;
use std::path::Path;

/// Load a weighted directed graph in matrix form: first non-blank line
/// holds `n`; then, for each vertex, two lines: a comma-separated list of
/// destinations and a matching list of weights (`*` or blank for none).
///
/// # Errors
/// [`LoadError`] on I/O failure or malformed content.
pub fn directed_matrix(path: impl AsRef<Path>) -> Result<DiGraph, LoadError> {
    parse(LineReader::open(path.as_ref())?)
}

fn parse<R: BufRead>(mut reader: LineReader<R>) -> Result<DiGraph, LoadError> {
    let n = reader.read_count("vertex count")?;
    let mut graph = DiGraph::new(n);

    for v in 0..n {
        let dest_line = reader.require_line(&format!("destinations for vertex {v}"))?;
        let dests = reader.parse_csv(&dest_line)?;
        let weight_line = reader.require_line(&format!("weights for vertex {v}"))?;
        let weights = reader.parse_csv(&weight_line)?;

        if dests.len() != weights.len() {
            return Err(reader.format_err(format!(
                "vertex {v} has {} destinations but {} weights",
                dests.len(),
                weights.len()
            )));
        }
        for (&dest, &weight) in dests.iter().zip(&weights) {
            let to = reader.check_vertex(dest, n, "destination")?;
            graph.add_edge(v, to, weight);
        }
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::INF;
    use std::io::Cursor;

    fn load(text: &str) -> Result<DiGraph, LoadError> {
        parse(LineReader::new(Cursor::new(text.to_owned())))
    }

    #[test]
    fn edges_weights_and_parents() {
        let g = load("3\n1,2\n10, -1\n*\n*\n\n\n").unwrap();
        assert_eq!(g.len(), 3);
        assert_eq!(g.weight(0, 1), 10);
        assert_eq!(g.weight(0, 2), -1);
        assert_eq!(g.weight(1, 2), INF);
        assert_eq!(g.parents(1), &[0]);
        assert_eq!(g.parents(2), &[0]);
    }

    #[test]
    fn star_and_blank_both_mean_no_edges() {
        let g = load("2\n*\n*\n\n\n").unwrap();
        assert!(g.parents(0).is_empty() && g.parents(1).is_empty());
    }

    #[test]
    fn arity_mismatch_rejected() {
        let err = load("2\n1\n3,4\n*\n*\n").unwrap_err();
        assert!(err.to_string().contains("1 destinations but 2 weights"), "{err}");
    }

    #[test]
    fn out_of_range_destination_rejected() {
        let err = load("2\n2\n5\n*\n*\n").unwrap_err();
        assert!(err.to_string().contains("out of range"), "{err}");
    }

    #[test]
    fn truncated_file_rejected() {
        let err = load("2\n1\n5\n").unwrap_err();
        assert!(err.to_string().contains("end of file"), "{err}");
    }

    #[test]
    fn empty_graph() {
        let g = load("0\n").unwrap();
        assert!(g.is_empty());
    }
}
