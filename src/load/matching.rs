use super::LineReader;
use crate::algo::MatchingProblem;
use crate::error::LoadError;
use std::io::BufRead;
use std::path::Path;

/// Load a stable-matching problem: line 1 holds `n > 0`, then `n` rows of
/// men's preferences and `n` rows of women's preferences, each row exactly
/// `n` whitespace-separated ids, most preferred first.
///
/// # Errors
/// [`LoadError`] on I/O failure or malformed content.
pub fn matching_problem(path: impl AsRef<Path>) -> Result<MatchingProblem, LoadError> {
    parse(LineReader::open(path.as_ref())?)
}

fn parse<R: BufRead>(mut reader: LineReader<R>) -> Result<MatchingProblem, LoadError> {
    let n = reader.read_count("problem size")?;
    if n == 0 {
        return Err(reader.invalid_arg("problem size must be positive"));
    }

    let men_prefs = read_table(&mut reader, n, "man")?;
    let women_prefs = read_table(&mut reader, n, "woman")?;
    Ok(MatchingProblem::new(men_prefs, women_prefs))
}

fn read_table<R: BufRead>(
    reader: &mut LineReader<R>,
    n: usize,
    who: &str,
) -> Result<Vec<Vec<usize>>, LoadError> {
    (0..n)
        .map(|row| {
            let line = reader.require_line(&format!("preferences for {who} {row}"))?;
            let values = reader.parse_loose(&line)?;
            if values.len() != n {
                return Err(reader.format_err(format!(
                    "expected {n} preferences for {who} {row}, got {}",
                    values.len()
                )));
            }
            values
                .into_iter()
                .map(|v| reader.check_vertex(v, n, "preference entry"))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn load(text: &str) -> Result<MatchingProblem, LoadError> {
        parse(LineReader::new(Cursor::new(text.to_owned())))
    }

    #[test]
    fn well_formed() {
        let p = load("2\n0 1\n1 0\n0 1\n1 0\n").unwrap();
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn zero_size_rejected() {
        let err = load("0\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidArgument { .. }), "{err}");
    }

    #[test]
    fn short_row_rejected() {
        let err = load("2\n0\n1 0\n0 1\n1 0\n").unwrap_err();
        assert!(err.to_string().contains("expected 2 preferences for man 0"), "{err}");
    }

    #[test]
    fn out_of_range_entry_rejected() {
        let err = load("2\n0 2\n1 0\n0 1\n1 0\n").unwrap_err();
        assert!(err.to_string().contains("out of range"), "{err}");
    }

    #[test]
    fn truncated_rejected() {
        let err = load("2\n0 1\n1 0\n0 1\n").unwrap_err();
        assert!(err.to_string().contains("woman 1"), "{err}");
    }
}
