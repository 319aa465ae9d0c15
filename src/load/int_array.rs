use super::LineReader;
use crate::error::LoadError;
use crate::types::Weight;
use std::io::BufRead;
use std::path::Path;

/// Load an integer array: first non-blank line holds `n`, followed by `n`
/// whitespace-separated integers across any number of lines. Anything
/// beyond the `n`-th integer is an error.
///
/// # Errors
/// [`LoadError`] on I/O failure or malformed content.
pub fn int_array(path: impl AsRef<Path>) -> Result<Vec<Weight>, LoadError> {
    parse(LineReader::open(path.as_ref())?)
}

fn parse<R: BufRead>(mut reader: LineReader<R>) -> Result<Vec<Weight>, LoadError> {
    let n = reader.read_count("element count")?;

    let mut values = Vec::with_capacity(n);
    while values.len() < n {
        let Some(line) = reader.next_line()? else {
            return Err(reader.format_err(format!(
                "expected {n} integers, found only {}",
                values.len()
            )));
        };
        for token in line.split_whitespace() {
            if values.len() == n {
                return Err(reader.format_err(format!("extra data beyond {n} integers: {token:?}")));
            }
            values.push(reader.parse_int(token)?);
        }
    }

    // Only blank lines may follow.
    while let Some(line) = reader.next_line()? {
        if let Some(token) = line.split_whitespace().next() {
            return Err(reader.format_err(format!("extra data beyond {n} integers: {token:?}")));
        }
    }

    Ok(values)
}
