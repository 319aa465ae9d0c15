use crate::error::LoadError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Line-oriented reader that tracks the 1-based position for error
/// reporting. All loaders parse through one of these.
pub(crate) struct LineReader<R> {
    lines: std::io::Lines<R>,
    line_no: usize,
}

impl LineReader<BufReader<File>> {
    pub(crate) fn open(path: &Path) -> Result<Self, LoadError> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> LineReader<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self { lines: reader.lines(), line_no: 0 }
    }

    /// Next line, trimmed; `None` at end of input.
    pub(crate) fn next_line(&mut self) -> Result<Option<String>, LoadError> {
        match self.lines.next() {
            None => Ok(None),
            Some(line) => {
                self.line_no += 1;
                Ok(Some(line?.trim().to_owned()))
            }
        }
    }

    /// Next non-blank line; `None` if only blanks remain.
    pub(crate) fn next_non_blank(&mut self) -> Result<Option<String>, LoadError> {
        while let Some(line) = self.next_line()? {
            if !line.is_empty() {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    /// Next line, or a format error naming what was expected.
    pub(crate) fn require_line(&mut self, what: &str) -> Result<String, LoadError> {
        self.next_line()?.ok_or_else(|| LoadError::Format {
            line: self.line_no + 1,
            msg: format!("unexpected end of file while reading {what}"),
        })
    }

    /// A format error at the current position.
    pub(crate) fn format_err(&self, msg: impl Into<String>) -> LoadError {
        LoadError::Format { line: self.line_no, msg: msg.into() }
    }

    /// An invalid-argument error at the current position.
    pub(crate) fn invalid_arg(&self, msg: impl Into<String>) -> LoadError {
        LoadError::InvalidArgument { line: self.line_no, msg: msg.into() }
    }

    /// Parse one integer token.
    pub(crate) fn parse_int(&self, token: &str) -> Result<i64, LoadError> {
        token
            .parse()
            .map_err(|_| self.format_err(format!("expected an integer, found {token:?}")))
    }

    /// The leading element count: first non-blank line, non-negative.
    pub(crate) fn read_count(&mut self, what: &str) -> Result<usize, LoadError> {
        let line = self.next_non_blank()?.ok_or_else(|| LoadError::Format {
            line: self.line_no + 1,
            msg: format!("missing {what} on the first line"),
        })?;
        let value = self.parse_int(&line)?;
        usize::try_from(value).map_err(|_| self.invalid_arg(format!("{what} must be non-negative, got {value}")))
    }

    /// Split a comma-separated list of integers; `*` or blank means empty.
    pub(crate) fn parse_csv(&self, line: &str) -> Result<Vec<i64>, LoadError> {
        if line.is_empty() || line == "*" {
            return Ok(Vec::new());
        }
        line.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| self.parse_int(t))
            .collect()
    }

    /// Split on commas and/or whitespace; `*` or blank means empty.
    pub(crate) fn parse_loose(&self, line: &str) -> Result<Vec<i64>, LoadError> {
        if line.is_empty() || line == "*" {
            return Ok(Vec::new());
        }
        line.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .map(|t| self.parse_int(t))
            .collect()
    }

    /// Validate a vertex index against the domain `[0, n)`.
    pub(crate) fn check_vertex(&self, value: i64, n: usize, what: &str) -> Result<usize, LoadError> {
        usize::try_from(value)
            .ok()
            .filter(|&v| v < n)
            .ok_or_else(|| self.format_err(format!("{what} {value} out of range (valid: 0..{n})")))
    }
}
