//! Row spans as typed on the command line ("3:40" or "12")

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::MAX_ROWS;

/// An inclusive span of 1-based row numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowSpan {
    /// First row (1-based, inclusive)
    pub start: u32,
    /// Last row (1-based, inclusive)
    pub end: u32,
}

impl RowSpan {
    /// Create a span, checking `1 <= start <= end <= MAX_ROWS`
    pub fn new(start: u32, end: u32) -> Result<Self> {
        let span = format!("{}:{}", start, end);
        if start == 0 {
            return Err(invalid(&span, "rows are numbered from 1"));
        }
        if end < start {
            return Err(invalid(&span, "end row is before start row"));
        }
        if end > MAX_ROWS {
            return Err(invalid(&span, "row is beyond the last sheet row"));
        }
        Ok(Self { start, end })
    }

    /// Parse `start:end` or a single row number
    ///
    /// ```
    /// use refanchor_core::RowSpan;
    ///
    /// assert_eq!(RowSpan::parse("1:10").unwrap(), RowSpan { start: 1, end: 10 });
    /// assert_eq!(RowSpan::parse("7").unwrap(), RowSpan { start: 7, end: 7 });
    /// assert!(RowSpan::parse("1:x").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let (start, end) = match trimmed.split_once(':') {
            Some((start, end)) => (start, end),
            None => (trimmed, trimmed),
        };

        let start = parse_row(s, start)?;
        let end = parse_row(s, end)?;
        Self::new(start, end).map_err(|e| match e {
            Error::InvalidRowSpan { reason, .. } => invalid(s, &reason),
            other => other,
        })
    }

    /// Number of rows covered
    pub fn len(&self) -> u32 {
        self.end - self.start + 1
    }

    /// Always false; a span covers at least one row
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate the 1-based row numbers
    pub fn rows(&self) -> impl Iterator<Item = u32> {
        self.start..=self.end
    }
}

fn parse_row(input: &str, part: &str) -> Result<u32> {
    let part = part.trim();
    if part.is_empty() {
        return Err(invalid(input, "missing row number"));
    }
    part.parse::<u32>()
        .map_err(|_| invalid(input, &format!("'{}' is not a row number", part)))
}

fn invalid(input: &str, reason: &str) -> Error {
    Error::InvalidRowSpan {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

impl fmt::Display for RowSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

impl FromStr for RowSpan {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
