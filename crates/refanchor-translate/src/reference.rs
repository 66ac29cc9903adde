//! Cell references found in instruction text

use std::cmp::Ordering;
use std::collections::btree_set::{self, BTreeSet};
use std::fmt;
use std::str::FromStr;

use lazy_regex::regex;
use serde::{Serialize, Serializer};

use crate::error::{Result, TranslateError};

/// A normalized cell reference such as `F10`.
///
/// The `$` markers of the source text are dropped and the column is upper
/// case. References order by their rendered text, so `F10` sorts before `F9`
/// and `A9` before `AA1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellRef {
    column: String,
    row: u32,
}

impl CellRef {
    /// Parse one token like `f10`, `$G$11` or `AB7`
    ///
    /// # Examples
    /// ```
    /// use refanchor_translate::CellRef;
    ///
    /// let r = CellRef::parse("$g$11").unwrap();
    /// assert_eq!(r.to_string(), "G11");
    /// assert!(CellRef::parse("F0").is_err());
    /// ```
    pub fn parse(token: &str) -> Result<Self> {
        let rest = token.strip_prefix('$').unwrap_or(token);
        let letters_end = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        if letters_end == 0 {
            return Err(TranslateError::invalid_reference(token, "no column letters"));
        }
        let (letters, rest) = rest.split_at(letters_end);
        let digits = rest.strip_prefix('$').unwrap_or(rest);

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TranslateError::invalid_reference(token, "no row number"));
        }
        let row: u32 = digits
            .parse()
            .map_err(|_| TranslateError::invalid_reference(token, "row number too large"))?;
        if row == 0 {
            return Err(TranslateError::invalid_reference(token, "row numbers start at 1"));
        }

        Ok(Self {
            column: letters.to_ascii_uppercase(),
            row,
        })
    }

    /// Column letters, upper case
    pub fn column(&self) -> &str {
        &self.column
    }

    /// 1-based row number
    pub fn row(&self) -> u32 {
        self.row
    }
}

impl Ord for CellRef {
    fn cmp(&self, other: &Self) -> Ordering {
        // Digits sort below letters, so comparing columns first and then the
        // row digits as text matches comparing the rendered strings.
        self.column
            .cmp(&other.column)
            .then_with(|| self.row.to_string().cmp(&other.row.to_string()))
    }
}

impl PartialOrd for CellRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

impl FromStr for CellRef {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for CellRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Distinct references of one instruction, in sorted order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReferenceSet(BTreeSet<CellRef>);

impl ReferenceSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reference; returns false if it was already present
    pub fn insert(&mut self, reference: CellRef) -> bool {
        self.0.insert(reference)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, reference: &CellRef) -> bool {
        self.0.contains(reference)
    }

    /// Smallest reference
    pub fn first(&self) -> Option<&CellRef> {
        self.0.iter().next()
    }

    /// References in sorted order
    pub fn iter(&self) -> btree_set::Iter<'_, CellRef> {
        self.0.iter()
    }

    /// Render as `"A1, B2, ..."`
    pub fn render(&self) -> String {
        self.0
            .iter()
            .map(CellRef::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ReferenceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl FromIterator<CellRef> for ReferenceSet {
    fn from_iter<I: IntoIterator<Item = CellRef>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ReferenceSet {
    type Item = &'a CellRef;
    type IntoIter = btree_set::Iter<'a, CellRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for ReferenceSet {
    type Item = CellRef;
    type IntoIter = btree_set::IntoIter<CellRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Find every cell reference mentioned in `text`.
///
/// Matching is case-insensitive and anchored on word boundaries, so a run
/// like `F26F25` is not a reference at all while `G20 H20` is two. Tokens with
/// row `0` are dropped. No check is made against sheet bounds.
///
/// # Examples
/// ```
/// use refanchor_translate::extract;
///
/// let refs = extract("Only allow numeric inputs: f10; $G$11, F10 and F9");
/// assert_eq!(refs.render(), "F10, F9, G11");
/// ```
pub fn extract(text: &str) -> ReferenceSet {
    regex!(r"(?i)\b\$?[A-Z]+\$?\d+\b")
        .find_iter(text)
        .filter_map(|m| match CellRef::parse(m.as_str()) {
            Ok(reference) => Some(reference),
            Err(e) => {
                log::trace!("skipping token: {}", e);
                None
            }
        })
        .collect()
}
