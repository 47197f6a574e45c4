//! Cell reference parsing and formatting.
//!
//! Provides bidirectional conversion between spreadsheet-style cell references
//! (e.g., "A1", "B2", "AA100") and zero-indexed row/column coordinates, plus
//! the rectangular [`CellRange`] used by `sum`.
//!
//! # Examples
//!
//! ```
//! use cellgrid_engine::engine::CellRef;
//!
//! let cell = CellRef::from_str("B3").unwrap();
//! assert_eq!(cell.row, 2); // 0-indexed
//! assert_eq!(cell.col, 1);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A reference to a cell by row and column indices (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

fn a1_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Za-z]+)(?<numbers>[0-9]+)$").expect("valid A1 regex")
    })
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse a cell reference from spreadsheet notation (e.g., "A1", "b2", "AA10").
    /// Returns None if the input is invalid.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(name: &str) -> Option<CellRef> {
        Self::parse_a1(name)
    }

    fn parse_a1(name: &str) -> Option<CellRef> {
        let caps = a1_re().captures(name)?;
        let letters = &caps["letters"];
        let numbers = &caps["numbers"];

        let mut col_acc = 0usize;
        for c in letters.to_ascii_uppercase().bytes() {
            let digit = (c - b'A') as usize + 1;
            col_acc = col_acc.checked_mul(26)?.checked_add(digit)?;
        }
        let col = col_acc.checked_sub(1)?;

        let row = numbers.parse::<usize>().ok()?.checked_sub(1)?;

        Some(CellRef::new(row, col))
    }

    /// Convert column index to spreadsheet-style letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_to_letters(col: usize) -> String {
        let mut result = String::new();
        let mut n = col as u128 + 1;
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }
}

impl std::str::FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_a1(s).ok_or_else(|| format!("Invalid cell reference: {}", s))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_to_letters(self.col), self.row + 1)
    }
}

/// An inclusive rectangle of cells with normalized corners
/// (`start` is top-left, `end` is bottom-right).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct CellRange {
    pub start: CellRef,
    pub end: CellRef,
}

impl CellRange {
    /// Build a range from any two opposite corners.
    pub fn new(a: CellRef, b: CellRef) -> CellRange {
        CellRange {
            start: CellRef::new(a.row.min(b.row), a.col.min(b.col)),
            end: CellRef::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    /// Parse a range like "A1:B5". Corners may be given in any order.
    pub fn parse(range: &str) -> Option<CellRange> {
        let (a, b) = range.split_once(':')?;
        Some(CellRange::new(
            CellRef::from_str(a.trim())?,
            CellRef::from_str(b.trim())?,
        ))
    }

    pub fn contains(&self, cell: &CellRef) -> bool {
        (self.start.row..=self.end.row).contains(&cell.row)
            && (self.start.col..=self.end.col).contains(&cell.col)
    }

    pub fn rows(&self) -> usize {
        self.end.row - self.start.row + 1
    }

    pub fn cols(&self) -> usize {
        self.end.col - self.start.col + 1
    }

    /// Number of cells covered, saturating on absurdly large ranges.
    pub fn len(&self) -> usize {
        self.rows().saturating_mul(self.cols())
    }

    /// A range always covers at least one cell.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Every coordinate in the range, row-major.
    pub fn iter(&self) -> impl Iterator<Item = CellRef> + '_ {
        (self.start.row..=self.end.row)
            .flat_map(move |row| (self.start.col..=self.end.col).map(move |col| CellRef::new(row, col)))
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::{CellRange, CellRef};

    #[test]
    fn test_parse_a1_overflow_returns_none() {
        let huge = format!("{}1", "Z".repeat(40));
        assert!(CellRef::from_str(&huge).is_none());
    }

    #[test]
    fn test_col_to_letters_handles_max_usize() {
        let letters = CellRef::col_to_letters(usize::MAX);
        assert!(!letters.is_empty());
        assert!(letters.chars().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_encode_decode_round_trip() {
        for row in [0usize, 1, 9, 99, 12_345] {
            for col in [0usize, 1, 25, 26, 51, 52, 701, 702, 18_277] {
                let cell = CellRef::new(row, col);
                assert_eq!(CellRef::from_str(&cell.to_string()), Some(cell));
            }
        }
    }

    #[test]
    fn test_from_str_trait_reports_token() {
        let err = "A0".parse::<CellRef>().unwrap_err();
        assert!(err.contains("A0"));
        assert_eq!("c7".parse::<CellRef>(), Ok(CellRef::new(6, 2)));
    }

    #[test]
    fn test_range_normalizes_corners() {
        let range = CellRange::parse("B3:A1").unwrap();
        assert_eq!(range.start, CellRef::new(0, 0));
        assert_eq!(range.end, CellRef::new(2, 1));
        assert_eq!(range.len(), 6);
        assert_eq!(range.to_string(), "A1:B3");
    }

    #[test]
    fn test_range_iter_is_row_major() {
        let range = CellRange::new(CellRef::new(0, 0), CellRef::new(1, 1));
        let cells: Vec<_> = range.iter().collect();
        assert_eq!(
            cells,
            vec![
                CellRef::new(0, 0),
                CellRef::new(0, 1),
                CellRef::new(1, 0),
                CellRef::new(1, 1),
            ]
        );
        assert!(range.contains(&CellRef::new(1, 0)));
        assert!(!range.contains(&CellRef::new(2, 0)));
    }

    #[test]
    fn test_range_parse_rejects_malformed() {
        assert!(CellRange::parse("A1").is_none());
        assert!(CellRange::parse("A1:").is_none());
        assert!(CellRange::parse("A1:B0").is_none());
    }
}
