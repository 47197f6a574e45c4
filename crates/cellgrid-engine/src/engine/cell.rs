//! Cell data structures for the spreadsheet grid.
//!
//! - [`Cell`] - Raw literal or formula text as typed by the user
//! - [`Grid`] - Sparse, growable storage for cells (backed by `DashMap`)
//!
//! Cells never hold a computed value. Display values are produced on demand
//! by the evaluator, see [`crate::engine::evaluate`].

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use super::cell_ref::{CellRange, CellRef};

/// A cell in the spreadsheet grid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub raw_text: Option<String>,
}

impl Cell {
    pub fn new_empty() -> Cell {
        Cell { raw_text: None }
    }

    /// Build a cell from user input. Blank input yields an empty cell.
    pub fn from_input(input: &str) -> Cell {
        if input.trim().is_empty() {
            Cell::new_empty()
        } else {
            Cell {
                raw_text: Some(input.to_string()),
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.raw_text.is_none()
    }

    /// The raw text for editing, empty string when the cell is blank.
    pub fn to_input_string(&self) -> String {
        self.raw_text.clone().unwrap_or_default()
    }
}

/// Sparse grid storage. Coordinates that were never written behave as
/// empty cells.
#[derive(Debug, Default)]
pub struct Grid {
    cells: DashMap<CellRef, Cell>,
}

impl Grid {
    pub fn new() -> Grid {
        Grid::default()
    }

    /// Return the cell at `at`, materializing an empty one if needed.
    pub fn cell(&self, at: &CellRef) -> Cell {
        self.cells.entry(*at).or_default().clone()
    }

    /// Raw text at `at` without materializing a cell.
    pub fn raw_text(&self, at: &CellRef) -> Option<String> {
        self.cells.get(at).and_then(|cell| cell.raw_text.clone())
    }

    /// Store the raw text for a cell. Blank text clears it.
    ///
    /// Nothing is recalculated here: dependents pick up the change the next
    /// time they are evaluated.
    pub fn set_raw_text(&self, at: CellRef, text: &str) {
        let cell = Cell::from_input(text);
        if cell.is_empty() {
            self.cells.remove(&at);
        } else {
            self.cells.insert(at, cell);
        }
    }

    /// Whether a cell, blank or not, is stored at `at`.
    pub fn contains(&self, at: &CellRef) -> bool {
        self.cells.contains_key(at)
    }

    pub fn clear(&self, at: &CellRef) {
        self.cells.remove(at);
    }

    /// Number of cells holding text.
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|entry| !entry.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Populated coordinates in row-major order.
    pub fn populated(&self) -> Vec<CellRef> {
        let mut refs: Vec<CellRef> = self
            .cells
            .iter()
            .filter(|entry| !entry.is_empty())
            .map(|entry| *entry.key())
            .collect();
        refs.sort();
        refs
    }

    /// Bounding rectangle of every populated cell, or `None` for a blank grid.
    pub fn extent(&self) -> Option<CellRange> {
        let populated = self.populated();
        let first = *populated.first()?;
        let (mut max_row, mut min_col, mut max_col) = (first.row, first.col, first.col);
        for at in &populated {
            max_row = max_row.max(at.row);
            min_col = min_col.min(at.col);
            max_col = max_col.max(at.col);
        }
        Some(CellRange::new(
            CellRef::new(first.row, min_col),
            CellRef::new(max_row, max_col),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_materializes_empty() {
        let grid = Grid::new();
        let at = CellRef::new(4, 7);
        assert!(!grid.contains(&at));
        assert_eq!(grid.raw_text(&at), None);
        assert!(!grid.contains(&at));
        assert_eq!(grid.cell(&at), Cell::new_empty());
        assert!(grid.contains(&at));
        // Materialized blanks are not counted as populated.
        assert!(grid.is_empty());
        assert_eq!(grid.extent(), None);
    }

    #[test]
    fn test_set_and_clear_raw_text() {
        let grid = Grid::new();
        let at = CellRef::new(0, 0);
        grid.set_raw_text(at, "+ B1 C1");
        assert_eq!(grid.raw_text(&at).as_deref(), Some("+ B1 C1"));
        assert_eq!(grid.cell(&at).to_input_string(), "+ B1 C1");

        grid.set_raw_text(at, "   ");
        assert_eq!(grid.raw_text(&at), None);

        grid.set_raw_text(at, "5");
        grid.clear(&at);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_extent_spans_populated_cells() {
        let grid = Grid::new();
        grid.set_raw_text(CellRef::new(3, 1), "x");
        grid.set_raw_text(CellRef::new(1, 4), "y");
        grid.set_raw_text(CellRef::new(2, 2), "z");

        let extent = grid.extent().unwrap();
        assert_eq!(extent.start, CellRef::new(1, 1));
        assert_eq!(extent.end, CellRef::new(3, 4));
        assert_eq!(
            grid.populated(),
            vec![CellRef::new(1, 4), CellRef::new(2, 2), CellRef::new(3, 1)]
        );
    }
}
