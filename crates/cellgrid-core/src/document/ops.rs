use super::Document;
use crate::error::{CellgridError, Result};
use cellgrid_engine::engine::{CellRef, DisplayValue, evaluate};

/// Largest extent `render_table` will lay out, in cells.
pub const MAX_TABLE_CELLS: usize = 1_000_000;

impl Document {
    /// Store the raw literal or formula text typed into a cell.
    ///
    /// Dependents are not recalculated; they pick up the new text the next
    /// time their display value is requested.
    pub fn set_raw_text(&mut self, row: usize, col: usize, text: &str) {
        let at = CellRef::new(row, col);
        log::debug!("set {} = {:?}", at, text);
        self.grid.set_raw_text(at, text);
        self.modified = true;
    }

    /// Evaluate the cell for display. Never fails; unknown or blank cells
    /// are [`DisplayValue::Empty`].
    pub fn display_value(&self, row: usize, col: usize) -> DisplayValue {
        evaluate(&self.grid, &CellRef::new(row, col))
    }

    /// The unevaluated text, as shown when the cell enters edit mode.
    pub fn raw_text(&self, row: usize, col: usize) -> String {
        self.grid.raw_text(&CellRef::new(row, col)).unwrap_or_default()
    }

    /// Set a cell addressed by an A1 token (e.g. `"B3"`).
    pub fn set_cell(&mut self, token: &str, text: &str) -> Result<CellRef> {
        let at = Self::resolve(token)?;
        self.set_raw_text(at.row, at.col, text);
        Ok(at)
    }

    /// Display value of a cell addressed by an A1 token.
    pub fn display(&self, token: &str) -> Result<DisplayValue> {
        let at = Self::resolve(token)?;
        Ok(self.display_value(at.row, at.col))
    }

    /// Raw text of a cell addressed by an A1 token.
    pub fn raw(&self, token: &str) -> Result<String> {
        let at = Self::resolve(token)?;
        Ok(self.raw_text(at.row, at.col))
    }

    /// Apply an edit written as `REF=TEXT`, e.g. `C1=+ A1 B1`.
    ///
    /// Only the first `=` separates the reference, so alias formulas such as
    /// `A1== B1` keep their operator. The text after it is stored as typed.
    pub fn apply_assignment(&mut self, assignment: &str) -> Result<CellRef> {
        let (token, text) = assignment
            .split_once('=')
            .ok_or_else(|| CellgridError::InvalidAssignment(assignment.to_string()))?;
        self.set_cell(token, text)
    }

    /// Empty a cell.
    pub fn clear_cell(&mut self, row: usize, col: usize) {
        self.grid.clear(&CellRef::new(row, col));
        self.modified = true;
    }

    /// Full-grid refresh: the display value of every populated cell in
    /// row-major order.
    pub fn refresh(&self) -> Vec<(CellRef, DisplayValue)> {
        self.grid
            .populated()
            .into_iter()
            .map(|at| (at, evaluate(&self.grid, &at)))
            .collect()
    }

    /// Render the populated extent as text, one line per row with a header
    /// line of column letters. Each line starts with its row number.
    ///
    /// Empty cells between populated ones are laid out too, so extents
    /// larger than [`MAX_TABLE_CELLS`] are refused.
    pub fn render_table(&self, separator: &str) -> Result<String> {
        let Some(extent) = self.grid.extent() else {
            return Ok(String::new());
        };
        if extent.len() > MAX_TABLE_CELLS {
            return Err(CellgridError::TableTooLarge {
                extent: extent.to_string(),
                cells: extent.len(),
                max: MAX_TABLE_CELLS,
            });
        }

        let mut out = String::new();
        let header: Vec<String> = (extent.start.col..=extent.end.col)
            .map(CellRef::col_to_letters)
            .collect();
        out.push_str(separator);
        out.push_str(&header.join(separator));
        out.push('\n');

        for row in extent.start.row..=extent.end.row {
            let values: Vec<String> = (extent.start.col..=extent.end.col)
                .map(|col| self.display_value(row, col).to_string())
                .collect();
            out.push_str(&(row + 1).to_string());
            out.push_str(separator);
            out.push_str(&values.join(separator));
            out.push('\n');
        }
        Ok(out)
    }
}
