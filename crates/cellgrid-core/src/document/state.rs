use cellgrid_engine::engine::{CellRef, Grid};

use crate::error::{CellgridError, Result};

/// UI-agnostic document state for the spreadsheet.
#[derive(Debug, Default)]
pub struct Document {
    /// The spreadsheet grid
    pub grid: Grid,
    /// Whether the grid has been edited since creation
    pub modified: bool,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Document {
            grid: Grid::new(),
            modified: false,
        }
    }

    /// Decode an A1 token, reporting the token back on failure.
    pub(crate) fn resolve(token: &str) -> Result<CellRef> {
        CellRef::from_str(token.trim())
            .ok_or_else(|| CellgridError::InvalidReference(token.to_string()))
    }
}
