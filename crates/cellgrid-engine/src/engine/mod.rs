//! Spreadsheet engine API.
//!
//! This module provides the core computation engine for the spreadsheet:
//!
//! - [`Cell`], [`Grid`] - Data structures for cell storage
//! - [`CellRef`], [`CellRange`] - Cell reference parsing (A1 notation ↔ row/col indices)
//! - [`Formula`], [`parse`] - Classify raw cell text into a formula or a literal
//! - [`evaluate`] - Compute a cell's display value on demand
//! - [`DisplayValue`] - What a cell shows once evaluated

mod cell;
mod cell_ref;
mod eval;
mod format;
mod formula;

pub use cell::{Cell, Grid};
pub use cell_ref::{CellRange, CellRef};
pub use eval::evaluate;
pub use format::{DisplayValue, format_number};
pub use formula::{BinaryOp, Formula, parse, parse_number_or_zero};
