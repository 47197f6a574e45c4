//! cellgrid_core - UI-agnostic document model for Cellgrid.
//!
//! A [`Document`] owns the grid and is the surface a host view talks to:
//! edits go in through [`Document::set_raw_text`], and display values come
//! out of [`Document::display_value`].

pub mod document;
pub mod error;

pub use document::Document;
pub use error::{CellgridError, Result};
