//! cellgrid_engine - Spreadsheet cell storage and formula evaluation.

pub mod engine;
