//! Error types for Cellgrid core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in the Cellgrid application.
///
/// Evaluation never fails; these cover the host-facing surface only.
#[derive(Error, Debug)]
pub enum CellgridError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid cell reference: {0}")]
    InvalidReference(String),

    #[error("Invalid assignment '{0}': expected REF=TEXT")]
    InvalidAssignment(String),

    #[error("Table {extent} spans {cells} cells, more than the {max} that can be rendered")]
    TableTooLarge {
        extent: String,
        cells: usize,
        max: usize,
    },

    #[error("Config error in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, CellgridError>;
