//! Error types for sheetbridge-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur across the sheetbridge driver surface
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Invalid cell range format
    #[error("Invalid cell range: {0}")]
    InvalidRange(String),

    /// Row index out of bounds
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(u32, u32),

    /// Sheet not found by name
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// An operation was attempted before the workbook was opened
    #[error("Workbook has not been opened")]
    WorkbookNotLoaded,

    /// An operation was attempted before a sheet was selected
    #[error("No sheet selected")]
    NoActiveSheet,

    /// Invalid driver configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Style (de)serialization failed
    #[error("Style serialization error: {0}")]
    Style(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Error reported by a backend's wrapped library
    #[error("{driver} backend error: {message}")]
    Backend {
        driver: &'static str,
        message: String,
    },
}

impl Error {
    /// Wrap a backend library error, tagging it with the driver name
    pub fn backend<E: std::fmt::Display>(driver: &'static str, err: E) -> Self {
        Error::Backend {
            driver,
            message: err.to_string(),
        }
    }
}
