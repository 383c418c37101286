//! Error types for the XLSX driver

use sheetbridge_core::Error as CoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors specific to the local XLSX backend
#[derive(Debug, Error)]
pub enum XlsxError {
    /// The workbook file could not be read or parsed
    #[error("failed to load workbook '{}': {message}", path.display())]
    Load { path: PathBuf, message: String },

    /// The workbook could not be serialized or written
    #[error("failed to save workbook '{}': {message}", path.display())]
    Save { path: PathBuf, message: String },

    /// The wrapped library rejected a sheet operation
    #[error("sheet operation failed: {0}")]
    Sheet(String),
}

impl From<XlsxError> for CoreError {
    fn from(err: XlsxError) -> Self {
        CoreError::backend("xlsx", err)
    }
}
