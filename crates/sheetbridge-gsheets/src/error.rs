//! Error types for the Google Sheets driver

use sheetbridge_core::Error as CoreError;
use thiserror::Error;

/// Errors specific to the Google Sheets backend
#[derive(Debug, Error)]
pub enum GoogleSheetsError {
    /// The spreadsheet URL does not point at a Google Sheets document
    #[error("invalid Google Sheets URL: {0}")]
    Url(String),

    /// Service-account credentials could not be loaded or exchanged
    #[error("authentication failed: {0}")]
    Auth(String),

    /// A Sheets API call failed
    #[error("Sheets API call failed: {0}")]
    Api(String),
}

impl GoogleSheetsError {
    /// Wrap a client error from an API call
    pub(crate) fn api<E: std::fmt::Display>(err: E) -> Self {
        GoogleSheetsError::Api(err.to_string())
    }
}

impl From<GoogleSheetsError> for CoreError {
    fn from(err: GoogleSheetsError) -> Self {
        match err {
            GoogleSheetsError::Url(url) => {
                CoreError::InvalidConfig(format!("invalid Google Sheets URL: {url}"))
            }
            other => CoreError::backend("google-sheets", other),
        }
    }
}
