//! Driver configuration and spreadsheet URL handling

use crate::error::GoogleSheetsError;
use std::path::PathBuf;

/// Where the service-account key comes from
#[derive(Debug, Clone)]
pub enum CredentialSource {
    /// Path to a service-account JSON key file
    File(PathBuf),
    /// Service-account JSON key content
    Inline(String),
}

/// Configuration for [`GoogleSheetsDriver`](crate::GoogleSheetsDriver)
#[derive(Debug, Clone)]
pub struct GoogleSheetsConfig {
    /// Full `docs.google.com/spreadsheets/d/..` URL of the spreadsheet
    pub spreadsheet_url: String,
    /// User-agent the API client identifies itself with
    pub application_name: String,
    /// Service-account credentials
    pub credentials: CredentialSource,
    /// Queue value/format updates locally and flush them on `save()`
    pub batch_writes: bool,
}

impl GoogleSheetsConfig {
    /// Configuration with a credentials file and defaults: immediate writes,
    /// a generic application name.
    pub fn new<U: Into<String>, P: Into<PathBuf>>(spreadsheet_url: U, credentials: P) -> Self {
        Self {
            spreadsheet_url: spreadsheet_url.into(),
            application_name: "sheetbridge".to_string(),
            credentials: CredentialSource::File(credentials.into()),
            batch_writes: false,
        }
    }

    /// Use service-account key JSON passed in memory instead of a file
    pub fn with_inline_credentials<S: Into<String>>(mut self, json: S) -> Self {
        self.credentials = CredentialSource::Inline(json.into());
        self
    }

    /// Set the application name sent as the user agent
    pub fn with_application_name<S: Into<String>>(mut self, name: S) -> Self {
        self.application_name = name.into();
        self
    }

    /// Enable or disable write batching
    pub fn with_batch_writes(mut self, batch: bool) -> Self {
        self.batch_writes = batch;
        self
    }
}

/// Extract the spreadsheet id from a `docs.google.com` URL.
///
/// Accepts the shapes the web UI produces, e.g.
/// `https://docs.google.com/spreadsheets/d/<id>/edit#gid=0`.
pub(crate) fn spreadsheet_id_from_url(url: &str) -> Result<String, GoogleSheetsError> {
    let invalid = || GoogleSheetsError::Url(url.to_string());

    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(invalid)?;

    let (host, path) = rest.split_once('/').ok_or_else(invalid)?;
    if host != "docs.google.com" {
        return Err(invalid());
    }

    let id = path.strip_prefix("spreadsheets/d/").ok_or_else(invalid)?;
    let id = id
        .split(['/', '?', '#'])
        .next()
        .filter(|id| !id.is_empty())
        .ok_or_else(invalid)?;

    Ok(id.to_string())
}

/// Render a sheet title for use in an A1 range string, quoting it when it
/// contains anything beyond identifier characters.
pub(crate) fn quoted_sheet_title(name: &str) -> String {
    let plain = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\'', "''"))
    }
}
