//! Google Sheets driver for sheetbridge.
//!
//! [`GoogleSheetsDriver`] implements the sheetbridge capability traits
//! against a cloud-hosted spreadsheet, delegating every API call to the
//! generated `google-sheets4` client. The driver owns a tokio runtime and
//! presents the same blocking surface as the local backend.
//!
//! With [`batch_writes`](GoogleSheetsConfig::with_batch_writes) enabled,
//! value and formatting updates are queued locally and flushed in two batch
//! calls on [`save`](sheetbridge_core::SheetController::save); otherwise each
//! operation issues its API call immediately.
//!
//! # Example
//!
//! ```rust,no_run
//! use sheetbridge_core::{Addr, SheetController, SheetWriter};
//! use sheetbridge_gsheets::{GoogleSheetsConfig, GoogleSheetsDriver};
//!
//! fn main() -> sheetbridge_core::Result<()> {
//!     let config = GoogleSheetsConfig::new(
//!         "https://docs.google.com/spreadsheets/d/SPREADSHEET_ID/edit",
//!         "service-account.json",
//!     )
//!     .with_batch_writes(true);
//!
//!     let mut driver = GoogleSheetsDriver::new(config)?;
//!     driver.open()?;
//!     driver.select_sheet("Sheet1")?;
//!     driver.write_cell(Addr::parse("A1")?, "Hello")?;
//!     driver.save()?;
//!     Ok(())
//! }
//! ```

mod config;
mod convert;
mod driver;
mod error;

pub use config::{CredentialSource, GoogleSheetsConfig};
pub use driver::GoogleSheetsDriver;
pub use error::GoogleSheetsError;
