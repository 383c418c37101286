//! Local XLSX file driver for sheetbridge.
//!
//! [`XlsxDriver`] implements the sheetbridge capability traits over a
//! workbook file on disk, delegating parsing and serialization to
//! `umya-spreadsheet`. The whole workbook is held in memory between
//! [`open`](sheetbridge_core::SheetController::open) and
//! [`save`](sheetbridge_core::SheetController::save); nothing touches the
//! file in between.
//!
//! # Example
//!
//! ```rust,no_run
//! use sheetbridge_core::{Addr, SheetController, SheetReader, SheetWriter};
//! use sheetbridge_xlsx::XlsxDriver;
//!
//! fn main() -> sheetbridge_core::Result<()> {
//!     let mut driver = XlsxDriver::new("report.xlsx");
//!     driver.open()?;
//!     driver.select_sheet("Sheet1")?;
//!     driver.write_cell(Addr::parse("A1")?, "Hello")?;
//!     driver.save()?;
//!     Ok(())
//! }
//! ```

mod convert;
mod driver;
mod error;

pub use driver::XlsxDriver;
pub use error::XlsxError;
