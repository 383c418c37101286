//! # sheetbridge
//!
//! One capability surface - reader, writer, controller - over two
//! spreadsheet backends: a local XLSX file and a cloud-hosted Google Sheets
//! spreadsheet.
//!
//! Cells are addressed by 0-based row/column offsets or by textual A1
//! addresses ("B12"); values cross the surface as strings; formatting is
//! described with backend-neutral style types. Which backend sits behind an
//! [`Accessor`] is a construction-time choice.
//!
//! ## Features
//!
//! - `xlsx` (default) - local workbook files via `sheetbridge-xlsx`
//! - `google` - Google Sheets via `sheetbridge-gsheets`
//!
//! ## Example
//!
//! ```rust,no_run
//! use sheetbridge::prelude::*;
//!
//! fn main() -> sheetbridge::Result<()> {
//!     let mut sheet = Accessor::open_xlsx("report.xlsx")?;
//!     sheet.controller().select_sheet("Sheet1")?;
//!
//!     let header = SheetStyle::builder()
//!         .bold()
//!         .background(Color::LIGHT_GRAY)
//!         .build();
//!     sheet.write_cell_styled(Addr::parse("A1")?, "Country", &header)?;
//!     sheet.write_cell(Addr::parse("A2")?, "Japan")?;
//!
//!     let grid = sheet.read_range(CellRange::parse("A1:A2")?)?;
//!     println!("{grid}");
//!
//!     sheet.close()
//! }
//! ```

mod accessor;
pub mod prelude;

pub use accessor::Accessor;

// Re-export core types
pub use sheetbridge_core::{
    Addr, BorderLine, BorderStyle, BorderWeight, CellRange, CellStyle, Color, Error, Grid,
    HorizontalAlign, Result, SheetController, SheetReader, SheetStyle, SheetWriter,
    SpreadsheetDriver, StyleBuilder, TextStyle, VerticalAlign, MAX_COLS, MAX_ROWS,
};

// Re-export backend types
#[cfg(feature = "xlsx")]
pub use sheetbridge_xlsx::XlsxDriver;

#[cfg(feature = "google")]
pub use sheetbridge_gsheets::{CredentialSource, GoogleSheetsConfig, GoogleSheetsDriver};
