//! Commonly used types, importable in one line.
//!
//! ```rust
//! use sheetbridge::prelude::*;
//! ```

pub use crate::Accessor;

pub use sheetbridge_core::{
    Addr, BorderLine, BorderStyle, BorderWeight, CellRange, CellStyle, Color, Error, Grid,
    HorizontalAlign, Result, SheetController, SheetReader, SheetStyle, SheetWriter,
    SpreadsheetDriver, StyleBuilder, TextStyle, VerticalAlign,
};

#[cfg(feature = "xlsx")]
pub use sheetbridge_xlsx::XlsxDriver;

#[cfg(feature = "google")]
pub use sheetbridge_gsheets::{GoogleSheetsConfig, GoogleSheetsDriver};
