//! # sheetbridge-core
//!
//! Core types for the sheetbridge spreadsheet access library.
//!
//! This crate provides the backend-independent pieces shared by every
//! sheetbridge driver:
//! - [`Addr`] and [`CellRange`] - cell addressing and rectangular selections
//! - [`Grid`] - tabular data exchanged by range reads and writes
//! - [`SheetStyle`], [`TextStyle`], [`CellStyle`], [`BorderStyle`] - formatting
//! - [`SheetReader`], [`SheetWriter`], [`SheetController`] - the capability
//!   traits a backend driver implements
//!
//! ## Example
//!
//! ```rust
//! use sheetbridge_core::{Addr, CellRange};
//!
//! let addr = Addr::parse("B12").unwrap();
//! assert_eq!((addr.row, addr.col), (11, 1));
//!
//! let range = CellRange::parse("C7:G9").unwrap();
//! assert_eq!(range.row_count(), 3);
//! assert_eq!(range.to_string(), "C7:G9");
//! ```

pub mod address;
pub mod driver;
pub mod error;
pub mod grid;
pub mod style;

// Re-exports for convenience
pub use address::{Addr, CellRange};
pub use driver::{SheetController, SheetReader, SheetWriter, SpreadsheetDriver};
pub use error::{Error, Result};
pub use grid::Grid;
pub use style::{
    BorderLine, BorderStyle, BorderWeight, CellStyle, Color, HorizontalAlign, SheetStyle,
    StyleBuilder, TextStyle, VerticalAlign,
};

/// Maximum number of rows in a worksheet (XLSX limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (XLSX limit)
pub const MAX_COLS: u32 = 16_384;
