//! Backend capability traits
//!
//! A backend implements three capability traits over one handle:
//! [`SheetReader`] for reads, [`SheetWriter`] for writes and formatting, and
//! [`SheetController`] for workbook/sheet lifecycle. [`SpreadsheetDriver`]
//! bundles them so a driver can be handled as one trait object.
//!
//! All row/column indices at this surface are 0-based; use
//! [`Addr::from_one_based`](crate::Addr::from_one_based) or
//! [`Addr::parse`](crate::Addr::parse) to come in from user-facing forms.

use crate::address::{Addr, CellRange};
use crate::error::Result;
use crate::grid::Grid;
use crate::style::{BorderStyle, SheetStyle};

/// Read operations against the active sheet
pub trait SheetReader {
    /// Read a single cell; `None` for an empty or absent cell
    fn read_cell(&mut self, addr: Addr) -> Result<Option<String>>;

    /// Read a row from column 0 through its last occupied column.
    ///
    /// Gaps come back as empty strings, so indices in the result line up
    /// with column offsets. An untouched row yields an empty vec.
    fn read_row(&mut self, row: u32) -> Result<Vec<String>>;

    /// Read a column from row 0 through its last occupied row.
    ///
    /// Same shape contract as [`read_row`](Self::read_row).
    fn read_column(&mut self, col: u32) -> Result<Vec<String>>;

    /// Read a rectangular selection.
    ///
    /// The grid always has `range.row_count()` rows and `range.col_count()`
    /// columns, padded with empty strings; its columns are named by column
    /// letters.
    fn read_range(&mut self, range: CellRange) -> Result<Grid>;

    /// The smallest range covering every occupied cell, anchored at A1;
    /// `None` for an empty sheet
    fn used_range(&mut self) -> Result<Option<CellRange>>;
}

/// Write and formatting operations against the active sheet
pub trait SheetWriter {
    /// Write a single cell
    fn write_cell(&mut self, addr: Addr, value: &str) -> Result<()>;

    /// Write values left-to-right starting at `start`
    fn write_row(&mut self, start: Addr, values: &[String]) -> Result<()>;

    /// Write values downward starting at `start`
    fn write_column(&mut self, start: Addr, values: &[String]) -> Result<()>;

    /// Write a rectangular block with `start` as its top-left corner
    fn write_grid(&mut self, start: Addr, grid: &Grid) -> Result<()>;

    /// Apply text/cell formatting to every cell in the range
    fn apply_style(&mut self, range: CellRange, style: &SheetStyle) -> Result<()>;

    /// Draw borders on the perimeter of the range
    fn apply_border(&mut self, range: CellRange, border: &BorderStyle) -> Result<()>;

    /// Merge the range into a single cell
    fn merge(&mut self, range: CellRange) -> Result<()>;

    /// Set a column's width in character units
    fn set_column_width(&mut self, col: u32, width: f64) -> Result<()>;

    /// Set a row's height in points
    fn set_row_height(&mut self, row: u32, height: f64) -> Result<()>;

    /// Size each used column to its content, where the backend supports it
    fn autofit_columns(&mut self) -> Result<()>;
}

/// Workbook and sheet lifecycle operations
pub trait SheetController {
    /// Initialise the workbook: open the file or connect to the service.
    ///
    /// Must be called before any other operation.
    fn open(&mut self) -> Result<()>;

    /// Make the named sheet the target of subsequent reads and writes
    fn select_sheet(&mut self, name: &str) -> Result<()>;

    /// Create the sheets that do not already exist; existing names are
    /// silently skipped
    fn create_sheets(&mut self, names: &[&str]) -> Result<()>;

    /// Names of all sheets in the workbook, in workbook order
    fn sheet_names(&mut self) -> Result<Vec<String>>;

    /// Name of the currently selected sheet, if any
    fn active_sheet(&self) -> Option<&str>;

    /// Persist outstanding work: write the file, or flush batched remote
    /// updates
    fn save(&mut self) -> Result<()>;
}

/// A complete backend: reader + writer + controller under one name
pub trait SpreadsheetDriver: SheetReader + SheetWriter + SheetController {
    /// Short identifier used in logs and error messages, e.g. "xlsx"
    fn name(&self) -> &'static str;
}
