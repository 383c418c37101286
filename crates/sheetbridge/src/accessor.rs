//! The backend-agnostic accessor

use sheetbridge_core::{
    Addr, BorderStyle, CellRange, Grid, Result, SheetController, SheetReader, SheetStyle,
    SheetWriter, SpreadsheetDriver,
};

#[cfg(feature = "xlsx")]
use std::path::Path;

/// A spreadsheet handle backed by one of the available drivers.
///
/// The accessor opens its driver on construction and exposes the three
/// capability views ([`reader`](Accessor::reader),
/// [`writer`](Accessor::writer), [`controller`](Accessor::controller)); it
/// also implements the capability traits itself, so the views are only
/// needed when a caller wants to name a narrower capability.
///
/// Nothing is persisted implicitly: call [`save`](SheetController::save) or
/// [`close`](Accessor::close), or unsaved work is dropped with the accessor.
pub struct Accessor {
    driver: Box<dyn SpreadsheetDriver>,
}

impl Accessor {
    /// Wrap a driver and open it
    pub fn new(mut driver: Box<dyn SpreadsheetDriver>) -> Result<Self> {
        driver.open()?;
        Ok(Self { driver })
    }

    /// Open a local XLSX workbook; the file is created on the first save if
    /// it does not exist yet
    #[cfg(feature = "xlsx")]
    pub fn open_xlsx<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(Box::new(sheetbridge_xlsx::XlsxDriver::new(path)))
    }

    /// Connect to a Google Sheets spreadsheet
    #[cfg(feature = "google")]
    pub fn open_google_sheets(config: sheetbridge_gsheets::GoogleSheetsConfig) -> Result<Self> {
        Self::new(Box::new(sheetbridge_gsheets::GoogleSheetsDriver::new(
            config,
        )?))
    }

    /// Short name of the backing driver, e.g. "xlsx"
    pub fn driver_name(&self) -> &'static str {
        self.driver.name()
    }

    /// Read capability view
    pub fn reader(&mut self) -> &mut dyn SheetReader {
        self
    }

    /// Write capability view
    pub fn writer(&mut self) -> &mut dyn SheetWriter {
        self
    }

    /// Lifecycle capability view
    pub fn controller(&mut self) -> &mut dyn SheetController {
        self
    }

    /// Write a cell and style it in one step
    pub fn write_cell_styled(&mut self, addr: Addr, value: &str, style: &SheetStyle) -> Result<()> {
        self.driver.write_cell(addr, value)?;
        self.driver.apply_style(CellRange::single(addr), style)
    }

    /// Write a row and style the written extent in one step
    pub fn write_row_styled(
        &mut self,
        start: Addr,
        values: &[String],
        style: &SheetStyle,
    ) -> Result<()> {
        self.driver.write_row(start, values)?;
        if let Some(len) = values.len().checked_sub(1) {
            let extent = CellRange::new(start, start.right(len as u32));
            self.driver.apply_style(extent, style)?;
        }
        Ok(())
    }

    /// Write a column and style the written extent in one step
    pub fn write_column_styled(
        &mut self,
        start: Addr,
        values: &[String],
        style: &SheetStyle,
    ) -> Result<()> {
        self.driver.write_column(start, values)?;
        if let Some(len) = values.len().checked_sub(1) {
            let extent = CellRange::new(start, start.below(len as u32));
            self.driver.apply_style(extent, style)?;
        }
        Ok(())
    }

    /// Write a grid and style the written extent in one step
    pub fn write_grid_styled(&mut self, start: Addr, grid: &Grid, style: &SheetStyle) -> Result<()> {
        self.driver.write_grid(start, grid)?;
        if !grid.is_empty() && grid.column_count() > 0 {
            let extent = CellRange::new(
                start,
                start.offset(grid.row_count() as u32 - 1, grid.column_count() as u32 - 1),
            );
            self.driver.apply_style(extent, style)?;
        }
        Ok(())
    }

    /// Save and consume the accessor
    pub fn close(mut self) -> Result<()> {
        self.driver.save()
    }
}

impl SheetReader for Accessor {
    fn read_cell(&mut self, addr: Addr) -> Result<Option<String>> {
        self.driver.read_cell(addr)
    }

    fn read_row(&mut self, row: u32) -> Result<Vec<String>> {
        self.driver.read_row(row)
    }

    fn read_column(&mut self, col: u32) -> Result<Vec<String>> {
        self.driver.read_column(col)
    }

    fn read_range(&mut self, range: CellRange) -> Result<Grid> {
        self.driver.read_range(range)
    }

    fn used_range(&mut self) -> Result<Option<CellRange>> {
        self.driver.used_range()
    }
}

impl SheetWriter for Accessor {
    fn write_cell(&mut self, addr: Addr, value: &str) -> Result<()> {
        self.driver.write_cell(addr, value)
    }

    fn write_row(&mut self, start: Addr, values: &[String]) -> Result<()> {
        self.driver.write_row(start, values)
    }

    fn write_column(&mut self, start: Addr, values: &[String]) -> Result<()> {
        self.driver.write_column(start, values)
    }

    fn write_grid(&mut self, start: Addr, grid: &Grid) -> Result<()> {
        self.driver.write_grid(start, grid)
    }

    fn apply_style(&mut self, range: CellRange, style: &SheetStyle) -> Result<()> {
        self.driver.apply_style(range, style)
    }

    fn apply_border(&mut self, range: CellRange, border: &BorderStyle) -> Result<()> {
        self.driver.apply_border(range, border)
    }

    fn merge(&mut self, range: CellRange) -> Result<()> {
        self.driver.merge(range)
    }

    fn set_column_width(&mut self, col: u32, width: f64) -> Result<()> {
        self.driver.set_column_width(col, width)
    }

    fn set_row_height(&mut self, row: u32, height: f64) -> Result<()> {
        self.driver.set_row_height(row, height)
    }

    fn autofit_columns(&mut self) -> Result<()> {
        self.driver.autofit_columns()
    }
}

impl SheetController for Accessor {
    fn open(&mut self) -> Result<()> {
        self.driver.open()
    }

    fn select_sheet(&mut self, name: &str) -> Result<()> {
        self.driver.select_sheet(name)
    }

    fn create_sheets(&mut self, names: &[&str]) -> Result<()> {
        self.driver.create_sheets(names)
    }

    fn sheet_names(&mut self) -> Result<Vec<String>> {
        self.driver.sheet_names()
    }

    fn active_sheet(&self) -> Option<&str> {
        self.driver.active_sheet()
    }

    fn save(&mut self) -> Result<()> {
        self.driver.save()
    }
}
