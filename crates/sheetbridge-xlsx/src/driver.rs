//! The local XLSX driver

use crate::convert;
use crate::error::XlsxError;
use log::debug;
use sheetbridge_core::{
    Addr, BorderStyle, CellRange, Error, Grid, Result, SheetController, SheetReader, SheetStyle,
    SheetWriter, SpreadsheetDriver,
};
use std::path::{Path, PathBuf};
use umya_spreadsheet::structs::{Spreadsheet, Worksheet};
use umya_spreadsheet::{new_file, reader, writer};

/// Minimum width assigned by [`autofit_columns`](SheetWriter::autofit_columns)
const AUTOFIT_MIN_WIDTH: usize = 8;

/// Maximum width assigned by [`autofit_columns`](SheetWriter::autofit_columns)
const AUTOFIT_MAX_WIDTH: usize = 60;

/// Driver for a local XLSX workbook file.
///
/// The workbook is loaded (or created) by `open()`, mutated in memory, and
/// written back by `save()`.
pub struct XlsxDriver {
    path: PathBuf,
    book: Option<Spreadsheet>,
    active: Option<String>,
}

impl XlsxDriver {
    /// Create a driver for the workbook at `path`. The file is not touched
    /// until [`open`](SheetController::open).
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            book: None,
            active: None,
        }
    }

    /// The workbook file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn book(&self) -> Result<&Spreadsheet> {
        self.book.as_ref().ok_or(Error::WorkbookNotLoaded)
    }

    fn book_mut(&mut self) -> Result<&mut Spreadsheet> {
        self.book.as_mut().ok_or(Error::WorkbookNotLoaded)
    }

    fn sheet(&self) -> Result<&Worksheet> {
        let name = self.active.as_deref().ok_or(Error::NoActiveSheet)?;
        self.book()?
            .get_sheet_by_name(name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))
    }

    fn sheet_mut(&mut self) -> Result<&mut Worksheet> {
        let name = self.active.clone().ok_or(Error::NoActiveSheet)?;
        self.book_mut()?
            .get_sheet_by_name_mut(&name)
            .ok_or(Error::SheetNotFound(name))
    }
}

// umya coordinates are (column, row), 1-based.
fn coord(addr: Addr) -> (u32, u32) {
    (addr.col + 1, addr.row + 1)
}

fn trim_trailing_empty(mut values: Vec<String>) -> Vec<String> {
    while values.last().is_some_and(String::is_empty) {
        values.pop();
    }
    values
}

impl SheetReader for XlsxDriver {
    fn read_cell(&mut self, addr: Addr) -> Result<Option<String>> {
        let value = self.sheet()?.get_value(coord(addr));
        Ok(if value.is_empty() { None } else { Some(value) })
    }

    fn read_row(&mut self, row: u32) -> Result<Vec<String>> {
        let sheet = self.sheet()?;
        let (highest_col, _) = sheet.get_highest_column_and_row();
        let values = (1..=highest_col)
            .map(|col| sheet.get_value((col, row + 1)))
            .collect();
        Ok(trim_trailing_empty(values))
    }

    fn read_column(&mut self, col: u32) -> Result<Vec<String>> {
        let sheet = self.sheet()?;
        let (_, highest_row) = sheet.get_highest_column_and_row();
        let values = (1..=highest_row)
            .map(|row| sheet.get_value((col + 1, row)))
            .collect();
        Ok(trim_trailing_empty(values))
    }

    fn read_range(&mut self, range: CellRange) -> Result<Grid> {
        let sheet = self.sheet()?;
        let mut grid = Grid::with_letter_columns(range.start.col, range.col_count());

        for row in range.start.row..=range.end.row {
            let values: Vec<String> = (range.start.col..=range.end.col)
                .map(|col| sheet.get_value((col + 1, row + 1)))
                .collect();
            grid.push_row(values);
        }

        Ok(grid)
    }

    fn used_range(&mut self) -> Result<Option<CellRange>> {
        let sheet = self.sheet()?;
        let (highest_col, highest_row) = sheet.get_highest_column_and_row();
        if highest_col == 0 || highest_row == 0 {
            return Ok(None);
        }
        Ok(Some(CellRange::new(
            Addr::new(0, 0),
            Addr::new(highest_row - 1, highest_col - 1),
        )))
    }
}

impl SheetWriter for XlsxDriver {
    fn write_cell(&mut self, addr: Addr, value: &str) -> Result<()> {
        self.sheet_mut()?.get_cell_mut(coord(addr)).set_value(value);
        Ok(())
    }

    fn write_row(&mut self, start: Addr, values: &[String]) -> Result<()> {
        let sheet = self.sheet_mut()?;
        for (i, value) in values.iter().enumerate() {
            sheet
                .get_cell_mut(coord(start.right(i as u32)))
                .set_value(value);
        }
        Ok(())
    }

    fn write_column(&mut self, start: Addr, values: &[String]) -> Result<()> {
        let sheet = self.sheet_mut()?;
        for (i, value) in values.iter().enumerate() {
            sheet
                .get_cell_mut(coord(start.below(i as u32)))
                .set_value(value);
        }
        Ok(())
    }

    fn write_grid(&mut self, start: Addr, grid: &Grid) -> Result<()> {
        let sheet = self.sheet_mut()?;
        for (r, row) in grid.rows().enumerate() {
            for (c, value) in row.iter().enumerate() {
                sheet
                    .get_cell_mut(coord(start.offset(r as u32, c as u32)))
                    .set_value(value);
            }
        }
        Ok(())
    }

    fn apply_style(&mut self, range: CellRange, style: &SheetStyle) -> Result<()> {
        let cell_style = convert::style_to_umya(style);
        let sheet = self.sheet_mut()?;
        for addr in range.cells() {
            sheet.get_cell_mut(coord(addr)).set_style(cell_style.clone());
        }
        Ok(())
    }

    fn apply_border(&mut self, range: CellRange, border: &BorderStyle) -> Result<()> {
        if border.is_empty() {
            return Ok(());
        }

        let sheet = self.sheet_mut()?;
        for addr in range.cells() {
            let top = addr.row == range.start.row;
            let bottom = addr.row == range.end.row;
            let left = addr.col == range.start.col;
            let right = addr.col == range.end.col;
            if !(top || bottom || left || right) {
                continue;
            }

            let style = sheet.get_style_mut(coord(addr));
            convert::apply_border_edges(style, border, top, bottom, left, right);
        }
        Ok(())
    }

    fn merge(&mut self, range: CellRange) -> Result<()> {
        self.sheet_mut()?.add_merge_cells(range.to_a1_string());
        Ok(())
    }

    fn set_column_width(&mut self, col: u32, width: f64) -> Result<()> {
        let letters = Addr::column_to_letters(col);
        self.sheet_mut()?
            .get_column_dimension_mut(&letters)
            .set_width(width);
        Ok(())
    }

    fn set_row_height(&mut self, row: u32, height: f64) -> Result<()> {
        self.sheet_mut()?
            .get_row_dimension_mut(&(row + 1))
            .set_height(height);
        Ok(())
    }

    fn autofit_columns(&mut self) -> Result<()> {
        let sheet = self.sheet_mut()?;
        let (highest_col, highest_row) = sheet.get_highest_column_and_row();

        for col in 1..=highest_col {
            let longest = (1..=highest_row)
                .map(|row| sheet.get_value((col, row)).chars().count())
                .max()
                .unwrap_or(0);
            if longest == 0 {
                continue;
            }

            let width = (longest + 2).clamp(AUTOFIT_MIN_WIDTH, AUTOFIT_MAX_WIDTH);
            let letters = Addr::column_to_letters(col - 1);
            sheet
                .get_column_dimension_mut(&letters)
                .set_width(width as f64);
        }
        Ok(())
    }
}

impl SheetController for XlsxDriver {
    fn open(&mut self) -> Result<()> {
        let book = if self.path.exists() {
            debug!("loading workbook from {}", self.path.display());
            reader::xlsx::read(&self.path).map_err(|e| XlsxError::Load {
                path: self.path.clone(),
                message: e.to_string(),
            })?
        } else {
            debug!("creating new workbook for {}", self.path.display());
            new_file()
        };

        self.book = Some(book);
        self.active = None;
        Ok(())
    }

    fn select_sheet(&mut self, name: &str) -> Result<()> {
        if self.book()?.get_sheet_by_name(name).is_none() {
            return Err(Error::SheetNotFound(name.to_string()));
        }
        self.active = Some(name.to_string());
        Ok(())
    }

    fn create_sheets(&mut self, names: &[&str]) -> Result<()> {
        let book = self.book_mut()?;
        for name in names {
            if book.get_sheet_by_name(name).is_some() {
                continue;
            }
            book.new_sheet(*name)
                .map_err(|e| XlsxError::Sheet(e.to_string()))?;
        }
        Ok(())
    }

    fn sheet_names(&mut self) -> Result<Vec<String>> {
        Ok(self
            .book()?
            .get_sheet_collection()
            .iter()
            .map(|sheet| sheet.get_name().to_string())
            .collect())
    }

    fn active_sheet(&self) -> Option<&str> {
        self.active.as_deref()
    }

    fn save(&mut self) -> Result<()> {
        let book = self.book.as_ref().ok_or(Error::WorkbookNotLoaded)?;
        debug!("saving workbook to {}", self.path.display());
        writer::xlsx::write(book, &self.path).map_err(|e| XlsxError::Save {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}

impl SpreadsheetDriver for XlsxDriver {
    fn name(&self) -> &'static str {
        "xlsx"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_driver(path: &Path) -> XlsxDriver {
        let mut driver = XlsxDriver::new(path);
        driver.open().unwrap();
        driver.select_sheet("Sheet1").unwrap();
        driver
    }

    #[test]
    fn test_operations_require_open() {
        let mut driver = XlsxDriver::new("never-created.xlsx");
        assert!(matches!(
            driver.sheet_names(),
            Err(Error::WorkbookNotLoaded)
        ));
        assert!(matches!(
            driver.read_cell(Addr::new(0, 0)),
            Err(Error::NoActiveSheet)
        ));
    }

    #[test]
    fn test_reads_require_selected_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let mut driver = XlsxDriver::new(dir.path().join("a.xlsx"));
        driver.open().unwrap();
        assert!(matches!(
            driver.read_row(0),
            Err(Error::NoActiveSheet)
        ));
        assert!(matches!(
            driver.select_sheet("Missing"),
            Err(Error::SheetNotFound(_))
        ));
    }

    #[test]
    fn test_cell_roundtrip_in_memory() {
        let dir = tempfile::tempdir().unwrap();
        let mut driver = open_driver(&dir.path().join("cells.xlsx"));

        driver.write_cell(Addr::parse("B2").unwrap(), "hello").unwrap();
        assert_eq!(
            driver.read_cell(Addr::parse("B2").unwrap()).unwrap(),
            Some("hello".to_string())
        );
        assert_eq!(driver.read_cell(Addr::parse("B3").unwrap()).unwrap(), None);
    }

    #[test]
    fn test_row_read_is_gap_padded_and_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let mut driver = open_driver(&dir.path().join("rows.xlsx"));

        // A1 and C1 set, B1 left empty
        driver.write_cell(Addr::parse("A1").unwrap(), "a").unwrap();
        driver.write_cell(Addr::parse("C1").unwrap(), "c").unwrap();
        // Widen the sheet beyond C so trailing-trim is observable
        driver.write_cell(Addr::parse("E5").unwrap(), "far").unwrap();

        assert_eq!(driver.read_row(0).unwrap(), vec!["a", "", "c"]);
        assert_eq!(driver.read_row(1).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_column_read() {
        let dir = tempfile::tempdir().unwrap();
        let mut driver = open_driver(&dir.path().join("cols.xlsx"));

        let values = vec!["one".to_string(), "two".to_string(), "three".to_string()];
        driver.write_column(Addr::parse("B1").unwrap(), &values).unwrap();

        assert_eq!(driver.read_column(1).unwrap(), values);
        assert_eq!(driver.read_column(5).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_range_read_is_rectangular() {
        let dir = tempfile::tempdir().unwrap();
        let mut driver = open_driver(&dir.path().join("range.xlsx"));

        driver.write_cell(Addr::parse("C7").unwrap(), "x").unwrap();
        // Row 8 untouched on purpose
        driver.write_cell(Addr::parse("D9").unwrap(), "y").unwrap();

        let grid = driver
            .read_range(CellRange::parse("C7:D9").unwrap())
            .unwrap();
        assert_eq!(grid.columns(), &["C", "D"]);
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.get(0, 0), Some("x"));
        assert_eq!(grid.get(1, 0), Some(""));
        assert_eq!(grid.get(1, 1), Some(""));
        assert_eq!(grid.get(2, 1), Some("y"));
    }

    #[test]
    fn test_used_range() {
        let dir = tempfile::tempdir().unwrap();
        let mut driver = open_driver(&dir.path().join("used.xlsx"));

        assert_eq!(driver.used_range().unwrap(), None);

        driver.write_cell(Addr::parse("C3").unwrap(), "x").unwrap();
        assert_eq!(
            driver.used_range().unwrap(),
            Some(CellRange::parse("A1:C3").unwrap())
        );
    }

    #[test]
    fn test_grid_write() {
        let dir = tempfile::tempdir().unwrap();
        let mut driver = open_driver(&dir.path().join("grid.xlsx"));

        let mut grid = Grid::with_columns(vec!["Rank", "Country"]);
        grid.push_row(vec!["1", "United States"]);
        grid.push_row(vec!["2", "China"]);
        driver.write_grid(Addr::parse("B2").unwrap(), &grid).unwrap();

        assert_eq!(
            driver.read_cell(Addr::parse("B2").unwrap()).unwrap(),
            Some("1".to_string())
        );
        assert_eq!(
            driver.read_cell(Addr::parse("C3").unwrap()).unwrap(),
            Some("China".to_string())
        );
    }

    #[test]
    fn test_sheet_management() {
        let dir = tempfile::tempdir().unwrap();
        let mut driver = XlsxDriver::new(dir.path().join("sheets.xlsx"));
        driver.open().unwrap();

        assert_eq!(driver.sheet_names().unwrap(), vec!["Sheet1"]);
        driver.create_sheets(&["Data", "Summary", "Data"]).unwrap();
        assert_eq!(
            driver.sheet_names().unwrap(),
            vec!["Sheet1", "Data", "Summary"]
        );

        assert_eq!(driver.active_sheet(), None);
        driver.select_sheet("Data").unwrap();
        assert_eq!(driver.active_sheet(), Some("Data"));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("persist.xlsx");

        let mut driver = open_driver(&path);
        driver.write_cell(Addr::parse("A1").unwrap(), "persisted").unwrap();
        driver
            .write_row(
                Addr::parse("A2").unwrap(),
                &["x".to_string(), "y".to_string()],
            )
            .unwrap();
        driver.merge(CellRange::parse("A4:B4").unwrap()).unwrap();
        driver.set_column_width(0, 24.0).unwrap();
        driver.set_row_height(0, 28.0).unwrap();
        driver.save().unwrap();

        let mut reloaded = open_driver(&path);
        assert_eq!(
            reloaded.read_cell(Addr::parse("A1").unwrap()).unwrap(),
            Some("persisted".to_string())
        );
        assert_eq!(reloaded.read_row(1).unwrap(), vec!["x", "y"]);
    }

    #[test]
    fn test_styles_survive_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("styled.xlsx");

        let mut driver = open_driver(&path);
        driver.write_cell(Addr::parse("A1").unwrap(), "Header").unwrap();

        let style = SheetStyle::builder()
            .bold()
            .background(sheetbridge_core::Color::YELLOW)
            .build();
        driver
            .apply_style(CellRange::parse("A1:B1").unwrap(), &style)
            .unwrap();
        driver
            .apply_border(
                CellRange::parse("A1:B3").unwrap(),
                &BorderStyle::outline(
                    sheetbridge_core::BorderWeight::Medium,
                    sheetbridge_core::BorderLine::Solid,
                    sheetbridge_core::Color::BLACK,
                ),
            )
            .unwrap();
        driver.autofit_columns().unwrap();
        driver.save().unwrap();

        // Reload parses the styled file without error and keeps the value
        let mut reloaded = open_driver(&path);
        assert_eq!(
            reloaded.read_cell(Addr::parse("A1").unwrap()).unwrap(),
            Some("Header".to_string())
        );
    }
}
