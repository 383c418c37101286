//! sheetbridge CLI - demo and inspection tool for both backends

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sheetbridge::prelude::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheetbridge")]
#[command(
    author,
    version,
    about = "Unified spreadsheet access over XLSX files and Google Sheets"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the demo dataset to a local workbook and print it back
    Demo {
        /// Output workbook file
        output: PathBuf,
    },

    /// Write the demo dataset to a Google Sheets spreadsheet
    DemoGoogle {
        /// Spreadsheet URL (docs.google.com/spreadsheets/d/...)
        #[arg(long)]
        url: String,

        /// Path to a service-account JSON key file
        #[arg(long)]
        credentials: PathBuf,

        /// Sheet to write into
        #[arg(long, default_value = "Sheet1")]
        sheet: String,

        /// Queue updates locally and flush them in one batch on save
        #[arg(long)]
        batch: bool,
    },

    /// Show information about a workbook
    Info {
        /// Input workbook file
        input: PathBuf,
    },

    /// Print a rectangular selection from a workbook
    Read {
        /// Input workbook file
        input: PathBuf,

        /// Selection in A1 notation, e.g. B2:D10
        range: String,

        /// Sheet name (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,
    },

    /// List all sheets in a workbook
    Sheets {
        /// Input workbook file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { output } => demo(&output),
        Commands::DemoGoogle {
            url,
            credentials,
            sheet,
            batch,
        } => demo_google(&url, &credentials, &sheet, batch),
        Commands::Info { input } => show_info(&input),
        Commands::Read {
            input,
            range,
            sheet,
        } => read_selection(&input, &range, sheet.as_deref()),
        Commands::Sheets { input } => list_sheets(&input),
    }
}

/// The dataset from the original demo: largest economies by GDP
const COUNTRIES: [&str; 10] = [
    "United States of America",
    "China",
    "Japan",
    "Germany",
    "India",
    "United Kingdom",
    "France",
    "Italy",
    "Canada",
    "South Korea",
];

fn write_demo(sheet: &mut Accessor) -> Result<()> {
    let title = SheetStyle::builder()
        .bold()
        .font_size(14.0)
        .align(HorizontalAlign::Center, VerticalAlign::Middle)
        .build();
    sheet.merge(CellRange::parse("A1:B1")?)?;
    sheet.write_cell_styled(Addr::parse("A1")?, "Largest economies", &title)?;

    let header = SheetStyle::builder()
        .bold()
        .background(Color::LIGHT_GRAY)
        .build();
    sheet.write_row_styled(
        Addr::parse("A2")?,
        &["Rank".to_string(), "Country".to_string()],
        &header,
    )?;

    for (i, country) in COUNTRIES.iter().enumerate() {
        let start = Addr::new(2 + i as u32, 0);
        sheet.write_row(start, &[(i + 1).to_string(), country.to_string()])?;
    }

    let table = CellRange::new(Addr::parse("A2")?, Addr::new(1 + COUNTRIES.len() as u32, 1));
    sheet.apply_border(
        table,
        &BorderStyle::outline(BorderWeight::Medium, BorderLine::Solid, Color::BLACK),
    )?;

    sheet.autofit_columns()?;
    sheet.set_column_width(1, 28.0)?;
    sheet.set_row_height(0, 22.0)?;

    Ok(())
}

fn demo(output: &PathBuf) -> Result<()> {
    let mut sheet = Accessor::open_xlsx(output)
        .with_context(|| format!("Failed to open '{}'", output.display()))?;
    sheet.controller().select_sheet("Sheet1")?;

    write_demo(&mut sheet)?;

    let table = CellRange::new(Addr::parse("A2")?, Addr::new(1 + COUNTRIES.len() as u32, 1));
    let grid = sheet.read_range(table)?;
    print!("{grid}");

    sheet.close().context("Failed to save workbook")?;
    eprintln!("Wrote demo workbook to '{}'", output.display());
    Ok(())
}

fn demo_google(url: &str, credentials: &PathBuf, sheet_name: &str, batch: bool) -> Result<()> {
    let config = GoogleSheetsConfig::new(url, credentials)
        .with_application_name("sheetbridge-cli")
        .with_batch_writes(batch);

    let mut sheet =
        Accessor::open_google_sheets(config).context("Failed to connect to Google Sheets")?;
    sheet
        .controller()
        .select_sheet(sheet_name)
        .with_context(|| format!("Sheet '{sheet_name}' not found"))?;

    write_demo(&mut sheet)?;

    sheet.close().context("Failed to flush updates")?;
    eprintln!("Wrote demo dataset to sheet '{sheet_name}'");
    Ok(())
}

fn show_info(input: &PathBuf) -> Result<()> {
    let mut workbook = Accessor::open_xlsx(input)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;

    let names = workbook.controller().sheet_names()?;
    println!("File: {}", input.display());
    println!("Sheets: {}", names.len());

    for (i, name) in names.iter().enumerate() {
        workbook.controller().select_sheet(name)?;
        println!();
        println!("  Sheet {i}: \"{name}\"");
        match workbook.used_range()? {
            Some(range) => println!(
                "    Used range: {} ({} rows x {} columns)",
                range,
                range.row_count(),
                range.col_count()
            ),
            None => println!("    Used range: empty"),
        }
    }

    Ok(())
}

fn read_selection(input: &PathBuf, range: &str, sheet: Option<&str>) -> Result<()> {
    let range = CellRange::parse(range)?;

    let mut workbook = Accessor::open_xlsx(input)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;

    let name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .controller()
            .sheet_names()?
            .into_iter()
            .next()
            .context("Workbook has no sheets")?,
    };
    workbook.controller().select_sheet(&name)?;

    let grid = workbook.read_range(range)?;
    print!("{grid}");
    Ok(())
}

fn list_sheets(input: &PathBuf) -> Result<()> {
    let mut workbook = Accessor::open_xlsx(input)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;

    for (i, name) in workbook.controller().sheet_names()?.iter().enumerate() {
        println!("{i}\t{name}");
    }

    Ok(())
}
