use anyhow::{Context, Result};
use chrono::Local;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tabled::builder::Builder;
use tabled::settings::object::Rows;
use tabled::settings::{Alignment, Modify, Style};
use tracing::info;

use crate::args::{Args, Mode, OutputFormat};
use crate::settings::Settings;
use crate::table::ResultTable;

const CSV_SEPARATOR: char = ',';

/// Renders `table` the way `--output` asks for.
pub fn control_output(table: &ResultTable, args: &Args, settings: &Settings) -> Result<()> {
    match args.output {
        None => {
            let stdout = io::stdout();
            write_plain(table, &mut stdout.lock())?;
        }
        Some(OutputFormat::Pretty) => println!("{}", render_pretty(table)),
        Some(OutputFormat::File) => {
            file_output(table, args.mode, settings)?;
        }
    }
    Ok(())
}

/// One line per row, fields separated by a space.
pub fn write_plain<W: Write>(table: &ResultTable, w: &mut W) -> io::Result<()> {
    for row in table.iter() {
        writeln!(w, "{}", row.join(" "))?;
    }
    Ok(())
}

pub fn render_pretty(table: &ResultTable) -> String {
    let mut builder = Builder::default();
    for row in table.iter() {
        builder.push_record(row.iter().cloned());
    }
    builder
        .build()
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string()
}

/// Writes `table` as CSV to `results/<mode>_<timestamp>.csv`.
pub fn file_output(table: &ResultTable, mode: Mode, settings: &Settings) -> Result<PathBuf> {
    let results_dir = settings.results_dir();
    fs::create_dir_all(&results_dir)
        .with_context(|| format!("Failed to create results directory {:?}", results_dir))?;

    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let path = results_dir.join(format!("{}_{}.csv", mode, timestamp));
    let file = File::create(&path).with_context(|| format!("Failed to create {:?}", path))?;
    let mut w = BufWriter::new(file);
    write_csv(table, &mut w)?;
    w.flush()?;

    info!(action = "save", component = "output", path = ?path, rows = table.len(), "Results saved to file");
    Ok(path)
}

pub fn write_csv<W: Write>(table: &ResultTable, w: &mut W) -> io::Result<()> {
    for row in table.iter() {
        write_csv_row(w, row)?;
    }
    Ok(())
}

fn needs_quotes(field: &str) -> bool {
    field.contains(CSV_SEPARATOR) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn write_csv_row<W: Write>(w: &mut W, row: &[String]) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{}", CSV_SEPARATOR)?;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}
