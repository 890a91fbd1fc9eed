//! Display and export of filter results.
//!
//! Results are printed to the console and can be exported as plain text or
//! CSV.

use anyhow::{Context, Result};
use csv::{Writer, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::types::{Entry, SEPARATOR};

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Txt,
    Csv,
}

/// Render a field for humans: separator bytes become ` | `.
fn printable(field: &str) -> String {
    field.replace(char::from(SEPARATOR), " | ")
}

/// Console summary and listing of the matching entries.
pub fn render_results(entries: &[&Entry], scanned: usize, verbose: bool) -> String {
    let mut output = String::new();
    output.push_str("=== Results ===\n");
    output.push_str(&format!("Entries scanned: {scanned}\n"));

    if entries.is_empty() {
        output.push_str("No entries matched the filter.\n");
        return output;
    }

    let share = if scanned > 0 {
        entries.len() as f64 / scanned as f64 * 100.0
    } else {
        0.0
    };
    output.push_str(&format!("Entries matched: {} ({share:.1}%)\n\n", entries.len()));

    if verbose {
        output.push_str("--- Detailed Listing ---\n\n");
        for entry in entries {
            output.push_str(&format!("Line {}:\n", entry.line));
            for (i, field) in entry.fields.iter().enumerate() {
                output.push_str(&format!("  [{i}] {}\n", printable(field)));
            }
            output.push('\n');
        }
    } else {
        for entry in entries {
            let fields: Vec<String> = entry.fields.iter().map(|f| printable(f)).collect();
            output.push_str(&format!("  {}\n", fields.join(", ")));
        }
    }

    output
}

pub fn display_results(entries: &[&Entry], scanned: usize, verbose: bool) {
    print!("{}", render_results(entries, scanned, verbose));
}

/// Write the matching entries to `path`.
pub fn export(entries: &[&Entry], path: &Path, format: ExportFormat) -> Result<()> {
    let result = match format {
        ExportFormat::Txt => export_txt(entries, path),
        ExportFormat::Csv => export_csv(entries, path),
    };
    result.with_context(|| format!("Failed to export results to {}", path.display()))
}

fn export_txt(entries: &[&Entry], path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    for entry in entries {
        let fields: Vec<String> = entry.fields.iter().map(|f| printable(f)).collect();
        writeln!(file, "{}", fields.join("\t"))?;
    }
    Ok(())
}

fn export_csv(entries: &[&Entry], path: &Path) -> Result<()> {
    let mut wtr = csv_writer(File::create(path)?);
    write_csv(&mut wtr, entries)?;
    wtr.flush()?;
    Ok(())
}

fn csv_writer<W: Write>(inner: W) -> Writer<W> {
    WriterBuilder::new().flexible(true).from_writer(inner)
}

/// Rows are the line number followed by every field; rows may differ in width.
fn write_csv<W: Write>(wtr: &mut Writer<W>, entries: &[&Entry]) -> Result<()> {
    for entry in entries {
        let mut record = vec![entry.line.to_string()];
        record.extend(entry.fields.iter().cloned());
        wtr.write_record(&record)?;
    }
    Ok(())
}
