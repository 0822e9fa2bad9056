//! Severity aggregation and summary output.
//!
//! Per-version HTML reports are scraped for CVSSv3 severity markers, then
//! written out as a CSV table and optionally printed to the console.

mod aggregate;
mod cli;
mod csv;

pub use aggregate::{collect_tallies, count_severities};
pub use cli::print_table;
pub use csv::{csv_path, render_csv, write_csv, CSV_HEADER};

use crate::model::SweepSummary;
use anyhow::Result;

/// Console output format for the sweep summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON summary for programmatic use
    Json,
    /// The CSV table as written to disk
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!(
                "Unknown format: {}. Use 'table', 'json', or 'csv'",
                s
            )),
        }
    }
}

pub fn print_summary(summary: &SweepSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_table(summary),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(summary)?);
            Ok(())
        }
        OutputFormat::Csv => {
            print!("{}", render_csv(&summary.tallies));
            Ok(())
        }
    }
}
