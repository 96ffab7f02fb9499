//! CSV export for the projection and generation time series.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::analytics::{MonthlyGeneration, ProjectionYear};

const PROJECTION_HEADER: [&str; 4] = [
    "year",
    "cost_without_system",
    "annual_saving",
    "cumulative_saving",
];

const GENERATION_HEADER: [&str; 4] = ["month", "name", "generation_kwh", "usage_kwh"];

/// Exports the yearly projection to a CSV file at the given path.
///
/// # Arguments
///
/// * `rows` - Projection rows, year 1 first
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_projection_csv(rows: &[ProjectionYear], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_projection_csv(rows, io::BufWriter::new(file))
}

/// Writes the yearly projection as CSV to any writer. Dollar amounts have
/// two decimals.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_projection_csv(rows: &[ProjectionYear], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(PROJECTION_HEADER)?;

    for r in rows {
        wtr.write_record(&[
            r.year.to_string(),
            format!("{:.2}", r.cost_without_system),
            format!("{:.2}", r.annual_saving),
            format!("{:.2}", r.cumulative_saving),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports the monthly generation profile to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_generation_csv(months: &[MonthlyGeneration], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_generation_csv(months, io::BufWriter::new(file))
}

/// Writes the monthly generation profile as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_generation_csv(months: &[MonthlyGeneration], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(GENERATION_HEADER)?;

    for m in months {
        wtr.write_record(&[
            m.month.to_string(),
            m.name.clone(),
            format!("{:.1}", m.generation_kwh),
            format!("{:.1}", m.usage_kwh),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
