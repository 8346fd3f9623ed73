//! CSV export for simulation step results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::StepResult;

/// Column header for CSV telemetry export.
const HEADER: &str = "timestep,time_hr,ambient_c,demand_kw,cop,pump_heat_kw,\
                       pump_electrical_kw,charge_kw,discharge_kw,\
                       storage_content_kwh,storage_loss_kw,unmet_kw,\
                       surplus_kw,cost_eur";

/// Exports simulation results to a CSV file at the given path.
///
/// Writes a header row followed by one data row per step. A missing COP
/// (no table data at that temperature) becomes an empty field. Produces
/// deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(results: &[StepResult], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(results, buf)
}

/// Writes simulation results as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(results: &[StepResult], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    // Header
    wtr.write_record(HEADER.split(',').map(str::trim))?;

    // Data rows
    for r in results {
        let cop = match r.cop {
            Some(c) => format!("{c:.4}"),
            None => String::new(),
        };
        wtr.write_record(&[
            r.timestep.to_string(),
            format!("{:.2}", r.time_hr),
            format!("{:.2}", r.ambient_c),
            format!("{:.4}", r.demand_kw),
            cop,
            format!("{:.4}", r.pump_heat_kw),
            format!("{:.4}", r.pump_electrical_kw),
            format!("{:.4}", r.charge_kw),
            format!("{:.4}", r.discharge_kw),
            format!("{:.4}", r.storage_content_kwh),
            format!("{:.4}", r.storage_loss_kw),
            format!("{:.4}", r.unmet_kw),
            format!("{:.4}", r.surplus_kw),
            format!("{:.4}", r.cost_eur),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
