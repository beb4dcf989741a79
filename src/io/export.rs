//! CSV export for design reports.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::error::Result;
use crate::report::DesignReport;
use crate::sizing::CableSizing;

/// Column header for CSV report export.
const HEADER: [&str; 4] = ["section", "quantity", "value", "unit"];

/// Exports a design report to a CSV file at the given path.
///
/// Writes a header row followed by one `section,quantity,value,unit` row per
/// figure. Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an error if file creation or writing fails.
pub fn export_csv(report: &DesignReport, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(report, buf)
}

/// Writes a design report as CSV to any writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_csv(report: &DesignReport, writer: impl Write) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(HEADER)?;

    let a = &report.array;
    let rows: Vec<(&str, &str, String, &str)> = vec![
        ("array", "panel_count", report.panel_count.to_string(), ""),
        ("array", "array_power", format!("{:.2}", a.array_power), "W"),
        ("array", "power_ratio", format!("{:.2}", a.power_ratio), ""),
        ("array", "is_compatible", a.is_compatible.to_string(), ""),
        ("array", "voc_cold", format!("{:.2}", a.voc_cold), "V"),
        ("array", "vmp_cold", format!("{:.2}", a.vmp_cold), "V"),
        ("array", "vmp_hot", format!("{:.2}", a.vmp_hot), "V"),
        ("array", "isc_hot", format!("{:.2}", a.isc_hot), "A"),
        ("array", "imp_hot", format!("{:.2}", a.imp_hot), "A"),
        ("array", "max_series", a.max_series.to_string(), ""),
        ("array", "optimal_series", a.optimal_series.to_string(), ""),
        ("array", "min_series", a.min_series.to_string(), ""),
        ("array", "max_parallel", a.max_parallel.to_string(), ""),
        ("array", "optimal_parallel", a.optimal_parallel.to_string(), ""),
        ("layout", "series_per_string", report.layout.series_per_string.to_string(), ""),
        ("layout", "parallel_strings", report.layout.parallel_strings.to_string(), ""),
        ("layout", "wired_panels", report.layout.wired_panels.to_string(), ""),
        ("layout", "fits", report.layout.fits.to_string(), ""),
    ];
    for (section, quantity, value, unit) in &rows {
        wtr.write_record([*section, *quantity, value.as_str(), *unit])?;
    }

    let p = &report.protection;
    for (quantity, value, unit) in [
        ("fuse_voltage_rating", p.fuse_voltage_rating, "V"),
        ("fuse_current_rating", p.fuse_current_rating, "A"),
        ("switch_current_rating", p.switch_current_rating, "A"),
        ("voc_max", p.voc_max, "V"),
        ("isc_max", p.isc_max, "A"),
        ("max_strings_without_protection", p.max_strings_without_protection, ""),
        ("max_strings_with_protection", p.max_strings_with_protection, ""),
    ] {
        wtr.write_record(["protection", quantity, format!("{value:.2}").as_str(), unit])?;
    }

    let ac = &report.ac_protection;
    for (quantity, value, unit) in [
        ("inverter_count", ac.inverter_count.to_string(), ""),
        ("switch_voltage_rating", format!("{:.2}", ac.switch_voltage_rating), "V"),
        ("switch_current_rating", format!("{:.2}", ac.switch_current_rating), "A"),
    ] {
        wtr.write_record(["ac_protection", quantity, value.as_str(), unit])?;
    }

    write_cable(&mut wtr, "dc_cable", &report.dc_cable)?;
    write_cable(&mut wtr, "ac_cable", &report.ac_cable)?;
    if let Some(secondary) = &report.ac_cable_secondary {
        write_cable(&mut wtr, "ac_cable_secondary", secondary)?;
    }
    wtr.write_record([
        "ac_total",
        "voltage_drop_pct",
        format!("{:.2}", report.ac_total_voltage_drop_pct).as_str(),
        "%",
    ])?;

    wtr.flush()?;
    Ok(())
}

fn write_cable<W: Write>(
    wtr: &mut csv::Writer<W>,
    section: &str,
    c: &CableSizing,
) -> Result<()> {
    for (quantity, value, unit) in [
        ("iz", format!("{:.2}", c.iz), "A"),
        ("section", format!("{:.2}", c.section), "mm2"),
        ("length", format!("{:.2}", c.length), "m"),
        ("iz_corrected_80c", format!("{:.2}", c.corrected.exposed_80c), "A"),
        ("iz_corrected_50c", format!("{:.2}", c.corrected.shielded_50c), "A"),
        ("iz_corrected_25c", format!("{:.2}", c.corrected.buried_25c), "A"),
        ("voltage_drop", format!("{:.4}", c.voltage_drop), "V"),
        ("voltage_drop_pct", format!("{:.2}", c.voltage_drop_pct), "%"),
    ] {
        wtr.write_record([section, quantity, value.as_str(), unit])?;
    }
    Ok(())
}
