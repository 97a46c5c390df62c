//! Serialisatie van takmetrieken naar CSV en JSON.

use std::io::{self, Write};

use crate::morph::metrics::{BranchMetrics, SpineDensity};
use crate::morph::node::NodeId;

/// Kolomkoppen van het CSV-uitvoerformaat.
pub const CSV_HEADER: &str = "START;END;LENGTH;SPINE_COUNT;SPINE_DENSITY";

/// Marker voor een niet-gedefinieerde dichtheid in de CSV-uitvoer.
pub const UNDEFINED_DENSITY: &str = "undefined";

/// Label waarmee een sample in de uitvoer wordt aangeduid.
#[must_use]
pub fn node_label(id: NodeId) -> String {
    format!("Dendrite#{}", id.0)
}

/// Schrijft de records als CSV met `;` als scheidingsteken, één record
/// per tak, voorafgegaan door de kopregel.
pub fn write_csv<W: Write>(writer: &mut W, records: &[BranchMetrics]) -> io::Result<()> {
    writeln!(writer, "{CSV_HEADER}")?;
    for record in records {
        let density = match record.density {
            SpineDensity::PerMicron(value) => value.to_string(),
            SpineDensity::Undefined => UNDEFINED_DENSITY.to_owned(),
        };
        writeln!(
            writer,
            "{};{};{};{};{}",
            node_label(record.start),
            node_label(record.end),
            record.length,
            record.spine_count,
            density
        )?;
    }
    Ok(())
}

/// Serialiseert de records als JSON.
pub fn to_json(records: &[BranchMetrics]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}
