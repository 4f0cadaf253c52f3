//! Per-run result records and the CSV result log.
//!
//! # Columns
//!
//! | Column | Field |
//! |--------|-------|
//! | Instância | Instance file name |
//! | Execução | Run index (1-based) |
//! | Tempo de Execução (s) | Wall-clock seconds for the run |
//! | Importância Total | Best importance found |
//! | Custo Final | Total cost of the best selection |

use std::fmt::Write as _;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::models::ItemId;

/// Header row of the CSV result log.
pub const CSV_HEADER: [&str; 5] = [
    "Instância",
    "Execução",
    "Tempo de Execução (s)",
    "Importância Total",
    "Custo Final",
];

/// Outcome of one run on one instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Instance identifier (file name).
    pub instance: String,
    /// Run index, starting at 1.
    pub run: usize,
    /// Wall-clock seconds elapsed.
    pub elapsed_secs: f64,
    /// Best importance found.
    pub importance: u64,
    /// Total cost of the best selection.
    pub cost: u64,
}

impl RunRecord {
    /// Fields in CSV column order.
    pub fn csv_fields(&self) -> [String; 5] {
        [
            self.instance.clone(),
            self.run.to_string(),
            self.elapsed_secs.to_string(),
            self.importance.to_string(),
            self.cost.to_string(),
        ]
    }
}

/// Writes the header and one row per record.
///
/// Fields containing a delimiter, quote or line break are quoted.
pub fn write_csv<W: Write>(writer: W, records: &[RunRecord]) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(CSV_HEADER)?;
    for record in records {
        out.write_record(record.csv_fields())?;
    }
    out.flush()?;
    Ok(())
}

/// Human-readable summary of a run and its best selection.
pub fn format_summary(record: &RunRecord, items: &[ItemId]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Instância: {} (execução {})", record.instance, record.run);
    let _ = writeln!(out, "Melhor solução encontrada: {items:?}");
    let _ = writeln!(out, "Importância total: {}", record.importance);
    let _ = writeln!(out, "Custo final: {}", record.cost);
    out.push_str("--------------------------------------");
    out
}
