//! Result records as callers consume them.

use serde::Serialize;

use crate::optimizer::{Allocation, BudgetSweepEntry, OptimizeError};

/// `{x, y, z, damage, source}` on success, `{x: 0, y: 0, z: 0, damage: 0,
/// error}` when nothing could be produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptimizationPayload {
    Found(Allocation),
    Failed {
        x: i64,
        y: i64,
        z: i64,
        damage: f64,
        error: String,
    },
}

impl OptimizationPayload {
    pub fn failed(err: &OptimizeError) -> Self {
        Self::Failed {
            x: 0,
            y: 0,
            z: 0,
            damage: 0.0,
            error: err.to_string(),
        }
    }
}

impl From<&Result<Allocation, OptimizeError>> for OptimizationPayload {
    fn from(result: &Result<Allocation, OptimizeError>) -> Self {
        match result {
            Ok(best) => Self::Found(*best),
            Err(err) => Self::failed(err),
        }
    }
}

/// One line of a budget sweep, flattened for CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepRow {
    pub s: i64,
    pub x: i64,
    pub y: i64,
    pub z: i64,
    pub damage: f64,
    pub source: String,
}

impl From<&BudgetSweepEntry> for SweepRow {
    fn from(entry: &BudgetSweepEntry) -> Self {
        match &entry.result {
            Ok(best) => Self {
                s: entry.budget,
                x: best.x,
                y: best.y,
                z: best.z,
                damage: best.damage,
                source: best.source.to_string(),
            },
            Err(err) => Self {
                s: entry.budget,
                x: 0,
                y: 0,
                z: 0,
                damage: 0.0,
                source: err.to_string(),
            },
        }
    }
}

/// Writes sweep rows as CSV with a header line.
pub fn write_sweep_csv<W: std::io::Write>(
    writer: W,
    entries: &[BudgetSweepEntry],
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for entry in entries {
        csv_writer.serialize(SweepRow::from(entry))?;
    }
    csv_writer.flush()?;
    Ok(())
}
