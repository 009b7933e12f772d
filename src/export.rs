//! Durable and human-facing output of a solved table.
//!
//! One CSV row per resolved position: canonical FEN, winning side name,
//! distance to zero. The sampled preview shows a thin, bounded slice of the
//! same rows so a long run can be eyeballed without drowning the terminal.

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::basic::{side_name, Outcome};
use crate::table::Table;

/// Every resolved position as an export row (fen, side name, dtz).
pub fn enumerate_resolved(table: &Table) -> impl Iterator<Item = (&str, &'static str, u32)> {
    table
        .iter()
        .map(|(pos, Outcome { winner, dtz })| (pos.fen(), side_name(winner), dtz))
}

/// Every `stride`th row, at most `limit` of them.
pub fn sample(
    table: &Table,
    stride: usize,
    limit: usize,
) -> impl Iterator<Item = (&str, &'static str, u32)> {
    enumerate_resolved(table).step_by(stride.max(1)).take(limit)
}

/// Write the whole table to `path`, one row per resolved position.
/// Returns the number of rows written.
pub fn write_csv(table: &Table, path: &str) -> Result<usize, String> {
    let file = File::create(path).map_err(|e| format!("cannot create {} ({})", path, e))?;
    let mut writer = BufWriter::new(file);
    let mut rows = 0usize;
    for (fen, side, dtz) in enumerate_resolved(table) {
        writeln!(writer, "{},{},{}", fen, side, dtz)
            .map_err(|e| format!("error writing row {} to {} ({})", rows + 1, path, e))?;
        rows += 1;
    }
    writer
        .flush()
        .map_err(|e| format!("couldn't flush buffer for {} ({})", path, e))?;
    Ok(rows)
}
