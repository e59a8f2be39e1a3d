//! Spreadsheet ingestion: the first column of a CSV file, where row 0 is a
//! free-text run label and every following row is a concentration value.
//! A non-numeric data row is a usage error and aborts the run.

use anyhow::{bail, Context, Result};
use std::path::Path;

/// Returns the concentration sequence as fixed-precision tokens plus the
/// trimmed run label. Values are coerced to 8 decimal places and reparsed,
/// so malformed cells fail here, loudly, before any model work starts.
pub fn read_concentration_column(path: &Path) -> Result<(Vec<String>, String)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("could not open concentration source {}", path.display()))?;

    let mut cells = Vec::new();
    for record in reader.records() {
        let record =
            record.with_context(|| format!("could not read {}", path.display()))?;
        if let Some(cell) = record.get(0) {
            cells.push(cell.to_string());
        }
    }
    if cells.is_empty() {
        bail!("concentration source {} is empty", path.display());
    }

    let label = cells.remove(0).trim().to_string();
    let mut tokens = Vec::with_capacity(cells.len());
    for (idx, cell) in cells.iter().enumerate() {
        let value: f64 = cell.trim().parse().with_context(|| {
            format!(
                "row {} of {} is not a number: {:?}",
                idx + 2,
                path.display(),
                cell
            )
        })?;
        tokens.push(format!("{value:.8}"));
    }
    Ok((tokens, label))
}
