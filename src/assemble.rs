//! Result assembly: the successful sweep rows joined with one post-sweep
//! snapshot of the reaction-parameter values, as a wide table with a fixed
//! column contract, written out as CSV.

use anyhow::{Context, Result};
use std::path::Path;

use crate::domain::{ParameterInfo, SpeciesInfo, SweepOutcome};

/// Header used for the swept-value column when the input carried no label.
pub const DEFAULT_SWEPT_COLUMN: &str = "IP_tot";

/// Column order is a contract: species columns in model-universe order,
/// then the swept-value column, then one column per reaction parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

/// Build the table from the sweep outcomes. Skipped points are excluded,
/// never zero-filled; when everything was skipped the table still carries
/// the full column contract with zero data rows. The parameter snapshot is
/// taken once, here, and broadcast across all rows.
pub fn assemble(
    species: &[SpeciesInfo],
    parameters: &[ParameterInfo],
    outcomes: &[SweepOutcome],
    label: &str,
) -> ResultTable {
    let swept_column = if label.is_empty() {
        DEFAULT_SWEPT_COLUMN
    } else {
        label
    };

    let mut columns: Vec<String> = species.iter().map(|s| s.name.clone()).collect();
    columns.push(swept_column.to_string());
    columns.extend(parameters.iter().map(|p| p.name.clone()));

    let constants: Vec<f64> = parameters.iter().map(|p| p.value).collect();
    let mut rows = Vec::new();
    for outcome in outcomes {
        let Some(row) = outcome.as_row() else { continue };
        debug_assert_eq!(row.concentrations.len(), species.len());

        let mut record = Vec::with_capacity(columns.len());
        record.extend_from_slice(&row.concentrations);
        record.push(row.swept);
        record.extend_from_slice(&constants);
        rows.push(record);
    }

    ResultTable { columns, rows }
}

impl ResultTable {
    /// Header row plus one record per successful sweep point; no index
    /// column.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("could not create output file {}", path.display()))?;
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(|value| value.to_string()))?;
        }
        writer.flush()?;
        Ok(())
    }
}
