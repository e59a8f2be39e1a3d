//! The sweep engine: one steady-state solve per input value, in order,
//! against a single mutable model handle. Per-point failures degrade the
//! point to a skip; nothing here aborts the sweep.

use tracing::{debug, info, warn};

use crate::domain::{SelectedSpecies, SkipReason, SweepOutcome, SweepRow};
use crate::model::{KineticModel, SolveOutcome};

/// Produces exactly one outcome per token, preserving input order. An empty
/// selection degenerates to repeated solves of the unchanged model.
pub fn run_sweep(
    model: &mut dyn KineticModel,
    selected: &SelectedSpecies,
    tokens: &[String],
) -> Vec<SweepOutcome> {
    let mut outcomes = Vec::with_capacity(tokens.len());
    for token in tokens {
        let outcome = sweep_point(model, selected, token);
        match &outcome {
            SweepOutcome::Row(row) => debug!(swept = row.swept, "sweep point solved"),
            SweepOutcome::Skipped { value, reason } => {
                warn!(value = %value, %reason, "skipping sweep point");
            }
        }
        outcomes.push(outcome);
    }

    let rows = outcomes.iter().filter(|o| o.as_row().is_some()).count();
    info!(points = tokens.len(), rows, "sweep finished");
    outcomes
}

fn sweep_point(
    model: &mut dyn KineticModel,
    selected: &SelectedSpecies,
    token: &str,
) -> SweepOutcome {
    let skip = |reason: SkipReason| SweepOutcome::Skipped {
        value: token.to_string(),
        reason,
    };

    // 1. coerce first; a bad value must not touch the model
    let concentration: f64 = match token.trim().parse() {
        Ok(value) => value,
        Err(err) => return skip(SkipReason::Unparseable(format!("{err}"))),
    };

    // 2. one identical initial concentration for every selected species
    for name in selected.names() {
        if let Err(err) = model.set_species_concentration(name, concentration) {
            return skip(SkipReason::Model(err.to_string()));
        }
    }

    // 3. blocking, authoritative solve
    match model.solve_steady_state() {
        Ok(SolveOutcome::Converged) => {}
        Ok(outcome) => return skip(SkipReason::SolveFailed(outcome.to_string())),
        Err(err) => return skip(SkipReason::Model(err.to_string())),
    }

    // 4./5. full snapshot or a skip
    match model.steady_state_concentrations() {
        Ok(concentrations) => SweepOutcome::Row(SweepRow {
            swept: concentration,
            concentrations,
        }),
        Err(err) => skip(SkipReason::NoSteadyState(err.to_string())),
    }
}
