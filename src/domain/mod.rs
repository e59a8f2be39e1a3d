use serde::{Deserialize, Serialize};
use std::fmt;

/// One species of the loaded model. The species universe is queried once at
/// startup and fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesInfo {
    pub name: String,
    pub initial_concentration: f64,
}

/// One reaction-rate parameter. `reaction` is metadata only; it never
/// reaches the output table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterInfo {
    pub name: String,
    pub value: f64,
    pub reaction: String,
}

/// Species chosen to receive each swept concentration value. Set semantics
/// with insertion order: re-adding a name is accepted and changes nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectedSpecies {
    names: Vec<String>,
}

impl SelectedSpecies {
    /// Returns false when the name was already selected.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.names.iter().any(|n| n == name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Parameter overrides applied during configuration and held fixed for the
/// entire sweep. Re-overriding a name keeps the latest value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterOverrides {
    entries: Vec<(String, f64)>,
}

impl ParameterOverrides {
    pub fn set(&mut self, name: &str, value: f64) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name.to_string(), value));
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Why a sweep point produced no row.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The input value did not parse as a number; no model mutation happened.
    Unparseable(String),
    /// The model rejected a concentration or parameter mutation.
    Model(String),
    /// The solver finished without a usable steady state.
    SolveFailed(String),
    /// The post-solve concentration read failed.
    NoSteadyState(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unparseable(e) => write!(f, "value does not parse as a number: {}", e),
            SkipReason::Model(e) => write!(f, "model rejected the configuration: {}", e),
            SkipReason::SolveFailed(o) => write!(f, "steady-state solve {}", o),
            SkipReason::NoSteadyState(e) => write!(f, "no usable steady state: {}", e),
        }
    }
}

/// A successful sweep point: the swept value plus the full steady-state
/// snapshot, in species-universe order.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepRow {
    pub swept: f64,
    pub concentrations: Vec<f64>,
}

/// Exactly one outcome per input value, in input order.
#[derive(Debug, Clone, PartialEq)]
pub enum SweepOutcome {
    Row(SweepRow),
    Skipped { value: String, reason: SkipReason },
}

impl SweepOutcome {
    pub fn as_row(&self) -> Option<&SweepRow> {
        match self {
            SweepOutcome::Row(row) => Some(row),
            SweepOutcome::Skipped { .. } => None,
        }
    }
}
