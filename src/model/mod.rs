//! The kinetic-model facade: introspection, mutation, and steady-state
//! solving against one mutable model instance. The sweep engine only sees
//! this trait, so a real kinetics backend, the built-in simulator, and the
//! scripted mock are interchangeable.

pub mod definition;
#[cfg(feature = "sim")]
pub mod sim;

use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;

use crate::domain::{ParameterInfo, SpeciesInfo};

#[cfg(feature = "sim")]
pub use sim::SimulatedModel;

/// Model-facade errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown species: {0}")]
    UnknownSpecies(String),
    #[error("unknown reaction parameter: {0}")]
    UnknownParameter(String),
    #[error("no solved steady state is available")]
    NotSolved,
}

/// How a steady-state solve ended. Anything but `Converged` leaves the
/// model without a readable steady state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveOutcome {
    Converged,
    NotConverged,
    /// The solver's wall-clock budget ran out before convergence.
    TimedOut,
}

impl fmt::Display for SolveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveOutcome::Converged => write!(f, "converged"),
            SolveOutcome::NotConverged => write!(f, "did not converge"),
            SolveOutcome::TimedOut => write!(f, "timed out"),
        }
    }
}

pub trait KineticModel {
    /// The fixed species universe, in model order.
    fn species(&self) -> &[SpeciesInfo];
    /// The fixed reaction-parameter universe, in model order, with current
    /// values.
    fn reaction_parameters(&self) -> &[ParameterInfo];
    fn set_species_concentration(&mut self, name: &str, value: f64) -> Result<(), ModelError>;
    fn set_parameter_value(&mut self, name: &str, value: f64) -> Result<(), ModelError>;
    fn solve_steady_state(&mut self) -> Result<SolveOutcome, ModelError>;
    /// Steady-state concentrations in species-universe order. Fails with
    /// [`ModelError::NotSolved`] when the last solve did not converge or no
    /// solve has happened since the last mutation.
    fn steady_state_concentrations(&self) -> Result<Vec<f64>, ModelError>;
}

/// Scripted model for tests. Solve outcomes are consumed in order and
/// default to `Converged` once the script is exhausted.
pub struct MockModel {
    species: Vec<SpeciesInfo>,
    parameters: Vec<ParameterInfo>,
    pub script: VecDeque<SolveOutcome>,
    /// Every concentration mutation, in order.
    pub applied: Vec<(String, f64)>,
    pub solves: usize,
    /// Force the post-solve read to fail even after a converged solve.
    pub fail_reads: bool,
    current: Vec<f64>,
    solved: Option<Vec<f64>>,
}

impl MockModel {
    pub fn new(species: &[&str], parameters: &[(&str, f64)]) -> Self {
        let species: Vec<SpeciesInfo> = species
            .iter()
            .map(|name| SpeciesInfo {
                name: name.to_string(),
                initial_concentration: 0.0,
            })
            .collect();
        let parameters = parameters
            .iter()
            .map(|(name, value)| ParameterInfo {
                name: name.to_string(),
                value: *value,
                reaction: String::new(),
            })
            .collect();
        let current = vec![0.0; species.len()];
        Self {
            species,
            parameters,
            script: VecDeque::new(),
            applied: Vec::new(),
            solves: 0,
            fail_reads: false,
            current,
            solved: None,
        }
    }

    pub fn with_script(mut self, script: impl IntoIterator<Item = SolveOutcome>) -> Self {
        self.script = script.into_iter().collect();
        self
    }
}

impl KineticModel for MockModel {
    fn species(&self) -> &[SpeciesInfo] {
        &self.species
    }

    fn reaction_parameters(&self) -> &[ParameterInfo] {
        &self.parameters
    }

    fn set_species_concentration(&mut self, name: &str, value: f64) -> Result<(), ModelError> {
        let idx = self
            .species
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| ModelError::UnknownSpecies(name.to_string()))?;
        self.current[idx] = value;
        self.solved = None;
        self.applied.push((name.to_string(), value));
        Ok(())
    }

    fn set_parameter_value(&mut self, name: &str, value: f64) -> Result<(), ModelError> {
        let idx = self
            .parameters
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| ModelError::UnknownParameter(name.to_string()))?;
        self.parameters[idx].value = value;
        self.solved = None;
        Ok(())
    }

    fn solve_steady_state(&mut self) -> Result<SolveOutcome, ModelError> {
        self.solves += 1;
        let outcome = self.script.pop_front().unwrap_or(SolveOutcome::Converged);
        self.solved = match outcome {
            SolveOutcome::Converged => Some(self.current.clone()),
            _ => None,
        };
        Ok(outcome)
    }

    fn steady_state_concentrations(&self) -> Result<Vec<f64>, ModelError> {
        if self.fail_reads {
            return Err(ModelError::NotSolved);
        }
        self.solved.clone().ok_or(ModelError::NotSolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_read_fails_before_any_solve() {
        let model = MockModel::new(&["A"], &[]);
        assert_eq!(
            model.steady_state_concentrations(),
            Err(ModelError::NotSolved)
        );
    }

    #[test]
    fn test_mock_mutation_invalidates_previous_solve() {
        let mut model = MockModel::new(&["A"], &[]);
        model.solve_steady_state().unwrap();
        assert!(model.steady_state_concentrations().is_ok());
        model.set_species_concentration("A", 1.0).unwrap();
        assert_eq!(
            model.steady_state_concentrations(),
            Err(ModelError::NotSolved)
        );
    }

    #[test]
    fn test_mock_rejects_unknown_names() {
        let mut model = MockModel::new(&["A"], &[("k1", 0.5)]);
        assert_eq!(
            model.set_species_concentration("B", 1.0),
            Err(ModelError::UnknownSpecies("B".into()))
        );
        assert_eq!(
            model.set_parameter_value("k9", 1.0),
            Err(ModelError::UnknownParameter("k9".into()))
        );
    }
}
