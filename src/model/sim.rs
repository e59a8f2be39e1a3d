//! Built-in kinetics backend: mass-action rate laws integrated with
//! explicit Euler until the largest |d[s]/dt| drops below the configured
//! tolerance. The solver carries its own wall-clock budget, so a stiff or
//! non-converging configuration surfaces as a per-point outcome instead of
//! blocking the whole pipeline.

use std::time::{Duration, Instant};

use crate::config::SolverConfig;
use crate::domain::{ParameterInfo, SpeciesInfo};

use super::definition::{ModelDefinition, Term};
use super::{KineticModel, ModelError, SolveOutcome};

pub struct SimulatedModel {
    species: Vec<SpeciesInfo>,
    parameters: Vec<ParameterInfo>,
    reactions: Vec<Reaction>,
    /// The live initial-concentration configuration; solving never mutates it.
    current: Vec<f64>,
    solved: Option<Vec<f64>>,
    solver: SolverConfig,
}

/// A reaction with name references resolved to indices.
struct Reaction {
    parameter: usize,
    reactants: Vec<(usize, f64)>,
    products: Vec<(usize, f64)>,
}

impl SimulatedModel {
    pub fn new(definition: &ModelDefinition, solver: SolverConfig) -> Result<Self, ModelError> {
        let species: Vec<SpeciesInfo> = definition
            .species
            .iter()
            .map(|s| SpeciesInfo {
                name: s.name.clone(),
                initial_concentration: s.initial_concentration,
            })
            .collect();
        let parameters: Vec<ParameterInfo> = definition
            .reactions
            .iter()
            .map(|r| ParameterInfo {
                name: r.parameter.clone(),
                value: r.rate,
                reaction: r.name.clone(),
            })
            .collect();

        let resolve = |terms: &[Term]| -> Result<Vec<(usize, f64)>, ModelError> {
            terms
                .iter()
                .map(|term| {
                    species
                        .iter()
                        .position(|s| s.name == term.species)
                        .map(|idx| (idx, term.coefficient))
                        .ok_or_else(|| ModelError::UnknownSpecies(term.species.clone()))
                })
                .collect()
        };
        let mut reactions = Vec::with_capacity(definition.reactions.len());
        for (idx, reaction) in definition.reactions.iter().enumerate() {
            reactions.push(Reaction {
                parameter: idx,
                reactants: resolve(&reaction.reactants)?,
                products: resolve(&reaction.products)?,
            });
        }

        let current = species.iter().map(|s| s.initial_concentration).collect();
        Ok(Self {
            species,
            parameters,
            reactions,
            current,
            solved: None,
            solver,
        })
    }
}

impl KineticModel for SimulatedModel {
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
        let budget = Duration::from_secs(self.solver.time_budget_seconds);
        let started = Instant::now();
        let dt = self.solver.time_step;

        let mut state = self.current.clone();
        let mut derivatives = vec![0.0; state.len()];

        for iteration in 0..self.solver.max_iterations {
            derivatives.iter_mut().for_each(|d| *d = 0.0);
            for reaction in &self.reactions {
                let mut rate = self.parameters[reaction.parameter].value;
                for &(idx, coefficient) in &reaction.reactants {
                    rate *= state[idx].powf(coefficient);
                }
                for &(idx, coefficient) in &reaction.reactants {
                    derivatives[idx] -= coefficient * rate;
                }
                for &(idx, coefficient) in &reaction.products {
                    derivatives[idx] += coefficient * rate;
                }
            }

            let mut largest = 0.0_f64;
            for (value, derivative) in state.iter_mut().zip(&derivatives) {
                // concentrations cannot go negative
                *value = (*value + dt * derivative).max(0.0);
                largest = largest.max(derivative.abs());
            }
            if largest < self.solver.tolerance {
                self.solved = Some(state);
                return Ok(SolveOutcome::Converged);
            }

            // check the wall clock every so often, not every step
            if iteration % 1024 == 0 && started.elapsed() >= budget {
                self.solved = None;
                return Ok(SolveOutcome::TimedOut);
            }
        }

        self.solved = None;
        Ok(SolveOutcome::NotConverged)
    }

    fn steady_state_concentrations(&self) -> Result<Vec<f64>, ModelError> {
        self.solved.clone().ok_or(ModelError::NotSolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reversible_definition() -> ModelDefinition {
        toml::from_str(
            r#"
            [[species]]
            name = "A"
            initial_concentration = 1.0

            [[species]]
            name = "B"

            [[reactions]]
            name = "forward"
            parameter = "k1"
            rate = 1.0
            reactants = [{ species = "A" }]
            products = [{ species = "B" }]

            [[reactions]]
            name = "backward"
            parameter = "k2"
            rate = 1.0
            reactants = [{ species = "B" }]
            products = [{ species = "A" }]
        "#,
        )
        .unwrap()
    }

    fn solver() -> SolverConfig {
        SolverConfig {
            max_iterations: 200_000,
            tolerance: 1e-9,
            time_step: 1e-3,
            time_budget_seconds: 30,
        }
    }

    #[test]
    fn test_reversible_pair_equilibrates() {
        let mut model = SimulatedModel::new(&reversible_definition(), solver()).unwrap();
        assert_eq!(model.solve_steady_state().unwrap(), SolveOutcome::Converged);

        let state = model.steady_state_concentrations().unwrap();
        // k1 == k2, so the total mass of 1.0 splits evenly
        assert_relative_eq!(state[0], 0.5, epsilon = 1e-6);
        assert_relative_eq!(state[1], 0.5, epsilon = 1e-6);
        // mass conservation
        assert_relative_eq!(state[0] + state[1], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_equilibrium_follows_overridden_rate() {
        let mut model = SimulatedModel::new(&reversible_definition(), solver()).unwrap();
        model.set_parameter_value("k2", 3.0).unwrap();
        model.solve_steady_state().unwrap();

        let state = model.steady_state_concentrations().unwrap();
        // A/B = k2/k1 = 3 at equilibrium
        assert_relative_eq!(state[0] / state[1], 3.0, epsilon = 1e-4);
    }

    #[test]
    fn test_configured_concentration_scales_the_solution() {
        let mut model = SimulatedModel::new(&reversible_definition(), solver()).unwrap();
        model.set_species_concentration("A", 4.0).unwrap();
        model.solve_steady_state().unwrap();

        let state = model.steady_state_concentrations().unwrap();
        assert_relative_eq!(state[0] + state[1], 4.0, epsilon = 1e-9);
        assert_relative_eq!(state[0], 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_iteration_cap_reports_not_converged() {
        let mut cfg = solver();
        cfg.max_iterations = 5;
        let mut model = SimulatedModel::new(&reversible_definition(), cfg).unwrap();

        assert_eq!(
            model.solve_steady_state().unwrap(),
            SolveOutcome::NotConverged
        );
        assert_eq!(
            model.steady_state_concentrations(),
            Err(ModelError::NotSolved)
        );
    }

    #[test]
    fn test_exhausted_time_budget_reports_timeout() {
        let mut cfg = solver();
        cfg.time_budget_seconds = 0;
        let mut model = SimulatedModel::new(&reversible_definition(), cfg).unwrap();

        assert_eq!(model.solve_steady_state().unwrap(), SolveOutcome::TimedOut);
    }

    #[test]
    fn test_solving_does_not_disturb_the_configuration() {
        let mut model = SimulatedModel::new(&reversible_definition(), solver()).unwrap();
        model.solve_steady_state().unwrap();
        let first = model.steady_state_concentrations().unwrap();

        // an identical re-solve starts from the same configured initials
        model.set_species_concentration("A", 1.0).unwrap();
        model.solve_steady_state().unwrap();
        let second = model.steady_state_concentrations().unwrap();
        assert_relative_eq!(first[0], second[0], epsilon = 1e-12);
    }
}
