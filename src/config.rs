use anyhow::Result;
use figment::{providers::{Env, Format, Toml}, Figment};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub input: InputConfig,
    pub model: ModelConfig,
    pub solver: SolverConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Tabular source whose first column holds the run label and the
    /// concentration sequence.
    pub spreadsheet: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    pub definition: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SolverConfig {
    pub max_iterations: u64,
    /// Convergence threshold on the largest |d[s]/dt|.
    pub tolerance: f64,
    pub time_step: f64,
    /// Wall-clock budget per solve; exhaustion becomes a per-point skip.
    pub time_budget_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("SWEEP__").split("__"));
        Ok(figment.extract()?)
    }
}
