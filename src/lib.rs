//! Parametric steady-state sweep over a chemical-kinetics model: read a
//! concentration sequence, let the operator pick the species that sweep and
//! the rate parameters to override, solve the model once per value, and
//! write one wide result table.

pub mod assemble;
pub mod config;
pub mod domain;
pub mod ingest;
pub mod model;
pub mod select;
pub mod sweep;
pub mod telemetry;
