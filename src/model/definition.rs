//! External model definition: a mass-action reaction network described in a
//! TOML file. A missing or malformed file is a structural error and aborts
//! the run.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct ModelDefinition {
    pub species: Vec<SpeciesDef>,
    pub reactions: Vec<ReactionDef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesDef {
    pub name: String,
    #[serde(default)]
    pub initial_concentration: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReactionDef {
    pub name: String,
    /// Name of the rate parameter governing this reaction.
    pub parameter: String,
    /// The parameter's starting value.
    pub rate: f64,
    #[serde(default)]
    pub reactants: Vec<Term>,
    #[serde(default)]
    pub products: Vec<Term>,
}

/// One stoichiometric term of a reaction.
#[derive(Debug, Clone, Deserialize)]
pub struct Term {
    pub species: String,
    #[serde(default = "default_coefficient")]
    pub coefficient: f64,
}

fn default_coefficient() -> f64 {
    1.0
}

impl ModelDefinition {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("could not read model definition {}", path.display()))?;
        let definition: Self = toml::from_str(&text)
            .with_context(|| format!("malformed model definition {}", path.display()))?;
        definition.validate()?;
        Ok(definition)
    }

    fn validate(&self) -> Result<()> {
        if self.species.is_empty() {
            bail!("model definition declares no species");
        }
        let mut names = HashSet::new();
        for species in &self.species {
            if !names.insert(species.name.as_str()) {
                bail!("duplicate species name: {}", species.name);
            }
        }
        let mut parameters = HashSet::new();
        for reaction in &self.reactions {
            if !parameters.insert(reaction.parameter.as_str()) {
                bail!("duplicate rate parameter name: {}", reaction.parameter);
            }
            for term in reaction.reactants.iter().chain(&reaction.products) {
                if !names.contains(term.species.as_str()) {
                    bail!(
                        "reaction {} references undeclared species {}",
                        reaction.name,
                        term.species
                    );
                }
            }
        }
        Ok(())
    }
}
