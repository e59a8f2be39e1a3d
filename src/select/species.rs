use itertools::Itertools;
use tracing::warn;

use crate::domain::{SelectedSpecies, SpeciesInfo};

use super::{Prompt, PromptError, Transition};

/// Matched exactly; unlike the parameter loop, `Done` is just another
/// unknown species name here.
const SENTINEL: &str = "done";

/// Run the species-selection loop until the operator types the sentinel.
/// An empty selection is valid; there is no way to remove a name.
pub fn select_species(
    prompt: &mut dyn Prompt,
    universe: &[SpeciesInfo],
) -> Result<SelectedSpecies, PromptError> {
    let names: Vec<&str> = universe.iter().map(|s| s.name.as_str()).collect();

    prompt.say("Select the species whose initial concentration follows the swept input values.");
    prompt.say("Species left unselected keep the model's own initial concentrations.");
    prompt.say(&format!("Possible species are: {}", names.iter().join(", ")));
    prompt.say(&format!("Type '{SENTINEL}' to proceed with the selection."));

    let mut selected = SelectedSpecies::default();
    loop {
        let input = prompt.read_line("Please type in a species name: ")?;
        match step(&mut selected, &names, &input) {
            Transition::Done => break,
            Transition::Added => {
                prompt.say(&format!(
                    "Current selection: {}",
                    selected.names().iter().join(", ")
                ));
            }
            Transition::Rejected => {
                warn!(name = %input, "not a species of the loaded model");
                prompt.say("This is not a species that exists in the loaded model. Try again!");
            }
        }
    }
    Ok(selected)
}

fn step(selected: &mut SelectedSpecies, universe: &[&str], input: &str) -> Transition {
    if input == SENTINEL {
        return Transition::Done;
    }
    if universe.contains(&input) {
        selected.insert(input);
        Transition::Added
    } else {
        Transition::Rejected
    }
}
