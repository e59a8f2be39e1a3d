use itertools::Itertools;
use tracing::warn;

use crate::domain::ParameterOverrides;
use crate::model::KineticModel;

use super::{Prompt, PromptError};

const SENTINEL: &str = "done";

/// Run the parameter-override loop. A known name leads into an inner
/// numeric loop that repeats until a value parses; the override is applied
/// to the model right away and there is no undo.
pub fn collect_parameter_overrides(
    prompt: &mut dyn Prompt,
    model: &mut dyn KineticModel,
) -> Result<ParameterOverrides, PromptError> {
    let table = model.reaction_parameters().to_vec();
    let known: Vec<&str> = table.iter().map(|p| p.name.as_str()).collect();

    prompt.say("---------------------------------------------------");
    for parameter in &table {
        prompt.say(&format!(
            "{:<20} {:>14.6}  ({})",
            parameter.name, parameter.value, parameter.reaction
        ));
    }
    prompt.say("---------------------------------------------------");
    prompt.say("Above are the reaction parameters you can change.");
    prompt.say("Choose a parameter name, then type the new value as a floating point number.");
    prompt.say(&format!("Possible parameters are: {}", known.iter().join(", ")));
    prompt.say(&format!("Type '{SENTINEL}' to proceed with the selection."));

    let mut overrides = ParameterOverrides::default();
    loop {
        let name = prompt.read_line("Which rate parameter do you want to change?: ")?;

        // this sentinel is case-insensitive, unlike the species loop
        if name.eq_ignore_ascii_case(SENTINEL) {
            break;
        }
        if !known.contains(&name.as_str()) {
            warn!(name = %name, "not a rate parameter of the loaded model");
            prompt.say("This is not a rate parameter that exists in the loaded model. Try again!");
            continue;
        }

        prompt.say(&format!("Changing rate parameter: {name}"));
        let value = read_value(prompt)?;
        if let Err(err) = model.set_parameter_value(&name, value) {
            // name was validated against the model's own table just above
            warn!(%err, "parameter override rejected by the model");
            continue;
        }
        overrides.set(&name, value);
    }

    prompt.say("Summary of reaction parameters:");
    for parameter in model.reaction_parameters() {
        prompt.say(&format!("{:<20} {:>14.6}", parameter.name, parameter.value));
    }
    prompt.say("---------------------------------------------------");

    Ok(overrides)
}

fn read_value(prompt: &mut dyn Prompt) -> Result<f64, PromptError> {
    loop {
        let text = prompt.read_line("What is the value you want to change it into?: ")?;
        match text.parse::<f64>() {
            Ok(value) => return Ok(value),
            Err(_) => prompt.say("Invalid input. Please enter a valid floating point number."),
        }
    }
}
