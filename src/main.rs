use anyhow::Result;
use steady_state_sweep::telemetry::init_tracing;

#[cfg(feature = "sim")]
fn main() -> Result<()> {
    use steady_state_sweep::config::Config;
    use steady_state_sweep::model::definition::ModelDefinition;
    use steady_state_sweep::model::{KineticModel, SimulatedModel};
    use steady_state_sweep::select::{self, Console};
    use steady_state_sweep::{assemble, ingest, sweep};
    use tracing::info;

    init_tracing();

    let cfg = Config::load()?;

    let (tokens, label) = ingest::read_concentration_column(&cfg.input.spreadsheet)?;
    info!(points = tokens.len(), label = %label, "loaded concentration sequence");

    let definition = ModelDefinition::from_path(&cfg.model.definition)?;
    let mut model = SimulatedModel::new(&definition, cfg.solver.clone())?;
    info!(
        species = model.species().len(),
        parameters = model.reaction_parameters().len(),
        "model ready"
    );

    let mut console = Console::default();
    let selected = select::select_species(&mut console, model.species())?;
    let overrides = select::collect_parameter_overrides(&mut console, &mut model)?;
    if !overrides.is_empty() {
        info!(count = overrides.len(), "parameter overrides applied");
    }

    let outcomes = sweep::run_sweep(&mut model, &selected, &tokens);

    let table = assemble::assemble(
        model.species(),
        model.reaction_parameters(),
        &outcomes,
        &label,
    );
    table.write_csv(&cfg.output.path)?;
    info!(
        path = %cfg.output.path.display(),
        rows = table.rows.len(),
        "steady-state analysis written"
    );
    Ok(())
}

#[cfg(not(feature = "sim"))]
fn main() -> Result<()> {
    init_tracing();
    anyhow::bail!("rebuild with the `sim` feature to run against the built-in kinetics backend")
}
