//! End-to-end run of the sweep pipeline against the built-in kinetics
//! backend: ingest -> selection -> parameter overrides -> sweep ->
//! assembly -> CSV.

#![cfg(feature = "sim")]

use std::io::Write;

use approx::assert_relative_eq;
use steady_state_sweep::config::SolverConfig;
use steady_state_sweep::model::definition::ModelDefinition;
use steady_state_sweep::model::{KineticModel, SimulatedModel};
use steady_state_sweep::select::{collect_parameter_overrides, select_species, Scripted};
use steady_state_sweep::{assemble, ingest, sweep};

const MODEL: &str = r#"
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
"#;

fn solver() -> SolverConfig {
    SolverConfig {
        max_iterations: 200_000,
        tolerance: 1e-9,
        time_step: 1e-3,
        time_budget_seconds: 30,
    }
}

#[test]
fn full_pipeline_produces_the_contracted_table() {
    let dir = tempfile::tempdir().unwrap();

    let input_path = dir.path().join("input_conc.csv");
    let mut input = std::fs::File::create(&input_path).unwrap();
    write!(input, "A_tot\n1.0\n2.0\n4.0\n").unwrap();
    drop(input);

    let (tokens, label) = ingest::read_concentration_column(&input_path).unwrap();
    assert_eq!(label, "A_tot");
    assert_eq!(tokens.len(), 3);

    let definition: ModelDefinition = toml::from_str(MODEL).unwrap();
    let mut model = SimulatedModel::new(&definition, solver()).unwrap();

    // sweep A; override k2 to 3.0 (typo first, then the real value)
    let mut prompt = Scripted::new(["A", "done", "k9", "k2", "oops", "3.0", "DONE"]);
    let selected = select_species(&mut prompt, model.species()).unwrap();
    let overrides = collect_parameter_overrides(&mut prompt, &mut model).unwrap();
    assert_eq!(selected.names(), &["A".to_string()]);
    assert_eq!(overrides.get("k2"), Some(3.0));

    let outcomes = sweep::run_sweep(&mut model, &selected, &tokens);
    let table = assemble::assemble(
        model.species(),
        model.reaction_parameters(),
        &outcomes,
        &label,
    );

    assert_eq!(table.columns, vec!["A", "B", "A_tot", "k1", "k2"]);
    assert_eq!(table.rows.len(), 3);

    for (row, expected_total) in table.rows.iter().zip([1.0, 2.0, 4.0]) {
        // swept value recorded as configured
        assert_relative_eq!(row[2], expected_total, epsilon = 1e-12);
        // A/B = k2/k1 = 3 at equilibrium, mass is conserved
        assert_relative_eq!(row[0] + row[1], expected_total, epsilon = 1e-6);
        assert_relative_eq!(row[0] / row[1], 3.0, epsilon = 1e-3);
        // overridden parameter broadcast identically
        assert_eq!(row[3], 1.0);
        assert_eq!(row[4], 3.0);
    }

    let output_path = dir.path().join("steady_state_analysis.csv");
    table.write_csv(&output_path).unwrap();

    let text = std::fs::read_to_string(&output_path).unwrap();
    assert_eq!(text.lines().next(), Some("A,B,A_tot,k1,k2"));
    assert_eq!(text.lines().count(), 4);
}
