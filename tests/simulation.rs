use approx::assert_relative_eq;
use statin_pd::prelude::*;

fn reference() -> Simulation {
    simulate(&SimulationConfig::default()).expect("reference scenario is valid")
}

fn assert_shapes(simulation: &Simulation) {
    let t = simulation.trajectories();
    let state = simulation.final_state();
    let n_days = t.n_days();

    for (name, len) in [
        ("treated", t.treated().len()),
        ("untreated", t.untreated().len()),
        ("healthy", t.healthy().len()),
        ("reduction", t.reduction().len()),
    ] {
        assert_eq!(len, n_days, "{name} length differs from day index");
    }
    assert_eq!(n_days, state.days as usize + 1);
    assert!(n_days <= simulation.parameters().max_days() as usize + 1);

    assert_eq!(t.drug().len(), state.hours as usize + 1);
    assert_eq!(t.hours().len(), t.drug().len());
}

#[test]
fn reference_scenario_terminates_within_horizon() {
    let simulation = reference();
    let state = simulation.final_state();

    assert!(state.days <= 360);
    match simulation.termination() {
        Termination::BelowBaseline => assert!(state.treated < 92.0),
        Termination::HorizonReached => {
            assert_eq!(state.days, 360);
            assert!(state.treated >= 92.0);
        }
    }
    assert_shapes(&simulation);
}

#[test]
fn reference_scenario_plateaus_above_baseline() {
    let simulation = reference();
    let state = simulation.final_state();

    assert_eq!(simulation.termination(), Termination::HorizonReached);
    assert_eq!(state.hours, 360 * HOURS_PER_DAY);
    assert_eq!(simulation.trajectories().n_hours(), 8641);
    assert_eq!(simulation.trajectories().n_days(), 361);
    assert_relative_eq!(state.treated, 119.70309391890072, epsilon = 1e-6);
    assert_relative_eq!(state.untreated, 230.0, epsilon = 1e-6);
}

#[test]
fn early_stop_keeps_sequences_aligned() {
    let config = SimulationConfig::default().with_elimination_scaling(1.0);
    let simulation = simulate(&config).unwrap();

    assert_eq!(simulation.termination(), Termination::BelowBaseline);
    assert_eq!(simulation.final_state().days, 4);
    assert_eq!(simulation.final_state().hours, 96);
    assert_relative_eq!(
        simulation.final_state().treated,
        84.95256842128099,
        epsilon = 1e-9
    );
    assert_shapes(&simulation);
}

#[test]
fn reduction_starts_at_zero() {
    let simulation = reference();
    let t = simulation.trajectories();

    assert_eq!(t.reduction()[0], 0.0);
    assert_eq!(t.days()[0], 0.0);
    assert_eq!(t.hours()[0], 0.0);
    assert_eq!(t.drug()[0], 0.0);
}

#[test]
fn time_indices_are_in_days() {
    let simulation = simulate(&SimulationConfig::default().with_max_days(2)).unwrap();
    let t = simulation.trajectories();

    assert_eq!(t.days().to_vec(), vec![0.0, 1.0, 2.0]);
    assert_relative_eq!(t.hours()[1], 1.0 / 24.0);
    assert_eq!(t.hours()[24], 1.0);
    assert_eq!(t.hours()[48], 2.0);
}

#[test]
fn untreated_rises_toward_steady_state_from_below() {
    let simulation = reference();
    let steady = simulation.parameters().untreated_steady_state();
    let untreated = simulation.trajectories().untreated();

    for pair in untreated.windows(2) {
        assert!(pair[1] >= pair[0]);
        assert!(pair[1] <= steady + 1e-9);
    }
}

#[test]
fn untreated_falls_toward_steady_state_from_above() {
    let config = SimulationConfig::default()
        .with_initial_cldl(400.0)
        .with_max_days(60);
    let simulation = simulate(&config).unwrap();
    let steady = simulation.parameters().untreated_steady_state();
    let untreated = simulation.trajectories().untreated();

    for pair in untreated.windows(2) {
        assert!(pair[1] <= pair[0]);
        assert!(pair[1] >= steady - 1e-9);
    }
}

#[test]
fn zero_dose_leaves_arms_identical() {
    let simulation = simulate(&SimulationConfig::default().with_daily_dose(0.0)).unwrap();
    let t = simulation.trajectories();

    assert_eq!(t.treated(), t.untreated());
    assert!(t.drug().iter().all(|&c| c == 0.0));
}

#[test]
fn treated_never_exceeds_untreated() {
    let simulation = reference();
    let t = simulation.trajectories();

    for (treated, untreated) in t.treated().iter().zip(t.untreated().iter()) {
        assert!(treated <= untreated);
    }
}

#[test]
fn healthy_baseline_is_constant() {
    let simulation = reference();
    assert!(simulation
        .trajectories()
        .healthy()
        .iter()
        .all(|&c| c == 92.0));
}

#[test]
fn concentrations_stay_non_negative() {
    let simulation = reference();
    let t = simulation.trajectories();

    assert!(t.drug().iter().all(|&c| c >= 0.0));
    assert!(t.treated().iter().all(|&c| c >= 0.0));
}

#[test]
fn repeated_runs_are_bit_identical() {
    let first = reference();
    let second = reference();

    assert_eq!(first, second);
    for (a, b) in first
        .trajectories()
        .treated()
        .iter()
        .zip(second.trajectories().treated().iter())
    {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn stepping_matches_run() {
    let config = SimulationConfig::default().with_max_days(5);
    let mut simulator = Simulator::new(&config).unwrap();

    let mut steps = 0;
    while simulator.step().is_running() {
        steps += 1;
    }
    assert_eq!(steps + 1, 5 * HOURS_PER_DAY);

    let run = simulate(&config).unwrap();
    assert_eq!(simulator.state(), run.final_state());
    assert_eq!(
        simulator.status(),
        Status::Terminated(run.termination())
    );
}

#[test]
fn weaker_drug_needs_higher_dose() {
    let reference = simulate(&SimulationConfig::default().with_max_days(30)).unwrap();
    let weaker_drug = simulate(
        &SimulationConfig::default()
            .with_max_days(30)
            .with_half_effect_concentration(1e-3),
    )
    .unwrap();
    let weaker_drug_higher_dose = simulate(
        &SimulationConfig::default()
            .with_max_days(30)
            .with_half_effect_concentration(1e-3)
            .with_daily_dose(1e-2),
    )
    .unwrap();

    assert!(weaker_drug.final_state().treated > reference.final_state().treated);
    assert!(weaker_drug_higher_dose.final_state().treated < weaker_drug.final_state().treated);
}

#[test]
fn invalid_configuration_is_rejected_before_running() {
    let result = Simulator::new(&SimulationConfig::default().with_half_lives(-1.0, 5.0));
    assert!(matches!(result, Err(StatinError::InvalidParameter { .. })));
}

#[test]
fn json_output_contains_all_sequences() {
    let simulation = simulate(&SimulationConfig::default().with_max_days(2)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&simulation.to_json().unwrap()).unwrap();

    let trajectories = &value["trajectories"];
    for key in ["hours", "drug", "days", "treated", "untreated", "healthy", "reduction"] {
        assert!(trajectories[key].is_array(), "missing {key}");
    }
    assert_eq!(value["termination"], "HorizonReached");
}
