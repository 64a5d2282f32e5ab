//! Engine, validation, and staged runs with the `tracing` feature compiled in.
#![cfg(feature = "tracing")]

use rung_core::{
    Diagram, EngineConfig, IoBits, LadderEngine, LatchScope, StagedRun, TruthTable, validate,
    verify,
};
use tracing_subscriber::filter::LevelFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(LevelFilter::TRACE)
        .try_init();
}

#[test]
fn traced_simulation_matches_untraced_semantics() {
    init_tracing();
    rung_core::debug!("and gate under trace");
    let diagram: Diagram = "L NO0 NO1 OUT0 R\nL NC0 SET1 - R".parse().unwrap();
    let mut engine = LadderEngine::new();

    let outputs = engine.simulate(&diagram, &IoBits::from_bits(0b11));
    assert!(outputs.get(0));
    assert!(!outputs.get(1));

    let result = engine.simulate_with_power(&diagram, &IoBits::from_bits(0b00));
    assert!(!result.outputs.get(0));
    assert!(result.outputs.get(1));
    assert_eq!(result.max_depth, 4);
}

#[test]
fn traced_staged_run_reports_failing_row() {
    init_tracing();
    rung_core::trace!("staged run with a wrong expectation");
    let diagram: Diagram = "L NO0 OUT0 R".parse().unwrap();
    // Row 1 expects output 0 off while input 0 is on.
    let table = TruthTable::new(1, 1)
        .with_row(IoBits::from_bits(0), IoBits::from_bits(0))
        .with_row(IoBits::from_bits(1), IoBits::from_bits(0));

    let mut engine = LadderEngine::with_config(EngineConfig {
        latch_scope: LatchScope::Persistent,
    });
    let mut run = StagedRun::new(table.clone()).stop_on_failure(true);
    let staged = run.run_to_end(&mut engine, &diagram);
    assert!(!staged.passed());
    assert_eq!(staged.first_failure().map(|c| c.row), Some(1));

    engine.reset_latches();
    let plain = verify(&mut engine, &diagram, &table);
    assert_eq!(plain.first_failure().map(|c| c.row), Some(1));
}

#[test]
fn traced_validation_counts_findings() {
    init_tracing();
    rung_core::warn!("validating a diagram with a broken rail");
    let diagram: Diagram = "OUT0 NO0 OUT1 R\nL NO1 . L".parse().unwrap();
    let result = validate(&diagram);
    assert_eq!(result.errors, 2);
    assert_eq!(result.warnings, 1);
}
