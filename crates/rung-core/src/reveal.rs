//! Staged power reveal for the simulation animation.
//!
//! [`PowerReveal`] steps through the depths of one [`SimulationResult`]:
//! at step `n`, every cell with depth `1..=n` is lit. [`StagedRun`] drives a
//! whole truth table, one row at a time: evaluate the row, reveal it step by
//! step, then check it. The caller owns the clock and calls
//! [`StagedRun::tick`] once per animation frame.

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

use crate::diagram::Diagram;
use crate::engine::{LadderEngine, SimulationResult};
use crate::truth_table::{RowCheck, TruthTable, Verification};

/// Progressive lighting of one simulation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerReveal {
    result: SimulationResult,
    step: u16,
}

impl PowerReveal {
    /// Start at step 0 (nothing lit).
    #[must_use]
    pub fn new(result: SimulationResult) -> Self {
        Self { result, step: 0 }
    }

    #[inline]
    #[must_use]
    pub fn step(&self) -> u16 {
        self.step
    }

    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.step >= self.result.max_depth
    }

    /// Light the next depth. Returns `false` once everything is lit.
    pub fn advance(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.step += 1;
        true
    }

    /// Jump to the fully lit state.
    pub fn finish(&mut self) {
        self.step = self.result.max_depth;
    }

    /// Whether `(x, y)` is lit at the current step.
    #[inline]
    #[must_use]
    pub fn is_lit(&self, x: u16, y: u16) -> bool {
        self.result.power.lit_at(x, y, self.step)
    }

    #[inline]
    #[must_use]
    pub fn result(&self) -> &SimulationResult {
        &self.result
    }
}

/// Where a [`StagedRun`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StagedPhase {
    /// Not ticked yet.
    Pending,
    /// Revealing truth-table row `row` at depth `step`.
    Revealing { row: usize, step: u16 },
    /// All rows checked, or stopped at the first failure.
    Finished,
}

/// Animated sweep over a truth table.
#[derive(Debug, Clone)]
pub struct StagedRun {
    table: TruthTable,
    row: usize,
    reveal: Option<PowerReveal>,
    checks: Vec<RowCheck>,
    stop_on_failure: bool,
    finished: bool,
}

impl StagedRun {
    #[must_use]
    pub fn new(table: TruthTable) -> Self {
        Self {
            table,
            row: 0,
            reveal: None,
            checks: Vec::new(),
            stop_on_failure: false,
            finished: false,
        }
    }

    /// End the run at the first failing row.
    #[must_use]
    pub fn stop_on_failure(mut self, stop: bool) -> Self {
        self.stop_on_failure = stop;
        self
    }

    #[must_use]
    pub fn phase(&self) -> StagedPhase {
        if self.finished {
            return StagedPhase::Finished;
        }
        match &self.reveal {
            None => StagedPhase::Pending,
            Some(reveal) => StagedPhase::Revealing {
                row: self.row,
                step: reveal.step(),
            },
        }
    }

    /// The row currently being revealed.
    #[must_use]
    pub fn current(&self) -> Option<&PowerReveal> {
        if self.finished {
            return None;
        }
        self.reveal.as_ref()
    }

    /// Rows checked so far.
    #[must_use]
    pub fn checks(&self) -> &[RowCheck] {
        &self.checks
    }

    #[must_use]
    pub fn table(&self) -> &TruthTable {
        &self.table
    }

    /// Advance by one animation step.
    ///
    /// The first tick evaluates row 0. Each following tick lights one more
    /// depth; the tick after the row is fully lit records its check and
    /// evaluates the next row.
    pub fn tick(&mut self, engine: &mut LadderEngine, diagram: &Diagram) -> StagedPhase {
        if self.finished {
            return StagedPhase::Finished;
        }

        let Some(reveal) = self.reveal.as_mut() else {
            self.begin_row(engine, diagram);
            return self.phase();
        };
        if reveal.advance() {
            return self.phase();
        }

        let actual = reveal.result().outputs;
        if let Some(check) = self.table.check(self.row, actual) {
            #[cfg(feature = "tracing")]
            {
                if check.passed {
                    debug!(row = check.row, outputs = actual.bits(), "truth-table row passed");
                } else {
                    warn!(
                        row = check.row,
                        expected = check.expected.bits(),
                        actual = actual.bits(),
                        "truth-table row failed"
                    );
                }
            }

            let failed = !check.passed;
            self.checks.push(check);
            if failed && self.stop_on_failure {
                self.finished = true;
                return StagedPhase::Finished;
            }
        }

        self.row += 1;
        self.begin_row(engine, diagram);
        self.phase()
    }

    /// Tick until finished and return the report.
    pub fn run_to_end(&mut self, engine: &mut LadderEngine, diagram: &Diagram) -> Verification {
        while self.tick(engine, diagram) != StagedPhase::Finished {}
        Verification {
            checks: self.checks.clone(),
        }
    }

    #[must_use]
    pub fn into_verification(self) -> Verification {
        Verification {
            checks: self.checks,
        }
    }

    fn begin_row(&mut self, engine: &mut LadderEngine, diagram: &Diagram) {
        match self.table.rows().get(self.row) {
            Some(row) => {
                let result = engine.simulate_with_power(diagram, &row.inputs);
                self.reveal = Some(PowerReveal::new(result));
            }
            None => {
                self.finished = true;
                self.reveal = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::IoBits;

    #[test]
    fn reveal_lights_cells_in_depth_order() {
        let diagram: Diagram = "L - NO0 OUT0 R".parse().unwrap();
        let result = LadderEngine::new().simulate_with_power(&diagram, &IoBits::from_bits(1));
        let mut reveal = PowerReveal::new(result);

        assert_eq!(reveal.step(), 0);
        assert!(!reveal.is_lit(1, 0));
        assert!(reveal.advance());
        assert!(reveal.is_lit(1, 0));
        assert!(!reveal.is_lit(2, 0));

        let mut steps = 1;
        while reveal.advance() {
            steps += 1;
        }
        assert_eq!(steps, 4);
        assert!(reveal.is_complete());
        assert!(reveal.is_lit(4, 0));
        assert!(!reveal.is_lit(0, 0));
    }

    #[test]
    fn unpowered_result_is_complete_immediately() {
        let diagram: Diagram = "L NO0 OUT0 R".parse().unwrap();
        let result = LadderEngine::new().simulate_with_power(&diagram, &IoBits::new());
        let mut reveal = PowerReveal::new(result);
        assert!(reveal.is_complete());
        assert!(!reveal.advance());
    }

    #[test]
    fn finish_jumps_to_end() {
        let diagram: Diagram = "L - - OUT0 R".parse().unwrap();
        let result = LadderEngine::new().simulate_with_power(&diagram, &IoBits::new());
        let mut reveal = PowerReveal::new(result);
        reveal.finish();
        assert_eq!(reveal.step(), 4);
        assert!(reveal.is_complete());
    }

    #[test]
    fn staged_run_walks_rows_then_finishes() {
        let diagram: Diagram = "L NO0 OUT0 R".parse().unwrap();
        let table = TruthTable::exhaustive(1, 1, |i| i);
        let mut engine = LadderEngine::new();
        let mut run = StagedRun::new(table);

        assert_eq!(run.phase(), StagedPhase::Pending);
        // Row 0: nothing powered.
        assert_eq!(run.tick(&mut engine, &diagram), StagedPhase::Revealing { row: 0, step: 0 });
        // Row 0 complete: checked, row 1 evaluated.
        assert_eq!(run.tick(&mut engine, &diagram), StagedPhase::Revealing { row: 1, step: 0 });
        assert_eq!(run.checks().len(), 1);
        for step in 1..=3 {
            assert_eq!(run.tick(&mut engine, &diagram), StagedPhase::Revealing { row: 1, step });
        }
        assert!(run.current().is_some_and(|r| r.is_lit(3, 0)));
        assert_eq!(run.tick(&mut engine, &diagram), StagedPhase::Finished);
        assert_eq!(run.tick(&mut engine, &diagram), StagedPhase::Finished);
        assert!(run.current().is_none());

        let report = run.into_verification();
        assert!(report.passed());
        assert_eq!(report.checks.len(), 2);
    }

    #[test]
    fn stop_on_failure_ends_early() {
        let diagram: Diagram = "L NC0 OUT0 R".parse().unwrap();
        let table = TruthTable::exhaustive(1, 1, |i| i);
        let mut engine = LadderEngine::new();
        let mut run = StagedRun::new(table).stop_on_failure(true);
        let report = run.run_to_end(&mut engine, &diagram);
        assert_eq!(report.checks.len(), 1);
        assert!(!report.passed());
    }

    #[test]
    fn empty_table_finishes_on_first_tick() {
        let diagram = Diagram::with_rails(3, 1);
        let mut run = StagedRun::new(TruthTable::new(1, 1));
        assert_eq!(run.tick(&mut LadderEngine::new(), &diagram), StagedPhase::Finished);
        assert!(run.checks().is_empty());
    }
}
