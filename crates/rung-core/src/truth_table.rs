//! Truth tables and row-by-row checking of a diagram against them.
//!
//! A level declares how many inputs and outputs it uses and lists the
//! expected outputs for each input combination. A diagram solves the level
//! when every row's outputs match on the declared outputs; slots past the
//! declared count are ignored.

use crate::diagram::Diagram;
use crate::engine::LadderEngine;
use crate::io::{IoBits, MAX_IO};

/// One input combination and the outputs it must produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TruthRow {
    pub inputs: IoBits,
    pub expected: IoBits,
}

impl TruthRow {
    #[must_use]
    pub const fn new(inputs: IoBits, expected: IoBits) -> Self {
        Self { inputs, expected }
    }
}

/// Expected behaviour of a level.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TruthTable {
    input_count: usize,
    output_count: usize,
    rows: Vec<TruthRow>,
}

impl TruthTable {
    /// Empty table. Counts are clamped to [`MAX_IO`].
    #[must_use]
    pub fn new(input_count: usize, output_count: usize) -> Self {
        Self {
            input_count: input_count.min(MAX_IO),
            output_count: output_count.min(MAX_IO),
            rows: Vec::new(),
        }
    }

    /// Every input combination in binary counting order (input 0 is the least
    /// significant bit), with expected outputs computed by `f`.
    #[must_use]
    pub fn exhaustive(
        input_count: usize,
        output_count: usize,
        f: impl Fn(IoBits) -> IoBits,
    ) -> Self {
        let mut table = Self::new(input_count, output_count);
        let combos = 1usize << table.input_count;
        for pattern in (0..=u8::MAX).take(combos) {
            let inputs = IoBits::from_bits(pattern);
            table.rows.push(TruthRow::new(inputs, f(inputs)));
        }
        table
    }

    pub fn push(&mut self, row: TruthRow) {
        self.rows.push(row);
    }

    #[must_use]
    pub fn with_row(mut self, inputs: IoBits, expected: IoBits) -> Self {
        self.push(TruthRow::new(inputs, expected));
        self
    }

    #[inline]
    #[must_use]
    pub fn input_count(&self) -> usize {
        self.input_count
    }

    #[inline]
    #[must_use]
    pub fn output_count(&self) -> usize {
        self.output_count
    }

    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[TruthRow] {
        &self.rows
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Compare actual outputs with row `index` over the declared outputs.
    #[must_use]
    pub fn check(&self, index: usize, actual: IoBits) -> Option<RowCheck> {
        let row = self.rows.get(index)?;
        Some(RowCheck {
            row: index,
            inputs: row.inputs,
            expected: row.expected,
            actual,
            passed: actual.matches_prefix(&row.expected, self.output_count),
        })
    }
}

/// Outcome of one truth-table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCheck {
    pub row: usize,
    pub inputs: IoBits,
    pub expected: IoBits,
    pub actual: IoBits,
    pub passed: bool,
}

/// Outcome of a whole table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Verification {
    pub checks: Vec<RowCheck>,
}

impl Verification {
    /// True when there is at least one row and every row passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        !self.checks.is_empty() && self.checks.iter().all(|c| c.passed)
    }

    #[must_use]
    pub fn pass_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    #[must_use]
    pub fn first_failure(&self) -> Option<&RowCheck> {
        self.checks.iter().find(|c| !c.passed)
    }
}

/// Simulate `diagram` once per table row, in order, and compare.
pub fn verify(engine: &mut LadderEngine, diagram: &Diagram, table: &TruthTable) -> Verification {
    let checks = table
        .rows()
        .iter()
        .enumerate()
        .filter_map(|(i, row)| {
            let actual = engine.simulate(diagram, &row.inputs);
            table.check(i, actual)
        })
        .collect();
    Verification { checks }
}
