//! Rung evaluation: continuity scan, coil writes, and latch overrides.
//!
//! # Algorithm
//!
//! For every row, top to bottom:
//!
//! 1. Power starts at the left rail. Columns `1..width-1` are scanned left to
//!    right; the first cell that does not conduct kills the rung and ends the
//!    scan.
//! 2. Every column is then visited in order and coil effects are applied with
//!    the rung's final power: plain coils write their output, latch coils set
//!    their latch, unlatch coils clear it (the last two only when energized).
//!
//! Once all rows are done, every set latch forces its output true.
//!
//! Each row is a single linear scan. Vertical wires and junctions conduct like
//! horizontal wire; parallel branches spanning several rows are not merged.
//!
//! # Power depth
//!
//! [`LadderEngine::simulate_with_power`] records, as a side output of the same
//! scan, the column at which each cell carried power. Depth `0` means the
//! cell was never reached. The display layer reveals cells in depth order.

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

use crate::cell::Cell;
use crate::diagram::Diagram;
use crate::io::{IoBits, LatchState};

/// How long latch bits live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LatchScope {
    /// Latches are cleared at the start of every simulation call. Calls are
    /// pure functions of `(diagram, inputs)`.
    #[default]
    PerCall,
    /// Latches survive across calls until [`LadderEngine::reset_latches`].
    /// Lets a latch set by one truth-table row hold through the next.
    Persistent,
}

/// Configuration for [`LadderEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    pub latch_scope: LatchScope,
}

/// Per-cell power depth for one simulation call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PowerMap {
    width: u16,
    height: u16,
    depth: Vec<u16>,
}

impl PowerMap {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            depth: vec![0; usize::from(width) * usize::from(height)],
        }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Depth at `(x, y)`; `0` when never reached or out of range.
    #[inline]
    #[must_use]
    pub fn depth(&self, x: u16, y: u16) -> u16 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        let i = usize::from(y) * usize::from(self.width) + usize::from(x);
        self.depth.get(i).copied().unwrap_or(0)
    }

    #[inline]
    #[must_use]
    pub fn is_powered(&self, x: u16, y: u16) -> bool {
        self.depth(x, y) > 0
    }

    /// Whether the cell is lit once the reveal has reached `step`.
    #[inline]
    #[must_use]
    pub fn lit_at(&self, x: u16, y: u16, step: u16) -> bool {
        let d = self.depth(x, y);
        d > 0 && d <= step
    }

    /// Depths of row `y`.
    #[must_use]
    pub fn row(&self, y: u16) -> &[u16] {
        if y >= self.height {
            return &[];
        }
        let w = usize::from(self.width);
        let start = usize::from(y) * w;
        self.depth.get(start..start + w).unwrap_or(&[])
    }

    fn row_mut(&mut self, y: usize) -> &mut [u16] {
        let w = usize::from(self.width);
        let start = y * w;
        self.depth.get_mut(start..start + w).unwrap_or(&mut [])
    }

    /// Largest recorded depth.
    #[must_use]
    pub fn max_depth(&self) -> u16 {
        self.depth.iter().copied().max().unwrap_or(0)
    }
}

/// Outputs plus the staged-display power map.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SimulationResult {
    pub outputs: IoBits,
    pub power: PowerMap,
    /// Number of reveal steps needed to light every powered cell.
    pub max_depth: u16,
}

/// Ladder diagram evaluator.
#[derive(Debug, Clone, Default)]
pub struct LadderEngine {
    config: EngineConfig,
    latches: LatchState,
}

impl LadderEngine {
    /// Engine with per-call latch scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            latches: LatchState::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Latch register as left by the last call.
    #[inline]
    #[must_use]
    pub fn latches(&self) -> &LatchState {
        &self.latches
    }

    /// Clear the latch register. Call on level load.
    pub fn reset_latches(&mut self) {
        self.latches.reset();
    }

    /// Evaluate every rung and return the final outputs.
    pub fn simulate(&mut self, diagram: &Diagram, inputs: &IoBits) -> IoBits {
        self.run(diagram, inputs, None)
    }

    /// Like [`simulate`](Self::simulate), additionally recording power depth.
    ///
    /// Outputs are identical to `simulate` for the same diagram and inputs.
    pub fn simulate_with_power(&mut self, diagram: &Diagram, inputs: &IoBits) -> SimulationResult {
        let mut power = PowerMap::new(diagram.width(), diagram.height());
        let outputs = self.run(diagram, inputs, Some(&mut power));
        let max_depth = power.max_depth();
        SimulationResult {
            outputs,
            power,
            max_depth,
        }
    }

    fn run(
        &mut self,
        diagram: &Diagram,
        inputs: &IoBits,
        mut power: Option<&mut PowerMap>,
    ) -> IoBits {
        if self.config.latch_scope == LatchScope::PerCall {
            self.latches.reset();
        }
        let mut outputs = IoBits::new();

        if diagram.width() >= 2 {
            for (y, row) in diagram.rows().enumerate() {
                let depth = power.as_deref_mut().map(|p| p.row_mut(y));
                let blocked_at = scan_rung(row, inputs, depth);
                let energized = blocked_at.is_none() && row.len() >= 2;

                #[cfg(feature = "tracing")]
                trace!(row = y, energized, ?blocked_at, "rung evaluated");

                apply_coils(row, energized, &mut outputs, &mut self.latches);
            }
        }

        self.latches.apply_to(&mut outputs);

        #[cfg(feature = "tracing")]
        debug!(
            rows = diagram.height(),
            outputs = outputs.bits(),
            latched = self.latches.iter_set().count(),
            "simulation complete"
        );

        outputs
    }
}

/// Scan one rung for continuity. Returns the column of the first cell that
/// blocks power, or `None` when the rung is energized.
///
/// When `depth` is given, every cell that carries power gets its column as
/// depth. The right-hand boundary column is not part of the continuity scan;
/// it is lit only when the rung is energized and the cell there conducts.
fn scan_rung(row: &[Cell], inputs: &IoBits, mut depth: Option<&mut [u16]>) -> Option<usize> {
    let last = row.len().checked_sub(1)?;
    for (x, cell) in row.iter().enumerate().take(last).skip(1) {
        if !cell.conducts(inputs) {
            return Some(x);
        }
        mark(&mut depth, x);
    }
    if last > 0 && row[last].conducts(inputs) {
        mark(&mut depth, last);
    }
    None
}

#[inline]
fn mark(depth: &mut Option<&mut [u16]>, x: usize) {
    if let Some(slot) = depth.as_deref_mut().and_then(|d| d.get_mut(x)) {
        *slot = u16::try_from(x).unwrap_or(u16::MAX);
    }
}

fn apply_coils(row: &[Cell], energized: bool, outputs: &mut IoBits, latches: &mut LatchState) {
    for cell in row {
        match *cell {
            Cell::Coil(o) => outputs.set(usize::from(o), energized),
            Cell::CoilLatch(o) if energized => latches.set(usize::from(o)),
            Cell::CoilUnlatch(o) if energized => latches.clear(usize::from(o)),
            _ => {}
        }
    }
}
