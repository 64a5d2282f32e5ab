#![forbid(unsafe_code)]

//! Ladder-logic simulation engine for the Rung puzzle.
//!
//! `rung-core` evaluates power flow through a 2D grid of electrical
//! components (contacts, coils, wires, rails) against boolean inputs. It is
//! the only part of the Rung demo with real semantics; rendering, input
//! handling, and level data live in the application.
//!
//! # Primary responsibilities
//!
//! - **Cell**: tagged grid content and its conduction rule.
//! - **Diagram**: row-major grid of cells; each row is one rung.
//! - **LadderEngine**: rung continuity scan, coil writes, latch overrides,
//!   and the power-depth map used to stage the reveal animation.
//! - **Validation**: advisory structural checks (rails, coil-less rungs).
//! - **Truth tables**: row-by-row comparison of engine outputs with the
//!   expected outputs of a level.
//! - **Reveal**: caller-driven stepping of the staged power animation.
//!
//! # Design principles
//!
//! - **No I/O**: all types are pure data + logic.
//! - **Total**: out-of-range I/O indices are clamped, never errors; the
//!   engine cannot panic on any diagram.
//! - **Fixed capacity**: inputs, outputs, and latches are `[bool; MAX_IO]`.
//!
//! # Example
//!
//! ```
//! use rung_core::{Diagram, IoBits, LadderEngine};
//!
//! // Y0 = X0 AND X1
//! let diagram: Diagram = "L NO0 NO1 OUT0 R".parse().unwrap();
//! let mut engine = LadderEngine::new();
//!
//! let outputs = engine.simulate(&diagram, &IoBits::from_bits(0b11));
//! assert!(outputs.get(0));
//!
//! let outputs = engine.simulate(&diagram, &IoBits::from_bits(0b01));
//! assert!(!outputs.get(0));
//! ```

pub mod cell;
pub mod diagram;
pub mod engine;
pub mod io;
pub mod logging;
pub mod notation;
pub mod reveal;
pub mod truth_table;
pub mod validate;

pub use cell::{Cell, CellTraits, IoIndex};
pub use diagram::Diagram;
#[cfg(feature = "serde")]
pub use diagram::ShapeMismatch;
pub use engine::{EngineConfig, LadderEngine, LatchScope, PowerMap, SimulationResult};
pub use io::{IoBits, LatchState, MAX_IO};
pub use notation::NotationError;
pub use reveal::{PowerReveal, StagedPhase, StagedRun};
pub use truth_table::{RowCheck, TruthRow, TruthTable, Verification, verify};
pub use validate::{IssueKind, Severity, ValidationIssue, ValidationResult, validate};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace, warn};
