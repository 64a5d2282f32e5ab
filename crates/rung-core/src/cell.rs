//! Ladder cell: the fundamental unit of the diagram grid.
//!
//! A cell is either an unconditional conductor (wires, rails, coils), a
//! conditional conductor (contacts reading an input), or an open circuit.
//! Coils never block flow; their effect is applied after the rung's
//! continuity is known.

use bitflags::bitflags;

use crate::io::IoBits;

/// Index into the input, output, or latch vectors.
///
/// Values at or past [`MAX_IO`](crate::MAX_IO) are inert.
pub type IoIndex = u8;

bitflags! {
    /// Classification of a cell for validation and display.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellTraits: u8 {
        /// Conducts regardless of inputs.
        const CONDUCTOR = 1 << 0;
        /// One of the two power rails.
        const RAIL      = 1 << 1;
        /// Horizontal/vertical wire or junction.
        const WIRE      = 1 << 2;
        /// Conducts depending on an input.
        const CONTACT   = 1 << 3;
        /// Writes an output or latch when the rung is energized.
        const COIL      = 1 << 4;
        /// Latch or unlatch coil.
        const MEMORY    = 1 << 5;
    }
}

/// Content of one grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "kind", content = "index", rename_all = "snake_case")
)]
pub enum Cell {
    /// Open circuit.
    #[default]
    Empty,
    WireH,
    WireV,
    Junction,
    RailLeft,
    RailRight,
    /// Normally-open contact: conducts iff the input is true.
    ContactNo(IoIndex),
    /// Normally-closed contact: conducts iff the input is false.
    ContactNc(IoIndex),
    /// Output coil: drives the output with the rung's power.
    Coil(IoIndex),
    /// Sets the latch for the output when energized.
    CoilLatch(IoIndex),
    /// Clears the latch for the output when energized.
    CoilUnlatch(IoIndex),
}

impl Cell {
    /// Whether power passes through this cell for the given inputs.
    ///
    /// Inputs past [`MAX_IO`](crate::MAX_IO) read as `false`, so a
    /// normally-closed contact on such an input conducts.
    #[inline]
    #[must_use]
    pub fn conducts(self, inputs: &IoBits) -> bool {
        match self {
            Self::Empty => false,
            Self::WireH | Self::WireV | Self::Junction => true,
            Self::RailLeft | Self::RailRight => true,
            Self::ContactNo(i) => inputs.get(usize::from(i)),
            Self::ContactNc(i) => !inputs.get(usize::from(i)),
            Self::Coil(_) | Self::CoilLatch(_) | Self::CoilUnlatch(_) => true,
        }
    }

    #[must_use]
    pub fn traits(self) -> CellTraits {
        match self {
            Self::Empty => CellTraits::empty(),
            Self::WireH | Self::WireV | Self::Junction => {
                CellTraits::CONDUCTOR | CellTraits::WIRE
            }
            Self::RailLeft | Self::RailRight => CellTraits::CONDUCTOR | CellTraits::RAIL,
            Self::ContactNo(_) | Self::ContactNc(_) => CellTraits::CONTACT,
            Self::Coil(_) => CellTraits::CONDUCTOR | CellTraits::COIL,
            Self::CoilLatch(_) | Self::CoilUnlatch(_) => {
                CellTraits::CONDUCTOR | CellTraits::COIL | CellTraits::MEMORY
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Any kind of coil, latching or not.
    #[inline]
    #[must_use]
    pub fn is_coil(self) -> bool {
        matches!(self, Self::Coil(_) | Self::CoilLatch(_) | Self::CoilUnlatch(_))
    }

    /// The I/O index carried by contacts and coils.
    #[must_use]
    pub fn index(self) -> Option<IoIndex> {
        match self {
            Self::ContactNo(i)
            | Self::ContactNc(i)
            | Self::Coil(i)
            | Self::CoilLatch(i)
            | Self::CoilUnlatch(i) => Some(i),
            _ => None,
        }
    }
}
