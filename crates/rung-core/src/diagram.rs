//! Ladder diagram: a row-major grid of [`Cell`]s.
//!
//! Each row is one rung, evaluated independently from column 0 (left rail)
//! to column `width - 1` (right rail). The caller owns and edits the
//! diagram; the engine only ever borrows it.

use crate::cell::Cell;

/// Rectangular grid of ladder cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawDiagram"))]
pub struct Diagram {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

/// Wire form of a [`Diagram`] before its shape is checked.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawDiagram {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

/// A deserialized diagram whose cell count disagrees with its dimensions.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeMismatch {
    pub width: u16,
    pub height: u16,
    pub cells: usize,
}

#[cfg(feature = "serde")]
impl std::fmt::Display for ShapeMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{} diagram needs {} cells, found {}",
            self.width,
            self.height,
            usize::from(self.width) * usize::from(self.height),
            self.cells
        )
    }
}

#[cfg(feature = "serde")]
impl std::error::Error for ShapeMismatch {}

#[cfg(feature = "serde")]
impl TryFrom<RawDiagram> for Diagram {
    type Error = ShapeMismatch;

    fn try_from(raw: RawDiagram) -> Result<Self, Self::Error> {
        if raw.cells.len() != usize::from(raw.width) * usize::from(raw.height) {
            return Err(ShapeMismatch {
                width: raw.width,
                height: raw.height,
                cells: raw.cells.len(),
            });
        }
        Ok(Self {
            width: raw.width,
            height: raw.height,
            cells: raw.cells,
        })
    }
}

impl Diagram {
    /// A blank diagram with every cell empty.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; usize::from(width) * usize::from(height)],
        }
    }

    /// A blank diagram with rails in the boundary columns.
    ///
    /// This is the state a level starts from.
    #[must_use]
    pub fn with_rails(width: u16, height: u16) -> Self {
        let mut diagram = Self::new(width, height);
        diagram.reset();
        diagram
    }

    /// Build from explicit rows. Returns `None` if the rows differ in length
    /// or the dimensions do not fit in `u16`.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Option<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }
        let height = u16::try_from(rows.len()).ok()?;
        let width = u16::try_from(width).ok()?;
        Some(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
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

    #[inline]
    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// Cell at `(x, y)`; out-of-range positions read as [`Cell::Empty`].
    #[inline]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Cell {
        self.offset(x, y)
            .and_then(|i| self.cells.get(i).copied())
            .unwrap_or_default()
    }

    /// Place a cell. Returns `false` (and changes nothing) when out of range.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        match self.offset(x, y).and_then(|i| self.cells.get_mut(i)) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Cells of rung `y`, or an empty slice when out of range.
    #[must_use]
    pub fn row(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let w = usize::from(self.width);
        let start = usize::from(y) * w;
        self.cells.get(start..start + w).unwrap_or(&[])
    }

    /// Iterate over rungs top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        (0..self.height).map(move |y| self.row(y))
    }

    /// All cells in row-major order.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the interior and restore rails in the boundary columns.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
        if self.width == 0 {
            return;
        }
        let right = self.width - 1;
        for y in 0..self.height {
            self.set(0, y, Cell::RailLeft);
            if right > 0 {
                self.set(right, y, Cell::RailRight);
            }
        }
    }

    /// True when no interior cell (columns `1..width-1`) is populated.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.rows().all(|row| interior(row).iter().all(|c| c.is_empty()))
    }
}

/// Columns strictly between the two rails.
pub(crate) fn interior(row: &[Cell]) -> &[Cell] {
    if row.len() < 2 {
        return &[];
    }
    &row[1..row.len() - 1]
}
