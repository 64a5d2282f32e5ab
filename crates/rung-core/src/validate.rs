//! Advisory structural checks for ladder diagrams.
//!
//! Validation never blocks simulation. It counts two classes of findings:
//!
//! | Finding | Severity |
//! |---------|----------|
//! | Column 0 holds something other than a left rail or empty | error |
//! | Last column (when `width > 1`) holds something other than a right rail or empty | error |
//! | Populated interior with no coil anywhere on the rung | warning |
//!
//! The caller decides whether to warn, block, or ignore.

#[cfg(feature = "tracing")]
use tracing::debug;

use crate::cell::Cell;
use crate::diagram::{Diagram, interior};

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Warning,
    Error,
}

/// What a finding is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// Column 0 is neither a left rail nor empty.
    InvalidLeftBoundary,
    /// The last column is neither a right rail nor empty.
    InvalidRightBoundary,
    /// The rung has components but nothing to drive.
    RungWithoutCoil,
}

impl IssueKind {
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::InvalidLeftBoundary | Self::InvalidRightBoundary => Severity::Error,
            Self::RungWithoutCoil => Severity::Warning,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidLeftBoundary => "left column must hold the left rail",
            Self::InvalidRightBoundary => "right column must hold the right rail",
            Self::RungWithoutCoil => "rung has components but no coil",
        }
    }
}

/// A single finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidationIssue {
    pub row: u16,
    /// Offending column; `None` for rung-level findings.
    pub column: Option<u16>,
    pub kind: IssueKind,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.column {
            Some(col) => write!(f, "row {}, column {}: {}", self.row, col, self.kind.as_str()),
            None => write!(f, "row {}: {}", self.row, self.kind.as_str()),
        }
    }
}

/// Counts of structural findings, plus their details.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
    pub errors: usize,
    pub warnings: usize,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// True iff there are no errors. Warnings do not invalidate.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors == 0
    }

    fn record(&mut self, issue: ValidationIssue) {
        match issue.kind.severity() {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
        }
        self.issues.push(issue);
    }
}

/// Check rails and coil presence on every rung.
#[must_use]
pub fn validate(diagram: &Diagram) -> ValidationResult {
    let mut result = ValidationResult::default();
    let Some(right) = diagram.width().checked_sub(1) else {
        return result;
    };

    for (y, row) in (0u16..).zip(diagram.rows()) {
        let left_cell = diagram.get(0, y);
        if !matches!(left_cell, Cell::RailLeft | Cell::Empty) {
            result.record(ValidationIssue {
                row: y,
                column: Some(0),
                kind: IssueKind::InvalidLeftBoundary,
            });
        }

        // A single column is the left boundary only.
        let right_cell = diagram.get(right, y);
        if right > 0 && !matches!(right_cell, Cell::RailRight | Cell::Empty) {
            result.record(ValidationIssue {
                row: y,
                column: Some(right),
                kind: IssueKind::InvalidRightBoundary,
            });
        }

        let populated = interior(row).iter().any(|c| !c.is_empty());
        if populated && !row.iter().any(|c| c.is_coil()) {
            result.record(ValidationIssue {
                row: y,
                column: None,
                kind: IssueKind::RungWithoutCoil,
            });
        }
    }

    #[cfg(feature = "tracing")]
    debug!(
        errors = result.errors,
        warnings = result.warnings,
        "diagram validated"
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_level_is_clean() {
        let result = validate(&Diagram::with_rails(6, 4));
        assert!(result.is_valid());
        assert_eq!(result.warnings, 0);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn empty_boundaries_are_allowed() {
        let result = validate(&Diagram::new(4, 2));
        assert_eq!(result, ValidationResult::default());
    }

    #[test]
    fn wrong_boundary_cells_are_errors() {
        let mut d = Diagram::with_rails(4, 2);
        d.set(0, 0, Cell::WireH);
        d.set(3, 1, Cell::RailLeft);
        d.set(1, 1, Cell::Coil(0));
        let result = validate(&d);
        assert_eq!(result.errors, 2);
        assert!(!result.is_valid());
        assert_eq!(
            result.issues[0],
            ValidationIssue {
                row: 0,
                column: Some(0),
                kind: IssueKind::InvalidLeftBoundary,
            }
        );
        assert_eq!(result.issues[1].kind, IssueKind::InvalidRightBoundary);
        assert_eq!(result.issues[1].column, Some(3));
    }

    #[test]
    fn coilless_rung_warns_but_stays_valid() {
        let mut d = Diagram::with_rails(4, 2);
        d.set(1, 0, Cell::ContactNo(0));
        d.set(1, 1, Cell::ContactNo(1));
        d.set(2, 1, Cell::CoilUnlatch(1));
        let result = validate(&d);
        assert!(result.is_valid());
        assert_eq!(result.warnings, 1);
        assert_eq!(result.issues[0].row, 0);
        assert_eq!(result.issues[0].kind.severity(), Severity::Warning);
    }

    #[test]
    fn railed_diagrams_of_any_width_validate() {
        for width in 0..=4 {
            let result = validate(&Diagram::with_rails(width, 3));
            assert_eq!(result, ValidationResult::default(), "width {width}");
        }
    }

    #[test]
    fn single_column_is_checked_as_left_boundary() {
        let mut d = Diagram::with_rails(1, 2);
        d.set(0, 1, Cell::RailRight);
        let result = validate(&d);
        assert_eq!(result.errors, 1);
        assert_eq!(
            result.issues,
            vec![ValidationIssue {
                row: 1,
                column: Some(0),
                kind: IssueKind::InvalidLeftBoundary,
            }]
        );
    }

    #[test]
    fn issue_display_names_position() {
        let issue = ValidationIssue {
            row: 2,
            column: Some(0),
            kind: IssueKind::InvalidLeftBoundary,
        };
        assert_eq!(
            issue.to_string(),
            "row 2, column 0: left column must hold the left rail"
        );
        let issue = ValidationIssue {
            row: 1,
            column: None,
            kind: IssueKind::RungWithoutCoil,
        };
        assert_eq!(issue.to_string(), "row 1: rung has components but no coil");
    }
}
