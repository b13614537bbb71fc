//! Error types for budget allocation.
//!
//! Structural errors (count mismatch, duplicate category, invalid input) are
//! raised before a solve is attempted so a flawed constraint never enters a
//! [`crate::ConstraintSet`]. Numerical errors surface only from the solver.
//! All errors implement `std::error::Error` via `thiserror`.

use thiserror::Error;

/// Primary error type for budget allocation operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BudgetError {
    /// The number of collected constraints does not match the category count.
    #[error("expected {expected} constraints (one per category) but got {actual}")]
    ConstraintCountMismatch {
        /// Category count the system is sized for.
        expected: usize,
        /// Constraint rows actually present.
        actual: usize,
    },

    /// A ratio constraint references the same category on both sides.
    #[error("ratio constraint must reference two different categories (category {index} given twice)")]
    DuplicateCategory {
        /// 0-based index of the repeated category.
        index: usize,
    },

    /// A constraint failed pre-entry validation (bounds, range, or
    /// non-finite input). Never stored in a constraint set.
    #[error("invalid constraint: {reason}")]
    InvalidConstraint {
        /// Human-readable explanation of the violation.
        reason: String,
    },

    /// The coefficient matrix is numerically singular: the constraints are
    /// redundant or contradictory and do not pin down a unique allocation.
    #[error("constraints do not determine a unique allocation (|det| = {determinant:.3e}, threshold {threshold:.1e})")]
    SingularMatrix {
        /// Computed determinant of the coefficient matrix.
        determinant: f64,
        /// Absolute threshold the determinant fell below.
        threshold: f64,
    },

    /// The system is well posed but the solved allocation has a negative
    /// component, which is economically invalid.
    #[error("allocation for '{name}' is negative ({value:.2}); rejected solution {solution:?}")]
    NegativeAllocation {
        /// Display name of the offending category.
        name: String,
        /// The negative amount.
        value: f64,
        /// The full rejected solution vector, kept for the audit record.
        solution: Vec<f64>,
    },

    /// A numerical failure not otherwise classified (non-finite determinant,
    /// inversion failure, corrupted solution).
    #[error("unexpected numerical failure: {detail}")]
    UnexpectedSolve {
        /// Underlying cause.
        detail: String,
    },
}
