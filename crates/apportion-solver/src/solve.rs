//! The solve pipeline: count check, singularity gate, inversion, validation.

use apportion_core::{BudgetError, Category, ConstraintSet};
use tracing::{debug, info, warn};

use crate::matrix::{determinant, format_matrix, format_vector, invert, mat_vec};
use crate::validation::{validate_finite, validate_non_negative};

/// Absolute determinant threshold below which the system is treated as
/// singular.
///
/// This is an absolute bound, independent of matrix scale: a system with
/// very large coefficients can slip past it and a very small-coefficient
/// system can be wrongly rejected.
pub const SINGULAR_EPSILON: f64 = 1e-9;

/// A validated allocation: one non-negative amount per category, indexed
/// like the session's category list.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    amounts: Vec<f64>,
}

impl Allocation {
    /// Solved amounts in category order.
    pub fn amounts(&self) -> &[f64] {
        &self.amounts
    }

    /// Sum of all category amounts.
    pub fn total(&self) -> f64 {
        self.amounts.iter().sum()
    }

    /// Pairs each amount with its category name.
    pub fn named<'a>(
        &'a self,
        categories: &'a [Category],
    ) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        categories
            .iter()
            .zip(&self.amounts)
            .map(|(c, &v)| (c.name(), v))
    }
}

/// Outcome of one solve attempt plus the ordered trace of what happened.
///
/// The trace is produced on every branch, success and failure alike, and is
/// what the audit logger persists.
#[derive(Debug)]
pub struct SolveReport {
    /// The allocation, or why none was produced.
    pub outcome: Result<Allocation, BudgetError>,
    /// Ordered human-readable computation steps.
    pub steps: Vec<String>,
}

/// Solves `A x = b` for the given categories.
///
/// `a` holds one coefficient row per accepted constraint, in insertion
/// order; `b` the matching right-hand sides. The pipeline:
///
/// 1. Reject unless exactly one constraint per category was collected.
/// 2. Compute the determinant; reject as singular below
///    [`SINGULAR_EPSILON`].
/// 3. Invert and compute `x = A^-1 * b`.
/// 4. Reject non-finite results as unexpected failures.
/// 5. Reject economically invalid (negative) allocations.
///
/// Never panics on numeric input; every rejection is a typed
/// [`BudgetError`] and every branch leaves a full step trace in the report.
pub fn solve(categories: &[Category], a: &[Vec<f64>], b: &[f64]) -> SolveReport {
    let n = categories.len();
    info!(event = "solve_start", categories = n, constraints = a.len());

    let mut steps = vec![
        format!("Categories: {n}"),
        format!("Constraints: {}", a.len()),
        format!("Matrix A: {}", format_matrix(a)),
        format!("Vector b: {}", format_vector(b)),
    ];

    if a.len() != n || b.len() != n {
        return reject(
            BudgetError::ConstraintCountMismatch {
                expected: n,
                actual: a.len(),
            },
            steps,
        );
    }
    debug_assert!(a.iter().all(|row| row.len() == n), "rows must have length n");

    let det = determinant(a);
    steps.push(format!("Determinant: {det:.6e}"));
    debug!(event = "determinant_computed", determinant = det);
    if !det.is_finite() {
        return reject(
            BudgetError::UnexpectedSolve {
                detail: format!("determinant is not finite ({det})"),
            },
            steps,
        );
    }
    if det.abs() < SINGULAR_EPSILON {
        return reject(
            BudgetError::SingularMatrix {
                determinant: det,
                threshold: SINGULAR_EPSILON,
            },
            steps,
        );
    }

    let inverse = match invert(a) {
        Some(inverse) => inverse,
        None => {
            // Should be unreachable once the determinant gate passed; treat
            // the inconsistency as an unexpected numerical failure.
            return reject(
                BudgetError::UnexpectedSolve {
                    detail: "matrix inversion failed despite a non-singular determinant".into(),
                },
                steps,
            );
        }
    };
    steps.push(format!("Inverse A^-1: {}", format_matrix(&inverse)));

    let x = mat_vec(&inverse, b);
    steps.push(format!("Raw solution x: {}", format_vector(&x)));
    debug!(event = "solution_computed", solution = %format_vector(&x));

    if let Err(err) = validate_finite(&x) {
        return reject(err, steps);
    }
    if let Err(err) = validate_non_negative(&x, categories) {
        return reject(err, steps);
    }

    steps.push("Validation: all components non-negative".into());
    let allocation = Allocation { amounts: x };
    info!(event = "solve_end", total = allocation.total());
    SolveReport {
        outcome: Ok(allocation),
        steps,
    }
}

/// Solves directly from a collected [`ConstraintSet`], prefixing the trace
/// with the set's constraint descriptions.
pub fn solve_set(categories: &[Category], set: &ConstraintSet) -> SolveReport {
    let descriptions: Vec<String> = set
        .descriptions()
        .iter()
        .enumerate()
        .map(|(i, d)| format!("Constraint {}: {d}", i + 1))
        .collect();
    let mut report = solve(categories, set.rows(), set.rhs());
    report.steps.splice(0..0, descriptions);
    report
}

fn reject(err: BudgetError, mut steps: Vec<String>) -> SolveReport {
    steps.push(format!("Error: {err}"));
    warn!(event = "solve_failed", error = %err);
    SolveReport {
        outcome: Err(err),
        steps,
    }
}
