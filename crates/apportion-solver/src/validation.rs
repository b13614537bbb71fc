//! Post-solve validation of candidate allocations.
//!
//! These checks run only after the linear solve already succeeded
//! numerically: [`validate_finite`] catches silent numerical corruption,
//! [`validate_non_negative`] enforces the business rule that no budget line
//! may come out negative.

use apportion_core::{BudgetError, Category};

/// Tolerance below which a slightly negative component is treated as zero.
///
/// A value like `-1e-12` is floating noise from the inversion, not a
/// genuinely negative allocation, and must pass.
pub const SIGN_EPSILON: f64 = 1e-9;

/// Rejects allocations with a genuinely negative component.
///
/// # Errors
///
/// [`BudgetError::NegativeAllocation`] naming the first offending category
/// and carrying the full rejected vector for the audit record.
pub fn validate_non_negative(x: &[f64], categories: &[Category]) -> Result<(), BudgetError> {
    for (i, &value) in x.iter().enumerate() {
        if value < -SIGN_EPSILON {
            let name = categories
                .get(i)
                .map(|c| c.name().to_string())
                .unwrap_or_else(|| format!("category {i}"));
            return Err(BudgetError::NegativeAllocation {
                name,
                value,
                solution: x.to_vec(),
            });
        }
    }
    Ok(())
}

/// Rejects solution vectors containing NaN or infinite components.
///
/// # Errors
///
/// [`BudgetError::UnexpectedSolve`] naming the corrupted component.
pub fn validate_finite(x: &[f64]) -> Result<(), BudgetError> {
    for (i, &value) in x.iter().enumerate() {
        if !value.is_finite() {
            return Err(BudgetError::UnexpectedSolve {
                detail: format!("solution[{i}] = {value} is not finite"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<Category> {
        vec![Category::new("Rent"), Category::new("Food")]
    }

    #[test]
    fn accepts_non_negative_allocation() {
        assert!(validate_non_negative(&[600.0, 400.0], &categories()).is_ok());
    }

    #[test]
    fn accepts_exact_zero() {
        assert!(validate_non_negative(&[1000.0, 0.0], &categories()).is_ok());
    }

    #[test]
    fn floating_noise_below_zero_passes() {
        assert!(validate_non_negative(&[-1e-12, 1000.0], &categories()).is_ok());
    }

    #[test]
    fn negative_component_rejected_with_vector() {
        let err = validate_non_negative(&[1200.0, -200.0], &categories()).unwrap_err();
        match err {
            BudgetError::NegativeAllocation {
                name,
                value,
                solution,
            } => {
                assert_eq!(name, "Food");
                assert_eq!(value, -200.0);
                assert_eq!(solution, vec![1200.0, -200.0]);
            }
            other => panic!("expected NegativeAllocation, got {other:?}"),
        }
    }

    #[test]
    fn nan_component_is_unexpected() {
        let err = validate_finite(&[1.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, BudgetError::UnexpectedSolve { .. }));
    }

    #[test]
    fn infinite_component_is_unexpected() {
        let err = validate_finite(&[f64::INFINITY]).unwrap_err();
        assert!(matches!(err, BudgetError::UnexpectedSolve { .. }));
    }
}
