//! User-stated budget constraints and their linear encoding.
//!
//! Each constraint maps to exactly one coefficient row of length `n` and one
//! right-hand-side value:
//!
//! | Constraint          | row                                  | rhs |
//! |---------------------|--------------------------------------|-----|
//! | `TotalValue(v)`     | all entries 1.0                      | v   |
//! | `FixedValue(c, v)`  | 1.0 at `c`, 0.0 elsewhere            | v   |
//! | `Ratio(a, b, f)`    | 1.0 at `a`, -f at `b`, 0.0 elsewhere | 0.0 |
//! | `Percentage(c, p)`  | 1 - p/100 at `c`, -p/100 elsewhere   | 0.0 |
//!
//! The `Percentage` row comes from expanding
//! `x[c] - (p/100) * sum(x) = 0` and distributing the sum. This keeps the
//! constraint homogeneous (rhs = 0) and exact no matter what the total
//! resolves to. Encoding `p/100` on the right-hand side instead would state
//! a different constraint entirely (an absolute amount equal to the
//! fraction) and is wrong.

use crate::category::Category;
use crate::error::BudgetError;

/// A user-stated linear relationship among category allocations.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// The sum of all category allocations equals `amount`.
    TotalValue {
        /// Total budget amount. Must be non-negative.
        amount: f64,
    },
    /// The allocation of `category` equals `amount`.
    FixedValue {
        /// 0-based category index.
        category: usize,
        /// Fixed amount. Must be non-negative.
        amount: f64,
    },
    /// `allocation(category_a) = factor * allocation(category_b)`.
    ///
    /// `factor` may be any finite real, zero and negative included; a factor
    /// that forces a negative allocation is caught by the post-solve sign
    /// check, not here.
    Ratio {
        /// 0-based index of the dependent category.
        category_a: usize,
        /// 0-based index of the reference category. Must differ from
        /// `category_a`.
        category_b: usize,
        /// Multiplier applied to `category_b`.
        factor: f64,
    },
    /// The allocation of `category` equals `percent`% of the total.
    Percentage {
        /// 0-based category index.
        category: usize,
        /// Percentage in `[0, 100]`.
        percent: f64,
    },
}

impl Constraint {
    /// Checks that the constraint may enter a set over `n` categories.
    ///
    /// This is the pure validation predicate the interactive layer calls
    /// before a constraint is stored: index bounds, distinct categories for
    /// ratios, percentage range, non-negative amounts, finite numbers. It
    /// performs no I/O and never retries.
    ///
    /// # Errors
    ///
    /// [`BudgetError::DuplicateCategory`] for a self-referencing ratio,
    /// [`BudgetError::InvalidConstraint`] for every other violation.
    pub fn validate(&self, n: usize) -> Result<(), BudgetError> {
        match *self {
            Constraint::TotalValue { amount } => {
                validate_amount("total value", amount)?;
            }
            Constraint::FixedValue { category, amount } => {
                validate_index(category, n)?;
                validate_amount("fixed value", amount)?;
            }
            Constraint::Ratio {
                category_a,
                category_b,
                factor,
            } => {
                validate_index(category_a, n)?;
                validate_index(category_b, n)?;
                if category_a == category_b {
                    return Err(BudgetError::DuplicateCategory { index: category_a });
                }
                if !factor.is_finite() {
                    return Err(BudgetError::InvalidConstraint {
                        reason: format!("ratio factor must be finite, got {factor}"),
                    });
                }
            }
            Constraint::Percentage { category, percent } => {
                validate_index(category, n)?;
                if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
                    return Err(BudgetError::InvalidConstraint {
                        reason: format!("percentage must be within [0, 100], got {percent}"),
                    });
                }
            }
        }
        Ok(())
    }

    /// Encodes the constraint into one coefficient row of length `n` and one
    /// right-hand-side value, per the table in the module docs.
    ///
    /// Pure and total: no range validation happens here. Callers run
    /// [`Constraint::validate`] before admitting a constraint to a set.
    pub fn encode(&self, n: usize) -> (Vec<f64>, f64) {
        match *self {
            Constraint::TotalValue { amount } => (vec![1.0; n], amount),
            Constraint::FixedValue { category, amount } => {
                let mut row = vec![0.0; n];
                row[category] = 1.0;
                (row, amount)
            }
            Constraint::Ratio {
                category_a,
                category_b,
                factor,
            } => {
                let mut row = vec![0.0; n];
                row[category_a] = 1.0;
                row[category_b] = -factor;
                (row, 0.0)
            }
            Constraint::Percentage { category, percent } => {
                let fraction = percent / 100.0;
                let mut row = vec![-fraction; n];
                row[category] = 1.0 - fraction;
                (row, 0.0)
            }
        }
    }

    /// Human-readable description used in audit traces and session output.
    pub fn describe(&self, categories: &[Category]) -> String {
        let name = |index: usize| {
            categories
                .get(index)
                .map(Category::name)
                .unwrap_or("<unknown>")
        };
        match *self {
            Constraint::TotalValue { amount } => {
                format!("total allocation = {amount:.2}")
            }
            Constraint::FixedValue { category, amount } => {
                format!("{} = {amount:.2}", name(category))
            }
            Constraint::Ratio {
                category_a,
                category_b,
                factor,
            } => {
                format!("{} = {factor} * {}", name(category_a), name(category_b))
            }
            Constraint::Percentage { category, percent } => {
                format!("{} = {percent}% of total", name(category))
            }
        }
    }
}

fn validate_index(index: usize, n: usize) -> Result<(), BudgetError> {
    if index >= n {
        return Err(BudgetError::InvalidConstraint {
            reason: format!("category index {index} out of bounds for {n} categories"),
        });
    }
    Ok(())
}

fn validate_amount(kind: &str, amount: f64) -> Result<(), BudgetError> {
    if !amount.is_finite() {
        return Err(BudgetError::InvalidConstraint {
            reason: format!("{kind} must be finite, got {amount}"),
        });
    }
    if amount < 0.0 {
        return Err(BudgetError::InvalidConstraint {
            reason: format!("{kind} must not be negative, got {amount}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(names: &[&str]) -> Vec<Category> {
        names.iter().copied().map(Category::new).collect()
    }

    #[test]
    fn total_value_row_is_all_ones() {
        let (row, rhs) = Constraint::TotalValue { amount: 1000.0 }.encode(3);
        assert_eq!(row, vec![1.0, 1.0, 1.0]);
        assert_eq!(rhs, 1000.0);
    }

    #[test]
    fn fixed_value_row_is_unit_vector() {
        let (row, rhs) = Constraint::FixedValue {
            category: 1,
            amount: 600.0,
        }
        .encode(3);
        assert_eq!(row, vec![0.0, 1.0, 0.0]);
        assert_eq!(rhs, 600.0);
    }

    #[test]
    fn ratio_row_is_homogeneous() {
        let (row, rhs) = Constraint::Ratio {
            category_a: 0,
            category_b: 2,
            factor: 2.0,
        }
        .encode(3);
        assert_eq!(row, vec![1.0, 0.0, -2.0]);
        assert_eq!(rhs, 0.0);
    }

    #[test]
    fn percentage_row_distributes_the_total() {
        // x[0] = 50% of total over two categories: [0.5, -0.5], rhs 0.
        let (row, rhs) = Constraint::Percentage {
            category: 0,
            percent: 50.0,
        }
        .encode(2);
        assert_eq!(row, vec![0.5, -0.5]);
        assert_eq!(rhs, 0.0);
    }

    #[test]
    fn percentage_rhs_is_always_zero() {
        // The incorrect historic encoding put p/100 on the rhs; the row must
        // stay homogeneous for every percentage.
        for percent in [0.0, 25.0, 100.0] {
            let (row, rhs) = Constraint::Percentage {
                category: 1,
                percent,
            }
            .encode(4);
            assert_eq!(rhs, 0.0, "percent {percent}");
            let fraction = percent / 100.0;
            assert_eq!(row[1], 1.0 - fraction);
            for (i, &entry) in row.iter().enumerate() {
                if i != 1 {
                    assert_eq!(entry, -fraction, "entry {i} for percent {percent}");
                }
            }
        }
    }

    #[test]
    fn duplicate_ratio_categories_rejected() {
        let c = Constraint::Ratio {
            category_a: 1,
            category_b: 1,
            factor: 2.0,
        };
        assert_eq!(
            c.validate(3),
            Err(BudgetError::DuplicateCategory { index: 1 })
        );
    }

    #[test]
    fn negative_ratio_factor_passes_validation() {
        // Negative factors are caught by the post-solve sign check, not here.
        let c = Constraint::Ratio {
            category_a: 0,
            category_b: 1,
            factor: -3.0,
        };
        assert!(c.validate(2).is_ok());
    }

    #[test]
    fn out_of_bounds_index_rejected() {
        let c = Constraint::FixedValue {
            category: 4,
            amount: 10.0,
        };
        assert!(matches!(
            c.validate(4),
            Err(BudgetError::InvalidConstraint { .. })
        ));
    }

    #[test]
    fn negative_amount_rejected() {
        let c = Constraint::TotalValue { amount: -1.0 };
        assert!(matches!(
            c.validate(2),
            Err(BudgetError::InvalidConstraint { .. })
        ));
    }

    #[test]
    fn percentage_out_of_range_rejected() {
        for percent in [-0.1, 100.1, f64::NAN] {
            let c = Constraint::Percentage {
                category: 0,
                percent,
            };
            assert!(
                matches!(c.validate(2), Err(BudgetError::InvalidConstraint { .. })),
                "percent {percent} should be rejected",
            );
        }
    }

    #[test]
    fn non_finite_amount_rejected() {
        let c = Constraint::FixedValue {
            category: 0,
            amount: f64::INFINITY,
        };
        assert!(matches!(
            c.validate(1),
            Err(BudgetError::InvalidConstraint { .. })
        ));
    }

    #[test]
    fn descriptions_use_category_names() {
        let cats = categories(&["Rent", "Food"]);
        let c = Constraint::Ratio {
            category_a: 0,
            category_b: 1,
            factor: 2.0,
        };
        assert_eq!(c.describe(&cats), "Rent = 2 * Food");

        let c = Constraint::Percentage {
            category: 1,
            percent: 30.0,
        };
        assert_eq!(c.describe(&cats), "Food = 30% of total");
    }
}
