//! Constraint accumulation for one solving round.

use crate::category::Category;
use crate::constraint::Constraint;
use crate::error::BudgetError;

/// Ordered (row, rhs, description) triples collected for one solving round.
///
/// The set is an owned value passed explicitly between the session and the
/// solver; nothing accumulates in globals. [`ConstraintSet::add`] validates
/// before encoding and refuses constraints once the set is complete, so a
/// round can never hold more rows than categories.
///
/// # Example
///
/// ```
/// use apportion_core::{Category, Constraint, ConstraintSet};
///
/// let categories = vec![Category::new("Rent"), Category::new("Food")];
/// let mut set = ConstraintSet::new(categories.len());
/// set.add(&Constraint::TotalValue { amount: 1000.0 }, &categories)
///     .unwrap();
/// assert!(!set.is_complete());
/// set.add(
///     &Constraint::FixedValue { category: 0, amount: 600.0 },
///     &categories,
/// )
/// .unwrap();
/// assert!(set.is_complete());
/// assert_eq!(set.rows(), &[vec![1.0, 1.0], vec![1.0, 0.0]]);
/// assert_eq!(set.rhs(), &[1000.0, 600.0]);
/// ```
#[derive(Debug, Clone)]
pub struct ConstraintSet {
    capacity: usize,
    rows: Vec<Vec<f64>>,
    rhs: Vec<f64>,
    descriptions: Vec<String>,
}

impl ConstraintSet {
    /// Creates an empty set sized for `capacity` categories.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            rows: Vec::with_capacity(capacity),
            rhs: Vec::with_capacity(capacity),
            descriptions: Vec::with_capacity(capacity),
        }
    }

    /// Validates and encodes `constraint`, then appends its row.
    ///
    /// # Errors
    ///
    /// Any error from [`Constraint::validate`], or
    /// [`BudgetError::InvalidConstraint`] when the set already holds one
    /// constraint per category. A constraint that errors is never stored.
    pub fn add(
        &mut self,
        constraint: &Constraint,
        categories: &[Category],
    ) -> Result<(), BudgetError> {
        if self.is_complete() {
            return Err(BudgetError::InvalidConstraint {
                reason: format!(
                    "constraint set already holds {} constraints (one per category)",
                    self.capacity
                ),
            });
        }
        constraint.validate(self.capacity)?;
        let (row, rhs) = constraint.encode(self.capacity);
        self.rows.push(row);
        self.rhs.push(rhs);
        self.descriptions.push(constraint.describe(categories));
        Ok(())
    }

    /// Number of categories the set is sized for.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of constraints collected so far.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no constraints have been collected.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when the set holds exactly one constraint per category.
    pub fn is_complete(&self) -> bool {
        self.rows.len() == self.capacity
    }

    /// Constraints still needed before solving can be attempted.
    pub fn remaining(&self) -> usize {
        self.capacity - self.rows.len()
    }

    /// Discards the most recently added constraint and returns its
    /// description.
    pub fn pop(&mut self) -> Option<String> {
        self.rows.pop();
        self.rhs.pop();
        self.descriptions.pop()
    }

    /// Discards every collected constraint.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.rhs.clear();
        self.descriptions.clear();
    }

    /// Coefficient rows in insertion order.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Right-hand-side values in insertion order.
    pub fn rhs(&self) -> &[f64] {
        &self.rhs
    }

    /// Human-readable descriptions in insertion order.
    pub fn descriptions(&self) -> &[String] {
        &self.descriptions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_categories() -> Vec<Category> {
        vec![Category::new("Rent"), Category::new("Food")]
    }

    #[test]
    fn add_tracks_parallel_sequences() {
        let cats = two_categories();
        let mut set = ConstraintSet::new(2);
        set.add(&Constraint::TotalValue { amount: 1000.0 }, &cats)
            .unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.remaining(), 1);
        assert_eq!(set.rows()[0], vec![1.0, 1.0]);
        assert_eq!(set.rhs()[0], 1000.0);
        assert_eq!(set.descriptions()[0], "total allocation = 1000.00");
    }

    #[test]
    fn full_set_refuses_more_constraints() {
        let cats = two_categories();
        let mut set = ConstraintSet::new(2);
        for _ in 0..2 {
            set.add(&Constraint::TotalValue { amount: 1.0 }, &cats)
                .unwrap();
        }
        let err = set
            .add(&Constraint::TotalValue { amount: 1.0 }, &cats)
            .unwrap_err();
        assert!(matches!(err, BudgetError::InvalidConstraint { .. }));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn flawed_constraint_never_enters_the_set() {
        let cats = two_categories();
        let mut set = ConstraintSet::new(2);
        let err = set
            .add(
                &Constraint::Ratio {
                    category_a: 0,
                    category_b: 0,
                    factor: 2.0,
                },
                &cats,
            )
            .unwrap_err();
        assert_eq!(err, BudgetError::DuplicateCategory { index: 0 });
        assert!(set.is_empty());
    }

    #[test]
    fn pop_discards_the_last_constraint() {
        let cats = two_categories();
        let mut set = ConstraintSet::new(2);
        set.add(&Constraint::TotalValue { amount: 1000.0 }, &cats)
            .unwrap();
        set.add(
            &Constraint::FixedValue {
                category: 0,
                amount: 600.0,
            },
            &cats,
        )
        .unwrap();

        let discarded = set.pop().unwrap();
        assert_eq!(discarded, "Rent = 600.00");
        assert_eq!(set.len(), 1);
        assert_eq!(set.rhs(), &[1000.0]);
    }

    #[test]
    fn clear_resets_all_three_sequences() {
        let cats = two_categories();
        let mut set = ConstraintSet::new(2);
        set.add(&Constraint::TotalValue { amount: 1000.0 }, &cats)
            .unwrap();
        set.clear();
        assert!(set.is_empty());
        assert!(set.rhs().is_empty());
        assert!(set.descriptions().is_empty());
        assert_eq!(set.remaining(), 2);
    }
}
