//! Apportion Core - Budget categories, constraints, and their linear encoding
//!
//! This crate provides the data model shared by the whole pipeline:
//! - Category types for the budget line items
//! - Constraint types and their encoding into coefficient rows
//! - ConstraintSet for accumulating one solving round
//! - The shared error taxonomy

pub mod category;
pub mod constraint;
pub mod error;
pub mod set;

pub use category::{Category, MAX_CATEGORIES};
pub use constraint::Constraint;
pub use error::BudgetError;
pub use set::ConstraintSet;
