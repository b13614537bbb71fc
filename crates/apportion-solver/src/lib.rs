//! Apportion Solver - Assembles and solves the budget constraint system
//!
//! The solving pipeline for one attempt:
//! 1. Constraint count check (must equal the category count)
//! 2. Determinant computation and singularity gate
//! 3. Inversion and `x = A^-1 * b`
//! 4. Non-negativity validation of the candidate allocation
//!
//! Every branch, success or failure, produces an ordered step trace suitable
//! for the audit log.
//!
//! Logging levels:
//! - **INFO**: solve start/end with problem size and outcome
//! - **DEBUG**: individual pipeline steps

pub mod matrix;
pub mod solve;
pub mod validation;

pub use solve::{solve, solve_set, Allocation, SolveReport, SINGULAR_EPSILON};
pub use validation::{validate_finite, validate_non_negative, SIGN_EPSILON};
