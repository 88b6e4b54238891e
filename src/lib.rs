//! Two-phase tableau simplex solver for linear programs in equality form
//!
//! minimize   c^T x
//! subject to A x = b
//!            x >= 0
//!            b >= 0
//!
//! Phase 1 finds a basic feasible solution through artificial variables, phase 2 optimizes the
//! original objective from there. See [`simplex`].
pub mod error;
pub mod io;
pub mod program;
pub mod solver;
pub mod tableau;

pub use crate::error::SimplexError;
pub use crate::program::LinearProgram;
pub use crate::solver::{simplex, Solution, SolverOptions, Status, DEFAULT_TOLERANCE};
