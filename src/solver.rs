use std::convert::TryFrom;
use std::fmt;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::SimplexError;
use crate::program::LinearProgram;
use crate::tableau::{PhaseResult, Tableau};

pub const DEFAULT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions {
    tolerance: f64,
}

impl SolverOptions {
    /// `tolerance` is used by the optimality test, the ratio test and the infeasibility check.
    pub fn new(tolerance: f64) -> Result<Self, SimplexError> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(SimplexError::InvalidTolerance(tolerance));
        }
        Ok(SolverOptions { tolerance })
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Terminal status, serialized as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Status {
    Optimal,
    Infeasible,
    Unbounded,
}

impl Status {
    pub fn code(self) -> u8 {
        match self {
            Status::Optimal => 2,
            Status::Infeasible => 3,
            Status::Unbounded => 4,
        }
    }
}

impl From<Status> for u8 {
    fn from(status: Status) -> u8 {
        status.code()
    }
}

impl TryFrom<u8> for Status {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            2 => Ok(Status::Optimal),
            3 => Ok(Status::Infeasible),
            4 => Ok(Status::Unbounded),
            1 => Err("status 1 (candidate) is not a terminal status".to_string()),
            _ => Err(format!("unknown status code {}", code)),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Optimal => "OPTIMAL",
            Status::Infeasible => "INFEASIBLE",
            Status::Unbounded => "UNBOUNDED",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Solution {
    Optimal {
        /// one value per variable of the program
        x: Vec<f64>,
        /// basic columns, ascending
        basis: Vec<usize>,
        objective: f64,
        bfs_pivots: usize,
        opt_pivots: usize,
    },
    Infeasible {
        bfs_pivots: usize,
        /// sum of the artificial variables at the end of phase 1
        phase_one_objective: f64,
    },
    Unbounded {
        bfs_pivots: usize,
        opt_pivots: usize,
    },
}

impl Solution {
    pub fn status(&self) -> Status {
        match self {
            Solution::Optimal { .. } => Status::Optimal,
            Solution::Infeasible { .. } => Status::Infeasible,
            Solution::Unbounded { .. } => Status::Unbounded,
        }
    }

    /// Pivots spent finding a basic feasible solution.
    pub fn bfs_pivots(&self) -> usize {
        match *self {
            Solution::Optimal { bfs_pivots, .. }
            | Solution::Infeasible { bfs_pivots, .. }
            | Solution::Unbounded { bfs_pivots, .. } => bfs_pivots,
        }
    }

    /// Pivots from the basic feasible solution onwards; `None` when phase 2 never ran.
    pub fn opt_pivots(&self) -> Option<usize> {
        match *self {
            Solution::Optimal { opt_pivots, .. } | Solution::Unbounded { opt_pivots, .. } => {
                Some(opt_pivots)
            }
            Solution::Infeasible { .. } => None,
        }
    }

    pub fn x(&self) -> Option<&[f64]> {
        match self {
            Solution::Optimal { x, .. } => Some(x),
            _ => None,
        }
    }

    pub fn basis(&self) -> Option<&[usize]> {
        match self {
            Solution::Optimal { basis, .. } => Some(basis),
            _ => None,
        }
    }

    pub fn objective(&self) -> Option<f64> {
        match *self {
            Solution::Optimal { objective, .. } => Some(objective),
            _ => None,
        }
    }
}

/// Solves `program` with the two-phase simplex method.
///
/// Phase 1 appends one artificial variable per constraint and minimizes their sum starting
/// from the artificial basis; a non-zero optimum means `program` is infeasible. Phase 2
/// minimizes the original cost from the phase-1 basis, with artificial columns barred from
/// entering.
///
/// # Panics
///
/// If `program` has fewer variables than constraints.
pub fn simplex(program: &LinearProgram, options: SolverOptions) -> Solution {
    let tolerance = options.tolerance();
    let num_constraints = program.num_constraints();
    let num_variables = program.num_variables();
    assert!(
        num_variables >= num_constraints,
        "{} variables cannot support {} constraints",
        num_variables,
        num_constraints
    );

    debug!(
        "phase 1: {} constraints, {} variables, tolerance {}",
        num_constraints, num_variables, tolerance
    );
    let auxiliary = program.with_artificials();
    let artificial_basis = (num_variables..num_variables + num_constraints).collect();
    let mut tableau = Tableau::new(&auxiliary, artificial_basis);

    let mut bfs_pivots = match tableau.optimize(tolerance) {
        PhaseResult::Optimal(vertex) => vertex.pivots,
        PhaseResult::Unbounded { pivots } => {
            // the phase-1 objective is bounded below by zero, only rounding gets here
            warn!("phase 1 reported unbounded after {} pivots", pivots);
            return Solution::Unbounded {
                bfs_pivots: pivots,
                opt_pivots: 0,
            };
        }
    };

    let phase_one_objective = tableau.objective();
    if phase_one_objective.abs() > tolerance {
        debug!(
            "infeasible: artificial variables sum to {} after {} pivots",
            phase_one_objective, bfs_pivots
        );
        return Solution::Infeasible {
            bfs_pivots,
            phase_one_objective,
        };
    }

    let driven_out = tableau.drive_out_artificials(num_variables, tolerance);
    if driven_out > 0 {
        debug!("drove {} artificial variables out of the basis", driven_out);
    }
    bfs_pivots += driven_out;
    debug!("phase 1 done after {} pivots, basis {:?}", bfs_pivots, tableau.basis());

    tableau.restrict_entering(num_variables);
    tableau.replace_objective(program.c());

    match tableau.optimize(tolerance) {
        PhaseResult::Unbounded { pivots } => {
            debug!("phase 2 unbounded after {} pivots", pivots);
            Solution::Unbounded {
                bfs_pivots,
                opt_pivots: pivots,
            }
        }
        PhaseResult::Optimal(vertex) => {
            debug!(
                "phase 2 optimal after {} pivots, objective {}",
                vertex.pivots, vertex.objective
            );
            let mut x = vertex.x;
            x.truncate(num_variables);
            let mut basis = vertex.basis;
            basis.sort_unstable();
            Solution::Optimal {
                x,
                basis,
                objective: vertex.objective,
                bfs_pivots,
                opt_pivots: vertex.pivots,
            }
        }
    }
}
