use log::trace;

use crate::program::LinearProgram;

/// Outcome of a single simplex iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// no reduced cost exceeds the tolerance
    Optimal,
    /// the entering column has no entry that could bound the step
    Unbounded,
    /// `column` entered the basis at tableau row `row` (1-based, row 0 is the objective)
    Pivot { row: usize, column: usize },
}

/// Basic feasible solution at which a phase stopped
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// one value per tableau column
    pub x: Vec<f64>,
    /// basis[i] is the column basic in constraint row i
    pub basis: Vec<usize>,
    pub objective: f64,
    pub pivots: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PhaseResult {
    Optimal(Vertex),
    Unbounded { pivots: usize },
}

/// Dense simplex tableau
///
/// row 0:      -c[0] ... -c[n-1] | objective
/// row i >= 1: a[i-1][0] ... a[i-1][n-1] | b[i-1]
///
/// For every constraint row i, column basis[i] holds 1 at row i + 1 and 0 in all other rows.
#[derive(Debug, Clone)]
pub struct Tableau {
    matrix: Vec<Vec<f64>>,
    basis: Vec<usize>,
    // columns at or past this index never enter the basis
    eligible: usize,
}

impl Tableau {
    /// Builds the tableau of `program` and reduces it so that `basis` is in canonical form.
    ///
    /// The pivot elements met while reducing must be non-zero, which holds whenever the basis
    /// columns form a permuted identity (slack or artificial bases).
    pub fn new(program: &LinearProgram, basis: Vec<usize>) -> Self {
        let num_constraints = program.num_constraints();
        let num_variables = program.num_variables();
        assert!(
            num_variables >= num_constraints,
            "{} variables cannot support {} constraints",
            num_variables,
            num_constraints
        );
        assert_eq!(basis.len(), num_constraints, "need one basic column per constraint");
        assert!(basis.iter().all(|&j| j < num_variables));

        let mut matrix = Vec::with_capacity(num_constraints + 1);
        let mut objective_row: Vec<f64> = program.c().iter().map(|cj| -cj).collect();
        objective_row.push(0.0);
        matrix.push(objective_row);
        for (ai, &bi) in program.a().iter().zip(program.b()) {
            let mut row = Vec::with_capacity(num_variables + 1);
            row.extend_from_slice(ai);
            row.push(bi);
            matrix.push(row);
        }

        let mut tableau = Tableau {
            matrix,
            basis,
            eligible: num_variables,
        };
        tableau.row_operation();
        tableau
    }

    /// Gauss-Jordan step: scales `row` so that the entry at `col` becomes 1 and eliminates
    /// `col` from every other row, objective row included.
    pub fn row_operation_once(&mut self, row: usize, col: usize) {
        let pivot = self.matrix[row][col];
        debug_assert!(pivot != 0.0, "zero pivot at ({}, {})", row, col);

        for v in self.matrix[row].iter_mut() {
            *v /= pivot;
        }

        let pivot_row = std::mem::take(&mut self.matrix[row]);
        for (i, other) in self.matrix.iter_mut().enumerate() {
            if i == row {
                continue;
            }
            let factor = other[col];
            if factor != 0.0 {
                for (v, p) in other.iter_mut().zip(&pivot_row) {
                    *v -= factor * p;
                }
            }
        }
        self.matrix[row] = pivot_row;
    }

    /// Pivots once per basis entry, in basis order.
    pub fn row_operation(&mut self) {
        for i in 0..self.basis.len() {
            let col = self.basis[i];
            self.row_operation_once(i + 1, col);
        }
    }

    /// One iteration of the largest-coefficient rule.
    ///
    /// The entering column is the first one holding the greatest reduced cost; the leaving row
    /// is the first one reaching the minimum ratio among rows with an entry above `tolerance`.
    pub fn step(&mut self, tolerance: f64) -> Step {
        let rhs = self.rhs_column();

        let mut entering: Option<(usize, f64)> = None;
        for (j, &reduced) in self.matrix[0][..self.eligible].iter().enumerate() {
            match entering {
                Some((_, best)) if reduced <= best => (),
                _ => entering = Some((j, reduced)),
            }
        }
        let column = match entering {
            Some((column, reduced)) if reduced > tolerance => column,
            _ => return Step::Optimal,
        };

        if self.matrix[1..].iter().all(|row| row[column] <= 0.0) {
            return Step::Unbounded;
        }

        let mut leaving: Option<(usize, f64)> = None;
        for (i, row) in self.matrix.iter().enumerate().skip(1) {
            if row[column] > tolerance {
                let ratio = row[rhs] / row[column];
                match leaving {
                    Some((_, best)) if ratio >= best => (),
                    _ => leaving = Some((i, ratio)),
                }
            }
        }
        // only entries within the tolerance of zero are positive
        let row = match leaving {
            Some((row, _)) => row,
            None => return Step::Unbounded,
        };

        self.basis[row - 1] = column;
        self.row_operation_once(row, column);
        Step::Pivot { row, column }
    }

    /// Steps until the tableau is optimal or shown to be unbounded.
    pub fn optimize(&mut self, tolerance: f64) -> PhaseResult {
        let mut pivots = 0;
        loop {
            match self.step(tolerance) {
                Step::Optimal => {
                    return PhaseResult::Optimal(Vertex {
                        x: self.solution(),
                        basis: self.basis.clone(),
                        objective: self.objective(),
                        pivots,
                    });
                }
                Step::Unbounded => return PhaseResult::Unbounded { pivots },
                Step::Pivot { row, column } => {
                    pivots += 1;
                    trace!(
                        "pivot {}: column {} enters at row {}, objective {}",
                        pivots,
                        column,
                        row,
                        self.objective()
                    );
                }
            }
        }
    }

    /// Value of the basic solution, read from the objective row's right-hand side.
    pub fn objective(&self) -> f64 {
        self.matrix[0][self.rhs_column()]
    }

    pub fn basis(&self) -> &[usize] {
        &self.basis
    }

    /// Basic solution over all tableau columns: x[basis[i]] = b[i], zero elsewhere.
    pub fn solution(&self) -> Vec<f64> {
        let rhs = self.rhs_column();
        let mut x = vec![0.0; rhs];
        for (i, &j) in self.basis.iter().enumerate() {
            x[j] = self.matrix[i + 1][rhs];
        }
        x
    }

    /// Bars every column from `columns` on from entering the basis.
    pub(crate) fn restrict_entering(&mut self, columns: usize) {
        self.eligible = columns.min(self.rhs_column());
    }

    /// Replaces the objective row by `-c` (zero-padded to the tableau width) and reduces it
    /// against the current basis. The constraint rows are left untouched.
    pub(crate) fn replace_objective(&mut self, c: &[f64]) {
        let rhs = self.rhs_column();
        assert!(c.len() <= rhs);

        let objective_row = &mut self.matrix[0];
        for v in objective_row.iter_mut() {
            *v = 0.0;
        }
        for (v, cj) in objective_row.iter_mut().zip(c) {
            *v = -cj;
        }
        self.row_operation();
    }

    /// Pivots every basic column at or past `first_artificial` out of the basis, using the
    /// first earlier column whose entry in that row exceeds `tolerance`. Rows without such an
    /// entry keep their artificial. Returns the number of pivots made.
    pub(crate) fn drive_out_artificials(&mut self, first_artificial: usize, tolerance: f64) -> usize {
        let mut pivots = 0;
        for i in 0..self.basis.len() {
            if self.basis[i] < first_artificial {
                continue;
            }
            let row = i + 1;
            let entering = self.matrix[row][..first_artificial]
                .iter()
                .position(|v| v.abs() > tolerance);
            if let Some(column) = entering {
                trace!("artificial {} leaves row {} for column {}", self.basis[i], row, column);
                self.basis[i] = column;
                self.row_operation_once(row, column);
                pivots += 1;
            }
        }
        pivots
    }

    fn rhs_column(&self) -> usize {
        self.matrix[0].len() - 1
    }
}

/// Runs the simplex method on `program` from `basis` (a permuted identity in `program.a()`).
pub fn simplex_inner(program: &LinearProgram, basis: Vec<usize>, tolerance: f64) -> PhaseResult {
    Tableau::new(program, basis).optimize(tolerance)
}
