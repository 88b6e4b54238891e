use crate::error::SimplexError;

/// Linear program in equality form
///
/// minimize   sum_{j} c[j] * x[j]
/// subject to sum_{j} a[i][j] * x[j] = b[i] (for all i)
///            x[j] >= 0 (for all j)
///            b[i] >= 0 (for all i)
///
/// Inequalities must already be folded in with slack or surplus columns.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearProgram {
    a: Vec<Vec<f64>>,
    b: Vec<f64>,
    c: Vec<f64>,
}

impl LinearProgram {
    pub fn new(a: Vec<Vec<f64>>, b: Vec<f64>, c: Vec<f64>) -> Result<Self, SimplexError> {
        let num_variables = c.len();

        if a.len() != b.len() {
            return Err(SimplexError::RowCountMismatch {
                rows: a.len(),
                rhs: b.len(),
            });
        }
        for (i, ai) in a.iter().enumerate() {
            if ai.len() != num_variables {
                return Err(SimplexError::ColumnCountMismatch {
                    row: i,
                    found: ai.len(),
                    expected: num_variables,
                });
            }
            if let Some(j) = ai.iter().position(|v| !v.is_finite()) {
                return Err(SimplexError::NonFinite {
                    what: format!("a[{}][{}]", i, j),
                });
            }
        }
        for (i, &bi) in b.iter().enumerate() {
            if !bi.is_finite() {
                return Err(SimplexError::NonFinite {
                    what: format!("b[{}]", i),
                });
            }
            if bi < 0.0 {
                return Err(SimplexError::NegativeRhs { row: i, value: bi });
            }
        }
        if let Some(j) = c.iter().position(|v| !v.is_finite()) {
            return Err(SimplexError::NonFinite {
                what: format!("c[{}]", j),
            });
        }

        Ok(LinearProgram { a, b, c })
    }

    pub fn a(&self) -> &[Vec<f64>] {
        &self.a
    }

    pub fn b(&self) -> &[f64] {
        &self.b
    }

    pub fn c(&self) -> &[f64] {
        &self.c
    }

    /// m
    pub fn num_constraints(&self) -> usize {
        self.b.len()
    }

    /// n
    pub fn num_variables(&self) -> usize {
        self.c.len()
    }

    /// Phase-1 program: `[A | I] x = b` with cost 0 on the original variables and 1 on the
    /// `m` artificial ones appended after them.
    pub(crate) fn with_artificials(&self) -> LinearProgram {
        let num_constraints = self.num_constraints();
        let num_variables = self.num_variables();

        let a = self
            .a
            .iter()
            .enumerate()
            .map(|(i, ai)| {
                let mut row = Vec::with_capacity(num_variables + num_constraints);
                row.extend_from_slice(ai);
                row.extend((0..num_constraints).map(|k| if k == i { 1.0 } else { 0.0 }));
                row
            })
            .collect();

        let mut c = vec![0.0; num_variables + num_constraints];
        for cj in c.iter_mut().skip(num_variables) {
            *cj = 1.0;
        }

        LinearProgram {
            a,
            b: self.b.clone(),
            c,
        }
    }

    /// c^T x
    pub fn objective_value(&self, x: &[f64]) -> f64 {
        assert_eq!(x.len(), self.num_variables());
        self.c.iter().zip(x).map(|(cj, xj)| cj * xj).sum()
    }

    /// max_i |a[i] x - b[i]|
    pub fn max_residual(&self, x: &[f64]) -> f64 {
        assert_eq!(x.len(), self.num_variables());
        self.a
            .iter()
            .zip(&self.b)
            .map(|(ai, bi)| {
                let lhs: f64 = ai.iter().zip(x).map(|(aij, xj)| aij * xj).sum();
                (lhs - bi).abs()
            })
            .fold(0.0, f64::max)
    }
}
