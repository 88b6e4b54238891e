use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimplexError {
    #[error("the constraint matrix has {rows} rows but the right-hand side has {rhs} entries")]
    RowCountMismatch { rows: usize, rhs: usize },
    #[error("row {row} of the constraint matrix has {found} columns, expected {expected}")]
    ColumnCountMismatch {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("right-hand side entry {row} is negative ({value}); flip the sign of the row first")]
    NegativeRhs { row: usize, value: f64 },
    #[error("coefficient {what} is not finite")]
    NonFinite { what: String },
    #[error("tolerance must be finite and non-negative, got {0}")]
    InvalidTolerance(f64),
    #[error("variable index {index} is out of range for a program with {variables} variables")]
    IndexOutOfRange { index: usize, variables: usize },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}
