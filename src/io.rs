//! Reading programs from and writing solutions to JSON files.
//!
//! A problem file lists the non-zero coefficients only:
//!
//! ```text
//! {
//!   "n": 3,
//!   "a": [[[[0, 1.0], [2, 1.0]], 4.0], ...],
//!   "c": [[1, -2.0]]
//! }
//! ```
//!
//! Every entry of `a` is one constraint, a list of `[column, coefficient]` pairs followed by its
//! right-hand side. `c` holds `[column, cost]` pairs. Unlisted entries are zero.
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SimplexError;
use crate::program::LinearProgram;
use crate::solver::{Solution, Status};

#[derive(Debug, Deserialize)]
struct ProblemFile {
    n: usize,
    a: Vec<(Vec<(usize, f64)>, f64)>,
    c: Vec<(usize, f64)>,
}

pub fn read_program<R: Read>(reader: R) -> Result<LinearProgram, SimplexError> {
    let file: ProblemFile = serde_json::from_reader(reader)?;
    let num_variables = file.n;

    let check = |index: usize| {
        if index < num_variables {
            Ok(index)
        } else {
            Err(SimplexError::IndexOutOfRange {
                index,
                variables: num_variables,
            })
        }
    };

    let mut a = Vec::with_capacity(file.a.len());
    let mut b = Vec::with_capacity(file.a.len());
    for (terms, rhs) in file.a {
        let mut row = vec![0.0; num_variables];
        for (j, aij) in terms {
            row[check(j)?] = aij;
        }
        a.push(row);
        b.push(rhs);
    }

    let mut c = vec![0.0; num_variables];
    for (j, cj) in file.c {
        c[check(j)?] = cj;
    }

    LinearProgram::new(a, b, c)
}

impl LinearProgram {
    /// Loads a program from a JSON problem file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SimplexError> {
        let file = File::open(path)?;
        read_program(BufReader::new(file))
    }
}

/// Flat form of a [`Solution`] as written to disk; fields a status does not carry are omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionRecord {
    pub status: Status,
    pub bfs_pivots: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opt_pivots: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basis: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<f64>,
}

impl From<&Solution> for SolutionRecord {
    fn from(solution: &Solution) -> Self {
        SolutionRecord {
            status: solution.status(),
            bfs_pivots: solution.bfs_pivots(),
            opt_pivots: solution.opt_pivots(),
            x: solution.x().map(<[f64]>::to_vec),
            basis: solution.basis().map(<[usize]>::to_vec),
            objective: solution.objective(),
        }
    }
}

pub fn write_record<W: Write>(writer: W, solution: &Solution) -> Result<(), SimplexError> {
    serde_json::to_writer_pretty(writer, &SolutionRecord::from(solution))?;
    Ok(())
}

pub fn write_solution<P: AsRef<Path>>(path: P, solution: &Solution) -> Result<(), SimplexError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_record(&mut writer, solution)?;
    writer.flush()?;
    Ok(())
}

/// `dir/lp-1.json` -> `dir/lp-1-sol.json`
pub fn solution_path<P: AsRef<Path>>(input: P) -> PathBuf {
    let input = input.as_ref();
    let mut name = input
        .file_stem()
        .unwrap_or_else(|| OsStr::new("solution"))
        .to_os_string();
    name.push("-sol.json");
    input.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{simplex, SolverOptions};
    use approx::assert_relative_eq;

    const PROBLEM: &str = r#"{
        "n": 4,
        "a": [
            [[[0, 1.0], [1, 1.0], [2, 1.0]], 4.0],
            [[[0, 1.0], [1, 3.0], [3, 1.0]], 6.0]
        ],
        "c": [[0, -1.0], [1, -1.0]]
    }"#;

    #[test]
    fn test_read_program() {
        let lp = read_program(PROBLEM.as_bytes()).unwrap();
        assert_eq!(lp.a(), &[vec![1.0, 1.0, 1.0, 0.0], vec![1.0, 3.0, 0.0, 1.0]][..]);
        assert_eq!(lp.b(), &[4.0, 6.0][..]);
        assert_eq!(lp.c(), &[-1.0, -1.0, 0.0, 0.0][..]);
    }

    #[test]
    fn test_read_program_errors() {
        let out_of_range = r#"{"n": 2, "a": [[[[2, 1.0]], 1.0]], "c": []}"#;
        match read_program(out_of_range.as_bytes()) {
            Err(SimplexError::IndexOutOfRange { index: 2, variables: 2 }) => (),
            other => panic!("unexpected {:?}", other),
        }

        let negative = r#"{"n": 1, "a": [[[[0, 1.0]], -1.0]], "c": [[0, 1.0]]}"#;
        match read_program(negative.as_bytes()) {
            Err(SimplexError::NegativeRhs { row: 0, .. }) => (),
            other => panic!("unexpected {:?}", other),
        }

        match read_program("{\"n\": 1}".as_bytes()) {
            Err(SimplexError::Json(_)) => (),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_optimal_record() {
        let lp = read_program(PROBLEM.as_bytes()).unwrap();
        let solution = simplex(&lp, SolverOptions::default());

        let mut buffer = Vec::new();
        write_record(&mut buffer, &solution).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(value["status"], 2);
        assert_eq!(value["bfs_pivots"], 2);
        assert_eq!(value["opt_pivots"], 1);
        assert_eq!(value["basis"], serde_json::json!([0, 1]));
        assert_relative_eq!(value["objective"].as_f64().unwrap(), -4.0, epsilon = 1e-9);
        assert_eq!(value["x"].as_array().unwrap().len(), 4);

        let record: SolutionRecord = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(record.status, Status::Optimal);
        assert_eq!(record.basis, Some(vec![0, 1]));
        assert_eq!(record.opt_pivots, Some(1));
    }

    #[test]
    fn test_infeasible_record_omits_fields() {
        let solution = Solution::Infeasible {
            bfs_pivots: 1,
            phase_one_objective: 1.0,
        };
        let value = serde_json::to_value(SolutionRecord::from(&solution)).unwrap();
        assert_eq!(value, serde_json::json!({"status": 3, "bfs_pivots": 1}));

        let solution = Solution::Unbounded {
            bfs_pivots: 1,
            opt_pivots: 0,
        };
        let value = serde_json::to_value(SolutionRecord::from(&solution)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"status": 4, "bfs_pivots": 1, "opt_pivots": 0})
        );
    }

    #[test]
    fn test_rejects_candidate_status() {
        let record = r#"{"status": 1, "bfs_pivots": 0}"#;
        assert!(serde_json::from_str::<SolutionRecord>(record).is_err());
    }

    #[test]
    fn test_solution_path() {
        assert_eq!(solution_path("lp-1.json"), PathBuf::from("lp-1-sol.json"));
        assert_eq!(
            solution_path("data/problems/lp-2.json"),
            PathBuf::from("data/problems/lp-2-sol.json")
        );
        assert_eq!(solution_path("model"), PathBuf::from("model-sol.json"));
    }
}
