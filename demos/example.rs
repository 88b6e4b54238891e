use approx::assert_relative_eq;
use tableau_simplex::{simplex, LinearProgram, Solution, SolverOptions};

fn main() {
    // maximize   x0 - x1 + x2
    // subject to  2 x0 -   x1 + 2 x2 + x3           = 4
    //            -2 x0 + 3 x1 -   x2      - x4      = 5
    //               x0 -   x1 + 2 x2           - x5 = 1
    let a = vec![
        vec![2.0, -1.0, 2.0, 1.0, 0.0, 0.0],
        vec![-2.0, 3.0, -1.0, 0.0, -1.0, 0.0],
        vec![1.0, -1.0, 2.0, 0.0, 0.0, -1.0],
    ];
    let b = vec![4.0, 5.0, 1.0];
    let c = vec![-1.0, 1.0, -1.0, 0.0, 0.0, 0.0];

    let lp = LinearProgram::new(a, b, c).expect("well-formed program");
    let solution = simplex(&lp, SolverOptions::default());
    match solution {
        Solution::Optimal { x, objective, .. } => {
            assert_relative_eq!(x[..3], [0.0, 2.8, 3.4][..], epsilon = 1e-8);
            assert_relative_eq!(-objective, 0.6, epsilon = 1e-8);
            println!("solution: {:?}", x);
            println!("optimal: {}", -objective);
        }
        Solution::Infeasible { .. } => {
            println!("Infeasible");
        }
        Solution::Unbounded { .. } => {
            println!("Unbounded");
        }
    };
}
