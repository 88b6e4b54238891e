use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use log::info;

use tableau_simplex::io::{solution_path, write_solution};
use tableau_simplex::{simplex, LinearProgram, SimplexError, Solution, SolverOptions, DEFAULT_TOLERANCE};

/// Two-phase simplex solver for linear programs in equality form.
#[derive(Parser)]
#[command(version, about)]
struct Opts {
    /// JSON model file
    problem_file: PathBuf,
    /// Tolerance for floating point comparisons
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,
}

fn main() {
    env_logger::init();
    let opts = Opts::parse();

    if let Err(err) = run(&opts) {
        eprintln!("error: {}", err);
        exit(1);
    }
}

fn run(opts: &Opts) -> Result<(), SimplexError> {
    let options = SolverOptions::new(opts.tolerance)?;

    info!("reading problem file \"{}\"", opts.problem_file.display());
    let lp = LinearProgram::load(&opts.problem_file)?;

    let solution = simplex(&lp, options);
    println!("Status: {}", solution.status());
    match &solution {
        Solution::Optimal {
            x,
            basis,
            objective,
            bfs_pivots,
            opt_pivots,
        } => {
            println!("Objective: {}", objective);
            println!("Variables: {:?}", x);
            println!("Basis: {:?}", basis);
            println!("Pivots (BFS, OPT): {} {}", bfs_pivots, opt_pivots);
        }
        Solution::Infeasible { bfs_pivots, .. } => println!("Pivots: {}", bfs_pivots),
        Solution::Unbounded {
            bfs_pivots,
            opt_pivots,
        } => println!("Pivots (BFS, OPT): {} {}", bfs_pivots, opt_pivots),
    }

    let output = solution_path(&opts.problem_file);
    write_solution(&output, &solution)?;
    info!("solution written to \"{}\"", output.display());
    Ok(())
}
