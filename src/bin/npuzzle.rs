use clap::{Parser, Subcommand};
use npuzzle_solver::engine::Board;
use npuzzle_solver::generator::{generate_random, generate_with_seed};
use npuzzle_solver::heuristics::Heuristic;
use npuzzle_solver::solver::{solve, Algorithm, SolveOutcome};
use npuzzle_solver::PuzzleError;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(author, version, about = "n-puzzle generator and solver", long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a new puzzle and print it
    Generate {
        /// Side length of the board
        size: usize,

        /// Length of the random walk away from the solved board (defaults to size - 1)
        complexity: Option<usize>,

        /// Make the puzzle unsolvable
        #[clap(short, long)]
        impossible: bool,

        /// Seed for reproducible generation
        #[clap(short, long)]
        seed: Option<u64>,
    },
    /// Read a puzzle and solve it
    Solve {
        /// Puzzle file; reads stdin when omitted
        file: Option<PathBuf>,

        /// One of: reference, optimized, best-first
        #[clap(short, long, default_value = "optimized")]
        algo: String,

        /// One of: hamming, cartesian, manhattan, linear-conflict, permutation-count
        #[clap(short = 'e', long, default_value = "linear-conflict")]
        heuristic: String,

        /// Only print the summary, not every state of the solution
        #[clap(short, long)]
        quiet: bool,
    },
}

fn read_puzzle(file: Option<&PathBuf>) -> Result<Board, String> {
    let content = match file {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("Failed to read stdin: {}", e))?;
            buf
        }
    };
    Board::from_text(&content).map_err(|e| e.to_string())
}

fn run_generate(
    size: usize,
    complexity: Option<usize>,
    impossible: bool,
    seed: Option<u64>,
) -> Result<(), String> {
    let complexity = complexity.unwrap_or(size.saturating_sub(1));
    let board = match seed {
        Some(seed) => generate_with_seed(size, complexity, impossible, seed),
        None => generate_random(size, complexity, impossible),
    }
    .map_err(|e| e.to_string())?;

    println!("# This puzzle is {}", if board.is_solvable() { "solvable" } else { "unsolvable" });
    print!("{}", board);
    Ok(())
}

fn run_solve(file: Option<&PathBuf>, algo: &str, heuristic: &str, quiet: bool) -> Result<(), String> {
    let algorithm: Algorithm = algo.parse().map_err(|e: PuzzleError| e.to_string())?;
    let heuristic: Heuristic = heuristic.parse().map_err(|e: PuzzleError| e.to_string())?;
    let board = read_puzzle(file)?;
    println!("Using {} with {}.", algorithm, heuristic);

    match solve(&board, algorithm, heuristic) {
        SolveOutcome::Unsolvable => {
            println!("This puzzle is unsolvable.");
        }
        SolveOutcome::Solved(solution) => {
            if !quiet {
                for state in &solution.history {
                    println!("{}", state.to_text());
                }
            }
            let moves: Vec<String> = solution.moves().iter().map(|m| m.to_string()).collect();
            println!("# moves ({}): {}", solution.move_count(), moves.join(" "));
            println!("# time complexity: {}", solution.iterations);
            println!("# size complexity: {}", solution.peak_size);
            println!("Took {} ns.", solution.elapsed.as_nanos());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let result = match &args.command {
        Command::Generate {
            size,
            complexity,
            impossible,
            seed,
        } => run_generate(*size, *complexity, *impossible, *seed),
        Command::Solve {
            file,
            algo,
            heuristic,
            quiet,
        } => run_solve(file.as_ref(), algo, heuristic, *quiet),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
