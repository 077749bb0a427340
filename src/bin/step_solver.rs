use clap::Parser;
use npuzzle_solver::heuristics::Heuristic;
use npuzzle_solver::puzzle::Puzzle;
use npuzzle_solver::solver::SearchStep;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Step through an A* search one expansion at a time", long_about = None)]
struct Args {
    /// One of: hamming, cartesian, manhattan, linear-conflict, permutation-count
    #[clap(short = 'e', long, default_value = "manhattan")]
    heuristic: String,

    /// Path to the puzzle file
    puzzle_file: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let heuristic: Heuristic = match args.heuristic.parse() {
        Ok(h) => h,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };
    let content = match fs::read_to_string(&args.puzzle_file) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to read {}: {}", args.puzzle_file.display(), e);
            return;
        }
    };
    let mut puzzle = match Puzzle::from_text(&content) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    println!("Loaded puzzle:\n{}", puzzle.to_text());
    let mut search = match puzzle.interactive(heuristic) {
        Ok(s) => s,
        Err(e) => {
            println!("{}", e);
            return;
        }
    };

    let mut run_to_end = false;
    loop {
        if !run_to_end {
            print!("Press Enter to expand the next node, 'r' to run to the end, 'q' to quit: ");
            io::stdout().flush().ok();

            let mut input = String::new();
            if io::stdin().read_line(&mut input).is_err() {
                println!("Error reading input. Please try again.");
                continue;
            }
            match input.trim() {
                "q" => {
                    println!("Search abandoned after {} iterations.", search.iterations());
                    break;
                }
                "r" => run_to_end = true,
                "" => {}
                other => {
                    println!("Unknown command '{}'.", other);
                    continue;
                }
            }
        }

        match search.step() {
            Some(SearchStep::Expanding { node, status }) => {
                if !run_to_end {
                    println!("---------------------");
                    println!("{}", status);
                    println!("{}", node.to_text());
                }
            }
            Some(SearchStep::Solved(solution)) => {
                println!("---------------------");
                println!(
                    "Solved in {} moves after {} iterations.",
                    solution.move_count(),
                    solution.iterations
                );
                let moves: Vec<String> = solution.moves().iter().map(|m| m.to_string()).collect();
                println!("Moves: {}", moves.join(" "));
                puzzle.complete(solution);
                break;
            }
            None => break,
        }
    }
}
