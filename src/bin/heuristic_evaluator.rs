use npuzzle_solver::generator::generate_with_seed;
use npuzzle_solver::heuristics::Heuristic;
use npuzzle_solver::solver::{solve, Algorithm};
use std::collections::HashMap;
use std::time::Duration;

const NUM_RANDOM_BOARDS_FOR_EVALUATION: usize = 20;
const START_SEED: u64 = 0;
const BOARD_SIZE: usize = 3;
const COMPLEXITY: usize = 40;

#[derive(Default)]
struct Totals {
    moves: usize,
    iterations: usize,
    elapsed: Duration,
    runs: usize,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // permutation-count is a diagnostic, not a search guide.
    let heuristics: Vec<Heuristic> = Heuristic::ALL
        .iter()
        .copied()
        .filter(|h| *h != Heuristic::PermutationCount)
        .collect();

    let mut totals: HashMap<Heuristic, Totals> = HashMap::new();

    println!(
        "Starting heuristic evaluation for {} boards of size {}...",
        NUM_RANDOM_BOARDS_FOR_EVALUATION, BOARD_SIZE
    );

    for board_idx in 0..NUM_RANDOM_BOARDS_FOR_EVALUATION {
        let seed = START_SEED + board_idx as u64;
        let board = match generate_with_seed(BOARD_SIZE, COMPLEXITY, false, seed) {
            Ok(b) => b,
            Err(e) => {
                eprintln!("Warning: skipping seed {}: {}", seed, e);
                continue;
            }
        };

        println!("\nEvaluating Board {} (Seed: {})", board_idx, seed);

        for heuristic in &heuristics {
            let outcome = solve(&board, Algorithm::Optimized, *heuristic);
            let Some(solution) = outcome.into_solution() else {
                eprintln!("Error: generated board {} is unsolvable", board_idx);
                break;
            };
            println!(
                "  Heuristic: {:<16}, Moves: {:<4}, Iterations: {}",
                heuristic.name(),
                solution.move_count(),
                solution.iterations
            );
            let entry = totals.entry(*heuristic).or_default();
            entry.moves += solution.move_count();
            entry.iterations += solution.iterations;
            entry.elapsed += solution.elapsed;
            entry.runs += 1;
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("\n--- Averages ---");

    let mut averages: Vec<(Heuristic, f64, f64, f64)> = totals
        .iter()
        .filter(|(_, t)| t.runs > 0)
        .map(|(h, t)| {
            let runs = t.runs as f64;
            (
                *h,
                t.moves as f64 / runs,
                t.iterations as f64 / runs,
                t.elapsed.as_secs_f64() * 1000.0 / runs,
            )
        })
        .collect();

    // Fewest iterations first
    averages.sort_by(|a, b| a.2.total_cmp(&b.2));

    for (heuristic, moves, iterations, millis) in averages {
        println!(
            "Heuristic {:<16}: Moves = {:.2}, Iterations = {:.1}, Time = {:.3} ms",
            heuristic.name(),
            moves,
            iterations,
            millis
        );
    }
}
