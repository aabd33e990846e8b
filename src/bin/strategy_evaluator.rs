use ballsort_solver::config::{DeepeningConfig, SearchConfig};
use ballsort_solver::engine::{Board, Palette, DEFAULT_CAPACITY};
use ballsort_solver::parallel::solve_parallel_with;
use ballsort_solver::progress::NoProgress;
use ballsort_solver::solution::{replay, Solution};
use ballsort_solver::solver::solve_bfs_with;
use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compares the bfs and parallel strategies on seeded random boards", long_about = None)]
struct Args {
    /// Number of random boards to evaluate
    #[clap(short, long, default_value_t = 20)]
    boards: usize,

    /// Colors per board
    #[clap(long, default_value_t = 4)]
    colors: usize,

    #[clap(short, long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    /// Empty tubes per board
    #[clap(short, long, default_value_t = 2)]
    empty: usize,

    /// Seed of the first board; board `i` uses `start_seed + i`
    #[clap(long, default_value_t = 0)]
    start_seed: u64,

    /// Worker threads for the parallel strategy
    #[clap(short, long)]
    workers: Option<usize>,
}

#[derive(Default)]
struct Tally {
    solved: usize,
    total_moves: usize,
    total_time: Duration,
}

impl Tally {
    fn record(&mut self, solution: &Solution) {
        self.total_time += solution.stats.elapsed;
        if let Some(moves) = &solution.moves {
            self.solved += 1;
            self.total_moves += moves.len();
        }
    }

    fn average_moves(&self) -> f64 {
        if self.solved == 0 {
            return 0.0;
        }
        self.total_moves as f64 / self.solved as f64
    }

    fn average_millis(&self, boards: usize) -> f64 {
        if boards == 0 {
            return 0.0;
        }
        self.total_time.as_secs_f64() * 1000.0 / boards as f64
    }
}

fn describe(solution: &Solution) -> String {
    match &solution.moves {
        Some(moves) => format!(
            "{:>3} moves, {:>8} expanded, {:>9.2?}",
            moves.len(),
            solution.stats.expanded,
            solution.stats.elapsed
        ),
        None => format!(
            "unsolved,  {:>8} expanded, {:>9.2?}",
            solution.stats.expanded, solution.stats.elapsed
        ),
    }
}

fn check(board: &Board, solution: &Solution, strategy: &str, seed: u64) -> bool {
    match &solution.moves {
        Some(moves) if !replay(board, moves).is_solved() => {
            eprintln!(
                "Error: strategy {} returned moves that do not solve board (Seed: {})",
                strategy, seed
            );
            false
        }
        _ => true,
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let bfs_config = SearchConfig::default();
    let parallel_config = DeepeningConfig {
        workers: args.workers,
        ..DeepeningConfig::default()
    };

    let mut bfs_tally = Tally::default();
    let mut parallel_tally = Tally::default();
    let mut longer = 0;
    let mut failures = 0;

    println!(
        "Starting strategy evaluation for {} boards ({} colors, capacity {}, {} empty tubes)...",
        args.boards, args.colors, args.capacity, args.empty
    );

    for board_idx in 0..args.boards {
        let seed = args.start_seed + board_idx as u64;
        let board = match Board::new_random_with_seed(
            Palette::standard(),
            args.colors,
            args.capacity,
            args.empty,
            seed,
        ) {
            Ok(board) => board,
            Err(e) => {
                eprintln!("Failed to deal board: {}", e);
                return ExitCode::FAILURE;
            }
        };

        println!("\nEvaluating Board {} (Seed: {})", board_idx, seed);

        let bfs = match solve_bfs_with(&board, &bfs_config, &mut NoProgress) {
            Ok(solution) => solution,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        };
        let parallel = match solve_parallel_with(&board, &parallel_config, &mut NoProgress) {
            Ok(solution) => solution,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        };

        println!("  Strategy: {:<10} {}", "bfs", describe(&bfs));
        println!("  Strategy: {:<10} {}", "parallel", describe(&parallel));

        if !check(&board, &bfs, "bfs", seed) || !check(&board, &parallel, "parallel", seed) {
            failures += 1;
        }
        if let (Some(shortest), Some(found)) = (&bfs.moves, &parallel.moves) {
            if found.len() > shortest.len() {
                longer += 1;
            }
        }

        bfs_tally.record(&bfs);
        parallel_tally.record(&parallel);
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", args.boards);
    for (name, tally) in [("bfs", &bfs_tally), ("parallel", &parallel_tally)] {
        println!(
            "Strategy {:<10}: Solved = {}, Average Moves = {:.2}, Average Time = {:.2} ms",
            name,
            tally.solved,
            tally.average_moves(),
            tally.average_millis(args.boards)
        );
    }
    println!("Parallel solutions longer than the shortest: {}", longer);

    if failures > 0 {
        eprintln!("{} boards produced an invalid solution", failures);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
