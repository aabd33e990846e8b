use ballsort_solver::config::{
    DeepeningConfig, SearchConfig, DEFAULT_DEPTH_STEP, DEFAULT_INITIAL_DEPTH, DEFAULT_MAX_DEPTH,
    DEFAULT_PROGRESS_INTERVAL, DEFAULT_SEED_DEPTH,
};
use ballsort_solver::engine::{Palette, DEFAULT_CAPACITY};
use ballsort_solver::parallel::solve_parallel_with;
use ballsort_solver::progress::LogProgress;
use ballsort_solver::solver::solve_bfs_with;
use ballsort_solver::utils::board_from_str;
use clap::{Parser, ValueEnum};
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Strategy {
    /// Exhaustive breadth-first search; shortest solution, single thread
    Bfs,
    /// Iterative deepening over parallel workers; not guaranteed shortest
    Parallel,
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the board file (one tube per line, top token first, `-` for an empty tube)
    board_file: PathBuf,

    /// Tube capacity
    #[clap(short, long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    /// Extra empty tubes appended to the board
    #[clap(short, long, default_value_t = 0)]
    empty: usize,

    /// Comma-separated color codes; defaults to the 15 standard colors
    #[clap(long, value_delimiter = ',')]
    colors: Vec<String>,

    /// Search strategy
    #[clap(short, long, value_enum, default_value = "parallel")]
    strategy: Strategy,

    /// Worker threads for the parallel strategy (defaults to available cores, at most 24)
    #[clap(short, long)]
    workers: Option<usize>,

    #[clap(long, default_value_t = DEFAULT_INITIAL_DEPTH)]
    initial_depth: usize,

    #[clap(long, default_value_t = DEFAULT_DEPTH_STEP)]
    depth_step: usize,

    #[clap(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    #[clap(long, default_value_t = DEFAULT_SEED_DEPTH)]
    seed_depth: usize,

    /// Expansions between progress reports of the bfs strategy (shown with RUST_LOG=info)
    #[clap(long, default_value_t = DEFAULT_PROGRESS_INTERVAL)]
    progress_interval: u64,

    /// Print the result as JSON
    #[clap(long)]
    json: bool,
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let palette = if args.colors.is_empty() {
        Palette::standard()
    } else {
        Palette::new(args.colors.iter().map(|code| code.trim()))?
    };

    let content = fs::read_to_string(&args.board_file)
        .map_err(|e| format!("Failed to read {}: {}", args.board_file.display(), e))?;
    let board = board_from_str(palette, args.capacity, &content)?.with_empty_tubes(args.empty);
    log::info!("Loaded board from {}:\n{}", args.board_file.display(), board);

    let solution = match args.strategy {
        Strategy::Bfs => {
            let config = SearchConfig {
                progress_interval: args.progress_interval,
                max_depth: None,
            };
            solve_bfs_with(&board, &config, &mut LogProgress)?
        }
        Strategy::Parallel => {
            let config = DeepeningConfig {
                initial_depth: args.initial_depth,
                depth_step: args.depth_step,
                max_depth: args.max_depth,
                seed_depth: args.seed_depth,
                workers: args.workers,
                ..DeepeningConfig::default()
            };
            log::info!("Using {} workers for parallel solving", config.worker_count());
            solve_parallel_with(&board, &config, &mut LogProgress)?
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&solution.report())?);
        return Ok(());
    }

    let Some(moves) = solution.numbered_moves() else {
        println!("no solutions found");
        return Ok(());
    };
    println!("{}", serde_json::to_string_pretty(&solution.tube_strings())?);
    println!("Moves ({}):", moves.len());
    let listed: Vec<String> = moves.iter().map(ToString::to_string).collect();
    println!("[{}]", listed.join(", "));
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
