use ballsort_solver::engine::{Board, Palette, DEFAULT_CAPACITY};
use ballsort_solver::game::Game;
use ballsort_solver::solver::solve_bfs;
use ballsort_solver::utils::board_from_str;
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Board file to play; a seeded random board is dealt when omitted
    board_file: Option<PathBuf>,

    /// Tube capacity
    #[clap(short, long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    /// Number of colors on a random board
    #[clap(long, default_value_t = 5)]
    colors: usize,

    /// Empty tubes on a random board, or extra empty tubes for a board file
    #[clap(short, long, default_value_t = 2)]
    empty: usize,

    /// Seed for the random board
    #[clap(long, default_value_t = 514514)]
    seed: u64,
}

fn load_board(args: &Args) -> Result<Board, String> {
    match &args.board_file {
        Some(path) => {
            let content = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read file: {}", e))?;
            board_from_str(Palette::standard(), args.capacity, &content)
                .map(|board| board.with_empty_tubes(args.empty))
                .map_err(|e| format!("Invalid board format: {}", e))
        }
        None => Board::new_random_with_seed(
            Palette::standard(),
            args.colors,
            args.capacity,
            args.empty,
            args.seed,
        )
        .map_err(|e| format!("Failed to deal board: {}", e)),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let board = match load_board(&args) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut game = Game::new_with_board(board);
    println!("Welcome to Ball Sort!");

    loop {
        println!("---------------------");
        println!("Steps: {}", game.steps());
        println!("{}", game.board());

        if game.is_solved() {
            println!();
            println!("---------------------");
            println!("🎉 SOLVED in {} steps! 🎉", game.steps());
            println!("---------------------");
            break;
        }
        if game.is_stuck() {
            println!("No legal moves left. Enter 'u' to undo or 'q' to quit.");
        }

        print!("Enter your move (from to), 'h' for a hint, 'u' to undo, 'q' to quit: ");
        if io::stdout().flush().is_err() {
            return ExitCode::FAILURE;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => {
                println!("Error reading input. Please try again.");
                continue;
            }
        }

        let trimmed_input = input.trim();

        if trimmed_input == "q" {
            println!("Thanks for playing!");
            break;
        }

        if trimmed_input == "u" {
            if game.undo_last_move() {
                println!("Move undone.");
            } else {
                println!("Cannot undo further (no moves made).");
            }
            continue;
        }

        if trimmed_input == "h" {
            let solution = solve_bfs(game.board());
            match solution.numbered_moves().and_then(|moves| moves.first().copied()) {
                Some(hint) => println!(
                    "Hint: move {} ({} moves left on the shortest path).",
                    hint,
                    solution.moves.map_or(0, |moves| moves.len())
                ),
                None => println!("No solution from here. Try undoing."),
            }
            continue;
        }

        // Tube numbers are 1-based on screen.
        let parts: Vec<&str> = trimmed_input.split_whitespace().collect();
        if parts.len() == 2 {
            if let (Ok(from), Ok(to)) = (parts[0].parse::<usize>(), parts[1].parse::<usize>()) {
                let tubes = game.board().tube_count();
                if (1..=tubes).contains(&from) && (1..=tubes).contains(&to) {
                    if game.process_move(from - 1, to - 1) {
                        println!("Move processed.");
                    } else {
                        println!(
                            "Invalid move: tube {} is empty, tube {} is full, or the top colors differ.",
                            from, to
                        );
                    }
                } else {
                    println!("Invalid tubes: numbers must be between 1 and {}.", tubes);
                }
            } else {
                println!("Invalid input: Please enter two tube numbers (e.g., '3 4'), 'h', 'u', or 'q'.");
            }
        } else {
            println!("Invalid input format. Use 'from to', 'h', 'u', or 'q'.");
        }
    }
    ExitCode::SUCCESS
}
