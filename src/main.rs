//! Command-line front end: solve a puzzle from a string or a file, or
//! generate and solve a random one.

use std::fs;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::Parser;
use rand_core::SeedableRng;
use tracing_subscriber::EnvFilter;

use rectoku::board::{Board, BoxShape};
use rectoku::generate::generate;
use rectoku::render;
use rectoku::session::SolverSession;

#[derive(Debug, Parser)]
#[command(
    name = "rectoku",
    about = "Solve Sudoku puzzles with rectangular sub-grids"
)]
struct Args {
    /// Puzzle as a flat string ('0' or '.' for empty cells)
    #[arg(short, long)]
    string: Option<String>,

    /// Read the puzzle string from a file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Generate a random puzzle (the default when no input is given)
    #[arg(short, long)]
    random: bool,

    /// Width of each sub-grid
    #[arg(short, long, default_value_t = 3)]
    width: usize,

    /// Height of each sub-grid (defaults to the width)
    #[arg(long)]
    height: Option<usize>,

    /// Difficulty of random puzzles, 0.0-1.0
    #[arg(short, long, default_value_t = 0.5)]
    difficulty: f64,

    /// Only generate puzzles with a unique solution
    #[arg(short, long)]
    unique: bool,

    /// Seed for random generation
    #[arg(long)]
    seed: Option<u64>,

    /// Find all solutions instead of just one
    #[arg(short, long)]
    all: bool,

    /// Maximum number of solutions to find
    #[arg(short, long)]
    max_solutions: Option<usize>,

    /// Pretty print the puzzle and solution(s)
    #[arg(short, long)]
    pretty: bool,

    /// Show detailed solver information
    #[arg(short, long)]
    verbose: bool,

    /// Show solver timing information
    #[arg(short, long)]
    timing: bool,
}

fn main() {
    let args = Args::parse();
    let filter = if args.verbose {
        EnvFilter::new("rectoku=debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run(&args) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let shape = BoxShape::new(args.width, args.height.unwrap_or(args.width))?;

    let board = if args.random || (args.string.is_none() && args.file.is_none()) {
        let mut rng = match args.seed {
            Some(seed) => rand_chacha::ChaCha8Rng::seed_from_u64(seed),
            None => rand_chacha::ChaCha8Rng::from_entropy(),
        };
        let generated = generate(shape, args.difficulty, args.unique, &mut rng)?;
        println!(
            "Generated puzzle (difficulty {:.2}):",
            generated.achieved_difficulty
        );
        generated.board
    } else if let Some(string) = &args.string {
        println!("Input puzzle:");
        Board::from_string(string, shape, None)?
    } else if let Some(path) = &args.file {
        println!("Puzzle from file:");
        Board::from_string(&fs::read_to_string(path)?, shape, None)?
    } else {
        return Err("no puzzle input".into());
    };
    print_board(&board, args.pretty)?;

    let mut session = SolverSession::new(board);
    let solve_start = Instant::now();

    if args.all {
        let solutions = session.find_all(args.max_solutions)?;
        let elapsed = solve_start.elapsed();
        if solutions.is_empty() {
            println!("No solutions found!");
        } else {
            if args.timing {
                println!("Found {} solution(s) in {:.4?}", solutions.len(), elapsed);
            } else {
                println!("Found {} solution(s)", solutions.len());
            }
            if solutions.len() == 1 {
                println!("The solution is unique!");
            } else {
                println!("Multiple solutions exist for this puzzle.");
            }
            for (index, solution) in solutions.iter().enumerate() {
                println!("\nSolution {}:", index + 1);
                print_board(solution, args.pretty)?;
            }
        }
    } else if session.solve_one()? {
        let elapsed = solve_start.elapsed();
        if args.timing {
            println!("Solution found in {elapsed:.4?}:");
        } else {
            println!("Solution found:");
        }
        print_board(session.current_solution()?, args.pretty)?;
    } else {
        println!("No solution found!");
    }

    if args.verbose {
        if let Some(model) = session.model() {
            println!("\nModel summary:\n{}", render::model_summary(model));
        }
    }
    if args.timing {
        println!("\nTotal execution time: {:.4?}", start.elapsed());
    }
    Ok(())
}

fn print_board(board: &Board, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    if pretty {
        println!("{}", render::grid(board));
    } else {
        println!("{}", serde_json::to_string(&board.to_rows())?);
    }
    Ok(())
}
