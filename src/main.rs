//! Lazor Puzzle Solver
//!
//! Reads `.bff` puzzle files, searches for a placement of the available
//! blocks that routes the lasers through every target, and prints the
//! solved board in the same grid notation.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use log::{info, warn};

use lazor::bff::{self, LoadError};
use lazor::format::{format_lattice, format_solution};
use lazor::generator::Placements;
use lazor::{persistence, solver, GridLayout, SolvedBoard, SolverError};

/// Solves Lazor laser puzzles.
#[derive(Parser)]
#[command(name = "lazor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a puzzle and print the board.
    Solve {
        /// Path to the `.bff` puzzle.
        puzzle: PathBuf,
        /// Print every solution instead of the first.
        #[arg(long, conflicts_with = "limit")]
        all: bool,
        /// Print at most this many solutions.
        #[arg(long)]
        limit: Option<usize>,
        /// Also draw the laser paths on the fine lattice.
        #[arg(long)]
        show_path: bool,
        /// Write the first solution next to the puzzle.
        #[arg(long)]
        save: bool,
    },
    /// Show the number of open cells and candidate placements.
    Count {
        /// Path to the `.bff` puzzle.
        puzzle: PathBuf,
    },
    /// Solve every `.bff` puzzle in a directory.
    Batch {
        /// Directory to scan.
        dir: PathBuf,
        /// Write each solution next to its puzzle.
        #[arg(long)]
        save: bool,
    },
}

/// Errors surfaced to the user by the command line.
#[derive(Debug)]
enum CliError {
    Load(LoadError),
    Solve(SolverError),
    Io(std::io::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Load(e) => write!(f, "{}", e),
            CliError::Solve(e) => write!(f, "{}", e),
            CliError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for CliError {}

impl From<LoadError> for CliError {
    fn from(error: LoadError) -> Self {
        CliError::Load(error)
    }
}

impl From<SolverError> for CliError {
    fn from(error: SolverError) -> Self {
        CliError::Solve(error)
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Solve {
            puzzle,
            all,
            limit,
            show_path,
            save,
        } => {
            // `None` means no limit
            let limit = if all { None } else { Some(limit.unwrap_or(1).max(1)) };
            run_solve(&puzzle, limit, show_path, save)
        }
        Command::Count { puzzle } => run_count(&puzzle),
        Command::Batch { dir, save } => run_batch(&dir, save),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Solves one puzzle and prints up to `limit` solutions.
fn run_solve(
    puzzle: &Path,
    limit: Option<usize>,
    show_path: bool,
    save: bool,
) -> Result<(), CliError> {
    let layout = load_layout(puzzle)?;

    let mut search = solver::solutions(&layout)?;
    let found: Vec<SolvedBoard> = match limit {
        Some(limit) => search.by_ref().take(limit).collect(),
        None => search.by_ref().collect(),
    };
    if found.is_empty() {
        return Err(SolverError::NoSolutionFound {
            candidates: search.candidates_checked(),
        }
        .into());
    }
    info!(
        "found {} solutions in {} candidates",
        found.len(),
        search.candidates_checked()
    );

    print!("{}", render_solutions(&layout, &found, show_path));

    if save {
        let path = persistence::save(puzzle, &format_solution(&layout, &found[0].placement))?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

/// Prints the size of the search space for a puzzle.
fn run_count(puzzle: &Path) -> Result<(), CliError> {
    let layout = load_layout(puzzle)?;
    let placements = Placements::for_layout(&layout)?;

    println!("{} open cells", layout.open_count());
    println!("{} blocks to place", layout.inventory().blocks());
    match placements.candidate_count() {
        Some(count) => println!("{} candidate placements", count),
        None => println!("more than {} candidate placements", u128::MAX),
    }

    Ok(())
}

/// Solves every `.bff` file in `dir`, reporting the time each one takes.
fn run_batch(dir: &Path, save: bool) -> Result<(), CliError> {
    let mut puzzles: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "bff"))
        .collect();
    puzzles.sort();

    let mut solved_count = 0;
    for puzzle in &puzzles {
        let started = Instant::now();
        let outcome = load_layout(puzzle).and_then(|layout| {
            let solved = solver::solve(&layout)?;
            Ok((layout, solved))
        });
        let elapsed = started.elapsed();

        match outcome {
            Ok((layout, solved)) => {
                solved_count += 1;
                println!(
                    "{}: solved in {:.3?} (candidate {})",
                    puzzle.display(),
                    elapsed,
                    solved.candidate
                );
                let rendered = format_solution(&layout, &solved.placement);
                print!("{}", rendered);
                if save {
                    match persistence::save(puzzle, &rendered) {
                        Ok(path) => println!("Wrote {}", path.display()),
                        Err(e) => {
                            warn!("saving {} failed: {}", puzzle.display(), e);
                            println!("{}: could not save solution: {}", puzzle.display(), e);
                        }
                    }
                }
            }
            Err(e) => {
                warn!("{} failed: {}", puzzle.display(), e);
                println!("{}: {} ({:.3?})", puzzle.display(), e, elapsed);
            }
        }
    }

    println!("Solved {} of {} puzzles", solved_count, puzzles.len());
    Ok(())
}

fn load_layout(puzzle: &Path) -> Result<GridLayout, CliError> {
    let layout = bff::load(puzzle)?;
    info!(
        "loaded {} ({}x{}, {} open cells, {} lasers, {} targets)",
        puzzle.display(),
        layout.rows(),
        layout.cols(),
        layout.open_count(),
        layout.lasers().len(),
        layout.targets().len()
    );
    Ok(layout)
}

/// Renders each solution, optionally followed by its lattice map.
fn render_solutions(layout: &GridLayout, solutions: &[SolvedBoard], show_path: bool) -> String {
    let mut output = String::new();
    for (i, solved) in solutions.iter().enumerate() {
        output.push_str(&format!(
            "Solution {} (candidate {}):\n",
            i + 1,
            solved.candidate
        ));
        output.push_str(&format_solution(layout, &solved.placement));
        if show_path {
            output.push('\n');
            output.push_str(&format_lattice(layout, &solved.placement, &solved.illuminated));
        }
        output.push('\n');
    }
    output
}
