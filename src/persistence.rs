//! Writes solved boards next to the puzzle they solve.
//!
//! The solution for `puzzles/tiny.bff` goes to `puzzles/tiny.bff_solution.txt`.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;

const SOLUTION_SUFFIX: &str = "_solution.txt";

/// Path of the solution file for `puzzle_path`.
pub fn solution_path(puzzle_path: &Path) -> PathBuf {
    let mut name = puzzle_path.as_os_str().to_os_string();
    name.push(SOLUTION_SUFFIX);
    PathBuf::from(name)
}

/// Saves a rendered solution and returns the path written.
pub fn save(puzzle_path: &Path, rendered: &str) -> std::io::Result<PathBuf> {
    let path = solution_path(puzzle_path);
    let mut file = File::create(&path)?;
    file.write_all(rendered.as_bytes())?;
    info!("wrote solution to {}", path.display());
    Ok(path)
}
