//! Lazor Puzzle Solver Library
//!
//! Finds a placement of reflective, opaque and refractive blocks on a grid
//! such that laser beams pass through every target point. The search walks
//! every distinct placement lazily and simulates the lasers on each one.

pub mod bff;
pub mod blocks;
pub mod board;
pub mod engine;
pub mod error;
pub mod format;
pub mod generator;
pub mod lattice;
pub mod layout;
pub mod persistence;
pub mod solver;

pub use error::SolverError;
pub use layout::GridLayout;
pub use solver::{solve, solutions, SolvedBoard};
