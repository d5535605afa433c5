//! Reads puzzles in the `.bff` text format.
//!
//! # Format
//!
//! ```text
//! # comments run to the end of the line
//! GRID START
//! o B o
//! o o x
//! GRID STOP
//! A 3          # blocks to place: A reflective, B opaque, C refractive
//! C 1
//! L 4 4 -1 -1  # laser at lattice (4, 4) heading (-1, -1)
//! P 1 2        # target lattice point
//! ```
//!
//! Grid symbols: `o` open cell, `x` cell that can hold no block, and
//! `A`/`B`/`C` for fixed blocks. Open cells not covered by the listed blocks
//! stay empty; the reader records them as the `Empty` share of the inventory.

use std::path::Path;

use crate::blocks::{BlockKind, Inventory};
use crate::lattice::{Lattice, Point, Velocity};
use crate::layout::{GridLayout, LaserSource, Slot};

const GRID_START: &str = "GRID START";
const GRID_STOP: &str = "GRID STOP";

/// Error type for `.bff` parsing. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No `GRID START` section, or the section has no rows.
    MissingGrid,
    /// `GRID START` without a matching `GRID STOP`.
    UnterminatedGrid,
    /// A grid row whose width differs from the first row.
    RaggedGrid { line: usize },
    /// A grid symbol other than `o`, `x`, `A`, `B` or `C`.
    UnknownSymbol { line: usize, symbol: char },
    /// A line outside the grid that is not a block, laser or target entry.
    InvalidDirective { line: usize, text: String },
    /// A field that is not an integer.
    InvalidNumber { line: usize, text: String },
    /// A laser velocity component other than `1` or `-1`.
    InvalidVelocity { line: usize },
    /// A laser or target outside the lattice.
    PointOutOfBounds { line: usize, point: Point },
    /// The puzzle defines no laser.
    NoLasers,
    /// More blocks to place than open cells.
    TooManyBlocks { blocks: usize, open: usize },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::MissingGrid => write!(f, "Missing grid section"),
            ParseError::UnterminatedGrid => write!(f, "Grid section is missing {}", GRID_STOP),
            ParseError::RaggedGrid { line } => {
                write!(f, "Line {}: grid row width differs from the first row", line)
            }
            ParseError::UnknownSymbol { line, symbol } => {
                write!(f, "Line {}: unknown grid symbol '{}'", line, symbol)
            }
            ParseError::InvalidDirective { line, text } => {
                write!(f, "Line {}: invalid entry '{}'", line, text)
            }
            ParseError::InvalidNumber { line, text } => {
                write!(f, "Line {}: invalid number '{}'", line, text)
            }
            ParseError::InvalidVelocity { line } => {
                write!(f, "Line {}: laser velocity components must be 1 or -1", line)
            }
            ParseError::PointOutOfBounds { line, point } => {
                write!(f, "Line {}: point {:?} is outside the grid", line, point)
            }
            ParseError::NoLasers => write!(f, "Puzzle defines no laser"),
            ParseError::TooManyBlocks { blocks, open } => write!(
                f,
                "Puzzle asks for {} blocks but has only {} open cells",
                blocks, open
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Error type for reading a puzzle file from disk.
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Parse(ParseError),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "Failed to read puzzle: {}", e),
            LoadError::Parse(e) => write!(f, "Failed to parse puzzle: {}", e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(error: std::io::Error) -> Self {
        LoadError::Io(error)
    }
}

impl From<ParseError> for LoadError {
    fn from(error: ParseError) -> Self {
        LoadError::Parse(error)
    }
}

/// `.bff` symbol of a placeable block kind; `None` for `Empty`.
pub fn block_symbol(kind: BlockKind) -> Option<char> {
    match kind {
        BlockKind::Empty => None,
        BlockKind::Reflective => Some('A'),
        BlockKind::Opaque => Some('B'),
        BlockKind::Refractive => Some('C'),
    }
}

fn block_from_symbol(symbol: &str) -> Option<BlockKind> {
    match symbol {
        "A" => Some(BlockKind::Reflective),
        "B" => Some(BlockKind::Opaque),
        "C" => Some(BlockKind::Refractive),
        _ => None,
    }
}

/// `.bff` symbol of a layout slot.
pub fn slot_symbol(slot: Slot) -> char {
    match slot {
        Slot::Open => 'o',
        Slot::Fixed(kind) => block_symbol(kind).unwrap_or('x'),
    }
}

fn slot_from_symbol(symbol: char) -> Option<Slot> {
    match symbol {
        'o' => Some(Slot::Open),
        'x' => Some(Slot::Fixed(BlockKind::Empty)),
        'A' => Some(Slot::Fixed(BlockKind::Reflective)),
        'B' => Some(Slot::Fixed(BlockKind::Opaque)),
        'C' => Some(Slot::Fixed(BlockKind::Refractive)),
        _ => None,
    }
}

/// Reads and parses a `.bff` file.
pub fn load(path: impl AsRef<Path>) -> Result<GridLayout, LoadError> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse(&text)?)
}

/// Parses `.bff` text into a layout.
pub fn parse(text: &str) -> Result<GridLayout, ParseError> {
    let mut rows: Vec<Vec<Slot>> = Vec::new();
    let mut grid_seen = false;
    let mut in_grid = false;

    let mut placed = Inventory::new();
    let mut lasers: Vec<(usize, LaserSource)> = Vec::new();
    let mut targets: Vec<(usize, Point)> = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        if line == GRID_START {
            grid_seen = true;
            in_grid = true;
            continue;
        }
        if line == GRID_STOP {
            in_grid = false;
            continue;
        }

        if in_grid {
            let row = parse_row(line, line_number)?;
            if rows.first().is_some_and(|first| first.len() != row.len()) {
                return Err(ParseError::RaggedGrid { line: line_number });
            }
            rows.push(row);
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let invalid = || ParseError::InvalidDirective {
            line: line_number,
            text: line.to_string(),
        };

        match fields.as_slice() {
            [symbol, count] => {
                let kind = block_from_symbol(symbol).ok_or_else(invalid)?;
                placed.set(kind, parse_number(count, line_number)?);
            }
            ["P", x, y] => {
                let point: Point = (parse_number(x, line_number)?, parse_number(y, line_number)?);
                targets.push((line_number, point));
            }
            ["L", x, y, vx, vy] => {
                let position: Point = (parse_number(x, line_number)?, parse_number(y, line_number)?);
                let velocity: Velocity = (parse_number(vx, line_number)?, parse_number(vy, line_number)?);
                if velocity.0.abs() != 1 || velocity.1.abs() != 1 {
                    return Err(ParseError::InvalidVelocity { line: line_number });
                }
                lasers.push((line_number, LaserSource::new(position, velocity)));
            }
            _ => return Err(invalid()),
        }
    }

    if in_grid {
        return Err(ParseError::UnterminatedGrid);
    }
    if !grid_seen || rows.is_empty() || rows[0].is_empty() {
        return Err(ParseError::MissingGrid);
    }
    if lasers.is_empty() {
        return Err(ParseError::NoLasers);
    }

    let lattice = Lattice::new(rows.len(), rows[0].len());
    let out_of_bounds = lasers
        .iter()
        .map(|&(line, laser)| (line, laser.position))
        .chain(targets.iter().copied())
        .find(|&(_, point)| !lattice.contains(point));
    if let Some((line, point)) = out_of_bounds {
        return Err(ParseError::PointOutOfBounds { line, point });
    }

    let open = rows.iter().flatten().filter(|&&slot| slot == Slot::Open).count();
    let blocks = placed.blocks();
    if blocks > open {
        return Err(ParseError::TooManyBlocks { blocks, open });
    }
    placed.set(BlockKind::Empty, open - blocks);

    Ok(GridLayout::new(
        lattice.rows(),
        lattice.cols(),
        rows.into_iter().flatten().collect(),
        placed,
        lasers.into_iter().map(|(_, laser)| laser).collect(),
        targets.into_iter().map(|(_, point)| point).collect(),
    ))
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(start) => &line[..start],
        None => line,
    }
}

/// Parses one grid row; symbols may or may not be separated by spaces.
fn parse_row(line: &str, line_number: usize) -> Result<Vec<Slot>, ParseError> {
    line.chars()
        .filter(|symbol| !symbol.is_whitespace())
        .map(|symbol| {
            slot_from_symbol(symbol).ok_or(ParseError::UnknownSymbol {
                line: line_number,
                symbol,
            })
        })
        .collect()
}

fn parse_number<T: std::str::FromStr>(text: &str, line_number: usize) -> Result<T, ParseError> {
    text.parse().map_err(|_| ParseError::InvalidNumber {
        line: line_number,
        text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# a small puzzle
GRID START
o B o
x o o
GRID STOP

A 2   # two mirrors
C 1
L 4 4 -1 -1
P 1 2
P 6 3
";

    #[test]
    fn test_parse_sample() {
        let layout = parse(SAMPLE).unwrap();

        assert_eq!(layout.rows(), 2);
        assert_eq!(layout.cols(), 3);
        assert_eq!(layout.slot((0, 1)), Slot::Fixed(BlockKind::Opaque));
        assert_eq!(layout.slot((1, 0)), Slot::Fixed(BlockKind::Empty));
        assert_eq!(layout.open_count(), 4);

        let inventory = layout.inventory();
        assert_eq!(inventory.count(BlockKind::Reflective), 2);
        assert_eq!(inventory.count(BlockKind::Refractive), 1);
        assert_eq!(inventory.count(BlockKind::Opaque), 0);
        assert_eq!(inventory.count(BlockKind::Empty), 1);

        assert_eq!(layout.lasers(), &[LaserSource::new((4, 4), (-1, -1))]);
        assert_eq!(layout.targets(), &[(1, 2), (6, 3)]);
    }

    #[test]
    fn test_unspaced_grid_rows() {
        let layout = parse("GRID START\noxA\nGRID STOP\nL 0 1 1 1\n").unwrap();
        assert_eq!(layout.cols(), 3);
        assert_eq!(layout.slot((0, 2)), Slot::Fixed(BlockKind::Reflective));
    }

    #[test]
    fn test_bundled_puzzles_parse() {
        for text in [
            include_str!("../puzzles/dark.bff"),
            include_str!("../puzzles/mad.bff"),
            include_str!("../puzzles/showstopper.bff"),
            include_str!("../puzzles/tiny.bff"),
        ] {
            let layout = parse(text).unwrap();
            assert_eq!(layout.inventory().total(), layout.open_count());
        }
    }

    #[test]
    fn test_parse_errors() {
        let cases: [(&str, ParseError); 10] = [
            ("L 0 1 1 1\n", ParseError::MissingGrid),
            ("GRID START\no o\n", ParseError::UnterminatedGrid),
            (
                "GRID START\no o\no\nGRID STOP\n",
                ParseError::RaggedGrid { line: 3 },
            ),
            (
                "GRID START\no z\nGRID STOP\n",
                ParseError::UnknownSymbol {
                    line: 2,
                    symbol: 'z',
                },
            ),
            (
                "GRID START\no\nGRID STOP\nQ 1 2\n",
                ParseError::InvalidDirective {
                    line: 4,
                    text: "Q 1 2".to_string(),
                },
            ),
            (
                "GRID START\no\nGRID STOP\nA two\n",
                ParseError::InvalidNumber {
                    line: 4,
                    text: "two".to_string(),
                },
            ),
            (
                "GRID START\no\nGRID STOP\nL 0 1 2 1\n",
                ParseError::InvalidVelocity { line: 4 },
            ),
            (
                "GRID START\no\nGRID STOP\nL 0 1 1 1\nP 3 1\n",
                ParseError::PointOutOfBounds {
                    line: 5,
                    point: (3, 1),
                },
            ),
            (
                "GRID START\no\nGRID STOP\nA 2\nL 0 1 1 1\n",
                ParseError::TooManyBlocks { blocks: 2, open: 1 },
            ),
            (
                "GRID START\no\nGRID STOP\nA 18446744073709551615\nB 1\nL 0 1 1 1\n",
                ParseError::TooManyBlocks {
                    blocks: usize::MAX,
                    open: 1,
                },
            ),
        ];

        for (text, expected) in cases {
            assert_eq!(parse(text).unwrap_err(), expected, "input: {text:?}");
        }
    }

    #[test]
    fn test_missing_laser() {
        assert_eq!(
            parse("GRID START\no\nGRID STOP\nP 1 0\n").unwrap_err(),
            ParseError::NoLasers
        );
    }

    #[test]
    fn test_symbols_roundtrip() {
        for slot in [
            Slot::Open,
            Slot::Fixed(BlockKind::Empty),
            Slot::Fixed(BlockKind::Reflective),
            Slot::Fixed(BlockKind::Opaque),
            Slot::Fixed(BlockKind::Refractive),
        ] {
            assert_eq!(slot_from_symbol(slot_symbol(slot)), Some(slot));
        }
    }
}
