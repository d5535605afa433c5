//! Text rendering of solved boards.
//!
//! Boards are rendered in `.bff` grid notation so a solution can be pasted
//! back into a puzzle file.

use crate::bff::{block_symbol, slot_symbol};
use crate::engine::IlluminatedSet;
use crate::generator::Placement;
use crate::lattice::center_to_cell;
use crate::layout::{GridLayout, Slot};

/// Symbol of every cell once `placement` is applied, row-major.
fn resolved_symbols(layout: &GridLayout, placement: &Placement) -> Vec<char> {
    let mut assigned = placement.kinds().iter();
    layout
        .slots()
        .map(|(_, slot)| match slot {
            Slot::Open => assigned
                .next()
                .and_then(|&kind| block_symbol(kind))
                .unwrap_or('o'),
            fixed => slot_symbol(fixed),
        })
        .collect()
}

/// Formats a solved board as space-separated `.bff` grid rows.
///
/// Open cells show their assigned block, or `o` when left empty.
pub fn format_solution(layout: &GridLayout, placement: &Placement) -> String {
    let symbols = resolved_symbols(layout, placement);

    let mut output = String::new();
    for row in symbols.chunks(layout.cols()) {
        let line: Vec<String> = row.iter().map(char::to_string).collect();
        output.push_str(&line.join(" "));
        output.push('\n');
    }
    output
}

/// Formats the fine lattice with the laser paths drawn in.
///
/// Cell centers show the cell symbol, lit targets `@`, missed targets `P`,
/// other lit points `*`, and everything else `.`.
pub fn format_lattice(
    layout: &GridLayout,
    placement: &Placement,
    illuminated: &IlluminatedSet,
) -> String {
    let symbols = resolved_symbols(layout, placement);
    let lattice = layout.lattice();

    let mut output = String::with_capacity(lattice.len() + lattice.height());
    for y in 0..lattice.height() as i32 {
        for x in 0..lattice.width() as i32 {
            let point = (x, y);
            let is_target = layout.targets().contains(&point);
            let is_lit = illuminated.contains(&point);

            let display_char = if let Some((row, col)) = center_to_cell(point) {
                symbols[row * layout.cols() + col]
            } else if is_target && is_lit {
                '@'
            } else if is_target {
                'P'
            } else if is_lit {
                '*'
            } else {
                '.'
            };
            output.push(display_char);
        }
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bff;
    use crate::blocks::BlockKind;
    use crate::solver::solve;

    #[test]
    fn test_format_solution_tiny() {
        let layout = bff::parse(include_str!("../puzzles/tiny.bff")).unwrap();
        let solved = solve(&layout).unwrap();

        insta::assert_snapshot!(format_solution(&layout, &solved.placement), @r"
        o B A
        o o o
        A C A
        ");
    }

    #[test]
    fn test_format_keeps_fixed_cells() {
        let layout = bff::parse("GRID START\nx o\nC o\nGRID STOP\nB 1\nL 0 1 1 1\n").unwrap();
        let placement = Placement::new(vec![BlockKind::Empty, BlockKind::Opaque]);

        assert_eq!(format_solution(&layout, &placement), "x o\nC B\n");
    }

    #[test]
    fn test_format_lattice_dark() {
        let layout = bff::parse(include_str!("../puzzles/dark.bff")).unwrap();
        let solved = solve(&layout).unwrap();

        insta::assert_snapshot!(format_lattice(&layout, &solved.placement, &solved.illuminated), @r"
        ...*...
        .x*o.o@
        .*...*.
        @o.B*o.
        .......
        .B.B.x.
        .*.*...
        ");
    }

    #[test]
    fn test_format_lattice_marks_missed_targets() {
        let layout = bff::parse("GRID START\no\nGRID STOP\nL 0 1 1 1\nP 2 1\n").unwrap();
        let placement = Placement::new(vec![BlockKind::Empty]);
        let illuminated: IlluminatedSet = [(0, 1), (1, 2)].into_iter().collect();

        assert_eq!(
            format_lattice(&layout, &placement, &illuminated),
            "...\n*oP\n.*.\n"
        );
    }
}
