use crate::{Cell, Coords, GridInt, TermInt};

pub const CELL_COUNT: GridInt = 25;

/// Cells outside this range are only ever the head, for exactly one tick,
/// right before the game ends.
pub fn in_bounds(cell: Cell) -> bool {
    cell.0 >= 0 && cell.0 < CELL_COUNT && cell.1 >= 0 && cell.1 < CELL_COUNT
}

/// Maps a board cell to terminal coordinates, given the top-left corner of
/// the board on screen. Only valid for in-bounds cells.
pub fn to_screen(cell: Cell, origin: Coords) -> Coords {
    (origin.0 + cell.0 as TermInt, origin.1 + cell.1 as TermInt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cover_the_board_and_nothing_else() {
        assert!(in_bounds((0, 0)));
        assert!(in_bounds((CELL_COUNT - 1, CELL_COUNT - 1)));
        assert!(in_bounds((12, 24)));

        assert!(!in_bounds((-1, 9)));
        assert!(!in_bounds((CELL_COUNT, 9)));
        assert!(!in_bounds((9, -1)));
        assert!(!in_bounds((9, CELL_COUNT)));
    }

    #[test]
    fn screen_mapping_offsets_by_origin() {
        assert_eq!(to_screen((0, 0), (3, 5)), (3, 5));
        assert_eq!(to_screen((7, 9), (10, 2)), (17, 11));
    }
}
