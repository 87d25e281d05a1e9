use std::collections::HashSet;

use rand::Rng;

use crate::grid::CELL_COUNT;
use crate::Cell;

pub struct Food {
    position: Cell,
}

impl Food {
    pub fn spawn<R: Rng>(rng: &mut R, occupied: &HashSet<Cell>) -> Self {
        Food { position: random_free_cell(rng, occupied) }
    }

    pub fn respawn<R: Rng>(&mut self, rng: &mut R, occupied: &HashSet<Cell>) {
        self.position = random_free_cell(rng, occupied);
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    #[cfg(test)]
    pub fn place(&mut self, cell: Cell) {
        self.position = cell;
    }
}

// Retries until a free cell comes up. No cap: the snake never gets anywhere
// near covering the 625-cell board.
fn random_free_cell<R: Rng>(rng: &mut R, occupied: &HashSet<Cell>) -> Cell {
    loop {
        let cell = (rng.gen_range(0..CELL_COUNT), rng.gen_range(0..CELL_COUNT));
        if !occupied.contains(&cell) {
            return cell;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::in_bounds;
    use rand::rngs::mock::StepRng;

    #[test]
    fn spawns_inside_the_board() {
        let mut rng = StepRng::new(0x1234_5678_9abc_def0, 0x9e37_79b9_7f4a_7c15);
        let occupied = HashSet::new();

        for _ in 0..100 {
            let food = Food::spawn(&mut rng, &occupied);
            assert!(in_bounds(food.position()));
        }
    }

    #[test]
    fn never_lands_on_an_occupied_cell() {
        let mut rng = StepRng::new(1, 0x9e37_79b9_7f4a_7c15);

        // Occupy most of one half of the board to force retries
        let mut occupied = HashSet::new();
        for x in 0..CELL_COUNT {
            for y in 0..13 {
                occupied.insert((x, y));
            }
        }

        let mut food = Food::spawn(&mut rng, &occupied);
        for _ in 0..50 {
            assert!(!occupied.contains(&food.position()));
            assert!(in_bounds(food.position()));
            food.respawn(&mut rng, &occupied);
        }
    }
}
