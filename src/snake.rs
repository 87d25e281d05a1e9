use std::collections::{HashSet, VecDeque};

use crate::{Cell, GridInt};
use Direction::*;

pub const INITIAL_BODY: [Cell; 3] = [(7, 9), (6, 9), (5, 9)];

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (GridInt, GridInt) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn is_reverse_of(self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Up, Down) | (Down, Up) | (Left, Right) | (Right, Left)
        )
    }
}

/// The body deque (head first) and the occupancy set are only ever mutated
/// together, in `advance` and `shrink`, so set content always matches the
/// cells in the deque.
pub struct Snake {
    body: VecDeque<Cell>,
    occupied: HashSet<Cell>,
    direction: Direction,
}

impl Snake {
    pub fn new() -> Self {
        let body: VecDeque<Cell> = INITIAL_BODY.iter().copied().collect();
        let occupied = body.iter().copied().collect();
        Snake { body, occupied, direction: Right }
    }

    pub fn head(&self) -> Cell {
        *self.body.front().unwrap()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn occupied(&self) -> &HashSet<Cell> {
        &self.occupied
    }

    /// Pushes a new head one cell along the current direction. The tail stays
    /// put; the caller pairs this with `shrink` unless the snake just ate.
    pub fn advance(&mut self) {
        let (hx, hy) = self.head();
        let (dx, dy) = self.direction.delta();
        let new_head = (hx + dx, hy + dy);

        self.occupied.insert(new_head);
        self.body.push_front(new_head);
    }

    pub fn shrink(&mut self) {
        let tail = self.body.pop_back().unwrap();

        // On a tail-chase move the head has just re-entered this cell, so it
        // must stay in the set
        if !self.body.contains(&tail) {
            self.occupied.remove(&tail);
        }
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn self_collision(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&cell| cell == head)
    }

    pub fn head_char(&self) -> char {
        match self.direction {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}
