use std::collections::VecDeque;

use crate::{Coords, TermInt};
use Direction::*;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Right => Left,
            Down => Up,
            Left => Right,
        }
    }

    /// Unit vector in terminal coordinates (y grows downwards).
    pub fn delta(self) -> (i16, i16) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

/// The snake body, head first. Grows by keeping its tail on eating steps.
pub struct Snake {
    body: VecDeque<Coords>,
    direction: Direction,
}

impl Snake {
    /// Builds a snake of `len` cells with its head at `head`, trailing away
    /// from the direction it faces.
    pub fn new(head: Coords, len: usize, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..len as i16)
            .map(|i| (head.0 as i16 - dx * i, head.1 as i16 - dy * i))
            .map(|(x, y)| (x as TermInt, y as TermInt))
            .collect();
        Snake { body, direction }
    }

    pub fn head(&self) -> Coords {
        // The body is never empty
        *self.body.front().unwrap()
    }

    pub fn body(&self) -> impl Iterator<Item = &Coords> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, pos: Coords) -> bool {
        self.body.contains(&pos)
    }

    /// The cell the head would occupy after one step in the current direction.
    pub fn next_head(&self) -> Coords {
        let (x, y) = self.head();
        let (dx, dy) = self.direction.delta();
        ((x as i16 + dx) as TermInt, (y as i16 + dy) as TermInt)
    }

    /// Moves the head to `new_head`, dropping the tail unless growing.
    pub fn advance_to(&mut self, new_head: Coords, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Changes direction; a request for the direct opposite of the current
    /// direction is silently ignored.
    pub fn set_direction(&mut self, new_direction: Direction) {
        if new_direction != self.direction.opposite() {
            self.direction = new_direction;
        }
    }

    pub fn head_glyph(&self) -> char {
        match self.direction {
            Up => '▲',
            Down => '▼',
            Left => '◄',
            Right => '►',
        }
    }
}
