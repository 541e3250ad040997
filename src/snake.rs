use rand::Rng;

use Direction::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// (row, col) delta of a one-cell move. Rows grow downward.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (-1, 0),
            Down => (1, 0),
            Left => (0, -1),
            Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        match rng.gen_range(0..4) {
            0 => Up,
            1 => Down,
            2 => Left,
            _ => Right,
        }
    }
}

pub struct Snake {
    row: u16,
    col: u16,
    length: u16,
    direction: Direction,
}

impl Snake {
    pub fn new(row: u16, col: u16, length: u16, direction: Direction) -> Self {
        Snake { row, col, length, direction }
    }

    pub fn row(&self) -> u16 {
        self.row
    }

    pub fn col(&self) -> u16 {
        self.col
    }

    pub fn length(&self) -> u16 {
        self.length
    }

    pub fn heading(&self) -> Direction {
        self.direction
    }

    /// Turns toward `requested`, unless it reverses the current heading.
    /// A rejected request is a silent no-op.
    pub fn apply_direction(&mut self, requested: Direction) {
        if requested != self.direction.opposite() {
            self.direction = requested;
        }
    }

    /// Moves the head one cell along the heading. The caller guarantees the
    /// head sits in the grid interior, so the new coordinate stays in range.
    pub fn advance(&mut self) {
        let (dr, dc) = self.direction.delta();
        self.row = (self.row as i32 + dr) as u16;
        self.col = (self.col as i32 + dc) as u16;
    }

    pub fn grow(&mut self) {
        self.length += 1;
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
