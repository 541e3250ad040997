use rand::seq::SliceRandom;
use rand::Rng;

use crate::snake::Snake;

/// One cell of the playing field. `Body(n)` means the cell stays occupied
/// for `n` more ticks of decay; the head always carries the highest value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Goal,
    Empty,
    Body(u16),
}

/// Row-major tile storage with a fixed wall border. The border is set at
/// construction and never mutated afterward, which keeps every head move
/// inside the allocated area.
pub struct Grid {
    width: u16,
    height: u16,
    tiles: Vec<Tile>,
}

impl Grid {
    pub fn new(width: u16, height: u16) -> Self {
        debug_assert!(width >= 4 && height >= 4, "grid too small for a border and a snake");

        let mut tiles = vec![Tile::Empty; width as usize * height as usize];

        for row in 0..height {
            for col in 0..width {
                if row == 0 || row == height - 1 || col == 0 || col == width - 1 {
                    tiles[row as usize * width as usize + col as usize] = Tile::Wall;
                }
            }
        }

        Grid { width, height, tiles }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, row: u16, col: u16) -> Tile {
        self.tiles[self.index(row, col)]
    }

    pub fn set(&mut self, row: u16, col: u16, tile: Tile) {
        let index = self.index(row, col);
        self.tiles[index] = tile;
    }

    /// Lays the snake's initial occupancy: `Body(length)` under the head,
    /// decreasing down to `Body(1)` along the reversed heading.
    pub fn stamp_snake(&mut self, snake: &Snake) {
        let (dr, dc) = snake.heading().delta();

        for i in 0..snake.length() {
            let row = (snake.row() as i32 - dr * i as i32) as u16;
            let col = (snake.col() as i32 - dc * i as i32) as u16;
            self.set(row, col, Tile::Body(snake.length() - i));
        }
    }

    /// Ages every body cell by one tick. A segment on its last tick of
    /// occupancy reverts to `Empty`, which is what vacates the tail.
    pub fn decay(&mut self) {
        for tile in &mut self.tiles {
            if let Tile::Body(n) = *tile {
                *tile = if n > 1 { Tile::Body(n - 1) } else { Tile::Empty };
            }
        }
    }

    /// Turns a uniformly chosen empty cell into the goal. Returns `false`
    /// when no empty cell remains, i.e. the board is full.
    pub fn place_goal<R: Rng>(&mut self, rng: &mut R) -> bool {
        let empties: Vec<usize> = self
            .tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| matches!(tile, Tile::Empty))
            .map(|(i, _)| i)
            .collect();

        match empties.choose(rng) {
            Some(&i) => {
                self.tiles[i] = Tile::Goal;
                true
            }
            None => false,
        }
    }

    fn index(&self, row: u16, col: u16) -> usize {
        debug_assert!(
            row < self.height && col < self.width,
            "cell ({row}, {col}) outside a {}x{} grid",
            self.width,
            self.height
        );
        row as usize * self.width as usize + col as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn count(grid: &Grid, wanted: impl Fn(Tile) -> bool) -> usize {
        let mut n = 0;
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                if wanted(grid.get(row, col)) {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn new_grid_has_wall_border_and_empty_interior() {
        let grid = Grid::new(10, 8);

        for col in 0..10 {
            assert_eq!(grid.get(0, col), Tile::Wall);
            assert_eq!(grid.get(7, col), Tile::Wall);
        }
        for row in 0..8 {
            assert_eq!(grid.get(row, 0), Tile::Wall);
            assert_eq!(grid.get(row, 9), Tile::Wall);
        }

        assert_eq!(count(&grid, |t| t == Tile::Empty), 8 * 6);
    }

    #[test]
    fn stamp_lays_descending_body_behind_the_head() {
        let mut grid = Grid::new(10, 10);
        let snake = Snake::new(5, 5, 3, Direction::Right);

        grid.stamp_snake(&snake);

        assert_eq!(grid.get(5, 5), Tile::Body(3));
        assert_eq!(grid.get(5, 4), Tile::Body(2));
        assert_eq!(grid.get(5, 3), Tile::Body(1));
    }

    #[test]
    fn decay_demotes_body_and_frees_the_tail() {
        let mut grid = Grid::new(10, 10);
        grid.set(5, 5, Tile::Body(2));
        grid.set(5, 4, Tile::Body(1));
        grid.set(3, 3, Tile::Goal);

        grid.decay();

        assert_eq!(grid.get(5, 5), Tile::Body(1));
        assert_eq!(grid.get(5, 4), Tile::Empty);
        assert_eq!(grid.get(3, 3), Tile::Goal);
        assert_eq!(grid.get(0, 0), Tile::Wall);
    }

    #[test]
    fn goal_lands_on_an_empty_cell() {
        let mut grid = Grid::new(10, 10);
        let snake = Snake::new(5, 5, 2, Direction::Right);
        grid.stamp_snake(&snake);

        let mut rng = SmallRng::seed_from_u64(7);
        assert!(grid.place_goal(&mut rng));

        assert_eq!(count(&grid, |t| t == Tile::Goal), 1);
        assert_eq!(count(&grid, |t| matches!(t, Tile::Body(_))), 2);
    }

    #[test]
    fn full_board_has_no_room_for_a_goal() {
        let mut grid = Grid::new(6, 6);
        for row in 1..5 {
            for col in 1..5 {
                grid.set(row, col, Tile::Body(1));
            }
        }

        let mut rng = SmallRng::seed_from_u64(7);
        assert!(!grid.place_goal(&mut rng));
        assert_eq!(count(&grid, |t| t == Tile::Goal), 0);
    }
}
