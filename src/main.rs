mod clock;
mod game;
mod grid;
mod input;
mod snake;
mod term;

use anyhow::Result;

use crate::game::{Config, SnakeGame};

fn main() -> Result<()> {
    let mut game = SnakeGame::new(Config::default());
    game.run()
}
