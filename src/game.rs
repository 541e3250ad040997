use std::{thread::sleep, time::Duration};

use anyhow::{ensure, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::{rngs::SmallRng, SeedableRng};

use crate::clock::TickClock;
use crate::grid::{Grid, Tile};
use crate::input::InputQueue;
use crate::snake::{Direction::{self, *}, Snake};
use crate::term::Term;

const POLL_INTERVAL_MS: u64 = 5;

const INTRO_LINES: [&str; 5] = [
    "Arrow keys or WASD to move",
    "Esc to pause",
    "CTRL+C to quit",
    "",
    "Press any key to begin",
];

const PAUSE_LINES: [&str; 3] = ["Paused", "Press Esc to resume", "or CTRL+C to quit"];

pub struct Config {
    pub grid_width: u16,
    pub grid_height: u16,
    pub initial_length: u16,
    pub tick_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            grid_width: 40,
            grid_height: 30,
            initial_length: 2,
            tick_interval: Duration::from_millis(80),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    AteGoal,
    GameOver { score: u32, won: bool },
}

/// The whole simulation: grid, snake, buffered input and the tick state
/// machine. Owns its RNG so goal placement is deterministic under a seeded
/// one.
pub struct GameState {
    grid: Grid,
    snake: Snake,
    inputs: InputQueue,
    rng: SmallRng,
    initial_length: u16,
    finished: Option<(u32, bool)>,
}

impl GameState {
    pub fn new(config: &Config, mut rng: SmallRng) -> Self {
        let heading = Direction::random(&mut rng);
        Self::with_heading(config, rng, heading)
    }

    fn with_heading(config: &Config, mut rng: SmallRng, heading: Direction) -> Self {
        let snake = Snake::new(
            config.grid_height / 2,
            config.grid_width / 2,
            config.initial_length,
            heading,
        );

        let mut grid = Grid::new(config.grid_width, config.grid_height);
        grid.stamp_snake(&snake);

        let placed = grid.place_goal(&mut rng);
        debug_assert!(placed, "a fresh grid always has room for a goal");

        GameState {
            grid,
            snake,
            inputs: InputQueue::new(),
            rng,
            initial_length: config.initial_length,
            finished: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Buffers a direction change for a later tick. Returns `false` if the
    /// queue was full and the event was dropped.
    pub fn enqueue_input(&mut self, dir: Direction) -> bool {
        self.inputs.enqueue(dir)
    }

    /// One tick: apply at most one buffered turn, age the body, move the
    /// head, then classify the tile it landed on. Decay runs before the move
    /// so the vacated tail cell is free when the head cell is classified,
    /// and the old head cell is demoted rather than erased.
    pub fn step(&mut self) -> StepOutcome {
        if let Some((score, won)) = self.finished {
            return StepOutcome::GameOver { score, won };
        }

        if let Some(dir) = self.inputs.dequeue() {
            self.snake.apply_direction(dir);
        }

        self.grid.decay();
        self.snake.advance();

        let (row, col) = (self.snake.row(), self.snake.col());
        match self.grid.get(row, col) {
            Tile::Empty => {
                self.grid.set(row, col, Tile::Body(self.snake.length()));
                StepOutcome::Moved
            }
            Tile::Goal => {
                self.snake.grow();
                self.grid.set(row, col, Tile::Body(self.snake.length()));

                if self.grid.place_goal(&mut self.rng) {
                    StepOutcome::AteGoal
                } else {
                    // Nowhere left to put a goal: the board is full.
                    self.finish(true)
                }
            }
            Tile::Wall | Tile::Body(_) => self.finish(false),
        }
    }

    pub fn score(&self) -> u32 {
        (self.snake.length() - self.initial_length) as u32
    }

    fn finish(&mut self, won: bool) -> StepOutcome {
        let score = self.score();
        self.finished = Some((score, won));
        StepOutcome::GameOver { score, won }
    }
}

enum RoundEnd {
    Quit,
    PlayAgain,
}

/// Terminal-facing shell around the simulation: intro, the poll/step/render
/// loop, pause and the game-over screen.
pub struct SnakeGame {
    config: Config,
    term: Term,
}

impl SnakeGame {
    pub fn new(config: Config) -> Self {
        SnakeGame { config, term: Term::new() }
    }

    pub fn run(&mut self) -> Result<()> {
        self.term.setup()?;
        let result = self.run_rounds();
        let restored = self.term.restore();
        result.and(restored)
    }

    fn run_rounds(&mut self) -> Result<()> {
        let (term_w, term_h) = self.term.size()?;
        ensure!(
            term_w >= self.config.grid_width && term_h >= self.config.grid_height,
            "terminal too small: the grid needs {}x{} cells, got {}x{}",
            self.config.grid_width,
            self.config.grid_height,
            term_w,
            term_h
        );

        self.term.clear()?;
        self.term.show_message(self.grid_size(), &INTRO_LINES)?;
        if is_ctrl_c(&self.term.read_key_blocking()?) {
            return Ok(());
        }

        loop {
            if let RoundEnd::Quit = self.play_round()? {
                return Ok(());
            }
        }
    }

    fn play_round(&mut self) -> Result<RoundEnd> {
        let mut state = GameState::new(&self.config, SmallRng::from_entropy());
        let mut clock = TickClock::new(self.config.tick_interval);
        let mut paused = false;

        self.term.draw_frame(state.grid(), state.snake())?;

        loop {
            sleep(Duration::from_millis(POLL_INTERVAL_MS));

            for key_ev in self.term.poll_key_events()? {
                if is_ctrl_c(&key_ev) {
                    return Ok(RoundEnd::Quit);
                }

                match key_ev.code {
                    KeyCode::Char('w') | KeyCode::Up => {
                        state.enqueue_input(Up);
                    }
                    KeyCode::Char('s') | KeyCode::Down => {
                        state.enqueue_input(Down);
                    }
                    KeyCode::Char('a') | KeyCode::Left => {
                        state.enqueue_input(Left);
                    }
                    KeyCode::Char('d') | KeyCode::Right => {
                        state.enqueue_input(Right);
                    }
                    KeyCode::Esc => {
                        paused = !paused;
                        if paused {
                            self.term.show_message(self.grid_size(), &PAUSE_LINES)?;
                        } else {
                            self.term.draw_frame(state.grid(), state.snake())?;
                            clock.reset();
                        }
                    }
                    _ => {}
                }
            }

            if paused {
                continue;
            }

            let mut finished = None;
            for _ in 0..clock.tick() {
                if let StepOutcome::GameOver { score, won } = state.step() {
                    finished = Some((score, won));
                    break;
                }
            }

            self.term.draw_frame(state.grid(), state.snake())?;

            if let Some((score, won)) = finished {
                return self.game_over(score, won);
            }
        }
    }

    fn game_over(&mut self, score: u32, won: bool) -> Result<RoundEnd> {
        let title = if won { "You won!" } else { "Game over!" };
        let score_line = format!("Score: {score}");

        self.term.show_message(
            self.grid_size(),
            &[title, score_line.as_str(), "", "Press any key to play again,", "or CTRL+C to quit."],
        )?;

        if is_ctrl_c(&self.term.read_key_blocking()?) {
            Ok(RoundEnd::Quit)
        } else {
            Ok(RoundEnd::PlayAgain)
        }
    }

    fn grid_size(&self) -> (u16, u16) {
        (self.config.grid_width, self.config.grid_height)
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
