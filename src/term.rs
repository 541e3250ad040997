use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::cursor::{self, MoveTo};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};

use crate::grid::{Grid, Tile};
use crate::snake::Snake;

const BODY_CHAR: char = '█';
const WALL_CHAR: char = '█';
const GOAL_CHAR: char = 'O';

/// Thin crossterm wrapper: raw-mode lifecycle, key polling and frame
/// painting. Only ever reads simulation state.
pub struct Term {
    stdout: Stdout,
}

impl Term {
    pub fn new() -> Self {
        Term { stdout: stdout() }
    }

    pub fn setup(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enabling raw mode")?;
        execute!(self.stdout, EnterAlternateScreen, cursor::Hide)
            .context("entering the alternate screen")
    }

    pub fn restore(&mut self) -> Result<()> {
        execute!(self.stdout, cursor::Show, LeaveAlternateScreen)
            .context("leaving the alternate screen")?;
        terminal::disable_raw_mode().context("disabling raw mode")
    }

    pub fn size(&self) -> Result<(u16, u16)> {
        terminal::size().context("reading the terminal size")
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, Clear(ClearType::All)).context("clearing the screen")
    }

    /// Drains every key press currently pending, without blocking.
    pub fn poll_key_events(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while event::poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = event::read()? {
                if ev.kind == KeyEventKind::Press {
                    events.push(ev);
                }
            }
        }

        Ok(events)
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = event::read()? {
                if ev.kind == KeyEventKind::Press {
                    return Ok(ev);
                }
            }
        }
    }

    /// Repaints the whole grid, one terminal cell per tile.
    pub fn draw_frame(&mut self, grid: &Grid, snake: &Snake) -> Result<()> {
        let head = (snake.row(), snake.col());

        for row in 0..grid.height() {
            queue!(self.stdout, MoveTo(0, row))?;

            for col in 0..grid.width() {
                let (ch, color) = match grid.get(row, col) {
                    Tile::Body(_) if (row, col) == head => (snake.head_char(), Color::White),
                    Tile::Body(_) => (BODY_CHAR, Color::White),
                    Tile::Wall => (WALL_CHAR, Color::DarkGrey),
                    Tile::Goal => (GOAL_CHAR, Color::Green),
                    Tile::Empty => (' ', Color::Reset),
                };
                queue!(self.stdout, SetForegroundColor(color), Print(ch))?;
            }
        }

        queue!(self.stdout, ResetColor)?;
        self.stdout.flush().context("flushing the frame")
    }

    /// Draws a message box centered over the given region. The box is not
    /// remembered anywhere; the next `draw_frame` simply paints over it.
    pub fn show_message(&mut self, region: (u16, u16), lines: &[&str]) -> Result<()> {
        let width = lines.iter().map(|l| l.len()).max().unwrap_or(0) as u16 + 2;
        let height = lines.len() as u16 + 2;
        let left = region.0.saturating_sub(width) / 2;
        let top = region.1.saturating_sub(height) / 2;

        let blank = " ".repeat(width as usize);
        queue!(self.stdout, ResetColor)?;
        queue!(self.stdout, MoveTo(left, top), Print(&blank))?;
        queue!(self.stdout, MoveTo(left, top + height - 1), Print(&blank))?;

        for (i, line) in lines.iter().enumerate() {
            let padded = format!("{line: ^w$}", w = width as usize);
            queue!(self.stdout, MoveTo(left, top + 1 + i as u16), Print(padded))?;
        }

        self.stdout.flush().context("flushing the message")
    }
}
