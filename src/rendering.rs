use std::io::{self, Write};
use log::info;
use crossterm::{
    cursor::MoveTo,
    execute,
};

use crate::constants::*;
use crate::types::Rect;
use crate::world::{Phase, World, start_button};

// --- ScreenBuffer for simulated rendering ---
pub struct ScreenBuffer {
    pub buffer: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    pub cursor_x: u16,
    pub cursor_y: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            // Control characters (the cue bell) never land on screen
            if !c.is_control() {
                if self.cursor_y < self.height && self.cursor_x < self.width {
                    self.buffer[self.cursor_y as usize][self.cursor_x as usize] = c;
                }
                self.cursor_x = self.cursor_x.saturating_add(1);
            }
        }
    }

    pub fn row(&self, y: u16) -> String {
        self.buffer[y as usize].iter().collect()
    }

    #[cfg(test)]
    pub fn contains(&self, needle: &str) -> bool {
        (0..self.height).any(|y| self.row(y).contains(needle))
    }

    pub fn print_to_log(&self) {
        info!("--- Screen Buffer ---");
        for y in 0..self.height {
            info!("{}", self.row(y));
        }
        info!("---------------------");
    }
}

// --- OutputTarget enum to handle stdout or ScreenBuffer ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn execute_move_to(&mut self, command: MoveTo) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(command.0, command.1);
                Ok(())
            }
        }
    }

    pub fn log_snapshot(&self) {
        if let OutputTarget::ScreenBuffer(sb) = self {
            sb.print_to_log();
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => {
                sb.write_str(&String::from_utf8_lossy(buf));
                Ok(buf.len())
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }
}

// --- Viewport: playfield pixels <-> terminal cells ---
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Viewport { cols: cols.max(1), rows: rows.max(1) }
    }

    fn scale_x(&self, x: i32) -> f64 {
        x as f64 * self.cols as f64 / PLAYFIELD_WIDTH as f64
    }

    fn scale_y(&self, y: i32) -> f64 {
        y as f64 * self.rows as f64 / PLAYFIELD_HEIGHT as f64
    }

    /// Cell containing a playfield point (may be off-grid).
    pub fn to_cell(&self, x: i32, y: i32) -> (i32, i32) {
        (self.scale_x(x).floor() as i32, self.scale_y(y).floor() as i32)
    }

    /// Playfield point at the middle of a cell; used to map mouse clicks.
    pub fn to_playfield(&self, col: u16, row: u16) -> (i32, i32) {
        let x = (2 * col as i64 + 1) * PLAYFIELD_WIDTH as i64 / (2 * self.cols as i64);
        let y = (2 * row as i64 + 1) * PLAYFIELD_HEIGHT as i64 / (2 * self.rows as i64);
        (x as i32, y as i32)
    }

    /// Half-open cell span covered by a rect. Never empty for a non-empty rect.
    pub fn cell_span(&self, rect: &Rect) -> ((i32, i32), (i32, i32)) {
        let col0 = self.scale_x(rect.left()).floor() as i32;
        let col1 = self.scale_x(rect.right()).ceil() as i32;
        let row0 = self.scale_y(rect.top()).floor() as i32;
        let row1 = self.scale_y(rect.bottom()).ceil() as i32;
        ((col0, col1), (row0, row1))
    }
}

// --- GameGrid for cell rendering ---
pub struct GameGrid {
    pub grid: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    pub viewport: Viewport,
}

impl GameGrid {
    pub fn new(width: u16, height: u16) -> Self {
        GameGrid {
            grid: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            viewport: Viewport::new(width, height),
        }
    }

    pub fn set_char(&mut self, x: i32, y: i32, c: char) {
        if x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32 {
            self.grid[y as usize][x as usize] = c;
        }
    }

    /// Stamps a playfield rect onto the grid; off-grid cells are clipped.
    pub fn fill_rect(&mut self, rect: &Rect, c: char) {
        let ((col0, col1), (row0, row1)) = self.viewport.cell_span(rect);
        for y in row0..row1 {
            for x in col0..col1 {
                self.set_char(x, y, c);
            }
        }
    }

    pub fn put_str(&mut self, x: i32, y: i32, s: &str) {
        for (i, c) in s.chars().enumerate() {
            self.set_char(x + i as i32, y, c);
        }
    }

    pub fn put_str_centered(&mut self, y: i32, s: &str) {
        let x = (self.width as i32 - s.chars().count() as i32) / 2;
        self.put_str(x, y, s);
    }

    pub fn clear(&mut self) {
        for row in &mut self.grid {
            row.fill(' ');
        }
    }

    /// Fixed sparse star field standing in for the background image.
    pub fn draw_starfield(&mut self) {
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                if (x * 7 + y * 13) % 37 == 0 {
                    self.set_char(x, y, '.');
                }
            }
        }
    }

    pub fn render(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", self.grid[y as usize].iter().collect::<String>())?;
        }
        Ok(())
    }

    pub fn clear_screen_manual(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", " ".repeat(self.width as usize))?;
        }
        stdout.execute_move_to(MoveTo(0, 0))?;
        Ok(())
    }
}

pub fn hud_text(world: &World) -> String {
    format!("Score: {} | Missed: {}", world.score, world.missed)
}

/// Lays out one whole frame for the world's current phase.
pub fn compose_frame(world: &World, game_grid: &mut GameGrid) {
    game_grid.clear();
    game_grid.draw_starfield();

    if world.phase == Phase::Menu {
        let (_, title_row) = game_grid.viewport.to_cell(0, 150);
        game_grid.put_str_centered(title_row, "SPACE SHOOTER");

        let button = start_button();
        game_grid.fill_rect(&button, '=');
        let (_, label_row) = game_grid.viewport.to_cell(0, button.center().1);
        game_grid.put_str_centered(label_row, "[ START ]");
        return;
    }

    world.player.draw(game_grid);
    for enemy in &world.enemies {
        enemy.draw(game_grid);
    }
    for meteor in &world.meteors {
        meteor.draw(game_grid);
    }
    for bullet in &world.bullets {
        bullet.draw(game_grid);
    }
    for explosion in &world.explosions {
        explosion.draw(game_grid);
    }

    game_grid.put_str(0, 0, &hud_text(world));

    let (_, banner_row) = game_grid.viewport.to_cell(0, PLAYFIELD_HEIGHT / 2);
    match world.phase {
        Phase::Won => game_grid.put_str_centered(banner_row, "YOU WIN!"),
        Phase::Lost => game_grid.put_str_centered(banner_row, "YOU LOSE!"),
        Phase::Menu | Phase::Playing => {}
    }
}
