use crate::constants::*;
use crate::rendering::GameGrid;
use crate::types::{Rect, rotated_extent, wrap_angle};

// --- Player ---
pub struct Player {
    pub rect: Rect,
}

impl Player {
    pub fn new() -> Self {
        let (w, h) = PLAYER_SIZE;
        Player {
            rect: Rect::from_center(PLAYFIELD_WIDTH / 2, PLAYER_START_Y, w, h),
        }
    }

    /// Moves the ship for one frame. Both keys held cancel out.
    pub fn update(&mut self, move_left: bool, move_right: bool) {
        if move_left && self.rect.left() > 0 {
            self.rect.x = (self.rect.x - PLAYER_SPEED).max(0);
        }
        if move_right && self.rect.right() < PLAYFIELD_WIDTH {
            self.rect.x = (self.rect.x + PLAYER_SPEED).min(PLAYFIELD_WIDTH - self.rect.w);
        }
    }

    /// Where a freshly fired bullet is centred: the nose of the ship.
    pub fn muzzle(&self) -> (i32, i32) {
        (self.rect.center_x(), self.rect.top())
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        game_grid.fill_rect(&self.rect, 'A');
    }
}

// --- Enemy ---
pub struct Enemy {
    pub rect: Rect,
    pub speed: i32,
}

impl Enemy {
    pub fn new(center_x: i32, speed: i32) -> Self {
        let (w, h) = ENEMY_SIZE;
        Enemy { rect: Rect::from_center(center_x, 0, w, h), speed }
    }

    pub fn update(&mut self) {
        self.rect.y += self.speed;
    }

    pub fn is_past_bottom(&self) -> bool {
        self.rect.top() > PLAYFIELD_HEIGHT
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        game_grid.fill_rect(&self.rect, 'W');
    }
}

// --- Meteor ---
// The bounding box follows the rotated sprite, so the meteor keeps its centre
// and recomputes the rect from it every frame.
pub struct Meteor {
    pub center: (i32, i32),
    pub speed: i32,
    pub angle: i32, // Degrees, always in [0, 360)
    pub rotation_speed: i32,
}

impl Meteor {
    pub fn new(center_x: i32, speed: i32, rotation_speed: i32) -> Self {
        Meteor {
            center: (center_x, 0),
            speed,
            angle: 0,
            rotation_speed,
        }
    }

    pub fn update(&mut self) {
        self.center.1 += self.speed;
        self.angle = wrap_angle(self.angle + self.rotation_speed, 360);
    }

    pub fn rect(&self) -> Rect {
        let (w, h) = rotated_extent(METEOR_SIZE.0, METEOR_SIZE.1, self.angle);
        Rect::from_center(self.center.0, self.center.1, w, h)
    }

    pub fn is_past_bottom(&self) -> bool {
        self.rect().top() > PLAYFIELD_HEIGHT
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        let glyph = match self.angle / 90 {
            0 => '@',
            1 => '*',
            2 => 'o',
            _ => '*',
        };
        game_grid.fill_rect(&self.rect(), glyph);
    }
}

// --- Bullet ---
pub struct Bullet {
    pub rect: Rect,
}

impl Bullet {
    pub fn new(center_x: i32, center_y: i32) -> Self {
        let (w, h) = BULLET_SIZE;
        Bullet { rect: Rect::from_center(center_x, center_y, w, h) }
    }

    pub fn update(&mut self) {
        self.rect.y -= BULLET_SPEED;
    }

    pub fn is_past_top(&self) -> bool {
        self.rect.bottom() < 0
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        game_grid.fill_rect(&self.rect, '|');
    }
}

// --- Explosion ---
// Lives for exactly one drawn frame; the world drops it on the next update pass.
pub struct Explosion {
    pub rect: Rect,
}

impl Explosion {
    pub fn new(center: (i32, i32)) -> Self {
        let (w, h) = EXPLOSION_SIZE;
        Explosion { rect: Rect::from_center(center.0, center.1, w, h) }
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        game_grid.fill_rect(&self.rect, '#');
    }
}
