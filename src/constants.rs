// --- Playfield ---
pub const PLAYFIELD_WIDTH: i32 = 700;
pub const PLAYFIELD_HEIGHT: i32 = 500;

// --- Sprite extents (pixels) ---
pub const PLAYER_SIZE: (i32, i32) = (50, 50);
pub const ENEMY_SIZE: (i32, i32) = (40, 40);
pub const METEOR_SIZE: (i32, i32) = (40, 40);
pub const BULLET_SIZE: (i32, i32) = (10, 20);
pub const EXPLOSION_SIZE: (i32, i32) = (30, 30);

// --- Motion (pixels per frame) ---
pub const PLAYER_SPEED: i32 = 5;
pub const PLAYER_START_Y: i32 = PLAYFIELD_HEIGHT - 50; // Centre of the ship
pub const BULLET_SPEED: i32 = 7;
pub const ENEMY_SPEED_RANGE: (i32, i32) = (3, 6);
pub const METEOR_SPEED_RANGE: (i32, i32) = (4, 7);
pub const METEOR_ROTATION_RANGE: (i32, i32) = (-3, 3); // Degrees per frame
pub const SPAWN_MARGIN: i32 = 20; // Horizontal margin for spawn centres

// --- Spawning: one chance in N per frame ---
pub const ENEMY_SPAWN_ODDS: u32 = 40;
pub const METEOR_SPAWN_ODDS: u32 = 80;

// --- Round thresholds ---
pub const WIN_SCORE: u32 = 30;
pub const MAX_MISSED: u32 = 5;

// --- Timing ---
pub const TARGET_FPS: u32 = 60;
pub const END_OF_ROUND_DELAY_MS: u64 = 2000;

// --- Menu ---
pub const START_BUTTON_SIZE: (i32, i32) = (200, 60);
pub const START_BUTTON_CENTER: (i32, i32) = (PLAYFIELD_WIDTH / 2, 350);

// --- Input ---
// Held-key lifetime when the terminal never reports releases. The first press has to
// outlast the keyboard's auto-repeat delay; later repeats arrive much closer together.
pub const INITIAL_HOLD_FRAMES: u64 = 36; // 600 ms
pub const HOLD_GRACE_FRAMES: u64 = 8;

// --- Debug runs ---
pub const DEBUG_DEFAULT_WIDTH: u16 = 80;
pub const DEBUG_DEFAULT_HEIGHT: u16 = 24;
