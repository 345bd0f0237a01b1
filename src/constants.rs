// Tetris
pub const TETRIS_COLS: usize = 10;
pub const TETRIS_ROWS: usize = 20;
pub const TETRIS_SPAWN_Y: i32 = -2; // Two rows above the visible field
pub const TETRIS_GRAVITY_MS: u64 = 650;
pub const TETRIS_KICKS: [i32; 5] = [0, -1, 1, -2, 2];
pub const LINE_CLEAR_POINTS: [u32; 4] = [100, 300, 500, 800];

// Snake
pub const SNAKE_COLS: usize = 20;
pub const SNAKE_ROWS: usize = 20;
pub const SNAKE_INTERVAL_MS: u64 = 160;
pub const SNAKE_MIN_INTERVAL_MS: u64 = 70;
pub const SNAKE_SPEEDUP_STEP_MS: u64 = 10;
pub const SNAKE_SPEEDUP_EVERY: u32 = 50; // Points between speed-ups
pub const SNAKE_FOOD_POINTS: u32 = 10;

// Puzzle (2048)
pub const PUZZLE_SIZE: usize = 4;
pub const PUZZLE_FOUR_CHANCE: f64 = 0.1;

// Jeweled
pub const JEWELED_ROWS: usize = 8;
pub const JEWELED_COLS: usize = 8;
pub const JEWELED_GEM_TYPES: u8 = 6;
pub const JEWELED_CASCADE_CAP: u32 = 20;
pub const JEWELED_GEM_POINTS: u32 = 10;

// Pong (field units, not terminal cells)
pub const PONG_WIDTH: f32 = 640.0;
pub const PONG_HEIGHT: f32 = 400.0;
pub const PADDLE_WIDTH: f32 = 10.0;
pub const PADDLE_HEIGHT: f32 = 70.0;
pub const PADDLE_SPEED: f32 = 6.0;
pub const BALL_RADIUS: f32 = 7.0;
pub const BALL_SPEED_X: f32 = 4.0;
pub const BALL_SPIN: f32 = 4.0; // Max vertical speed after a paddle hit
pub const AI_EASING: f32 = 0.08;
pub const PONG_FRAME_MS: u64 = 16;
pub const PONG_WINNING_SCORE: u32 = 7;

// Input
pub const KEY_TIMEOUT: u64 = 100; // Timeout for key release detection fallback
pub const EVENT_POLL_MS: u64 = 16;
