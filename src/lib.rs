//! Block Breaker - a Breakout-style arcade game for the browser canvas
//!
//! Core modules:
//! - `sim`: Pure game state and per-frame update (ball, paddle, block grid)
//! - `renderer`: Immediate-mode drawing of a read-only game state
//! - `config`: Data-driven layout and tuning

pub mod config;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, GameConfig};

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions
    pub const CANVAS_WIDTH: f32 = 480.0;
    pub const CANVAS_HEIGHT: f32 = 320.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 75.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Gap between the paddle bottom and the canvas bottom
    pub const PADDLE_BOTTOM_MARGIN: f32 = 10.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 5.0;
    /// Ball spawns this far above the canvas bottom
    pub const BALL_START_OFFSET: f32 = 30.0;
    /// Per-frame velocity at serve (pixels/frame)
    pub const BALL_START_DX: f32 = 3.0;
    pub const BALL_START_DY: f32 = -3.0;

    /// Block grid layout
    pub const BLOCK_ROWS: usize = 5;
    pub const BLOCK_COLS: usize = 8;
    pub const BLOCK_WIDTH: f32 = 50.0;
    pub const BLOCK_HEIGHT: f32 = 20.0;
    pub const BLOCK_PADDING: f32 = 10.0;
    pub const BLOCK_OFFSET_TOP: f32 = 30.0;
    pub const BLOCK_OFFSET_LEFT: f32 = 25.0;
    /// Largest rows × cols a config may ask for
    pub const MAX_BLOCKS: usize = 4096;

    /// Single fill colour for every entity
    pub const FILL_COLOR: &str = "#0095DD";
}
