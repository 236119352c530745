//! Game simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One step per animation frame, velocities in pixels per frame
//! - Row-major block iteration
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, Rect, collision_detection};
pub use state::{
    Ball, Block, BlockGrid, GameEvent, GameOutcome, GameState, GameStatus, Paddle,
};
pub use tick::tick;
