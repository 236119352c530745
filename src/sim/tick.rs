//! Per-frame simulation step
//!
//! One call per animation frame. Drawing is the caller's job and happens every
//! frame regardless of status; this only advances a running game.

use super::collision::{CollisionReport, collision_detection};
use super::state::GameState;

/// Advance the game by one frame: resolve collisions, then move the ball.
///
/// Returns `None` when the game is not running (nothing changes). The ball
/// still moves on the frame that ends the game.
pub fn tick(state: &mut GameState) -> Option<CollisionReport> {
    if !state.is_running() {
        return None;
    }

    state.frame += 1;
    let report = collision_detection(state);
    state.ball.pos += state.ball.vel;

    Some(report)
}
