//! Immediate-mode rendering
//!
//! The simulation never draws. Each frame the host clears a [`Surface`] and
//! repaints the read-only [`GameState`]: blocks, then the ball, then the paddle.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use crate::sim::GameState;

/// A 2D drawing target
pub trait Surface {
    /// Erase a rectangle
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: &str);
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: &str);
}

/// Repaint the whole frame
pub fn draw_frame<S: Surface + ?Sized>(state: &GameState, surface: &mut S) {
    let config = &state.config;
    let color = config.fill_color.as_str();

    surface.clear_rect(0.0, 0.0, config.canvas_width, config.canvas_height);

    for (_, _, block) in state.blocks.iter().filter(|(_, _, b)| b.alive) {
        surface.fill_rect(block.pos.x, block.pos.y, block.width, block.height, color);
    }

    let ball = &state.ball;
    surface.fill_circle(ball.pos.x, ball.pos.y, ball.radius, color);

    let paddle = &state.paddle;
    surface.fill_rect(paddle.pos.x, paddle.pos.y, paddle.width, paddle.height, color);
}
