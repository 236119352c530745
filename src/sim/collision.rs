//! Collision detection and response
//!
//! Everything is axis-aligned: the ball is treated as its centre point against
//! block rectangles, and as a circle against the canvas walls. Responses are
//! sign flips of a velocity component.

use glam::Vec2;

use super::state::{GameEvent, GameOutcome, GameState, GameStatus};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Point strictly inside (edges do not count)
    #[inline]
    pub fn contains_strict(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x > self.min.x && p.x < max.x && p.y > self.min.y && p.y < max.y
    }
}

/// What `collision_detection` did during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub blocks_hit: u32,
    pub paddle_hit: bool,
    pub side_wall_hit: bool,
    pub top_wall_hit: bool,
    pub bottom_crossed: bool,
}

impl CollisionReport {
    pub fn any(&self) -> bool {
        self.blocks_hit > 0
            || self.paddle_hit
            || self.side_wall_hit
            || self.top_wall_hit
            || self.bottom_crossed
    }
}

/// Resolve every collision for the coming frame, in order: blocks, paddle,
/// side and top walls, then the bottom edge.
///
/// Reflections use the ball's projected position (`pos + vel`) so the ball
/// turns around before it would leave the play area.
pub fn collision_detection(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();

    collide_blocks(state, &mut report);

    let radius = state.ball.radius;
    let width = state.config.canvas_width;
    let height = state.config.canvas_height;

    // Paddle: only the projected y is tested against the paddle line, not
    // whether the ball is currently above the paddle's top edge.
    let paddle_line = height - radius - state.paddle.height;
    let next = state.ball.next_pos();
    if next.y > paddle_line {
        let left = state.paddle.pos.x;
        let right = left + state.paddle.width;
        if state.ball.pos.x > left && state.ball.pos.x < right {
            state.ball.vel.y = -state.ball.vel.y;
            report.paddle_hit = true;
        }
    }

    let next = state.ball.next_pos();
    if next.x > width - radius || next.x < radius {
        state.ball.vel.x = -state.ball.vel.x;
        report.side_wall_hit = true;
    }
    if next.y < radius {
        state.ball.vel.y = -state.ball.vel.y;
        report.top_wall_hit = true;
    }

    // A win earlier in this frame already ended the game; unlike the browser
    // original, no loss is reported on top of it.
    if state.status == GameStatus::Running && state.ball.next_pos().y > height - radius {
        report.bottom_crossed = true;
        log::info!("Ball lost at score {}", state.score);
        state.finish(GameOutcome::Lost);
    }

    report
}

/// Point-in-rectangle test of the ball centre against every live block
fn collide_blocks(state: &mut GameState, report: &mut CollisionReport) {
    let winning_score = state.winning_score();
    let mut destroyed = Vec::new();

    for (row, col, block) in state.blocks.iter_mut() {
        if !block.alive {
            continue;
        }
        let rect = Rect::new(block.pos.x, block.pos.y, block.width, block.height);
        if rect.contains_strict(state.ball.pos) {
            state.ball.vel.y = -state.ball.vel.y;
            block.alive = false;
            destroyed.push((row, col));
        }
    }

    for (row, col) in destroyed {
        state.score += 1;
        report.blocks_hit += 1;
        log::debug!("Block ({row}, {col}) destroyed, score {}", state.score);
        state.push_event(GameEvent::BlockDestroyed {
            row,
            col,
            score: state.score,
        });
        if state.score == winning_score {
            log::info!("All {winning_score} blocks cleared");
            state.finish(GameOutcome::Won);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_state() -> GameState {
        let mut state = GameState::default();
        state.start();
        state.drain_events();
        state
    }

    #[test]
    fn test_rect_edges_are_outside() {
        let rect = Rect::new(10.0, 20.0, 50.0, 20.0);
        assert!(rect.contains_strict(Vec2::new(30.0, 30.0)));
        assert!(!rect.contains_strict(Vec2::new(10.0, 30.0)));
        assert!(!rect.contains_strict(Vec2::new(60.0, 30.0)));
        assert!(!rect.contains_strict(Vec2::new(30.0, 40.0)));
    }

    #[test]
    fn test_no_collision_in_open_space() {
        let mut state = running_state();
        state.ball.pos = Vec2::new(240.0, 200.0);
        state.ball.vel = Vec2::new(3.0, -3.0);

        let report = collision_detection(&mut state);
        assert!(!report.any());
        assert_eq!(state.ball.vel, Vec2::new(3.0, -3.0));
    }

    #[test]
    fn test_block_hit_flips_dy_and_scores() {
        let mut state = running_state();
        // Inside block (0, 0): x 25..75, y 30..50
        state.ball.pos = Vec2::new(50.0, 40.0);
        state.ball.vel = Vec2::new(3.0, -3.0);

        let report = collision_detection(&mut state);
        assert_eq!(report.blocks_hit, 1);
        assert_eq!(state.ball.vel.y, 3.0);
        assert_eq!(state.score, 1);
        assert!(!state.blocks.get(0, 0).unwrap().alive);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::BlockDestroyed { row: 0, col: 0, score: 1 }]
        );
    }

    #[test]
    fn test_dead_block_passes_through() {
        let mut state = running_state();
        state.blocks.get_mut(0, 0).unwrap().alive = false;
        state.ball.pos = Vec2::new(50.0, 40.0);
        state.ball.vel = Vec2::new(3.0, 3.0);

        let report = collision_detection(&mut state);
        assert_eq!(report.blocks_hit, 0);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_paddle_bounce() {
        let mut state = running_state();
        let paddle_center = state.paddle.pos.x + state.paddle.width / 2.0;
        state.ball.pos = Vec2::new(paddle_center, 304.0);
        state.ball.vel = Vec2::new(3.0, 3.0);

        let report = collision_detection(&mut state);
        assert!(report.paddle_hit);
        assert_eq!(state.ball.vel.y, -3.0);
        assert_eq!(state.status, GameStatus::Running);
    }

    #[test]
    fn test_paddle_edge_misses() {
        let mut state = running_state();
        state.ball.pos = Vec2::new(state.paddle.pos.x, 304.0);
        state.ball.vel = Vec2::new(0.0, 3.0);

        let report = collision_detection(&mut state);
        assert!(!report.paddle_hit);
        assert_eq!(state.ball.vel.y, 3.0);
    }

    #[test]
    fn test_side_walls() {
        let mut state = running_state();
        state.ball.pos = Vec2::new(478.0, 200.0);
        state.ball.vel = Vec2::new(3.0, -3.0);
        assert!(collision_detection(&mut state).side_wall_hit);
        assert_eq!(state.ball.vel.x, -3.0);

        state.ball.pos = Vec2::new(6.0, 200.0);
        state.ball.vel = Vec2::new(-3.0, -3.0);
        assert!(collision_detection(&mut state).side_wall_hit);
        assert_eq!(state.ball.vel.x, 3.0);
    }

    #[test]
    fn test_top_wall() {
        let mut state = running_state();
        state.ball.pos = Vec2::new(240.0, 6.0);
        state.ball.vel = Vec2::new(3.0, -3.0);

        let report = collision_detection(&mut state);
        assert!(report.top_wall_hit);
        assert_eq!(state.ball.vel.y, 3.0);
    }

    #[test]
    fn test_corner_reflects_both_axes() {
        let mut state = running_state();
        state.ball.pos = Vec2::new(6.0, 6.0);
        state.ball.vel = Vec2::new(-3.0, -3.0);

        let report = collision_detection(&mut state);
        assert!(report.side_wall_hit && report.top_wall_hit);
        assert_eq!(state.ball.vel, Vec2::new(3.0, 3.0));
    }

    #[test]
    fn test_bottom_loses() {
        let mut state = running_state();
        state.paddle.pos.x = 0.0;
        state.ball.pos = Vec2::new(400.0, 313.0);
        state.ball.vel = Vec2::new(3.0, 3.0);

        let report = collision_detection(&mut state);
        assert!(report.bottom_crossed);
        assert_eq!(state.status, GameStatus::Over);
        assert_eq!(state.outcome, Some(GameOutcome::Lost));
        assert_eq!(state.drain_events(), vec![GameEvent::Lost { score: 0 }]);
    }

    #[test]
    fn test_two_blocks_in_one_frame_flip_twice() {
        let mut state = running_state();
        // Overlap block (0, 1) onto block (0, 0)
        state.blocks.get_mut(0, 1).unwrap().pos = Vec2::new(25.0, 30.0);
        state.ball.pos = Vec2::new(50.0, 40.0);
        state.ball.vel = Vec2::new(3.0, -3.0);

        let report = collision_detection(&mut state);
        assert_eq!(report.blocks_hit, 2);
        assert_eq!(state.score, 2);
        assert_eq!(state.ball.vel.y, -3.0);
    }
}
