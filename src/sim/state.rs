//! Game state and core simulation types
//!
//! Everything the update loop mutates lives here. No rendering or DOM access.

use glam::Vec2;

use crate::config::GameConfig;
use crate::consts::MAX_BLOCKS;

/// Lifecycle of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    /// Layout is drawn, waiting for the start trigger
    #[default]
    NotStarted,
    /// Active gameplay
    Running,
    /// All blocks cleared or the ball was lost
    Over,
}

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Won,
    Lost,
}

/// Signals for the presentation layer, queued by the update functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Play began; `restarted` is set when the previous game was reset
    Started { restarted: bool },
    /// A block was destroyed and the score incremented
    BlockDestroyed { row: usize, col: usize, score: u32 },
    /// Every block is gone
    Won { score: u32 },
    /// The ball passed the bottom edge
    Lost { score: u32 },
}

/// The ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    /// Centre position
    pub pos: Vec2,
    /// Velocity in pixels per frame
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Serve position: horizontally centred, just above the paddle
    pub fn serve(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(
                config.canvas_width / 2.0,
                config.canvas_height - config.ball_start_offset,
            ),
            vel: config.ball_start_velocity,
            radius: config.ball_radius,
        }
    }

    /// Where the ball will be after this frame's movement
    #[inline]
    pub fn next_pos(&self) -> Vec2 {
        self.pos + self.vel
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    /// Centred at the bottom of the canvas
    pub fn centered(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(
                (config.canvas_width - config.paddle_width) / 2.0,
                config.canvas_height - config.paddle_height - config.paddle_bottom_margin,
            ),
            width: config.paddle_width,
            height: config.paddle_height,
        }
    }

    /// Largest x that keeps the paddle inside the canvas
    #[inline]
    pub fn max_x(&self, canvas_width: f32) -> f32 {
        canvas_width - self.width
    }

    /// Centre the paddle on `x`, clamped so it never leaves the canvas
    pub fn center_on(&mut self, x: f32, canvas_width: f32) {
        self.pos.x = (x - self.width / 2.0).clamp(0.0, self.max_x(canvas_width));
    }
}

/// A destructible block
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Top-left corner, fixed at layout time
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub alive: bool,
}

/// Fixed rows × cols arrangement of blocks, stored row-major
#[derive(Debug, Clone, PartialEq)]
pub struct BlockGrid {
    rows: usize,
    cols: usize,
    blocks: Vec<Block>,
}

impl BlockGrid {
    /// Lay out a full grid of live blocks. Expects a validated config.
    pub fn new(config: &GameConfig) -> Self {
        let capacity = config
            .block_rows
            .saturating_mul(config.block_cols)
            .min(MAX_BLOCKS);
        let mut blocks = Vec::with_capacity(capacity);
        for row in 0..config.block_rows {
            for col in 0..config.block_cols {
                let x = col as f32 * (config.block_width + config.block_padding)
                    + config.block_offset_left;
                let y = row as f32 * (config.block_height + config.block_padding)
                    + config.block_offset_top;
                blocks.push(Block {
                    pos: Vec2::new(x, y),
                    width: config.block_width,
                    height: config.block_height,
                    alive: true,
                });
            }
        }
        Self {
            rows: config.block_rows,
            cols: config.block_cols,
            blocks,
        }
    }

    /// Total number of blocks, live or destroyed
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Block> {
        if row < self.rows && col < self.cols {
            self.blocks.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Block> {
        if row < self.rows && col < self.cols {
            self.blocks.get_mut(row * self.cols + col)
        } else {
            None
        }
    }

    /// All blocks with their (row, col), row-major
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Block)> {
        let cols = self.cols;
        self.blocks
            .iter()
            .enumerate()
            .map(move |(i, block)| (i / cols, i % cols, block))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut Block)> {
        let cols = self.cols;
        self.blocks
            .iter_mut()
            .enumerate()
            .map(move |(i, block)| (i / cols, i % cols, block))
    }

    pub fn live_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.alive).count()
    }

    pub fn destroyed_count(&self) -> usize {
        self.len() - self.live_count()
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub status: GameStatus,
    /// Set once the status is `Over`
    pub outcome: Option<GameOutcome>,
    pub score: u32,
    pub ball: Ball,
    pub paddle: Paddle,
    pub blocks: BlockGrid,
    /// Frames simulated since the last start
    pub frame: u64,
    /// Pending signals for the presentation layer
    events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh layout, waiting for the start trigger
    pub fn new(config: GameConfig) -> Self {
        Self {
            status: GameStatus::NotStarted,
            outcome: None,
            score: 0,
            ball: Ball::serve(&config),
            paddle: Paddle::centered(&config),
            blocks: BlockGrid::new(&config),
            frame: 0,
            events: Vec::new(),
            config,
        }
    }

    /// Put ball, paddle, blocks and score back to their initial layout
    pub fn reset(&mut self) {
        self.ball = Ball::serve(&self.config);
        self.paddle = Paddle::centered(&self.config);
        self.blocks = BlockGrid::new(&self.config);
        self.score = 0;
        self.outcome = None;
        self.frame = 0;
    }

    /// Begin play. A finished game is reset first; calling this while
    /// running does nothing.
    pub fn start(&mut self) {
        let restarted = match self.status {
            GameStatus::Running => return,
            GameStatus::Over => {
                self.reset();
                true
            }
            GameStatus::NotStarted => false,
        };
        self.status = GameStatus::Running;
        self.push_event(GameEvent::Started { restarted });
        log::info!(
            "Game {} ({} blocks)",
            if restarted { "restarted" } else { "started" },
            self.blocks.len()
        );
    }

    /// Pointer moved to `x`, measured from the canvas's left edge.
    /// Ignored unless running or when the pointer is outside the canvas.
    pub fn on_pointer_move(&mut self, x: f32) {
        if self.status != GameStatus::Running {
            return;
        }
        if x > 0.0 && x < self.config.canvas_width {
            self.paddle.center_on(x, self.config.canvas_width);
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    /// Score needed to win
    pub fn winning_score(&self) -> u32 {
        u32::try_from(self.blocks.len()).unwrap_or(u32::MAX)
    }

    /// End the game with the given outcome
    pub(crate) fn finish(&mut self, outcome: GameOutcome) {
        self.status = GameStatus::Over;
        self.outcome = Some(outcome);
        let event = match outcome {
            GameOutcome::Won => GameEvent::Won { score: self.score },
            GameOutcome::Lost => GameEvent::Lost { score: self.score },
        };
        self.push_event(event);
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events queued since the last drain
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
