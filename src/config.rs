//! Game layout and tuning
//!
//! Defaults mirror [`crate::consts`]. A JSON override can be stored in
//! LocalStorage under `block_breaker_config`.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Why a configuration was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The JSON could not be parsed
    Parse(String),
    /// The values parse but cannot hold a playable game
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "malformed config: {msg}"),
            ConfigError::Invalid(reason) => write!(f, "invalid config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Canvas, paddle, ball and block grid geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,

    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_bottom_margin: f32,

    pub ball_radius: f32,
    pub ball_start_offset: f32,
    /// Serve velocity in pixels per frame
    pub ball_start_velocity: Vec2,

    pub block_rows: usize,
    pub block_cols: usize,
    pub block_width: f32,
    pub block_height: f32,
    pub block_padding: f32,
    pub block_offset_top: f32,
    pub block_offset_left: f32,

    /// CSS colour used for every entity
    pub fill_color: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_bottom_margin: PADDLE_BOTTOM_MARGIN,

            ball_radius: BALL_RADIUS,
            ball_start_offset: BALL_START_OFFSET,
            ball_start_velocity: Vec2::new(BALL_START_DX, BALL_START_DY),

            block_rows: BLOCK_ROWS,
            block_cols: BLOCK_COLS,
            block_width: BLOCK_WIDTH,
            block_height: BLOCK_HEIGHT,
            block_padding: BLOCK_PADDING,
            block_offset_top: BLOCK_OFFSET_TOP,
            block_offset_left: BLOCK_OFFSET_LEFT,

            fill_color: FILL_COLOR.to_string(),
        }
    }
}

impl GameConfig {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "block_breaker_config";

    /// Total number of blocks in the grid (the winning score).
    /// Saturates for grids that `validate` would reject.
    pub fn block_count(&self) -> u32 {
        u32::try_from(self.block_rows.saturating_mul(self.block_cols)).unwrap_or(u32::MAX)
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reject layouts that cannot hold a game
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            self.canvas_width,
            self.canvas_height,
            self.paddle_width,
            self.paddle_height,
            self.ball_radius,
            self.block_width,
            self.block_height,
        ];
        if sizes.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(ConfigError::Invalid("sizes must be positive"));
        }
        if self.block_rows == 0 || self.block_cols == 0 {
            return Err(ConfigError::Invalid("block grid must have rows and columns"));
        }
        match self.block_rows.checked_mul(self.block_cols) {
            Some(n) if n <= MAX_BLOCKS => {}
            _ => return Err(ConfigError::Invalid("block grid is too large")),
        }
        if self.paddle_width > self.canvas_width {
            return Err(ConfigError::Invalid("paddle is wider than the canvas"));
        }
        if self.ball_radius * 2.0 >= self.canvas_width.min(self.canvas_height) {
            return Err(ConfigError::Invalid("ball does not fit the canvas"));
        }
        // The last column may overhang the right edge; the grid origin may not.
        if !(0.0..self.canvas_width).contains(&self.block_offset_left)
            || !(0.0..self.canvas_height).contains(&self.block_offset_top)
        {
            return Err(ConfigError::Invalid("block grid starts outside the canvas"));
        }
        if self.block_padding < 0.0 {
            return Err(ConfigError::Invalid("block padding must not be negative"));
        }
        if !self.ball_start_velocity.is_finite() {
            return Err(ConfigError::Invalid("start velocity must be finite"));
        }
        Ok(())
    }

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {e}"),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.block_count(), 40);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{"block_rows": 2, "fill_color": "red"}"#).unwrap();
        assert_eq!(config.block_rows, 2);
        assert_eq!(config.block_cols, BLOCK_COLS);
        assert_eq!(config.fill_color, "red");
        assert_eq!(config.canvas_width, CANVAS_WIDTH);
    }

    #[test]
    fn test_json_roundtrip_keeps_velocity() {
        let mut config = GameConfig::default();
        config.ball_start_velocity = Vec2::new(2.0, -4.0);
        let json = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_malformed_json() {
        let err = GameConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_bad_layouts() {
        let cases = [
            r#"{"block_rows": 0}"#,
            r#"{"paddle_width": 500.0}"#,
            r#"{"ball_radius": -1.0}"#,
            r#"{"block_offset_left": 600.0}"#,
            r#"{"block_padding": -2.0}"#,
            r#"{"ball_radius": 200.0}"#,
            r#"{"block_rows": 9223372036854775808, "block_cols": 4}"#,
            r#"{"block_rows": 4294967296, "block_cols": 2}"#,
            r#"{"block_rows": 65, "block_cols": 64}"#,
        ];
        for json in cases {
            assert!(
                matches!(GameConfig::from_json(json), Err(ConfigError::Invalid(_))),
                "expected rejection for {json}"
            );
        }
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::Invalid("paddle is wider than the canvas");
        assert_eq!(err.to_string(), "invalid config: paddle is wider than the canvas");
    }

    #[test]
    fn test_grid_size_limits() {
        let config = GameConfig::from_json(r#"{"block_rows": 64, "block_cols": 64}"#).unwrap();
        assert_eq!(config.block_count(), MAX_BLOCKS as u32);

        let huge = GameConfig {
            block_rows: usize::MAX,
            block_cols: 2,
            ..Default::default()
        };
        assert_eq!(huge.block_count(), u32::MAX);
        assert_eq!(
            huge.validate(),
            Err(ConfigError::Invalid("block grid is too large"))
        );
    }
}
