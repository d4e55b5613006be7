//! Board and entity tuning
//!
//! Loaded from a JSON file by the binary; every field is optional and falls
//! back to the values in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, ValidationError};
use crate::sim::Model;

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Board ===
    pub board_width: f32,
    pub board_height: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Initial ball velocity (pixels/s)
    pub ball_start_vx: f32,
    pub ball_start_vy: f32,

    // === Paddles ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between a board edge and the outer face of its paddle
    pub paddle_inset: f32,
    /// Top speed for AI-driven paddles (pixels/s)
    pub paddle_max_speed: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,

            ball_radius: BALL_RADIUS,
            ball_start_vx: BALL_START_VX,
            ball_start_vy: BALL_START_VY,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_inset: PADDLE_INSET,
            paddle_max_speed: PADDLE_MAX_SPEED,
        }
    }
}

impl Config {
    /// Parse a JSON document, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check that a model can be built from this configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        Model::from_config(self).map(|_| ())
    }

    /// X of the left paddle's top-left corner
    pub fn left_paddle_x(&self) -> f32 {
        self.paddle_inset
    }

    /// X of the right paddle's top-left corner
    pub fn right_paddle_x(&self) -> f32 {
        self.board_width - self.paddle_inset - self.paddle_width
    }

    /// Speed the ball is served at after a miss
    pub fn serve_speed(&self) -> f32 {
        glam::Vec2::new(self.ball_start_vx, self.ball_start_vy).length()
    }
}
