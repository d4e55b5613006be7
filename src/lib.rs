//! Pong Sim - frame-driven Pong simulation core
//!
//! Core modules:
//! - `sim`: Pure simulation (kinematics model, collisions, per-frame step)
//! - `session`: Fixed-timestep driver that owns the model and reacts to misses
//! - `controller`: Paddle controllers that set paddle velocity before a step
//! - `config`: Data-driven board and entity dimensions
//! - `error`: Construction and call-time error types

pub mod config;
pub mod controller;
pub mod error;
pub mod session;
pub mod sim;

pub use config::Config;
pub use error::{ConfigError, InvalidInputError, ValidationError};
pub use session::{FrameReport, Score, Session};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the session driver (seconds)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the driver will account for (tab switches, debugger pauses)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Board dimensions (pixels)
    pub const BOARD_WIDTH: f32 = 500.0;
    pub const BOARD_HEIGHT: f32 = 300.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Initial velocity (pixels/s), diagonal toward the bottom-right
    pub const BALL_START_VX: f32 = 150.0;
    pub const BALL_START_VY: f32 = 100.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 5.0;
    pub const PADDLE_HEIGHT: f32 = 80.0;
    /// Gap between a board edge and the outer face of its paddle
    pub const PADDLE_INSET: f32 = 20.0;
    /// Top speed of AI-driven paddles (pixels/s)
    pub const PADDLE_MAX_SPEED: f32 = 180.0;
}
