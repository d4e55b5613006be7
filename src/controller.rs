//! Paddle controllers
//!
//! A controller decides a paddle's vertical velocity before each step. The
//! simulation clamps paddles to the board, so controllers may ask for any speed.

use std::collections::VecDeque;

use crate::consts::PADDLE_MAX_SPEED;
use crate::sim::collision::paddle_face_normal;
use crate::sim::{Ball, Board, Paddle};

/// Time (seconds) the tracking AI takes to close a gap, before speed clamping
const RESPONSE_TIME: f32 = 0.1;
/// How far ahead (seconds) the tracking AI extrapolates the ball
const LEAD_TIME: f32 = 0.1;

/// Sets a paddle's vertical velocity once per step
pub trait PaddleController {
    fn vertical_velocity(&mut self, paddle: &Paddle, ball: &Ball, board: &Board) -> f32;
}

/// Paddle never moves
#[derive(Debug, Clone, Copy, Default)]
pub struct Idle;

impl PaddleController for Idle {
    fn vertical_velocity(&mut self, _paddle: &Paddle, _ball: &Ball, _board: &Board) -> f32 {
        0.0
    }
}

/// AI that follows the ball while it approaches and drifts back to the
/// middle while it recedes
#[derive(Debug, Clone, Copy)]
pub struct Tracking {
    pub max_speed: f32,
    /// Gap between paddle centre and target that is left alone
    pub dead_zone: f32,
}

impl Default for Tracking {
    fn default() -> Self {
        Self::new(PADDLE_MAX_SPEED)
    }
}

impl Tracking {
    pub fn new(max_speed: f32) -> Self {
        Self {
            max_speed,
            dead_zone: 2.0,
        }
    }

    fn target_y(&self, paddle: &Paddle, ball: &Ball, board: &Board) -> f32 {
        let face = paddle_face_normal(paddle, board);
        let approaching = ball.vel.x * face.x < 0.0;
        if approaching {
            (ball.pos.y + ball.vel.y * LEAD_TIME).clamp(0.0, board.height())
        } else {
            board.center().y
        }
    }
}

impl PaddleController for Tracking {
    fn vertical_velocity(&mut self, paddle: &Paddle, ball: &Ball, board: &Board) -> f32 {
        let delta = self.target_y(paddle, ball, board) - paddle.center_y();
        if delta.abs() <= self.dead_zone {
            return 0.0;
        }
        (delta / RESPONSE_TIME).clamp(-self.max_speed, self.max_speed)
    }
}

/// Replays a fixed sequence of velocities, then holds still
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    velocities: VecDeque<f32>,
}

impl Scripted {
    pub fn new(velocities: impl IntoIterator<Item = f32>) -> Self {
        Self {
            velocities: velocities.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.velocities.len()
    }
}

impl PaddleController for Scripted {
    fn vertical_velocity(&mut self, _paddle: &Paddle, _ball: &Ball, _board: &Board) -> f32 {
        self.velocities.pop_front().unwrap_or(0.0)
    }
}
