//! Simulation step
//!
//! `advance` is a pure function from (model, elapsed time) to the next model.
//! It performs a single explicit Euler step; callers that need small steps
//! (see `Session`) subdivide time themselves.

use serde::{Deserialize, Serialize};

use super::collision::{
    ball_paddle_collision, ball_wall_collision, paddle_contact_normal, paddle_face_normal,
    reflect_velocity,
};
use super::state::{Ball, Board, Model, Paddle, Side};
use crate::error::InvalidInputError;

/// What the ball touched during a step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contacts {
    /// Ball bounced off the top or bottom wall
    pub wall: bool,
    /// Ball bounced off this side's paddle back into the field
    pub paddle: Option<Side>,
}

/// Output of one step
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub model: Model,
    /// Set while the ball centre is past the left or right edge
    pub crossing: Option<Side>,
    pub contacts: Contacts,
}

/// Advance the model by `dt`
///
/// `dt` must be finite and non-negative and use the same time unit as the
/// velocities. On error the caller still owns the untouched input model.
pub fn advance(model: &Model, dt: f32) -> Result<Step, InvalidInputError> {
    if !dt.is_finite() {
        return Err(InvalidInputError::NonFiniteDelta(dt));
    }
    if dt < 0.0 {
        return Err(InvalidInputError::NegativeDelta(dt));
    }
    model.validate()?;

    let mut next = model.clone();
    let mut contacts = Contacts::default();

    if dt == 0.0 {
        return Ok(Step {
            model: next,
            crossing: None,
            contacts,
        });
    }

    let board = *next.board();

    // 1. Paddles
    move_paddle(&mut next.left, &board, dt);
    move_paddle(&mut next.right, &board, dt);

    // 2. Ball
    let from_x = next.ball.pos.x;
    next.ball.pos += next.ball.vel * dt;

    // 3. Top/bottom walls
    contacts.wall = bounce_off_walls(&mut next.ball, &board);

    // 4. Misses are never bounced back
    let crossing = board.crossed_side(next.ball.pos.x);
    if let Some(side) = crossing {
        log::trace!("Ball crossed the {:?} edge at x={}", side, next.ball.pos.x);
    } else {
        for side in [Side::Left, Side::Right] {
            let paddle = *next.paddle(side);
            if let Some(returned) = bounce_off_paddle(&mut next.ball, from_x, &paddle, &board) {
                if returned {
                    contacts.paddle = Some(side);
                }
                break;
            }
        }
    }

    Ok(Step {
        model: next,
        crossing,
        contacts,
    })
}

/// Integrate a paddle on y and keep it on the board
///
/// A clamp that engages zeroes the velocity driving the paddle out, so a
/// controller reading `vel.y` sees the paddle has stopped.
fn move_paddle(paddle: &mut Paddle, board: &Board, dt: f32) {
    paddle.pos.y += paddle.vel.y * dt;

    let (min_y, max_y) = paddle.y_range(board);
    if paddle.pos.y < min_y {
        paddle.pos.y = min_y;
        if paddle.vel.y < 0.0 {
            paddle.vel.y = 0.0;
        }
    } else if paddle.pos.y > max_y {
        paddle.pos.y = max_y;
        if paddle.vel.y > 0.0 {
            paddle.vel.y = 0.0;
        }
    }
}

/// Reflect `vy` and put the ball's edge on the wall it crossed
fn bounce_off_walls(ball: &mut Ball, board: &Board) -> bool {
    let result = ball_wall_collision(ball, board);
    if !result.hit {
        return false;
    }

    if ball.vel.dot(result.normal) < 0.0 {
        ball.vel = reflect_velocity(ball.vel, result.normal);
    }
    ball.pos.y = if result.normal.y > 0.0 {
        ball.radius()
    } else {
        board.height() - ball.radius()
    };
    true
}

/// Reflect `vx` and move the ball one radius clear of the paddle
///
/// The ball leaves through the face on the side its centre started the step
/// on. Returns `None` without contact, otherwise whether the ball left through
/// the field-facing face.
fn bounce_off_paddle(
    ball: &mut Ball,
    from_x: f32,
    paddle: &Paddle,
    board: &Board,
) -> Option<bool> {
    if !ball_paddle_collision(ball, paddle, board).hit {
        return None;
    }

    let face = paddle_contact_normal(from_x, paddle, board);
    if ball.vel.x * face.x < 0.0 {
        ball.vel.x = -ball.vel.x;
    }
    ball.pos.x = if face.x > 0.0 {
        paddle.max().x + ball.radius()
    } else {
        paddle.min().x - ball.radius()
    };
    Some(face == paddle_face_normal(paddle, board))
}
