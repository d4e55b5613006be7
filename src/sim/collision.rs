//! Collision detection for the ball against paddles and the board walls
//!
//! Paddles are axis-aligned rectangles; the ball is a circle. Overlap uses a
//! strict inequality so a ball resting exactly tangent to a surface is not a
//! hit, which keeps a freshly repositioned ball from reflecting again on the
//! next frame.

use glam::Vec2;

use super::state::{Ball, Board, Paddle};

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Closest point on the obstacle to the ball centre
    pub point: Vec2,
    /// Surface normal at the contact, pointing away from the obstacle
    pub normal: Vec2,
    /// Penetration depth
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Circle vs axis-aligned rectangle
///
/// The ball centre is clamped to the rectangle and the distance from the
/// clamped point compared to the radius. `face_normal` is the normal of the
/// face the ball is expected to strike; it is reported when the centre is
/// inside the rectangle and the offset has no direction.
pub fn ball_rect_collision(
    center: Vec2,
    radius: f32,
    min: Vec2,
    max: Vec2,
    face_normal: Vec2,
) -> CollisionResult {
    let closest = center.clamp(min, max);
    let offset = center - closest;
    let dist_sq = offset.length_squared();

    if dist_sq >= radius * radius {
        return CollisionResult::miss();
    }

    let dist = dist_sq.sqrt();
    let normal = if dist > f32::EPSILON {
        offset / dist
    } else {
        face_normal
    };

    CollisionResult {
        hit: true,
        point: closest,
        normal,
        penetration: radius - dist,
    }
}

/// Normal of the face a paddle presents to the field
///
/// A paddle left of the board centre faces right and vice versa.
pub fn paddle_face_normal(paddle: &Paddle, board: &Board) -> Vec2 {
    let paddle_center_x = paddle.pos.x + paddle.width() / 2.0;
    if paddle_center_x < board.center().x {
        Vec2::X
    } else {
        Vec2::NEG_X
    }
}

/// Normal of the paddle's vertical face on the same side as `x`
///
/// A ball centred behind a paddle (between it and its goal edge) gets the
/// back face, so it is never pushed through the paddle into the field.
pub fn paddle_contact_normal(x: f32, paddle: &Paddle, board: &Board) -> Vec2 {
    let center_x = paddle.center_x();
    if x > center_x {
        Vec2::X
    } else if x < center_x {
        Vec2::NEG_X
    } else {
        paddle_face_normal(paddle, board)
    }
}

/// Check the ball against a paddle
pub fn ball_paddle_collision(ball: &Ball, paddle: &Paddle, board: &Board) -> CollisionResult {
    ball_rect_collision(
        ball.pos,
        ball.radius(),
        paddle.min(),
        paddle.max(),
        paddle_contact_normal(ball.pos.x, paddle, board),
    )
}

/// Check the ball against the top and bottom walls
///
/// Left and right are open: crossing them is a miss, not a collision.
pub fn ball_wall_collision(ball: &Ball, board: &Board) -> CollisionResult {
    let top = ball.top();
    if top < 0.0 {
        return CollisionResult {
            hit: true,
            point: Vec2::new(ball.pos.x, 0.0),
            normal: Vec2::Y,
            penetration: -top,
        };
    }

    let overshoot = ball.bottom() - board.height();
    if overshoot > 0.0 {
        return CollisionResult {
            hit: true,
            point: Vec2::new(ball.pos.x, board.height()),
            normal: Vec2::NEG_Y,
            penetration: overshoot,
        };
    }

    CollisionResult::miss()
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}
