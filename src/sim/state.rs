//! Kinematics model
//!
//! Plain data for the board, ball and paddles. Fields that carry an invariant
//! (board size, ball radius, paddle size) are private and only set through
//! validating constructors.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::consts::*;
use crate::error::{ValidationError, ensure_positive};

/// Horizontal side of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Sign of x motion heading toward this side
    pub fn direction(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Fixed-size playing field, origin at the top-left corner, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardFields")]
pub struct Board {
    width: f32,
    height: f32,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
        }
    }
}

impl Board {
    pub fn new(width: f32, height: f32) -> Result<Self, ValidationError> {
        Ok(Self {
            width: ensure_positive("board width", width)?,
            height: ensure_positive("board height", height)?,
        })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Side whose edge the point has crossed, if any
    pub fn crossed_side(&self, x: f32) -> Option<Side> {
        if x < 0.0 {
            Some(Side::Left)
        } else if x > self.width {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// The ball. `pos` is the centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BallFields")]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    radius: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}

impl Ball {
    /// Ball at the centre of the default board, moving diagonally
    pub fn new() -> Self {
        Self {
            pos: Board::default().center(),
            vel: Vec2::new(BALL_START_VX, BALL_START_VY),
            radius: BALL_RADIUS,
        }
    }

    pub fn with_radius(pos: Vec2, vel: Vec2, radius: f32) -> Result<Self, ValidationError> {
        Ok(Self {
            pos,
            vel,
            radius: ensure_positive("ball radius", radius)?,
        })
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// A paddle. `pos` is the top-left corner; only `pos.y` moves.
///
/// `vel.x` is carried for controllers that want it but is never integrated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PaddleFields")]
pub struct Paddle {
    pub pos: Vec2,
    pub vel: Vec2,
    width: f32,
    height: f32,
}

impl Paddle {
    /// Default-sized paddle at horizontal offset `x`, centred vertically
    pub fn new(x: f32) -> Self {
        Self {
            pos: Vec2::new(x, (BOARD_HEIGHT - PADDLE_HEIGHT) / 2.0),
            vel: Vec2::ZERO,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        }
    }

    pub fn with_size(pos: Vec2, width: f32, height: f32) -> Result<Self, ValidationError> {
        Ok(Self {
            pos,
            vel: Vec2::ZERO,
            width: ensure_positive("paddle width", width)?,
            height: ensure_positive("paddle height", height)?,
        })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Top-left corner
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + Vec2::new(self.width, self.height)
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.pos.y + self.height / 2.0
    }

    /// Vertical position range that keeps the paddle fully on the board
    pub fn y_range(&self, board: &Board) -> (f32, f32) {
        (0.0, board.height() - self.height)
    }
}

/// Complete session state: one ball, two paddles, a fixed board
///
/// `ball`, `left` and `right` are open for drivers that move entities
/// directly. Swapping in an entity that no longer fits the board is caught by
/// [`Model::validate`], which `advance` runs before every step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ModelFields")]
pub struct Model {
    board: Board,
    pub ball: Ball,
    pub left: Paddle,
    pub right: Paddle,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Default model: ball centred moving diagonally, paddles vertically centred
    pub fn new() -> Self {
        let config = Config::default();
        Self {
            board: Board::default(),
            ball: Ball::new(),
            left: Paddle::new(config.left_paddle_x()),
            right: Paddle::new(config.right_paddle_x()),
        }
    }

    /// Build and validate a model from configuration
    pub fn from_config(config: &Config) -> Result<Self, ValidationError> {
        let board = Board::new(config.board_width, config.board_height)?;

        let ball = Ball::with_radius(
            board.center(),
            Vec2::new(config.ball_start_vx, config.ball_start_vy),
            config.ball_radius,
        )?;

        let paddle_y = (board.height() - config.paddle_height) / 2.0;
        let left = Paddle::with_size(
            Vec2::new(config.left_paddle_x(), paddle_y),
            config.paddle_width,
            config.paddle_height,
        )?;
        let right = Paddle::with_size(
            Vec2::new(config.right_paddle_x(), paddle_y),
            config.paddle_width,
            config.paddle_height,
        )?;

        let model = Self {
            board,
            ball,
            left,
            right,
        };
        model.validate()?;
        Ok(model)
    }

    /// Check that every entity is finite and fits the board
    ///
    /// Vertical paddle position is not checked; stepping clamps it.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let board = &self.board;

        for (what, v) in [
            ("ball position", self.ball.pos),
            ("ball velocity", self.ball.vel),
            ("left paddle position", self.left.pos),
            ("left paddle velocity", self.left.vel),
            ("right paddle position", self.right.pos),
            ("right paddle velocity", self.right.vel),
        ] {
            if !v.is_finite() {
                return Err(ValidationError::NonFinite { what });
            }
        }

        if 2.0 * self.ball.radius() >= board.height() {
            return Err(ValidationError::DoesNotFit {
                what: "ball diameter",
                size: 2.0 * self.ball.radius(),
                board: board.height(),
            });
        }

        for (what, paddle) in [("left paddle", &self.left), ("right paddle", &self.right)] {
            if paddle.height() > board.height() {
                return Err(ValidationError::DoesNotFit {
                    what: "paddle height",
                    size: paddle.height(),
                    board: board.height(),
                });
            }
            let x = paddle.pos.x;
            if x < 0.0 || paddle.max().x > board.width() {
                return Err(ValidationError::OffBoard {
                    what,
                    x,
                    width: board.width(),
                });
            }
        }

        if self.left.max().x >= self.right.min().x {
            return Err(ValidationError::DoesNotFit {
                what: "paddle spacing",
                size: self.right.min().x - self.left.max().x,
                board: board.width(),
            });
        }

        Ok(())
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

// Deserialization goes through the validating constructors.

#[derive(Deserialize)]
struct BoardFields {
    width: f32,
    height: f32,
}

impl TryFrom<BoardFields> for Board {
    type Error = ValidationError;

    fn try_from(fields: BoardFields) -> Result<Self, Self::Error> {
        Board::new(fields.width, fields.height)
    }
}

#[derive(Deserialize)]
struct BallFields {
    pos: Vec2,
    vel: Vec2,
    radius: f32,
}

impl TryFrom<BallFields> for Ball {
    type Error = ValidationError;

    fn try_from(fields: BallFields) -> Result<Self, Self::Error> {
        Ball::with_radius(fields.pos, fields.vel, fields.radius)
    }
}

#[derive(Deserialize)]
struct PaddleFields {
    pos: Vec2,
    vel: Vec2,
    width: f32,
    height: f32,
}

impl TryFrom<PaddleFields> for Paddle {
    type Error = ValidationError;

    fn try_from(fields: PaddleFields) -> Result<Self, Self::Error> {
        let mut paddle = Paddle::with_size(fields.pos, fields.width, fields.height)?;
        paddle.vel = fields.vel;
        Ok(paddle)
    }
}

#[derive(Deserialize)]
struct ModelFields {
    board: Board,
    ball: Ball,
    left: Paddle,
    right: Paddle,
}

impl TryFrom<ModelFields> for Model {
    type Error = ValidationError;

    fn try_from(fields: ModelFields) -> Result<Self, Self::Error> {
        let model = Model {
            board: fields.board,
            ball: fields.ball,
            left: fields.left,
            right: fields.right,
        };
        model.validate()?;
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_layout() {
        let model = Model::new();
        assert_eq!(model.ball.pos, Vec2::new(250.0, 150.0));
        assert!(model.ball.vel.x != 0.0 && model.ball.vel.y != 0.0);
        assert_eq!(model.left.pos, Vec2::new(20.0, 110.0));
        assert_eq!(model.right.pos.x, 475.0);
        assert_eq!(model.left.center_y(), model.board().center().y);
        assert_eq!(model.right.center_y(), model.board().center().y);
    }

    #[test]
    fn test_default_matches_config() {
        let from_config = Model::from_config(&Config::default()).expect("defaults are valid");
        assert_eq!(from_config, Model::new());
    }

    #[test]
    fn test_paddles_differ_only_by_offset() {
        let model = Model::new();
        assert_eq!(model.left.width(), model.right.width());
        assert_eq!(model.left.height(), model.right.height());
        assert_eq!(model.left.pos.y, model.right.pos.y);
        assert!(model.left.pos.x < model.right.pos.x);
    }

    #[test]
    fn test_board_rejects_non_positive() {
        assert!(matches!(
            Board::new(0.0, 300.0),
            Err(ValidationError::NonPositive {
                what: "board width",
                ..
            })
        ));
        assert!(matches!(
            Board::new(500.0, -1.0),
            Err(ValidationError::NonPositive {
                what: "board height",
                ..
            })
        ));
    }

    #[test]
    fn test_ball_rejects_bad_radius() {
        assert!(Ball::with_radius(Vec2::ZERO, Vec2::ZERO, 0.0).is_err());
        assert!(Ball::with_radius(Vec2::ZERO, Vec2::ZERO, -3.0).is_err());
        assert!(Ball::with_radius(Vec2::ZERO, Vec2::ZERO, f32::NAN).is_err());
        let ball = Ball::with_radius(Vec2::new(10.0, 20.0), Vec2::X, 4.0).unwrap();
        assert_eq!(ball.top(), 16.0);
        assert_eq!(ball.bottom(), 24.0);
    }

    #[test]
    fn test_paddle_rejects_bad_size() {
        assert!(Paddle::with_size(Vec2::ZERO, 0.0, 80.0).is_err());
        assert!(Paddle::with_size(Vec2::ZERO, 5.0, -80.0).is_err());
        let paddle = Paddle::with_size(Vec2::new(20.0, 110.0), 5.0, 80.0).unwrap();
        assert_eq!(paddle.max(), Vec2::new(25.0, 190.0));
        assert_eq!(paddle.y_range(&Board::default()), (0.0, 220.0));
    }

    #[test]
    fn test_model_rejects_oversized_ball() {
        let config = Config {
            ball_radius: 150.0,
            ..Default::default()
        };
        assert!(matches!(
            Model::from_config(&config),
            Err(ValidationError::DoesNotFit {
                what: "ball diameter",
                ..
            })
        ));
    }

    #[test]
    fn test_model_rejects_overlapping_paddles() {
        let config = Config {
            paddle_inset: 260.0,
            ..Default::default()
        };
        assert!(Model::from_config(&config).is_err());
    }

    #[test]
    fn test_crossed_side() {
        let board = Board::default();
        assert_eq!(board.crossed_side(-0.1), Some(Side::Left));
        assert_eq!(board.crossed_side(500.1), Some(Side::Right));
        assert_eq!(board.crossed_side(0.0), None);
        assert_eq!(board.crossed_side(500.0), None);
    }

    #[test]
    fn test_side_helpers() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.direction(), 1.0);
        let mut model = Model::new();
        model.paddle_mut(Side::Right).vel.y = 42.0;
        assert_eq!(model.paddle(Side::Right).vel.y, 42.0);
        assert_eq!(model.right.vel.y, 42.0);
    }

    #[test]
    fn test_deserialize_rejects_bad_ball_radius() {
        let err = serde_json::from_str::<Ball>(r#"{"pos":[0.0,0.0],"vel":[0.0,0.0],"radius":-3.0}"#)
            .unwrap_err();
        assert!(err.to_string().contains("ball radius must be positive"));

        let ball: Ball =
            serde_json::from_str(r#"{"pos":[10.0,20.0],"vel":[1.0,0.0],"radius":4.0}"#).unwrap();
        assert_eq!(ball.radius(), 4.0);
        assert_eq!(ball.pos, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_deserialize_rejects_bad_paddle_size() {
        let result = serde_json::from_str::<Paddle>(
            r#"{"pos":[20.0,110.0],"vel":[0.0,0.0],"width":0.0,"height":-80.0}"#,
        );
        assert!(result.is_err());

        let paddle: Paddle = serde_json::from_str(
            r#"{"pos":[20.0,110.0],"vel":[0.0,-30.0],"width":5.0,"height":80.0}"#,
        )
        .unwrap();
        assert_eq!(paddle.vel, Vec2::new(0.0, -30.0));
        assert_eq!(paddle.height(), 80.0);
    }

    #[test]
    fn test_deserialize_rejects_bad_board() {
        let result = serde_json::from_str::<Board>(r#"{"width":0.0,"height":-1.0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_model_runs_fit_checks() {
        let snapshot = serde_json::to_value(Model::new()).unwrap();
        let restored: Model = serde_json::from_value(snapshot.clone()).unwrap();
        assert_eq!(restored, Model::new());

        let mut tall = snapshot.clone();
        tall["left"]["height"] = serde_json::json!(400.0);
        let err = serde_json::from_value::<Model>(tall).unwrap_err();
        assert!(err.to_string().contains("paddle height"));

        let mut off_board = snapshot;
        off_board["right"]["pos"] = serde_json::json!([600.0, 110.0]);
        assert!(serde_json::from_value::<Model>(off_board).is_err());
    }

    #[test]
    fn test_validate_catches_swapped_entities() {
        let mut model = Model::new();
        assert_eq!(model.validate(), Ok(()));

        model.left = Paddle::with_size(Vec2::new(20.0, 0.0), 5.0, 400.0).unwrap();
        assert!(matches!(
            model.validate(),
            Err(ValidationError::DoesNotFit {
                what: "paddle height",
                ..
            })
        ));

        let mut model = Model::new();
        model.ball.vel.x = f32::NAN;
        assert_eq!(
            model.validate(),
            Err(ValidationError::NonFinite {
                what: "ball velocity"
            })
        );

        let mut model = Model::new();
        model.ball = Ball::with_radius(Vec2::new(250.0, 150.0), Vec2::ZERO, 150.0).unwrap();
        assert!(model.validate().is_err());
    }
}
