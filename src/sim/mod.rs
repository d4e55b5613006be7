//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through the `dt` argument of `advance`
//! - No RNG, no global state
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, ball_paddle_collision, ball_wall_collision, reflect_velocity};
pub use state::{Ball, Board, Model, Paddle, Side};
pub use tick::{Contacts, Step, advance};
