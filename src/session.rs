//! Fixed-timestep session driver
//!
//! Owns the model and is the only caller of `advance`. Real elapsed time is
//! accumulated and consumed in `SIM_DT` slices, which keeps per-step ball
//! travel far below the ball radius regardless of display refresh rate.
//! Misses reported by the simulation are scored here and the ball re-served.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::Config;
use crate::consts::*;
use crate::controller::{Idle, PaddleController};
use crate::error::{InvalidInputError, ValidationError};
use crate::sim::{Model, Side, advance};

/// Largest angle (radians) between a serve and the horizontal
const MAX_SERVE_ANGLE: f32 = std::f32::consts::FRAC_PI_4;

/// Points won by each side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn total(&self) -> u32 {
        self.left + self.right
    }
}

/// What happened during one display frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Simulation steps run
    pub steps: u32,
    /// Side that conceded, once per miss, in order
    pub misses: Vec<Side>,
    pub paddle_hits: u32,
    pub wall_hits: u32,
    /// Backlog discarded because the substep cap was reached (seconds)
    pub dropped: f32,
}

/// A running game: model, controllers, score and serve RNG
pub struct Session {
    config: Config,
    model: Model,
    score: Score,
    rng: Pcg32,
    accumulator: f32,
    left: Box<dyn PaddleController>,
    right: Box<dyn PaddleController>,
}

impl Session {
    /// Create a session with idle paddles
    pub fn new(config: Config, seed: u64) -> Result<Self, ValidationError> {
        let model = Model::from_config(&config)?;
        log::info!(
            "Session started: board {}x{}, seed {}",
            model.board().width(),
            model.board().height(),
            seed
        );
        Ok(Self {
            config,
            model,
            score: Score::default(),
            rng: Pcg32::seed_from_u64(seed),
            accumulator: 0.0,
            left: Box::new(Idle),
            right: Box::new(Idle),
        })
    }

    pub fn with_controllers(
        mut self,
        left: impl PaddleController + 'static,
        right: impl PaddleController + 'static,
    ) -> Self {
        self.left = Box::new(left);
        self.right = Box::new(right);
        self
    }

    pub fn set_controller(&mut self, side: Side, controller: Box<dyn PaddleController>) {
        match side {
            Side::Left => self.left = controller,
            Side::Right => self.right = controller,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Direct access for drivers that apply their own intents
    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Consume one display frame's worth of elapsed time (seconds)
    pub fn frame(&mut self, elapsed: f32) -> Result<FrameReport, InvalidInputError> {
        if !elapsed.is_finite() {
            return Err(InvalidInputError::NonFiniteDelta(elapsed));
        }
        if elapsed < 0.0 {
            return Err(InvalidInputError::NegativeDelta(elapsed));
        }

        self.accumulator += elapsed.min(MAX_FRAME_DT);

        let mut report = FrameReport::default();
        while self.accumulator >= SIM_DT && report.steps < MAX_SUBSTEPS {
            self.step(SIM_DT, &mut report)?;
            self.accumulator -= SIM_DT;
            report.steps += 1;
        }

        if self.accumulator >= SIM_DT {
            let kept = self.accumulator % SIM_DT;
            report.dropped = self.accumulator - kept;
            self.accumulator = kept;
            log::debug!("Dropped {:.4}s of simulation backlog", report.dropped);
        }

        Ok(report)
    }

    fn step(&mut self, dt: f32, report: &mut FrameReport) -> Result<(), InvalidInputError> {
        self.apply_controllers();

        let step = advance(&self.model, dt)?;
        self.model = step.model;

        if step.contacts.wall {
            report.wall_hits += 1;
        }
        if let Some(side) = step.contacts.paddle {
            report.paddle_hits += 1;
            log::trace!("{:?} paddle returned the ball", side);
        }
        if let Some(side) = step.crossing {
            report.misses.push(side);
            self.concede(side);
        }
        Ok(())
    }

    fn apply_controllers(&mut self) {
        let board = *self.model.board();
        let ball = self.model.ball;
        self.model.left.vel.y = self
            .left
            .vertical_velocity(&self.model.left, &ball, &board);
        self.model.right.vel.y = self
            .right
            .vertical_velocity(&self.model.right, &ball, &board);
    }

    fn concede(&mut self, side: Side) {
        self.score.award(side.opposite());
        log::info!(
            "{:?} side missed, score {} - {}",
            side,
            self.score.left,
            self.score.right
        );
        self.serve(side);
    }

    /// Put the ball back in the centre, heading toward `toward`
    pub fn serve(&mut self, toward: Side) {
        let angle = self.rng.random_range(-MAX_SERVE_ANGLE..=MAX_SERVE_ANGLE);
        let direction = Vec2::new(toward.direction() * angle.cos(), angle.sin());
        self.model.ball.pos = self.model.board().center();
        self.model.ball.vel = direction * self.config.serve_speed();
    }
}
