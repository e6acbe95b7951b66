//! Match state and core simulation types
//!
//! Everything one match mutates lives in [`SimulationState`]; the renderer
//! only ever sees the read-only [`Scene`] snapshot.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// One of the two players. Player one owns the left paddle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    #[serde(rename = "player-1")]
    One,
    #[serde(rename = "player-2")]
    Two,
}

impl Player {
    /// Stable identifier used by the menu collaborator
    pub fn as_str(&self) -> &'static str {
        match self {
            Player::One => "player-1",
            Player::Two => "player-2",
        }
    }

    /// Human-readable name for the HUD
    pub fn label(&self) -> &'static str {
        match self {
            Player::One => "Player 1",
            Player::Two => "Player 2",
        }
    }
}

/// Whether further ticks progress the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchPhase {
    #[default]
    Active,
    Ended,
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Velocity in pixels per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0),
            vel: Vec2::new(BALL_START_VX, BALL_START_VY),
            radius: BALL_RADIUS,
        }
    }
}

impl Ball {
    /// Advance position by one tick of velocity
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }

    /// Re-serve from the horizontal midpoint at height `y`, heading back the other way.
    /// Vertical velocity is kept.
    pub fn serve(&mut self, y: f32) {
        self.pos = Vec2::new(CANVAS_WIDTH / 2.0, y);
        self.vel.x = -self.vel.x;
    }

    pub fn is_finite(&self) -> bool {
        self.pos.is_finite() && self.vel.is_finite()
    }
}

/// A player's paddle. Only the vertical position moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub owner: Player,
    /// Top edge
    pub y: f32,
}

impl Paddle {
    /// Paddle vertically centered on the canvas
    pub fn new(owner: Player) -> Self {
        Self {
            owner,
            y: (CANVAS_HEIGHT - PADDLE_HEIGHT) / 2.0,
        }
    }

    /// Fixed left edge: flush with the owner's side of the canvas
    pub fn x(&self) -> f32 {
        match self.owner {
            Player::One => 0.0,
            Player::Two => CANVAS_WIDTH - PADDLE_WIDTH,
        }
    }

    /// Highest allowed `y` (paddle resting on the bottom edge)
    pub fn max_y() -> f32 {
        CANVAS_HEIGHT - PADDLE_HEIGHT
    }

    /// Move one step for the held controls.
    ///
    /// Both bounds are checked against the position at the start of the step,
    /// so holding up and down together leaves an interior paddle in place.
    pub fn step(&mut self, up: bool, down: bool) {
        let start = self.y;
        if up && start > 0.0 {
            self.y -= PADDLE_STEP;
        }
        if down && start < Self::max_y() {
            self.y += PADDLE_STEP;
        }
    }
}

/// Per-player point counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scores {
    pub player1: u32,
    pub player2: u32,
}

impl Scores {
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::One => self.player1,
            Player::Two => self.player2,
        }
    }

    /// Add one point for `player`, returning the new total
    pub fn award(&mut self, player: Player) -> u32 {
        let slot = match player {
            Player::One => &mut self.player1,
            Player::Two => &mut self.player2,
        };
        *slot += 1;
        *slot
    }

    /// The player whose score has reached `threshold`, if any.
    /// Player one is checked first; both cannot reach it on the same tick.
    pub fn reached(&self, threshold: u32) -> Option<Player> {
        if self.player1 >= threshold {
            Some(Player::One)
        } else if self.player2 >= threshold {
            Some(Player::Two)
        } else {
            None
        }
    }
}

/// Things that happened during a tick, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball reflected off the top or bottom edge
    WallBounce,
    /// Ball bounced off a paddle
    PaddleHit { player: Player },
    /// Ball left the canvas; `player` got the point
    PointScored { player: Player, scores: Scores },
    /// A score reached the win threshold
    MatchEnded { winner: Player },
}

/// Read-only snapshot for the render sink
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub ball: Ball,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
    pub scores: Scores,
    pub phase: MatchPhase,
    pub winner: Option<Player>,
}

/// Complete match state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Seed the RNG was created from
    pub seed: u64,
    rng: Pcg32,
    pub ball: Ball,
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
    pub scores: Scores,
    pub phase: MatchPhase,
    /// Ticks advanced since the last reset
    pub time_ticks: u64,
}

impl SimulationState {
    /// Create a fresh match with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            ball: Ball::default(),
            left_paddle: Paddle::new(Player::One),
            right_paddle: Paddle::new(Player::Two),
            scores: Scores::default(),
            phase: MatchPhase::Active,
            time_ticks: 0,
        }
    }

    /// Restore every entity to its starting value in one step.
    /// The RNG stream carries on, so the next match serves differently.
    pub fn reset(&mut self) {
        let rng = self.rng.clone();
        *self = Self {
            rng,
            ..Self::new(self.seed)
        };
    }

    /// Reset and reseed, for reproducible restarts
    pub fn reset_with_seed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    pub fn paddle(&self, player: Player) -> &Paddle {
        match player {
            Player::One => &self.left_paddle,
            Player::Two => &self.right_paddle,
        }
    }

    pub fn paddle_mut(&mut self, player: Player) -> &mut Paddle {
        match player {
            Player::One => &mut self.left_paddle,
            Player::Two => &mut self.right_paddle,
        }
    }

    /// Winner of the match; only set once the match has ended
    pub fn winner(&self) -> Option<Player> {
        match self.phase {
            MatchPhase::Ended => self.scores.reached(WIN_SCORE),
            MatchPhase::Active => None,
        }
    }

    /// Uniform draw in [-1, 1) used to perturb the bounce angle
    pub(crate) fn draw_perturbation(&mut self) -> f32 {
        self.rng.random_range(-1.0..1.0)
    }

    /// Uniform serve height keeping the whole ball on the canvas
    pub(crate) fn draw_serve_y(&mut self) -> f32 {
        let r = self.ball.radius;
        self.rng.random_range(r..CANVAS_HEIGHT - r)
    }

    pub fn scene(&self) -> Scene {
        Scene {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            ball: self.ball,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            left_paddle: self.left_paddle,
            right_paddle: self.right_paddle,
            scores: self.scores,
            phase: self.phase,
            winner: self.winner(),
        }
    }
}
