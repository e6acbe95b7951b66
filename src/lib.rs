//! Duel Pong - two-player canvas Pong
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball, paddles, scoring, win check)
//! - `controller`: Match ownership, reset/winner queries and event fan-out
//! - `renderer`: Scene to draw-command conversion (plus the canvas painter on web)
//! - `platform`: Keyboard glue between key events and tick input
//! - `settings`: Key bindings and launch preferences

pub mod controller;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use controller::{MatchController, run_until_ended};
pub use settings::{KeyBindings, Settings};

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions (pixels)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 400.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 80.0;
    /// Vertical distance a paddle travels per tick while its key is held
    pub const PADDLE_STEP: f32 = 5.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_START_VX: f32 = 4.0;
    pub const BALL_START_VY: f32 = 4.0;

    /// Vertical speed bounds applied after every paddle bounce
    pub const BALL_MIN_VY: f32 = 2.0;
    pub const BALL_MAX_VY: f32 = 6.0;

    /// Score that ends the match
    pub const WIN_SCORE: u32 = 15;
}
