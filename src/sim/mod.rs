//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{bounce_off_paddle, crosses_wall, exited_side, hits_paddle};
pub use state::{Ball, GameEvent, MatchPhase, Paddle, Player, Scene, Scores, SimulationState};
pub use tick::{Control, TickInput, tick};
