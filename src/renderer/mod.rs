//! Canvas rendering module
//!
//! `shapes` turns a [`Scene`](crate::sim::Scene) into plain draw commands;
//! `canvas` replays them on a 2D context in the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::paint;
pub use shapes::{DrawCmd, scene_commands, winner_text};
