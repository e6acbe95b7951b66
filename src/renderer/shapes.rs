//! Draw-command generation for the 2D scene

use glam::Vec2;
use serde::Serialize;

use crate::settings::Settings;
use crate::sim::{Player, Scene};

/// Single ink color used for every shape
pub const INK: &str = "#333";
/// Score label font
pub const SCORE_FONT: &str = "20px Arial";

/// One primitive for the painter, in canvas pixels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCmd {
    Clear { width: f32, height: f32 },
    Line { from: Vec2, to: Vec2 },
    Text { text: String, at: Vec2 },
    Rect { x: f32, y: f32, width: f32, height: f32 },
    Circle { center: Vec2, radius: f32 },
}

/// Score label for a player, e.g. "Player 1: 3"
pub fn score_label(scene: &Scene, player: Player) -> String {
    format!("{}: {}", player.label(), scene.scores.get(player))
}

/// Commands for one frame, back to front
pub fn scene_commands(scene: &Scene, settings: &Settings) -> Vec<DrawCmd> {
    let mut cmds = Vec::with_capacity(7);

    cmds.push(DrawCmd::Clear {
        width: scene.width,
        height: scene.height,
    });

    if settings.show_center_line {
        let mid = scene.width / 2.0;
        cmds.push(DrawCmd::Line {
            from: Vec2::new(mid, 0.0),
            to: Vec2::new(mid, scene.height),
        });
    }

    cmds.push(DrawCmd::Text {
        text: score_label(scene, Player::One),
        at: Vec2::new(50.0, 30.0),
    });
    cmds.push(DrawCmd::Text {
        text: score_label(scene, Player::Two),
        at: Vec2::new(scene.width - 150.0, 30.0),
    });

    for paddle in [&scene.left_paddle, &scene.right_paddle] {
        cmds.push(DrawCmd::Rect {
            x: paddle.x(),
            y: paddle.y,
            width: scene.paddle_width,
            height: scene.paddle_height,
        });
    }

    cmds.push(DrawCmd::Circle {
        center: scene.ball.pos,
        radius: scene.ball.radius,
    });

    cmds
}

/// Menu text announcing `winner`
pub fn winner_text(winner: Player) -> String {
    format!("{} wins!", winner.label())
}
