//! Collision tests and bounce response
//!
//! The paddle test is deliberately coarse: one threshold on the ball's leading
//! edge plus a range check on its center. A ball that stays past the threshold
//! keeps re-triggering it every tick, and a fast ball can tunnel through.

use glam::Vec2;

use super::state::{Ball, Paddle, Player};
use crate::consts::*;

/// Ball extends past the top or bottom edge of the canvas
pub fn crosses_wall(ball: &Ball) -> bool {
    ball.pos.y - ball.radius < 0.0 || ball.pos.y + ball.radius > CANVAS_HEIGHT
}

/// Ball overlaps the paddle's face.
///
/// The center must lie strictly between the paddle's top and bottom edges;
/// a ball centered exactly on an edge misses.
pub fn hits_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    let past_face = match paddle.owner {
        Player::One => ball.pos.x - ball.radius < PADDLE_WIDTH,
        Player::Two => ball.pos.x + ball.radius > CANVAS_WIDTH - PADDLE_WIDTH,
    };
    past_face && ball.pos.y > paddle.y && ball.pos.y < paddle.y + PADDLE_HEIGHT
}

/// Which side, if any, the ball has fully left through.
/// Returns the player who earns the point.
pub fn exited_side(ball: &Ball) -> Option<Player> {
    if ball.pos.x + ball.radius < 0.0 {
        Some(Player::Two)
    } else if ball.pos.x - ball.radius > CANVAS_WIDTH {
        Some(Player::One)
    } else {
        None
    }
}

/// Reverse horizontal travel and perturb the vertical speed by `draw`.
///
/// The resulting |vy| is clamped into [BALL_MIN_VY, BALL_MAX_VY] keeping its
/// sign. A vertical speed of exactly zero counts as positive.
pub fn bounce_off_paddle(vel: Vec2, draw: f32) -> Vec2 {
    Vec2::new(-vel.x, clamp_vertical(vel.y + draw))
}

fn clamp_vertical(vy: f32) -> f32 {
    if !vy.is_finite() {
        return BALL_MIN_VY;
    }
    let sign = if vy < 0.0 { -1.0 } else { 1.0 };
    if vy.abs() < BALL_MIN_VY {
        BALL_MIN_VY * sign
    } else if vy.abs() > BALL_MAX_VY {
        BALL_MAX_VY * sign
    } else {
        vy
    }
}
