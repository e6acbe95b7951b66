//! Replays draw commands on a browser 2D canvas context

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::shapes::{DrawCmd, INK, SCORE_FONT};

pub fn paint(ctx: &CanvasRenderingContext2d, cmds: &[DrawCmd]) {
    ctx.set_stroke_style_str(INK);
    ctx.set_fill_style_str(INK);
    ctx.set_font(SCORE_FONT);

    for cmd in cmds {
        match cmd {
            DrawCmd::Clear { width, height } => {
                ctx.clear_rect(0.0, 0.0, *width as f64, *height as f64);
            }
            DrawCmd::Line { from, to } => {
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
            }
            DrawCmd::Text { text, at } => {
                if let Err(e) = ctx.fill_text(text, at.x as f64, at.y as f64) {
                    log::warn!("fill_text failed: {:?}", e);
                }
            }
            DrawCmd::Rect {
                x,
                y,
                width,
                height,
            } => {
                ctx.fill_rect(*x as f64, *y as f64, *width as f64, *height as f64);
            }
            DrawCmd::Circle { center, radius } => {
                ctx.begin_path();
                if let Err(e) = ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU) {
                    log::warn!("arc failed: {:?}", e);
                }
                ctx.fill();
                ctx.close_path();
            }
        }
    }
}
