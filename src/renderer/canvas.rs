//! Replay a display list on a 2D canvas context

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::commands::{DrawCommand, Frame, Paint};

const FONT_FAMILY: &str = "Arial";

/// Draws frames onto a `CanvasRenderingContext2d`
pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    pub fn paint(&self, frame: &Frame) -> Result<(), JsValue> {
        for command in &frame.commands {
            self.draw(command)?;
        }
        self.ctx.set_global_alpha(1.0);
        Ok(())
    }

    fn draw(&self, command: &DrawCommand) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match command {
            DrawCommand::Rect { pos, size, paint } => {
                self.set_fill(paint, pos.x, pos.y, size.x.min(size.y) / 2.0)?;
                ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
            }
            DrawCommand::RotatedRect {
                origin,
                angle,
                offset,
                size,
                paint,
            } => {
                ctx.save();
                ctx.translate(origin.x as f64, origin.y as f64)?;
                ctx.rotate(*angle as f64)?;
                self.set_fill(paint, offset.x, offset.y, size.y / 2.0)?;
                ctx.fill_rect(
                    offset.x as f64,
                    offset.y as f64,
                    size.x as f64,
                    size.y as f64,
                );
                ctx.restore();
            }
            DrawCommand::Circle {
                center,
                radius,
                paint,
            } => {
                self.set_fill(paint, center.x, center.y, *radius)?;
                ctx.begin_path();
                ctx.arc(
                    center.x as f64,
                    center.y as f64,
                    *radius as f64,
                    0.0,
                    std::f64::consts::TAU,
                )?;
                ctx.fill();
            }
            DrawCommand::Text {
                text,
                pos,
                size_px,
                color,
            } => {
                ctx.set_global_alpha(1.0);
                ctx.set_fill_style_str(&color.to_css());
                ctx.set_font(&format!("{}px {}", size_px, FONT_FAMILY));
                ctx.set_text_align("center");
                ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
            }
        }
        Ok(())
    }

    /// Set the fill style. `cx`, `cy`, `r` locate radial gradients.
    fn set_fill(&self, paint: &Paint, cx: f32, cy: f32, r: f32) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match paint {
            Paint::Solid(color) => {
                ctx.set_global_alpha(color.a as f64);
                ctx.set_fill_style_str(&color.with_alpha(1.0).to_css());
            }
            Paint::Vertical {
                y0,
                y1,
                top,
                bottom,
            } => {
                ctx.set_global_alpha(1.0);
                let gradient = ctx.create_linear_gradient(0.0, *y0 as f64, 0.0, *y1 as f64);
                gradient.add_color_stop(0.0, &top.to_css())?;
                gradient.add_color_stop(1.0, &bottom.to_css())?;
                ctx.set_fill_style_canvas_gradient(&gradient);
            }
            Paint::Radial { inner, outer } => {
                ctx.set_global_alpha(1.0);
                let (cx, cy) = (cx as f64, cy as f64);
                let gradient = ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, r as f64)?;
                gradient.add_color_stop(0.0, &inner.to_css())?;
                gradient.add_color_stop(1.0, &outer.to_css())?;
                ctx.set_fill_style_canvas_gradient(&gradient);
            }
        }
        Ok(())
    }
}
