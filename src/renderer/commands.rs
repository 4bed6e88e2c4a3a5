//! Display list types
//!
//! A frame is a flat list of 2D drawing commands in canvas coordinates. The
//! web host replays it on a canvas; tests inspect it directly.

use glam::Vec2;

use crate::palette::Color;

/// How a shape is filled
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Vertical gradient from `top` at y = `y0` to `bottom` at y = `y1`
    Vertical {
        y0: f32,
        y1: f32,
        top: Color,
        bottom: Color,
    },
    /// Radial gradient from `inner` at the shape center to `outer` at its edge
    Radial { inner: Color, outer: Color },
}

/// One drawing command
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Axis-aligned rectangle
    Rect {
        pos: Vec2,
        size: Vec2,
        paint: Paint,
    },
    /// Rectangle in a frame translated to `origin` and rotated by `angle`
    RotatedRect {
        origin: Vec2,
        angle: f32,
        offset: Vec2,
        size: Vec2,
        paint: Paint,
    },
    Circle {
        center: Vec2,
        radius: f32,
        paint: Paint,
    },
    /// Horizontally centered text
    Text {
        text: String,
        pos: Vec2,
        size_px: f32,
        color: Color,
    },
}

/// Everything drawn in one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn circles(&self) -> impl Iterator<Item = (&Vec2, &f32, &Paint)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Circle {
                center,
                radius,
                paint,
            } => Some((center, radius, paint)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
