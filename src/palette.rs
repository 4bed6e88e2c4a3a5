//! Colors for game elements
//!
//! Colors are carried by simulation entities for display only; nothing in
//! `sim` reads them back.

use serde::{Deserialize, Serialize};

/// 8-bit RGB with a float alpha, matching what a 2D canvas accepts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build from a 0xRRGGBB literal
    pub const fn hex(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xff) as u8,
            ((rgb >> 8) & 0xff) as u8,
            (rgb & 0xff) as u8,
        )
    }

    /// Same color with a new alpha, clamped to [0, 1]
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// CSS color string for canvas fill styles
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

pub const RED: Color = Color::hex(0xe74c3c);
pub const BLUE: Color = Color::hex(0x3498db);
pub const ORANGE: Color = Color::hex(0xf39c12);
pub const PURPLE: Color = Color::hex(0x9b59b6);
pub const TEAL: Color = Color::hex(0x1abc9c);
pub const GREEN: Color = Color::hex(0x27ae60);
pub const WHITE: Color = Color::rgb(255, 255, 255);

/// Target colors, cycled by index within a row
pub const TARGET_COLORS: [Color; 5] = [RED, BLUE, ORANGE, PURPLE, TEAL];

pub const BALL: Color = ORANGE;
pub const LEFT_FLIPPER: Color = RED;
pub const RIGHT_FLIPPER: Color = GREEN;

pub const BACKGROUND_FADE: Color = Color::rgba(26, 26, 46, 0.1);
pub const BACKGROUND: Color = Color::rgb(26, 26, 46);
pub const GRADIENT_TOP: Color = Color::rgba(52, 73, 94, 0.1);
pub const GRADIENT_BOTTOM: Color = Color::rgba(22, 33, 62, 0.1);
pub const FLIPPER_HIGHLIGHT: Color = Color::rgba(255, 255, 255, 0.3);
pub const BALL_GLOW: Color = Color::rgba(255, 255, 255, 0.8);
pub const PROMPT_TEXT: Color = Color::rgba(255, 255, 255, 0.8);
