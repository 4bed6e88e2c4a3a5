//! Mini Pinball - a two-flipper pinball table for the browser canvas
//!
//! Core modules:
//! - `sim`: Simulation (physics, collisions, round/score bookkeeping)
//! - `renderer`: Display-list renderer (canvas replay on wasm)
//! - `driver`: Per-frame loop driver shared by the wasm and native hosts
//! - `settings`: Host-supplied display preferences
//! - `palette`: Colors shared by the simulation and the renderer

pub mod driver;
pub mod palette;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::{Driver, FrameSink};
pub use palette::Color;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
///
/// Units are canvas pixels and simulation steps (one step per display frame).
pub mod consts {
    /// Reference playfield width used to scale flipper pivots
    pub const REFERENCE_WIDTH: f32 = 400.0;
    /// Default playfield size before the host reports its viewport
    pub const DEFAULT_WIDTH: f32 = 400.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;

    /// Balls at the start of a game
    pub const STARTING_BALLS: u8 = 3;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Launch point offset above the bottom edge
    pub const BALL_LAUNCH_OFFSET_Y: f32 = 150.0;
    /// Launch velocity: x is (rand - 0.5) * spread, y is fixed upward
    pub const BALL_LAUNCH_SPREAD_X: f32 = 4.0;
    pub const BALL_LAUNCH_VEL_Y: f32 = -8.0;

    /// Downward acceleration per step
    pub const GRAVITY: f32 = 0.2;
    /// Velocity kept after a wall bounce
    pub const RESTITUTION: f32 = 0.8;
    /// How far below the bottom edge the ball must fall to drain
    pub const DRAIN_MARGIN: f32 = 50.0;

    /// Flipper defaults
    pub const FLIPPER_WIDTH: f32 = 60.0;
    pub const FLIPPER_HEIGHT: f32 = 8.0;
    pub const FLIPPER_PIVOT_INSET: f32 = 120.0;
    pub const FLIPPER_PIVOT_OFFSET_Y: f32 = 80.0;
    pub const FLIPPER_REST_ANGLE: f32 = 0.3;
    pub const FLIPPER_ACTIVE_ANGLE: f32 = 0.8;
    /// Fraction of the remaining angle gap closed per step
    pub const FLIPPER_RELAXATION: f32 = 0.3;
    /// Impulse per radian of remaining flipper travel
    pub const FLIPPER_IMPULSE: f32 = 20.0;
    /// Speed cap after a flipper hit
    pub const FLIPPER_MAX_SPEED: f32 = 15.0;

    /// Speed the ball leaves a struck target with
    pub const TARGET_BOUNCE_SPEED: f32 = 8.0;
    /// Bonus for clearing a whole target set
    pub const CLEAR_BONUS: u64 = 500;

    /// Particle burst
    pub const PARTICLES_PER_BURST: usize = 10;
    pub const PARTICLE_SPREAD: f32 = 10.0;
    pub const PARTICLE_GRAVITY: f32 = 0.3;
    pub const PARTICLE_DECAY: f32 = 0.02;
    pub const PARTICLE_SIZE: f32 = 4.0;

    /// Delayed actions (milliseconds)
    pub const GAME_OVER_DELAY_MS: f64 = 500.0;
    pub const RESPAWN_DELAY_MS: f64 = 1000.0;
}

/// Unit vector for an angle in radians
#[inline]
pub fn unit_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Left-hand normal of a segment rotated by `theta`: (-sin θ, cos θ)
#[inline]
pub fn normal_from_angle(theta: f32) -> Vec2 {
    Vec2::new(-theta.sin(), theta.cos())
}
