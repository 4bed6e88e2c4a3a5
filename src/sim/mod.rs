//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One step per host frame, no wall-clock reads (time comes in via `TickInput`)
//! - Seeded RNG only
//! - Stable iteration order (targets in layout order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod schedule;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, reflect_velocity};
pub use input::{Intent, apply_intent, intent_for_key, intent_for_zone};
pub use schedule::{ActionKind, ScheduledAction};
pub use state::{
    Ball, Flipper, FlipperSide, GameEvent, GamePhase, Particle, Target, World, target_layout,
};
pub use tick::{TickInput, tick};
