//! Control intents and how they change the world
//!
//! Hosts translate raw events (keys, touches, clicks) into [`Intent`]s; the
//! tick applies them before stepping physics.

use serde::{Deserialize, Serialize};

use super::state::{FlipperSide, GamePhase, World};

/// A discrete control intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    ActivateLeft,
    DeactivateLeft,
    ActivateRight,
    DeactivateRight,
    Start,
    Reset,
}

impl Intent {
    /// The flipper intent for a side and press state
    pub fn flipper(side: FlipperSide, pressed: bool) -> Self {
        match (side, pressed) {
            (FlipperSide::Left, true) => Intent::ActivateLeft,
            (FlipperSide::Left, false) => Intent::DeactivateLeft,
            (FlipperSide::Right, true) => Intent::ActivateRight,
            (FlipperSide::Right, false) => Intent::DeactivateRight,
        }
    }
}

/// Map a `KeyboardEvent.code` to a flipper intent
pub fn intent_for_key(code: &str, pressed: bool) -> Option<Intent> {
    let side = match code {
        "KeyA" | "ArrowLeft" => FlipperSide::Left,
        "KeyD" | "ArrowRight" => FlipperSide::Right,
        _ => return None,
    };
    Some(Intent::flipper(side, pressed))
}

/// Map a press/release on an on-screen flipper zone
pub fn intent_for_zone(zone: FlipperSide, pressed: bool) -> Intent {
    Intent::flipper(zone, pressed)
}

/// Apply one intent. Intents that don't fit the current phase are ignored.
pub fn apply_intent(world: &mut World, intent: Intent) {
    match intent {
        Intent::ActivateLeft => set_flipper(world, FlipperSide::Left, true),
        Intent::DeactivateLeft => set_flipper(world, FlipperSide::Left, false),
        Intent::ActivateRight => set_flipper(world, FlipperSide::Right, true),
        Intent::DeactivateRight => set_flipper(world, FlipperSide::Right, false),
        Intent::Start => {
            if world.phase == GamePhase::Waiting {
                world.start_round();
            } else {
                log::trace!("Start ignored in {:?}", world.phase);
            }
        }
        Intent::Reset => world.new_game(),
    }
}

fn set_flipper(world: &mut World, side: FlipperSide, pressed: bool) {
    if world.phase != GamePhase::Playing {
        return;
    }
    world.flipper_mut(side).set_pressed(pressed);
}
