//! Loop driver
//!
//! Owns the world and runs one tick plus one render per host frame. The host
//! decides the cadence (`requestAnimationFrame` on the web, a fixed clock in
//! the native runner) and receives output through a [`FrameSink`].

use crate::renderer::{Frame, build_frame};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, Intent, TickInput, World, tick};

/// Host side of the loop: where frames and notifications go
pub trait FrameSink {
    /// Present a rendered frame
    fn draw(&mut self, frame: &Frame);

    /// Score or ball count changed
    fn hud(&mut self, _score: u64, _balls: u8) {}

    /// The game ended; called while the finished table is still on screen
    fn game_over(&mut self, _final_score: u64) {}

    fn phase_changed(&mut self, _phase: GamePhase) {}
}

/// One table plus the intents queued since the last frame
pub struct Driver {
    world: World,
    settings: Settings,
    intents: Vec<Intent>,
    frames: u64,
}

impl Driver {
    pub fn new(width: f32, height: f32, seed: u64, settings: Settings) -> Self {
        let seed = settings.seed.unwrap_or(seed);
        log::info!("Table {}x{} with seed {}", width, height, seed);
        Self {
            world: World::new(width, height, seed),
            settings,
            intents: Vec::new(),
            frames: 0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Queue an intent for the next frame
    pub fn push_intent(&mut self, intent: Intent) {
        self.intents.push(intent);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.world.resize(width, height);
    }

    /// Run one frame: tick, render, then report events to the host
    pub fn frame(&mut self, now_ms: f64, sink: &mut impl FrameSink) {
        let input = TickInput {
            now_ms,
            intents: std::mem::take(&mut self.intents),
        };
        tick(&mut self.world, &input);

        let frame = build_frame(&self.world, &self.settings);
        sink.draw(&frame);

        // The host sees the final table before the game-over reset
        self.report(sink);
        if self.world.finish_game_over() {
            self.report(sink);
        }

        self.frames += 1;
    }

    fn report(&mut self, sink: &mut impl FrameSink) {
        let mut hud_dirty = false;
        for event in self.world.drain_events() {
            match event {
                GameEvent::ScoreChanged { .. } | GameEvent::BallsChanged { .. } => {
                    hud_dirty = true;
                }
                GameEvent::GameOver { final_score } => sink.game_over(final_score),
                GameEvent::PhaseChanged { phase } => sink.phase_changed(phase),
                GameEvent::TargetHit { .. }
                | GameEvent::BallLost { .. }
                | GameEvent::TargetsRespawned { .. } => {}
            }
        }
        if hud_dirty {
            sink.hud(self.world.score, self.world.balls);
        }
    }
}
