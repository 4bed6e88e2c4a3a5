//! Game state and core simulation types
//!
//! The whole table lives in one [`World`] value owned by the driver and
//! passed explicitly to input handling, the tick, and the renderer.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::schedule::{ActionKind, Scheduler};
use crate::consts::*;
use crate::palette::{self, Color};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first start and after every reset
    #[default]
    Waiting,
    /// Ball in play
    Playing,
    /// Out of balls; resets to Waiting after a short delay
    GameOver,
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            color: palette::BALL,
        }
    }
}

/// Which flipper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipperSide {
    Left,
    Right,
}

impl FlipperSide {
    /// Angle the flipper relaxes to when released
    pub fn rest_angle(self) -> f32 {
        match self {
            FlipperSide::Left => -FLIPPER_REST_ANGLE,
            FlipperSide::Right => FLIPPER_REST_ANGLE,
        }
    }

    /// Angle the flipper swings to while held
    pub fn active_angle(self) -> f32 {
        match self {
            FlipperSide::Left => -FLIPPER_ACTIVE_ANGLE,
            FlipperSide::Right => FLIPPER_ACTIVE_ANGLE,
        }
    }
}

/// A flipper arm pivoting at `pos`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flipper {
    pub side: FlipperSide,
    /// Pivot position
    pub pos: Vec2,
    /// Current angle (radians)
    pub angle: f32,
    /// Angle the flipper is relaxing toward
    pub target_angle: f32,
    /// Arm length from the pivot
    pub width: f32,
    /// Arm thickness
    pub height: f32,
    pub color: Color,
}

impl Flipper {
    pub fn new(side: FlipperSide, pos: Vec2) -> Self {
        let color = match side {
            FlipperSide::Left => palette::LEFT_FLIPPER,
            FlipperSide::Right => palette::RIGHT_FLIPPER,
        };
        Self {
            side,
            pos,
            angle: side.rest_angle(),
            target_angle: side.rest_angle(),
            width: FLIPPER_WIDTH,
            height: FLIPPER_HEIGHT,
            color,
        }
    }

    /// Close a fixed fraction of the gap to the target angle.
    ///
    /// Exponential approach: the angle never overshoots and never snaps.
    pub fn relax(&mut self) {
        self.angle += (self.target_angle - self.angle) * FLIPPER_RELAXATION;
    }

    /// Remaining travel toward the target, used as the flipper's "speed"
    pub fn remaining_travel(&self) -> f32 {
        (self.target_angle - self.angle).abs()
    }

    pub fn set_pressed(&mut self, pressed: bool) {
        self.target_angle = if pressed {
            self.side.active_angle()
        } else {
            self.side.rest_angle()
        };
    }

    pub fn is_pressed(&self) -> bool {
        self.target_angle == self.side.active_angle()
    }

    /// Snap both angles back to rest (new game only)
    pub fn reset(&mut self) {
        self.angle = self.side.rest_angle();
        self.target_angle = self.side.rest_angle();
    }
}

/// A circular scoring target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
    pub points: u64,
    pub active: bool,
}

/// Target rows: (count, first x, x spacing, y, radius, points)
const TARGET_ROWS: [(usize, f32, f32, f32, f32, u64); 2] = [
    (5, 50.0, 60.0, 100.0, 15.0, 100),
    (3, 100.0, 80.0, 200.0, 20.0, 200),
];

/// Build a fresh target set (5 top, 3 middle, all active)
pub fn target_layout() -> Vec<Target> {
    let mut targets = Vec::with_capacity(TARGET_ROWS.iter().map(|row| row.0).sum());
    for &(count, x0, dx, y, radius, points) in &TARGET_ROWS {
        for i in 0..count {
            targets.push(Target {
                pos: Vec2::new(x0 + i as f32 * dx, y),
                radius,
                color: palette::TARGET_COLORS[i % palette::TARGET_COLORS.len()],
                points,
                active: true,
            });
        }
    }
    targets
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    /// 1.0 at spawn, removed once <= 0
    pub life: f32,
}

/// Notifications for the host (HUD, alerts)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged { score: u64 },
    BallsChanged { balls: u8 },
    TargetHit { index: usize, points: u64 },
    BallLost { remaining: u8 },
    GameOver { final_score: u64 },
    TargetsRespawned { bonus: u64 },
    PhaseChanged { phase: GamePhase },
}

/// Complete table state
#[derive(Debug, Clone)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    pub width: f32,
    pub height: f32,
    pub ball: Ball,
    pub left: Flipper,
    pub right: Flipper,
    /// Targets in layout order
    pub targets: Vec<Target>,
    pub particles: Vec<Particle>,
    pub score: u64,
    pub balls: u8,
    pub phase: GamePhase,
    /// Bumped on every reset; delayed actions from older epochs are dropped
    pub epoch: u64,
    pub(crate) scheduler: Scheduler,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
    /// Game over was announced; the reset waits for the host to show it
    reset_pending: bool,
}

impl World {
    /// Create a table for a `width` x `height` viewport
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        let mut world = Self {
            seed,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            ball: Ball::default(),
            // Pivots are placed by resize below
            left: Flipper::new(FlipperSide::Left, Vec2::ZERO),
            right: Flipper::new(FlipperSide::Right, Vec2::ZERO),
            targets: target_layout(),
            particles: Vec::new(),
            score: 0,
            balls: STARTING_BALLS,
            phase: GamePhase::Waiting,
            epoch: 0,
            scheduler: Scheduler::default(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            reset_pending: false,
        };
        world.resize(width, height);
        world
    }

    /// Reset to a fresh game in the Waiting phase
    pub fn new_game(&mut self) {
        self.reset_pending = false;
        self.epoch += 1;
        self.scheduler.clear();
        self.score = 0;
        self.balls = STARTING_BALLS;
        self.create_targets();
        self.particles.clear();
        self.left.reset();
        self.right.reset();
        self.set_phase(GamePhase::Waiting);
        self.push_event(GameEvent::ScoreChanged { score: self.score });
        self.push_event(GameEvent::BallsChanged { balls: self.balls });
        log::info!("New game (epoch {})", self.epoch);
    }

    /// Mark the announced game over for reset by [`World::finish_game_over`]
    pub(crate) fn defer_reset(&mut self) {
        self.reset_pending = true;
    }

    /// Whether a game over was announced but the table is not reset yet
    pub fn reset_pending(&self) -> bool {
        self.reset_pending
    }

    /// Run the reset held back after a game over. Returns true if one ran.
    pub fn finish_game_over(&mut self) -> bool {
        if !self.reset_pending {
            return false;
        }
        self.new_game();
        true
    }

    /// Enter Playing and launch the ball
    pub fn start_round(&mut self) {
        self.set_phase(GamePhase::Playing);
        self.reset_ball();
        log::info!("Round started with {} balls", self.balls);
    }

    /// Put the ball at the launch point with a fresh launch velocity
    pub fn reset_ball(&mut self) {
        self.ball.pos = Vec2::new(self.width / 2.0, self.height - BALL_LAUNCH_OFFSET_Y);
        let jitter: f32 = self.rng.random();
        self.ball.vel = Vec2::new((jitter - 0.5) * BALL_LAUNCH_SPREAD_X, BALL_LAUNCH_VEL_Y);
    }

    /// Adopt a new viewport: rescale flipper pivots and re-center the ball
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;

        let scale = width / REFERENCE_WIDTH;
        let pivot_y = height - FLIPPER_PIVOT_OFFSET_Y;
        self.left.pos = Vec2::new(FLIPPER_PIVOT_INSET * scale, pivot_y);
        self.right.pos = Vec2::new(width - FLIPPER_PIVOT_INSET * scale, pivot_y);

        self.reset_ball();
        log::debug!("Playfield resized to {}x{}", width, height);
    }

    /// Replace the target list with the full two-row layout
    pub fn create_targets(&mut self) {
        self.targets = target_layout();
    }

    /// True once every target in the set has been struck
    pub fn all_targets_cleared(&self) -> bool {
        self.targets.iter().all(|t| !t.active)
    }

    pub fn active_targets(&self) -> usize {
        self.targets.iter().filter(|t| t.active).count()
    }

    /// Spawn a burst of particles at `pos`
    pub fn spawn_burst(&mut self, pos: Vec2, color: Color) {
        for _ in 0..PARTICLES_PER_BURST {
            let (rx, ry): (f32, f32) = (self.rng.random(), self.rng.random());
            self.particles.push(Particle {
                pos,
                vel: Vec2::new((rx - 0.5) * PARTICLE_SPREAD, (ry - 0.5) * PARTICLE_SPREAD),
                color,
                life: 1.0,
            });
        }
    }

    pub fn flipper_mut(&mut self, side: FlipperSide) -> &mut Flipper {
        match side {
            FlipperSide::Left => &mut self.left,
            FlipperSide::Right => &mut self.right,
        }
    }

    /// Queue a delayed action against the current epoch
    pub fn schedule(&mut self, kind: ActionKind, now_ms: f64, delay_ms: f64) {
        self.scheduler.push(kind, now_ms + delay_ms, self.epoch);
    }

    /// Number of delayed actions waiting to fire
    pub fn pending_actions(&self) -> usize {
        self.scheduler.len()
    }

    pub(crate) fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            self.phase = phase;
            self.push_event(GameEvent::PhaseChanged { phase });
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
