//! Per-frame simulation tick
//!
//! One call advances the table by one step: a reset held back after game
//! over, delayed actions that came due, then queued intents, then physics
//! (only while Playing).

use super::collision::{ball_target_collision, bounce_off_target, resolve_flipper, resolve_walls};
use super::input::{Intent, apply_intent};
use super::schedule::ActionKind;
use super::state::{GameEvent, GamePhase, Particle, World};
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Host clock in milliseconds, used for delayed actions
    pub now_ms: f64,
    /// Intents collected since the last tick, in arrival order
    pub intents: Vec<Intent>,
}

impl TickInput {
    pub fn at(now_ms: f64) -> Self {
        Self {
            now_ms,
            intents: Vec::new(),
        }
    }

    pub fn with_intents(now_ms: f64, intents: impl IntoIterator<Item = Intent>) -> Self {
        Self {
            now_ms,
            intents: intents.into_iter().collect(),
        }
    }
}

/// Advance the world by one step
pub fn tick(world: &mut World, input: &TickInput) {
    world.finish_game_over();
    run_due_actions(world, input.now_ms);

    for &intent in &input.intents {
        apply_intent(world, intent);
    }

    if world.phase == GamePhase::Playing {
        step_playing(world, input.now_ms);
    }
}

/// Fire delayed actions that are due; drop any scheduled before a reset
///
/// A due game-over announces the final score and leaves the table as it is.
/// The reset follows through [`World::finish_game_over`].
pub fn run_due_actions(world: &mut World, now_ms: f64) {
    for action in world.scheduler.take_due(now_ms) {
        if action.epoch != world.epoch {
            log::debug!(
                "Dropping stale {:?} from epoch {} (now {})",
                action.kind,
                action.epoch,
                world.epoch
            );
            continue;
        }

        match action.kind {
            ActionKind::GameOverReset => {
                let final_score = world.score;
                log::info!("Game over, final score {}", final_score);
                world.push_event(GameEvent::GameOver { final_score });
                world.defer_reset();
            }
            ActionKind::RespawnTargets => {
                world.create_targets();
                world.score += CLEAR_BONUS;
                log::info!("Target set cleared, +{} bonus", CLEAR_BONUS);
                world.push_event(GameEvent::TargetsRespawned { bonus: CLEAR_BONUS });
                world.push_event(GameEvent::ScoreChanged { score: world.score });
            }
        }
    }
}

fn step_playing(world: &mut World, now_ms: f64) {
    // Ball first, so a drained ball never meets flippers or targets
    world.ball.pos += world.ball.vel;
    world.ball.vel.y += GRAVITY;

    resolve_walls(&mut world.ball, world.width);

    if world.ball.pos.y > world.height + DRAIN_MARGIN {
        lose_ball(world, now_ms);
    }

    world.left.relax();
    world.right.relax();

    resolve_flipper(&mut world.ball, &world.left);
    resolve_flipper(&mut world.ball, &world.right);

    strike_targets(world, now_ms);

    update_particles(&mut world.particles);
}

fn lose_ball(world: &mut World, now_ms: f64) {
    world.balls = world.balls.saturating_sub(1);
    log::info!("Ball lost, {} remaining", world.balls);
    world.push_event(GameEvent::BallLost {
        remaining: world.balls,
    });
    world.push_event(GameEvent::BallsChanged { balls: world.balls });

    if world.balls > 0 {
        world.reset_ball();
    } else {
        world.set_phase(GamePhase::GameOver);
        world.schedule(ActionKind::GameOverReset, now_ms, GAME_OVER_DELAY_MS);
    }
}

/// Score every active target the ball overlaps, in layout order
fn strike_targets(world: &mut World, now_ms: f64) {
    for index in 0..world.targets.len() {
        if !world.targets[index].active {
            continue;
        }
        let hit = ball_target_collision(&world.ball, &world.targets[index]);
        if !hit.hit {
            continue;
        }

        bounce_off_target(&mut world.ball, &hit);

        let target = &mut world.targets[index];
        target.active = false;
        let (pos, color, points) = (target.pos, target.color, target.points);

        world.score += points;
        log::debug!("Target {} hit for {} (score {})", index, points, world.score);
        world.push_event(GameEvent::TargetHit { index, points });
        world.push_event(GameEvent::ScoreChanged { score: world.score });
        world.spawn_burst(pos, color);

        if world.all_targets_cleared() {
            world.schedule(ActionKind::RespawnTargets, now_ms, RESPAWN_DELAY_MS);
        }
    }
}

/// Move, pull down and age particles; drop the ones that burned out
pub fn update_particles(particles: &mut Vec<Particle>) {
    particles.retain_mut(|p| {
        p.pos += p.vel;
        p.vel.y += PARTICLE_GRAVITY;
        p.life -= PARTICLE_DECAY;
        p.life > 0.0
    });
}
