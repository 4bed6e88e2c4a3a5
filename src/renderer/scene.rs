//! Build the display list for one frame
//!
//! Read-only over the world: nothing here mutates simulation state.

use glam::Vec2;

use super::commands::{DrawCommand, Frame, Paint};
use crate::consts::PARTICLE_SIZE;
use crate::palette;
use crate::settings::Settings;
use crate::sim::{Flipper, GamePhase, World};

const TARGET_LABEL_PX: f32 = 12.0;
const TARGET_LABEL_DROP: f32 = 4.0;
const PROMPT_PX: f32 = 24.0;

/// Draw the table: background, targets, flippers, ball, particles, prompt
pub fn build_frame(world: &World, settings: &Settings) -> Frame {
    let mut frame = Frame::new(world.width, world.height);
    let size = Vec2::new(world.width, world.height);

    let fade = if settings.motion_trails {
        palette::BACKGROUND_FADE
    } else {
        palette::BACKGROUND
    };
    frame.push(DrawCommand::Rect {
        pos: Vec2::ZERO,
        size,
        paint: Paint::Solid(fade),
    });
    frame.push(DrawCommand::Rect {
        pos: Vec2::ZERO,
        size,
        paint: Paint::Vertical {
            y0: 0.0,
            y1: world.height,
            top: palette::GRADIENT_TOP,
            bottom: palette::GRADIENT_BOTTOM,
        },
    });

    for target in world.targets.iter().filter(|t| t.active) {
        frame.push(DrawCommand::Circle {
            center: target.pos,
            radius: target.radius,
            paint: Paint::Solid(target.color),
        });
        frame.push(DrawCommand::Text {
            text: target.points.to_string(),
            pos: target.pos + Vec2::new(0.0, TARGET_LABEL_DROP),
            size_px: TARGET_LABEL_PX,
            color: palette::WHITE,
        });
    }

    push_flipper(&mut frame, &world.left);
    push_flipper(&mut frame, &world.right);

    if world.phase == GamePhase::Playing {
        let ball = &world.ball;
        frame.push(DrawCommand::Circle {
            center: ball.pos,
            radius: ball.radius,
            paint: Paint::Solid(ball.color),
        });
        frame.push(DrawCommand::Circle {
            center: ball.pos,
            radius: ball.radius,
            paint: Paint::Radial {
                inner: palette::BALL_GLOW,
                outer: ball.color,
            },
        });
    }

    if settings.particles {
        let half = PARTICLE_SIZE / 2.0;
        for particle in &world.particles {
            frame.push(DrawCommand::Rect {
                pos: particle.pos - Vec2::splat(half),
                size: Vec2::splat(PARTICLE_SIZE),
                paint: Paint::Solid(particle.color.with_alpha(particle.life)),
            });
        }
    }

    if world.phase == GamePhase::Waiting {
        frame.push(DrawCommand::Text {
            text: settings.prompt.clone(),
            pos: size / 2.0,
            size_px: PROMPT_PX,
            color: palette::PROMPT_TEXT,
        });
    }

    frame
}

/// Arm body plus a lighter top half, in the flipper's rotated frame
fn push_flipper(frame: &mut Frame, flipper: &Flipper) {
    let offset = Vec2::new(0.0, -flipper.height / 2.0);
    frame.push(DrawCommand::RotatedRect {
        origin: flipper.pos,
        angle: flipper.angle,
        offset,
        size: Vec2::new(flipper.width, flipper.height),
        paint: Paint::Solid(flipper.color),
    });
    frame.push(DrawCommand::RotatedRect {
        origin: flipper.pos,
        angle: flipper.angle,
        offset,
        size: Vec2::new(flipper.width, flipper.height / 2.0),
        paint: Paint::Solid(palette::FLIPPER_HIGHLIGHT),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Intent, TickInput, tick};

    fn ball_drawn(frame: &Frame, world: &World) -> bool {
        frame
            .circles()
            .any(|(center, radius, _)| *center == world.ball.pos && *radius == world.ball.radius)
    }

    #[test]
    fn test_waiting_frame_has_prompt_and_no_ball() {
        let world = World::new(400.0, 600.0, 1);
        let settings = Settings::default();
        let frame = build_frame(&world, &settings);

        assert!(!ball_drawn(&frame, &world));
        assert!(frame.texts().any(|t| t == settings.prompt));
        // 8 target discs
        assert_eq!(frame.circles().count(), 8);
        assert_eq!(frame.texts().filter(|t| *t == "100").count(), 5);
        assert_eq!(frame.texts().filter(|t| *t == "200").count(), 3);
    }

    #[test]
    fn test_playing_frame_has_ball_and_no_prompt() {
        let mut world = World::new(400.0, 600.0, 1);
        tick(&mut world, &TickInput::with_intents(0.0, [Intent::Start]));
        let settings = Settings::default();
        let frame = build_frame(&world, &settings);

        assert!(ball_drawn(&frame, &world));
        assert!(!frame.texts().any(|t| t == settings.prompt));
    }

    #[test]
    fn test_inactive_targets_not_drawn() {
        let mut world = World::new(400.0, 600.0, 1);
        world.targets[0].active = false;
        world.targets[6].active = false;
        let frame = build_frame(&world, &Settings::default());
        assert_eq!(frame.circles().count(), 6);
    }

    #[test]
    fn test_flippers_drawn_rotated() {
        let world = World::new(400.0, 600.0, 1);
        let rotated: Vec<_> = frame_rotated(&build_frame(&world, &Settings::default()));
        assert_eq!(rotated.len(), 4);
        assert_eq!(rotated[0], (world.left.pos, world.left.angle));
        assert_eq!(rotated[2], (world.right.pos, world.right.angle));
    }

    fn frame_rotated(frame: &Frame) -> Vec<(Vec2, f32)> {
        frame
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::RotatedRect { origin, angle, .. } => Some((*origin, *angle)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_particle_opacity_tracks_life() {
        let mut world = World::new(400.0, 600.0, 1);
        world.spawn_burst(Vec2::new(100.0, 100.0), palette::TEAL);
        for (i, p) in world.particles.iter_mut().enumerate() {
            p.life = 0.1 * (i + 1) as f32;
        }
        let frame = build_frame(&world, &Settings::default());
        let alphas: Vec<f32> = frame
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rect {
                    size,
                    paint: Paint::Solid(color),
                    ..
                } if *size == Vec2::splat(PARTICLE_SIZE) => Some(color.a),
                _ => None,
            })
            .collect();
        let lives: Vec<f32> = world.particles.iter().map(|p| p.life).collect();
        assert_eq!(alphas, lives);
    }

    #[test]
    fn test_particles_hidden_by_settings() {
        let mut world = World::new(400.0, 600.0, 1);
        world.spawn_burst(Vec2::new(100.0, 100.0), palette::TEAL);
        let settings = Settings {
            particles: false,
            ..Settings::default()
        };
        let with = build_frame(&world, &Settings::default()).commands.len();
        let without = build_frame(&world, &settings).commands.len();
        assert_eq!(with - without, 10);
    }

    #[test]
    fn test_render_does_not_mutate() {
        let mut world = World::new(400.0, 600.0, 1);
        tick(&mut world, &TickInput::with_intents(0.0, [Intent::Start]));
        let before = format!("{:?}", world);
        let _ = build_frame(&world, &Settings::default());
        assert_eq!(format!("{:?}", world), before);
    }
}
