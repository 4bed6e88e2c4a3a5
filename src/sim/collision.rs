//! Collision detection and response
//!
//! The flipper test measures distance to the pivot, not to the arm segment.
//! Targets send the ball away at a fixed speed instead of reflecting it.

use glam::Vec2;

use super::state::{Ball, Flipper, Target};
use crate::consts::*;
use crate::{normal_from_angle, unit_from_angle};

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface normal used for the response
    pub normal: Vec2,
    /// Center-to-center (or center-to-pivot) distance
    pub distance: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            distance: 0.0,
        }
    }
}

/// Reflect a velocity about a unit normal
#[inline]
pub fn reflect_velocity(vel: Vec2, normal: Vec2) -> Vec2 {
    vel - 2.0 * vel.dot(normal) * normal
}

/// Bounce off the side walls and ceiling. The floor is open (the drain).
///
/// Returns true if any wall was hit.
pub fn resolve_walls(ball: &mut Ball, width: f32) -> bool {
    let mut hit = false;
    let r = ball.radius;

    if ball.pos.x - r < 0.0 || ball.pos.x + r > width {
        ball.vel.x = -ball.vel.x * RESTITUTION;
        ball.pos.x = ball.pos.x.min(width - r).max(r);
        hit = true;
    }

    if ball.pos.y - r < 0.0 {
        ball.vel.y = -ball.vel.y * RESTITUTION;
        ball.pos.y = r;
        hit = true;
    }

    hit
}

/// Check the ball against a flipper using distance to the pivot
pub fn ball_flipper_collision(ball: &Ball, flipper: &Flipper) -> CollisionResult {
    let distance = (ball.pos - flipper.pos).length();

    // Ball centered on the pivot has no usable direction
    if distance <= f32::EPSILON || !distance.is_finite() {
        return CollisionResult::miss();
    }

    if distance < flipper.width && distance < ball.radius + flipper.height {
        CollisionResult {
            hit: true,
            normal: normal_from_angle(flipper.angle),
            distance,
        }
    } else {
        CollisionResult::miss()
    }
}

/// Reflect the ball off a flipper, add the flipper's kick, and cap the speed
pub fn resolve_flipper(ball: &mut Ball, flipper: &Flipper) -> bool {
    let result = ball_flipper_collision(ball, flipper);
    if !result.hit {
        return false;
    }

    ball.vel = reflect_velocity(ball.vel, result.normal);
    ball.vel += result.normal * (flipper.remaining_travel() * FLIPPER_IMPULSE);

    let speed = ball.vel.length();
    if speed > FLIPPER_MAX_SPEED {
        ball.vel = ball.vel / speed * FLIPPER_MAX_SPEED;
    }
    true
}

/// Check the ball against a target circle (active or not)
///
/// The normal points from the target center to the ball.
pub fn ball_target_collision(ball: &Ball, target: &Target) -> CollisionResult {
    let offset = ball.pos - target.pos;
    let distance = offset.length();
    if distance < ball.radius + target.radius {
        // atan2(0, 0) is 0, so a dead-center hit points along +x
        let angle = offset.y.atan2(offset.x);
        CollisionResult {
            hit: true,
            normal: unit_from_angle(angle),
            distance,
        }
    } else {
        CollisionResult::miss()
    }
}

/// Send the ball along the hit normal at a fixed speed
pub fn bounce_off_target(ball: &mut Ball, hit: &CollisionResult) {
    ball.vel = hit.normal * TARGET_BOUNCE_SPEED;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette;
    use crate::sim::state::FlipperSide;
    use proptest::prelude::*;

    fn ball_at(x: f32, y: f32, vx: f32, vy: f32) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            ..Ball::default()
        }
    }

    fn target_at(x: f32, y: f32) -> Target {
        Target {
            pos: Vec2::new(x, y),
            radius: 15.0,
            color: palette::RED,
            points: 100,
            active: true,
        }
    }

    #[test]
    fn test_reflect_velocity() {
        let reflected = reflect_velocity(Vec2::new(100.0, 0.0), Vec2::new(-1.0, 0.0));
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_left_wall_bounce() {
        let mut ball = ball_at(3.0, 300.0, -5.0, 1.0);
        assert!(resolve_walls(&mut ball, 400.0));
        assert_eq!(ball.pos.x, 8.0);
        assert!((ball.vel.x - 4.0).abs() < 1e-6);
        assert_eq!(ball.vel.y, 1.0);
    }

    #[test]
    fn test_ceiling_bounce() {
        let mut ball = ball_at(200.0, 2.0, 0.0, -10.0);
        assert!(resolve_walls(&mut ball, 400.0));
        assert_eq!(ball.pos.y, 8.0);
        assert!((ball.vel.y - 8.0).abs() < 1e-6);
    }

    #[test]
    fn test_floor_is_open() {
        let mut ball = ball_at(200.0, 5000.0, 0.0, 10.0);
        assert!(!resolve_walls(&mut ball, 400.0));
        assert_eq!(ball.vel.y, 10.0);
    }

    #[test]
    fn test_flipper_hit_uses_pivot_distance() {
        let flipper = Flipper::new(FlipperSide::Left, Vec2::new(120.0, 520.0));
        // Within ball radius + thickness of the pivot
        let near = ball_at(130.0, 520.0, 0.0, 3.0);
        assert!(ball_flipper_collision(&near, &flipper).hit);
        // On the arm near its tip, but far from the pivot: no hit
        let tip = flipper.pos + unit_from_angle(flipper.angle) * 55.0;
        let far = ball_at(tip.x, tip.y, 0.0, 3.0);
        assert!(!ball_flipper_collision(&far, &flipper).hit);
    }

    #[test]
    fn test_flipper_zero_distance_is_miss() {
        let flipper = Flipper::new(FlipperSide::Right, Vec2::new(280.0, 520.0));
        let mut ball = ball_at(280.0, 520.0, 1.0, 2.0);
        assert!(!resolve_flipper(&mut ball, &flipper));
        assert_eq!(ball.vel, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_flipper_at_rest_reflects_without_kick() {
        let mut flipper = Flipper::new(FlipperSide::Left, Vec2::new(120.0, 520.0));
        flipper.angle = 0.0;
        flipper.target_angle = 0.0;
        let mut ball = ball_at(125.0, 515.0, 2.0, 5.0);
        assert!(resolve_flipper(&mut ball, &flipper));
        assert!((ball.vel.x - 2.0).abs() < 1e-5);
        assert!((ball.vel.y + 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_flipper_kick_scales_with_remaining_travel() {
        let mut flipper = Flipper::new(FlipperSide::Left, Vec2::new(120.0, 520.0));
        flipper.angle = 0.0;
        flipper.target_angle = 0.1;
        let mut ball = ball_at(125.0, 515.0, 0.0, 1.0);
        assert!(resolve_flipper(&mut ball, &flipper));
        // Reflected to (0, -1), then kicked 20 * 0.1 along the normal (0, 1)
        assert!(ball.vel.x.abs() < 1e-5);
        assert!((ball.vel.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_flipper_speed_cap() {
        let mut flipper = Flipper::new(FlipperSide::Left, Vec2::new(120.0, 520.0));
        flipper.set_pressed(true);
        let mut ball = ball_at(125.0, 515.0, 0.0, -14.0);
        assert!(resolve_flipper(&mut ball, &flipper));
        assert!((ball.vel.length() - FLIPPER_MAX_SPEED).abs() < 1e-4);
    }

    #[test]
    fn test_target_bounce_away() {
        let target = target_at(50.0, 100.0);
        let mut ball = ball_at(50.0, 120.0, 3.0, -6.0);
        let hit = ball_target_collision(&ball, &target);
        assert!(hit.hit);
        bounce_off_target(&mut ball, &hit);
        assert!(ball.vel.x.abs() < 1e-5);
        assert!((ball.vel.y - 8.0).abs() < 1e-5);
    }

    #[test]
    fn test_target_dead_center_stays_finite() {
        let target = target_at(50.0, 100.0);
        let mut ball = ball_at(50.0, 100.0, 0.0, 0.0);
        let result = ball_target_collision(&ball, &target);
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::X);
        bounce_off_target(&mut ball, &result);
        assert_eq!(ball.vel, Vec2::new(8.0, 0.0));
    }

    proptest! {
        #[test]
        fn prop_side_wall_keeps_80_percent(
            x in -50.0f32..7.9,
            vx in -20.0f32..20.0,
            right in any::<bool>(),
        ) {
            let width = 400.0;
            let x = if right { width - x } else { x };
            let mut ball = ball_at(x, 300.0, vx, 0.0);
            prop_assert!(resolve_walls(&mut ball, width));
            prop_assert!((ball.vel.x.abs() - vx.abs() * 0.8).abs() < 1e-4);
            prop_assert!(ball.pos.x >= ball.radius && ball.pos.x <= width - ball.radius);
        }

        #[test]
        fn prop_flipper_response_is_finite_and_capped(
            dx in -15.0f32..15.0,
            dy in -15.0f32..15.0,
            vx in -30.0f32..30.0,
            vy in -30.0f32..30.0,
            pressed in any::<bool>(),
        ) {
            let mut flipper = Flipper::new(FlipperSide::Right, Vec2::new(280.0, 520.0));
            flipper.set_pressed(pressed);
            let mut ball = ball_at(280.0 + dx, 520.0 + dy, vx, vy);
            if resolve_flipper(&mut ball, &flipper) {
                prop_assert!(ball.vel.is_finite());
                prop_assert!(ball.vel.length() <= FLIPPER_MAX_SPEED + 1e-3);
            }
        }
    }
}
