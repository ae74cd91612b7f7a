//! Projectile physics: integration, hit tests, and trajectory prediction
//!
//! Live flight and the aiming preview share `integrate`, so for the same
//! launch and timestep they produce identical positions.

use glam::Vec2;

use super::entities::{Apple, Arrow, Stump};
use crate::config::GameConfig;
use crate::{direction, heading};

/// Semi-implicit Euler step: velocity first, then position with the new velocity
#[inline]
pub fn integrate(pos: &mut Vec2, vel: &mut Vec2, accel: Vec2, dt: f32) {
    *vel += accel * dt;
    *pos += *vel * dt;
}

/// Initial velocity for a shot at `angle` with drag `power`
#[inline]
pub fn launch_velocity(angle: f32, power: f32, speed_factor: f32) -> Vec2 {
    direction(angle) * (power * speed_factor)
}

/// Advance a live arrow by `dt` under gravity and wind. Inactive arrows don't move.
pub fn advance(arrow: &mut Arrow, gravity: f32, wind: f32, dt: f32) {
    if !arrow.active {
        return;
    }
    integrate(&mut arrow.pos, &mut arrow.vel, Vec2::new(wind, gravity), dt);
    arrow.angle = heading(arrow.vel);
}

/// Arrow tip strictly inside the apple's circle
pub fn collides_with_apple(arrow: &Arrow, apple: &Apple) -> bool {
    if !arrow.active || apple.hit {
        return false;
    }
    arrow.tip().distance(apple.pos) < apple.radius
}

/// Arrow tip strictly inside the stump rectangle
pub fn collides_with_stump(arrow: &Arrow, stump: &Stump) -> bool {
    if !arrow.active {
        return false;
    }
    let tip = arrow.tip();
    tip.x > stump.left() && tip.x < stump.right() && tip.y > stump.top_y() && tip.y < stump.ground_y
}

/// Tip below the ground, or more than one arrow length past either side of the canvas
pub fn is_out_of_bounds(arrow: &Arrow, canvas_width: f32, ground_y: f32) -> bool {
    if !arrow.active {
        return false;
    }
    let tip = arrow.tip();
    tip.y > ground_y || tip.x < -arrow.length || tip.x > canvas_width + arrow.length
}

/// Simulate a windless shot from `origin` and sample every other step.
///
/// Stops early once the simulated projectile drops below the ground buffer.
pub fn predict_trajectory(origin: Vec2, angle: f32, power: f32, config: &GameConfig) -> Vec<Vec2> {
    let mut pos = origin;
    let mut vel = launch_velocity(angle, power, config.arrow_speed_factor);
    let accel = Vec2::new(0.0, config.gravity);
    let step = config.trajectory_step_time;
    let floor = config.ground_y() + config.trajectory_ground_buffer;

    let mut points = Vec::with_capacity(config.trajectory_steps as usize / 2 + 1);
    for i in 0..config.trajectory_steps {
        integrate(&mut pos, &mut vel, accel, step);

        if i % 2 == 0 {
            points.push(pos);
        }

        if pos.y > floor {
            break;
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_4;

    fn live_arrow(pos: Vec2, vel: Vec2) -> Arrow {
        let mut arrow = Arrow::new(pos, 30.0);
        arrow.shoot(vel);
        arrow
    }

    /// Place an arrow pointing right so that its tip lands exactly on `tip`
    fn arrow_with_tip(tip: Vec2) -> Arrow {
        let mut arrow = Arrow::new(tip - Vec2::new(15.0, 0.0), 30.0);
        arrow.active = true;
        arrow
    }

    fn apple_at(pos: Vec2) -> Apple {
        Apple {
            pos,
            radius: 10.0,
            lift: 5.0,
            hit: false,
        }
    }

    fn stump() -> Stump {
        Stump {
            x: 250.0,
            ground_y: 660.0,
            width: 30.0,
            height: 60.0,
        }
    }

    #[test]
    fn test_advance_inactive_is_noop() {
        let mut arrow = Arrow::new(Vec2::new(10.0, 20.0), 30.0);
        advance(&mut arrow, 1.3, 0.1, 1.0);
        assert_eq!(arrow.pos, Vec2::new(10.0, 20.0));
        assert_eq!(arrow.vel, Vec2::ZERO);
    }

    #[test]
    fn test_advance_applies_gravity_then_moves() {
        let mut arrow = live_arrow(Vec2::ZERO, Vec2::new(10.0, 0.0));
        advance(&mut arrow, 2.0, 0.0, 0.5);
        assert_eq!(arrow.vel, Vec2::new(10.0, 1.0));
        // Position uses the updated velocity
        assert_eq!(arrow.pos, Vec2::new(5.0, 0.5));
        assert!((arrow.angle - 1.0f32.atan2(10.0)).abs() < 1e-6);
    }

    #[test]
    fn test_wind_pushes_horizontally() {
        let mut arrow = live_arrow(Vec2::ZERO, Vec2::new(10.0, 0.0));
        advance(&mut arrow, 0.0, -0.15, 1.0);
        assert!((arrow.vel.x - 9.85).abs() < 1e-6);
        assert_eq!(arrow.vel.y, 0.0);
    }

    #[test]
    fn test_apple_hit_by_tip() {
        let apple = apple_at(Vec2::new(200.0, 100.0));
        assert!(collides_with_apple(&arrow_with_tip(Vec2::new(195.0, 100.0)), &apple));
        assert!(!collides_with_apple(&arrow_with_tip(Vec2::new(189.0, 100.0)), &apple));
        // Exactly on the rim is not a hit
        assert!(!collides_with_apple(&arrow_with_tip(Vec2::new(190.0, 100.0)), &apple));
    }

    #[test]
    fn test_apple_ignored_when_already_hit_or_arrow_inactive() {
        let mut apple = apple_at(Vec2::new(200.0, 100.0));
        let mut arrow = arrow_with_tip(Vec2::new(200.0, 100.0));
        assert!(collides_with_apple(&arrow, &apple));

        apple.hit = true;
        assert!(!collides_with_apple(&arrow, &apple));

        apple.hit = false;
        arrow.active = false;
        assert!(!collides_with_apple(&arrow, &apple));
    }

    #[test]
    fn test_stump_rectangle() {
        let stump = stump();
        assert!(collides_with_stump(&arrow_with_tip(Vec2::new(250.0, 630.0)), &stump));
        assert!(collides_with_stump(&arrow_with_tip(Vec2::new(236.0, 601.0)), &stump));
        // Edges are exclusive
        assert!(!collides_with_stump(&arrow_with_tip(Vec2::new(235.0, 630.0)), &stump));
        assert!(!collides_with_stump(&arrow_with_tip(Vec2::new(250.0, 600.0)), &stump));
        // Above the stump
        assert!(!collides_with_stump(&arrow_with_tip(Vec2::new(250.0, 580.0)), &stump));
    }

    #[test]
    fn test_out_of_bounds_left_edge() {
        let length = 30.0;
        assert!(is_out_of_bounds(&arrow_with_tip(Vec2::new(-(length + 1.0), 300.0)), 400.0, 660.0));
        assert!(!is_out_of_bounds(&arrow_with_tip(Vec2::new(-(length - 1.0), 300.0)), 400.0, 660.0));
    }

    #[test]
    fn test_out_of_bounds_right_and_ground() {
        assert!(is_out_of_bounds(&arrow_with_tip(Vec2::new(431.0, 300.0)), 400.0, 660.0));
        assert!(!is_out_of_bounds(&arrow_with_tip(Vec2::new(429.0, 300.0)), 400.0, 660.0));
        assert!(is_out_of_bounds(&arrow_with_tip(Vec2::new(200.0, 661.0)), 400.0, 660.0));
        assert!(!is_out_of_bounds(&arrow_with_tip(Vec2::new(200.0, 660.0)), 400.0, 660.0));
    }

    #[test]
    fn test_prediction_samples_every_other_step() {
        let config = GameConfig {
            // Shoot straight up hard enough to never reach the ground
            trajectory_steps: 10,
            ..GameConfig::default()
        };
        let points = predict_trajectory(Vec2::new(55.0, 600.0), -std::f32::consts::FRAC_PI_2, 150.0, &config);
        assert_eq!(points.len(), 5);
    }

    #[test]
    fn test_prediction_stops_below_ground() {
        let config = GameConfig::default();
        // Aimed straight down from just above the ground
        let points = predict_trajectory(Vec2::new(100.0, 650.0), std::f32::consts::FRAC_PI_2, 150.0, &config);
        assert!(points.len() < (config.trajectory_steps as usize).div_ceil(2));
        let floor = config.ground_y() + config.trajectory_ground_buffer;
        // Only the final point may be past the floor
        for p in &points[..points.len() - 1] {
            assert!(p.y <= floor);
        }
    }

    #[test]
    fn test_prediction_matches_live_flight_exactly() {
        let config = GameConfig::default();
        let origin = config.arrow_origin();
        let (angle, power) = (-FRAC_PI_4, 120.0);

        let predicted = predict_trajectory(origin, angle, power, &config);
        let mut arrow = Arrow::new(origin, config.arrow_length);
        arrow.shoot(launch_velocity(angle, power, config.arrow_speed_factor));

        let mut samples = predicted.iter();
        for i in 0..config.trajectory_steps {
            advance(&mut arrow, config.gravity, 0.0, config.trajectory_step_time);
            if i % 2 == 0 {
                match samples.next() {
                    Some(p) => assert_eq!(*p, arrow.pos, "diverged at step {i}"),
                    None => break,
                }
            }
        }
    }

    proptest! {
        #[test]
        fn prop_windless_flight_keeps_vx_and_grows_vy(
            angle in -3.1f32..3.1,
            power in 1.0f32..150.0,
            dt in 0.05f32..1.0,
        ) {
            let gravity = 1.3;
            let mut arrow = live_arrow(Vec2::ZERO, launch_velocity(angle, power, 0.2));
            let vx = arrow.vel.x;
            for _ in 0..20 {
                let vy_before = arrow.vel.y;
                advance(&mut arrow, gravity, 0.0, dt);
                prop_assert_eq!(arrow.vel.x, vx);
                prop_assert!(arrow.vel.y > vy_before);
                prop_assert!((arrow.vel.y - vy_before - gravity * dt).abs() < 1e-3);
            }
        }

        #[test]
        fn prop_prediction_agrees_with_live_arrow(
            angle in -3.0f32..0.0,
            power in 1.0f32..150.0,
        ) {
            let config = GameConfig::default();
            let origin = config.arrow_origin();
            let predicted = predict_trajectory(origin, angle, power, &config);

            let mut arrow = Arrow::new(origin, config.arrow_length);
            arrow.shoot(launch_velocity(angle, power, config.arrow_speed_factor));
            let mut live = Vec::new();
            for i in 0..config.trajectory_steps {
                advance(&mut arrow, config.gravity, 0.0, config.trajectory_step_time);
                if i % 2 == 0 {
                    live.push(arrow.pos);
                }
            }
            prop_assert_eq!(&predicted[..], &live[..predicted.len()]);
        }
    }
}
