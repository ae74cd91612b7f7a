//! Demo autopilot
//!
//! Plans a shot by replaying candidate gestures through the real `tick` on a
//! scratch copy of the state, so wind and sub-stepping are accounted for exactly.

use glam::Vec2;

use super::input::PointerEvent;
use super::state::{GamePhase, GameState};
use super::tick::tick;
use crate::direction;

/// Upper bound on ticks simulated per candidate
const MAX_FLIGHT_TICKS: u32 = 600;

/// A planned shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotPlan {
    /// Where the drag starts
    pub anchor: Vec2,
    pub angle: f32,
    pub power: f32,
}

impl ShotPlan {
    /// Pointer gesture that produces this shot
    pub fn gesture(&self) -> [PointerEvent; 3] {
        let release = self.anchor - direction(self.angle) * self.power;
        [
            PointerEvent::Start { pos: self.anchor },
            PointerEvent::Move { pos: release },
            PointerEvent::End,
        ]
    }
}

/// Search angle/power for a shot that hits the apple at the given frame step.
///
/// Angles are scanned in degrees above the horizon, powers from just outside
/// the start circle up to the maximum drag. Returns `None` if nothing lands.
pub fn plan_shot(state: &GameState, anchor: Vec2, dt: f32) -> Option<ShotPlan> {
    if state.phase != GamePhase::Aiming {
        return None;
    }
    let config = &state.config;
    let min_power = config.start_circle_radius.floor() as u32 + 1;
    let max_power = config.max_power_drag.floor() as u32;

    for degrees in (5..=80).rev() {
        let angle = -(degrees as f32).to_radians();
        for power in (min_power..=max_power).step_by(2) {
            let plan = ShotPlan {
                anchor,
                angle,
                power: power as f32,
            };
            if lands(state, plan, dt) {
                log::debug!("Autopilot plan: {}°, power {}", degrees, power);
                return Some(plan);
            }
        }
    }
    None
}

fn lands(state: &GameState, plan: ShotPlan, dt: f32) -> bool {
    let mut scratch = state.clone();
    scratch.events.clear();
    for event in plan.gesture() {
        scratch.aim.apply(event);
    }

    for _ in 0..MAX_FLIGHT_TICKS {
        tick(&mut scratch, dt);
        match scratch.phase {
            GamePhase::HitPause => return true,
            GamePhase::MissPause | GamePhase::GameOver => return false,
            _ => {}
        }
    }
    false
}
