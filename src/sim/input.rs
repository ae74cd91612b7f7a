//! Drag-to-aim input model
//!
//! One gesture at a time: pointer down, any number of moves, pointer up.
//! The aim vector is `start - current` (pull back to shoot forward).
//! Releasing produces a single pending action that the state machine drains.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::heading;

/// Normalized pointer events, already in canvas-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Start { pos: Vec2 },
    Move { pos: Vec2 },
    End,
}

/// What a released gesture asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AimAction {
    Shoot,
    Cancel,
}

/// Aim gesture state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AimInput {
    pub dragging: bool,
    pub start: Vec2,
    pub current: Vec2,
    /// Pull-back vector (`start - current`)
    pub vector: Vec2,
    /// Drag length, clamped to `max_power`
    pub power: f32,
    pub angle: f32,
    max_power: f32,
    start_circle_radius: f32,
    pending: Option<AimAction>,
}

impl AimInput {
    pub fn new(max_power: f32, start_circle_radius: f32) -> Self {
        Self {
            dragging: false,
            start: Vec2::ZERO,
            current: Vec2::ZERO,
            vector: Vec2::ZERO,
            power: 0.0,
            angle: 0.0,
            max_power,
            start_circle_radius,
            pending: None,
        }
    }

    pub fn apply(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Start { pos } => self.on_start(pos),
            PointerEvent::Move { pos } => self.on_move(pos),
            PointerEvent::End => self.on_end(),
        }
    }

    /// Begin a drag. Clears any undrained action and resets the aim.
    pub fn on_start(&mut self, pos: Vec2) {
        self.pending = None;
        self.dragging = true;
        self.start = pos;
        self.current = pos;
        self.vector = Vec2::ZERO;
        self.power = 0.0;
        self.angle = 0.0;
    }

    pub fn on_move(&mut self, pos: Vec2) {
        if !self.dragging {
            return;
        }
        self.current = pos;
        self.vector = self.start - self.current;
        self.angle = heading(self.vector);
        self.power = self.vector.length().min(self.max_power);
    }

    /// Release: decide between shoot and cancel
    pub fn on_end(&mut self) {
        if !self.dragging {
            return;
        }
        let release_distance = self.current.distance(self.start);

        let action = if self.power > 0.0 && release_distance < self.start_circle_radius {
            log::debug!("Shot cancelled - released inside start circle");
            AimAction::Cancel
        } else if self.power > 0.0 {
            log::debug!("Shot attempted: angle={:.2}, power={:.2}", self.angle, self.power);
            AimAction::Shoot
        } else {
            // Tap without drag
            AimAction::Cancel
        };

        self.pending = Some(action);
        self.dragging = false;
    }

    /// Pending action without draining it
    pub fn pending(&self) -> Option<AimAction> {
        self.pending
    }

    /// Drain the pending action. A second call returns `None`.
    pub fn consume_action(&mut self) -> Option<AimAction> {
        self.pending.take()
    }

    /// Power as a fraction of the maximum drag (0.0 - 1.0)
    pub fn power_ratio(&self) -> f32 {
        if self.max_power > 0.0 {
            self.power / self.max_power
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    fn aim() -> AimInput {
        AimInput::new(150.0, 25.0)
    }

    #[test]
    fn test_tap_without_drag_cancels() {
        let mut input = aim();
        input.on_start(Vec2::new(100.0, 100.0));
        input.on_end();
        assert_eq!(input.consume_action(), Some(AimAction::Cancel));
        assert!(!input.dragging);
    }

    #[test]
    fn test_release_back_inside_start_circle_cancels() {
        let mut input = aim();
        input.on_start(Vec2::new(100.0, 100.0));
        input.on_move(Vec2::new(50.0, 150.0));
        input.on_move(Vec2::new(110.0, 105.0));
        assert!(input.power > 0.0);
        input.on_end();
        assert_eq!(input.consume_action(), Some(AimAction::Cancel));
    }

    #[test]
    fn test_release_outside_start_circle_shoots() {
        let mut input = aim();
        input.on_start(Vec2::new(100.0, 100.0));
        // 40 px away (3-4-5 triangle)
        input.on_move(Vec2::new(76.0, 132.0));
        input.on_end();
        assert_eq!(input.consume_action(), Some(AimAction::Shoot));
    }

    #[test]
    fn test_pull_back_aims_opposite() {
        let mut input = aim();
        input.on_start(Vec2::new(100.0, 100.0));
        // Pull down-left, expect up-right aim
        input.on_move(Vec2::new(70.0, 130.0));
        assert_eq!(input.vector, Vec2::new(30.0, -30.0));
        assert!((input.angle - (-FRAC_PI_4)).abs() < 1e-6);
    }

    #[test]
    fn test_power_clamped() {
        let mut input = aim();
        input.on_start(Vec2::new(300.0, 300.0));
        input.on_move(Vec2::new(0.0, 300.0));
        assert_eq!(input.power, 150.0);
        assert_eq!(input.power_ratio(), 1.0);
    }

    #[test]
    fn test_consume_is_idempotent() {
        let mut input = aim();
        input.on_start(Vec2::new(100.0, 100.0));
        input.on_move(Vec2::new(60.0, 100.0));
        input.on_end();
        assert_eq!(input.consume_action(), Some(AimAction::Shoot));
        assert_eq!(input.consume_action(), None);
        assert_eq!(input.pending(), None);
    }

    #[test]
    fn test_move_and_end_ignored_when_not_dragging() {
        let mut input = aim();
        input.on_move(Vec2::new(10.0, 10.0));
        assert_eq!(input.current, Vec2::ZERO);
        assert_eq!(input.power, 0.0);
        input.on_end();
        assert_eq!(input.consume_action(), None);
    }

    #[test]
    fn test_new_gesture_resets_aim() {
        let mut input = aim();
        input.apply(PointerEvent::Start { pos: Vec2::new(100.0, 100.0) });
        input.apply(PointerEvent::Move { pos: Vec2::new(50.0, 100.0) });
        input.apply(PointerEvent::End);
        assert_eq!(input.pending(), Some(AimAction::Shoot));

        input.apply(PointerEvent::Start { pos: Vec2::new(20.0, 20.0) });
        assert_eq!(input.pending(), None);
        assert_eq!(input.power, 0.0);
        assert_eq!(input.angle, 0.0);
        assert!(input.dragging);
    }
}
