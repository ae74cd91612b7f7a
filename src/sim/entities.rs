//! Scene entities: archer, stump, apple, arrow
//!
//! The apple's position is derived from the stump. `Target` owns both and is
//! the only way to move the stump, so the apple is always recomputed right
//! after any stump change.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::{direction, heading};

/// The stickman archer. Fixed for the lifetime of a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Archer {
    /// Feet position (on the ground line)
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub head_radius: f32,
    /// Where every new arrow spawns
    pub arrow_origin: Vec2,
}

impl Archer {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(config.archer_x, config.ground_y()),
            width: config.stickman_width,
            height: config.stickman_height,
            head_radius: config.head_radius,
            arrow_origin: config.arrow_origin(),
        }
    }

    /// A fresh, inactive arrow nocked at the bow
    pub fn nock(&self, length: f32) -> Arrow {
        Arrow::new(self.arrow_origin, length)
    }
}

/// Tree stump the apple rests on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stump {
    /// Center x
    pub x: f32,
    /// Bottom y (ground line)
    pub ground_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Stump {
    #[inline]
    pub fn top_y(&self) -> f32 {
        self.ground_y - self.height
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x - self.width / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// The apple balanced on the stump
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Apple {
    pub pos: Vec2,
    pub radius: f32,
    /// Gap between the stump top and the apple's bottom
    pub lift: f32,
    pub hit: bool,
}

impl Apple {
    fn resting_on(stump: &Stump, radius: f32, lift: f32) -> Self {
        let mut apple = Self {
            pos: Vec2::ZERO,
            radius,
            lift,
            hit: false,
        };
        apple.settle_on(stump);
        apple
    }

    fn settle_on(&mut self, stump: &Stump) {
        self.pos = Vec2::new(stump.x, stump.top_y() - self.lift - self.radius);
    }
}

/// Stump plus the apple sitting on it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    stump: Stump,
    apple: Apple,
}

impl Target {
    pub fn new(config: &GameConfig, x: f32, height: f32) -> Self {
        let stump = Stump {
            x,
            ground_y: config.ground_y(),
            width: config.stump_width,
            height,
        };
        let apple = Apple::resting_on(&stump, config.apple_radius, config.apple_lift);
        Self { stump, apple }
    }

    pub fn stump(&self) -> &Stump {
        &self.stump
    }

    pub fn apple(&self) -> &Apple {
        &self.apple
    }

    /// Move/resize the stump. The apple is re-seated before returning.
    pub fn reposition(&mut self, x: f32, height: f32) {
        self.stump.x = x;
        self.stump.height = height;
        self.apple.settle_on(&self.stump);
    }

    pub fn mark_apple_hit(&mut self) {
        self.apple.hit = true;
    }

    pub fn restore_apple(&mut self) {
        self.apple.hit = false;
    }
}

/// An arrow. Spawned inactive at the bow; becomes live once shot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arrow {
    /// Center of the shaft
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing (radians), follows velocity while in flight
    pub angle: f32,
    pub length: f32,
    pub active: bool,
}

impl Arrow {
    pub fn new(pos: Vec2, length: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            angle: 0.0,
            length,
            active: false,
        }
    }

    /// Give the arrow its launch velocity and make it live
    pub fn shoot(&mut self, vel: Vec2) {
        self.vel = vel;
        self.angle = heading(vel);
        self.active = true;
    }

    /// Point of the arrowhead
    #[inline]
    pub fn tip(&self) -> Vec2 {
        self.pos + direction(self.angle) * (self.length / 2.0)
    }
}
