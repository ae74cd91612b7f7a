//! Apple Archer - A drag-to-aim archery arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, aiming, entities, round state machine)
//! - `game`: Frame-loop driver tying the simulation to a clock and the leaderboard
//! - `platform`: Browser/native platform abstraction (time, storage)
//! - `highscores`: Top-N score list with best-effort persistence
//! - `config`: Injected game configuration

pub mod config;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod sim;

pub use config::GameConfig;
pub use game::Game;
pub use highscores::{HighScores, Leaderboard};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions (portrait)
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 700.0;
    /// Ground line sits this far above the canvas bottom
    pub const GROUND_MARGIN: f32 = 40.0;

    /// Downward acceleration (pixels per normalized frame²)
    pub const GRAVITY: f32 = 1.3;
    /// Drag power → launch speed
    pub const ARROW_SPEED_FACTOR: f32 = 0.2;
    /// Drag distance is clamped to this many pixels
    pub const MAX_POWER_DRAG: f32 = 150.0;
    pub const TRAJECTORY_STEP_TIME: f32 = 0.15;
    pub const TRAJECTORY_STEPS: u32 = 70;
    /// Prediction stops this far below the ground line
    pub const TRAJECTORY_GROUND_BUFFER: f32 = 10.0;
    /// Integration sub-steps per tick while the arrow flies
    pub const FLIGHT_SUBSTEPS: u32 = 3;

    /// Archer (stickman) geometry
    pub const ARCHER_POS_X: f32 = 50.0;
    pub const STICKMAN_HEIGHT: f32 = 70.0;
    pub const STICKMAN_WIDTH: f32 = 18.0;
    pub const HEAD_RADIUS: f32 = 9.0;
    /// Bow sits slightly in front of the body, a bit above the hips
    pub const BOW_OFFSET_X: f32 = 5.0;
    pub const BOW_HEIGHT_RATIO: f32 = 0.55;

    pub const ARROW_LENGTH: f32 = 30.0;

    /// Apple sits on top of the stump, lifted slightly
    pub const APPLE_RADIUS: f32 = 10.0;
    pub const APPLE_LIFT: f32 = 5.0;

    /// Stump placement
    pub const INITIAL_TARGET_DISTANCE: f32 = 200.0;
    pub const DISTANCE_INCREMENT: f32 = 15.0;
    pub const MIN_STUMP_HEIGHT: f32 = 40.0;
    pub const MAX_STUMP_HEIGHT: f32 = 100.0;
    pub const STUMP_WIDTH: f32 = 30.0;
    /// Right-hand margin kept free beyond the stump
    pub const STUMP_MARGIN: f32 = 20.0;

    /// Gameplay
    pub const INITIAL_ARROWS: u32 = 3;
    pub const START_CIRCLE_RADIUS: f32 = 25.0;

    /// Settle pause after a hit or miss (milliseconds)
    pub const SETTLE_DELAY_MS: f32 = 300.0;
    /// Frame deltas are normalized to this baseline
    pub const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Normalized deltas at or above this are discarded (tab was backgrounded)
    pub const MAX_FRAME_DELTA: f32 = 10.0;

    /// Wind kicks in once score exceeds this
    pub const WIND_SCORE_THRESHOLD: u32 = 3;
    pub const WIND_PER_POINT: f32 = 0.008;
    pub const MAX_WIND_FORCE: f32 = 0.15;
    /// Chance the wind re-rolls its direction on a hit
    pub const WIND_DIRECTION_CHANGE_CHANCE: f64 = 0.4;

    /// Leaderboard
    pub const LEADERBOARD_KEY: &str = "stickmanArcherScoresPink";
    pub const LEADERBOARD_MAX_ENTRIES: usize = 10;
}

/// Unit vector for an angle (radians, screen coordinates: +y is down)
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle of a vector (radians, screen coordinates)
#[inline]
pub fn heading(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}
