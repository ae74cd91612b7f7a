//! Game configuration
//!
//! A flat, serializable bag of tunables injected into the simulation.
//! Defaults mirror `crate::consts`; a JSON document may override any subset.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Canvas ===
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Distance from canvas bottom to the ground line
    pub ground_margin: f32,

    // === Physics ===
    pub gravity: f32,
    pub arrow_speed_factor: f32,
    pub max_power_drag: f32,
    pub trajectory_step_time: f32,
    pub trajectory_steps: u32,
    pub trajectory_ground_buffer: f32,
    pub flight_substeps: u32,

    // === Entities ===
    pub archer_x: f32,
    pub stickman_height: f32,
    pub stickman_width: f32,
    /// Bow x offset from the archer's center line
    pub bow_offset_x: f32,
    /// Bow height as a fraction of the stickman's height
    pub bow_height_ratio: f32,
    pub head_radius: f32,
    pub arrow_length: f32,
    pub apple_radius: f32,
    pub apple_lift: f32,
    pub stump_width: f32,
    pub stump_margin: f32,
    pub min_stump_height: f32,
    pub max_stump_height: f32,

    // === Progression ===
    pub initial_target_distance: f32,
    pub distance_increment: f32,
    pub initial_arrows: u32,
    pub start_circle_radius: f32,
    pub settle_delay_ms: f32,
    pub max_frame_delta: f32,

    // === Wind ===
    pub wind_score_threshold: u32,
    pub wind_per_point: f32,
    pub max_wind_force: f32,
    pub wind_direction_change_chance: f64,

    // === Leaderboard ===
    pub leaderboard_key: String,
    pub leaderboard_max_entries: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            ground_margin: GROUND_MARGIN,

            gravity: GRAVITY,
            arrow_speed_factor: ARROW_SPEED_FACTOR,
            max_power_drag: MAX_POWER_DRAG,
            trajectory_step_time: TRAJECTORY_STEP_TIME,
            trajectory_steps: TRAJECTORY_STEPS,
            trajectory_ground_buffer: TRAJECTORY_GROUND_BUFFER,
            flight_substeps: FLIGHT_SUBSTEPS,

            archer_x: ARCHER_POS_X,
            stickman_height: STICKMAN_HEIGHT,
            stickman_width: STICKMAN_WIDTH,
            bow_offset_x: BOW_OFFSET_X,
            bow_height_ratio: BOW_HEIGHT_RATIO,
            head_radius: HEAD_RADIUS,
            arrow_length: ARROW_LENGTH,
            apple_radius: APPLE_RADIUS,
            apple_lift: APPLE_LIFT,
            stump_width: STUMP_WIDTH,
            stump_margin: STUMP_MARGIN,
            min_stump_height: MIN_STUMP_HEIGHT,
            max_stump_height: MAX_STUMP_HEIGHT,

            initial_target_distance: INITIAL_TARGET_DISTANCE,
            distance_increment: DISTANCE_INCREMENT,
            initial_arrows: INITIAL_ARROWS,
            start_circle_radius: START_CIRCLE_RADIUS,
            settle_delay_ms: SETTLE_DELAY_MS,
            max_frame_delta: MAX_FRAME_DELTA,

            wind_score_threshold: WIND_SCORE_THRESHOLD,
            wind_per_point: WIND_PER_POINT,
            max_wind_force: MAX_WIND_FORCE,
            wind_direction_change_chance: WIND_DIRECTION_CHANGE_CHANCE,

            leaderboard_key: LEADERBOARD_KEY.to_string(),
            leaderboard_max_entries: LEADERBOARD_MAX_ENTRIES,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON override document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Y coordinate of the ground line (stump bases and archer feet)
    pub fn ground_y(&self) -> f32 {
        self.canvas_height - self.ground_margin
    }

    /// Where every new arrow spawns (the archer's bow)
    pub fn arrow_origin(&self) -> Vec2 {
        Vec2::new(
            self.archer_x + self.bow_offset_x,
            self.ground_y() - self.stickman_height * self.bow_height_ratio,
        )
    }

    /// Right-most stump center that still leaves the margin free
    pub fn max_stump_x(&self) -> f32 {
        self.canvas_width - self.stump_width / 2.0 - self.stump_margin
    }

    /// Cap on archer → stump distance
    pub fn max_target_distance(&self) -> f32 {
        self.max_stump_x() - self.archer_x
    }

    /// Settle pause length in normalized frames
    pub fn settle_delay_frames(&self) -> f32 {
        self.settle_delay_ms / FRAME_MS
    }
}
