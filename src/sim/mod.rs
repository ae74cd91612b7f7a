//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied frame delta only
//! - Seeded RNG only
//! - No rendering, storage or platform dependencies

pub mod autopilot;
pub mod entities;
pub mod input;
pub mod physics;
pub mod state;
pub mod tick;

pub use autopilot::{ShotPlan, plan_shot};
pub use entities::{Apple, Archer, Arrow, Stump, Target};
pub use input::{AimAction, AimInput, PointerEvent};
pub use physics::{
    advance, collides_with_apple, collides_with_stump, integrate, is_out_of_bounds,
    launch_velocity, predict_trajectory,
};
pub use state::{
    AimView, GameEvent, GamePhase, GameState, RoundOutcome, ScheduledAdvance, Snapshot, Wind,
};
pub use tick::{advance_round, tick};
