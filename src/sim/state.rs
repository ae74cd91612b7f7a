//! Game state and core simulation types
//!
//! `GameState` is owned by the frame loop and passed by reference to `tick`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{Apple, Archer, Arrow, Stump, Target};
use super::input::AimInput;
use super::physics::predict_trajectory;
use crate::config::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Arrow nocked, waiting for a shot
    Aiming,
    /// Arrow in the air
    Flying,
    /// Apple was hit, settling before the next round
    HitPause,
    /// Arrow hit the stump or left the field, settling before the next round
    MissPause,
    /// Out of arrows (terminal until reset)
    GameOver,
}

impl GamePhase {
    /// Settle pauses gate off physics and input
    pub fn is_paused(&self) -> bool {
        matches!(self, GamePhase::HitPause | GamePhase::MissPause)
    }
}

/// How a flight ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Hit,
    Miss,
}

/// Round advance waiting out the settle delay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledAdvance {
    pub outcome: RoundOutcome,
    /// Normalized frames left
    pub remaining: f32,
}

/// Horizontal wind acting on the arrow
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// Signed acceleration (+ right, - left)
    pub force: f32,
    /// +1.0 or -1.0, survives across hits unless re-rolled
    pub direction: f32,
}

impl Default for Wind {
    fn default() -> Self {
        Self {
            force: 0.0,
            direction: 1.0,
        }
    }
}

/// Notable things that happened during a tick (drained by the caller)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Shot { angle: f32, power: f32 },
    ShotCancelled,
    AppleHit,
    StumpHit,
    OutOfBounds,
    RoundStarted { score: u32, arrows_remaining: u32 },
    WindChanged { force: f32 },
    GameOver { score: u32 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub score: u32,
    pub arrows_remaining: u32,
    /// Archer → stump distance (capped)
    pub target_distance: f32,
    pub wind: Wind,
    pub phase: GamePhase,
    /// Round advance waiting on the settle delay
    pub scheduled: Option<ScheduledAdvance>,
    pub archer: Archer,
    pub target: Target,
    pub arrow: Arrow,
    pub aim: AimInput,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with the given seed
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let archer = Archer::new(&config);
        let target_distance = config.initial_target_distance;
        let height = random_stump_height(&mut rng, &config);
        let target = Target::new(&config, config.archer_x + target_distance, height);
        let arrow = archer.nock(config.arrow_length);
        let aim = AimInput::new(config.max_power_drag, config.start_circle_radius);

        Self {
            seed,
            rng,
            score: 0,
            arrows_remaining: config.initial_arrows,
            target_distance,
            wind: Wind::default(),
            phase: GamePhase::Aiming,
            scheduled: None,
            archer,
            target,
            arrow,
            aim,
            time_ticks: 0,
            events: Vec::new(),
            config,
        }
    }

    pub fn stump(&self) -> &Stump {
        self.target.stump()
    }

    pub fn apple(&self) -> &Apple {
        self.target.apple()
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> Snapshot {
        let aiming = self.phase == GamePhase::Aiming && self.aim.dragging;
        let trajectory = if aiming {
            predict_trajectory(self.archer.arrow_origin, self.aim.angle, self.aim.power, &self.config)
        } else {
            Vec::new()
        };

        Snapshot {
            phase: self.phase,
            score: self.score,
            arrows_remaining: self.arrows_remaining,
            wind_force: self.wind.force,
            archer: self.archer.clone(),
            stump: self.stump().clone(),
            apple: self.apple().clone(),
            arrow: self.arrow.clone(),
            arrow_visible: self.arrow.active || self.phase.is_paused(),
            aim: aiming.then(|| AimView {
                start: self.aim.start,
                current: self.aim.current,
                power_ratio: self.aim.power_ratio(),
                start_circle_radius: self.config.start_circle_radius,
            }),
            trajectory,
        }
    }
}

/// Uniform stump height within the configured range
pub fn random_stump_height(rng: &mut Pcg32, config: &GameConfig) -> f32 {
    if config.max_stump_height > config.min_stump_height {
        rng.random_range(config.min_stump_height..config.max_stump_height)
    } else {
        config.min_stump_height
    }
}

/// Aim-line data for the renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AimView {
    pub start: Vec2,
    pub current: Vec2,
    pub power_ratio: f32,
    pub start_circle_radius: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub arrows_remaining: u32,
    pub wind_force: f32,
    pub archer: Archer,
    pub stump: Stump,
    pub apple: Apple,
    pub arrow: Arrow,
    pub arrow_visible: bool,
    /// Present only while dragging in the aiming phase
    pub aim: Option<AimView>,
    /// Preview points (empty unless aiming)
    pub trajectory: Vec<Vec2>,
}
