//! Frame-loop driver
//!
//! Owns the simulation state, the frame clock and the leaderboard. The host
//! (browser animation frame, native loop, test) calls `frame` once per
//! display refresh and forwards pointer events.

use crate::config::GameConfig;
use crate::highscores::Leaderboard;
use crate::platform::storage::Storage;
use crate::platform::time::{FrameClock, FrameDelta};
use crate::sim::{GameEvent, GamePhase, GameState, PointerEvent, Snapshot, tick};

/// What happened during one `frame` call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// The simulation advanced (false for skipped or game-over frames)
    pub updated: bool,
    pub events: Vec<GameEvent>,
    /// Leaderboard rank achieved, if the game ended this frame
    pub final_rank: Option<usize>,
}

/// A running game session
pub struct Game {
    state: GameState,
    clock: FrameClock,
    leaderboard: Leaderboard,
    /// Seed for the next reset
    next_seed: u64,
}

impl Game {
    pub fn new(config: GameConfig, seed: u64, storage: Box<dyn Storage>) -> Self {
        let leaderboard = Leaderboard::open(
            storage,
            config.leaderboard_key.clone(),
            config.leaderboard_max_entries,
        );
        let clock = FrameClock::new(config.max_frame_delta);
        log::info!("Apple Archer initialized (seed {})", seed);
        Self {
            state: GameState::new(config, seed),
            clock,
            leaderboard,
            next_seed: seed.wrapping_add(1),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn pointer(&mut self, event: PointerEvent) {
        self.state.aim.apply(event);
    }

    /// Run one display frame at wall-clock time `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> FrameReport {
        let mut report = FrameReport::default();

        let dt = match self.clock.sample(now_ms) {
            FrameDelta::Step(dt) => dt,
            FrameDelta::Skipped(_) => return report,
        };
        if self.state.phase == GamePhase::GameOver {
            return report;
        }

        tick(&mut self.state, dt);
        report.updated = true;
        report.events = self.state.drain_events();

        for event in &report.events {
            if let GameEvent::GameOver { score } = *event {
                report.final_rank = self.leaderboard.save_score(score);
            }
        }
        report
    }

    /// Start over with fresh entities and zeroed progress.
    ///
    /// Any pending settle countdown belongs to the old state and is dropped
    /// with it; the clock restarts so the next frame is a zero step.
    pub fn reset(&mut self) {
        log::info!("Resetting game...");
        let config = self.state.config.clone();
        let seed = self.next_seed;
        self.next_seed = self.next_seed.wrapping_add(1);
        self.state = GameState::new(config, seed);
        self.clock.reset();
    }
}
