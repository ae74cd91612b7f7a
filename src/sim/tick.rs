//! Per-frame simulation tick
//!
//! Drives the round state machine:
//! `Aiming -> Flying -> HitPause | MissPause -> Aiming` (or `GameOver`).
//! The settle pause is a countdown inside the tick, not a timer.

use rand::Rng;

use super::input::AimAction;
use super::physics::{advance, collides_with_apple, collides_with_stump, is_out_of_bounds, launch_velocity};
use super::state::{GameEvent, GamePhase, GameState, RoundOutcome, ScheduledAdvance, random_stump_height};

/// Advance the game by `dt` normalized frames (1.0 = one 60 Hz frame)
pub fn tick(state: &mut GameState, dt: f32) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.time_ticks += 1;

    match state.phase {
        GamePhase::Aiming => tick_aiming(state),
        GamePhase::Flying => tick_flying(state, dt),
        GamePhase::HitPause | GamePhase::MissPause => tick_settle(state, dt),
        GamePhase::GameOver => {}
    }
}

fn tick_aiming(state: &mut GameState) {
    match state.aim.consume_action() {
        Some(AimAction::Shoot) => {
            let (angle, power) = (state.aim.angle, state.aim.power);
            let vel = launch_velocity(angle, power, state.config.arrow_speed_factor);
            state.arrow.shoot(vel);
            state.phase = GamePhase::Flying;
            log::debug!(
                "Arrow shot: angle={:.2}, power={:.2}, initial vx={:.2}, vy={:.2}",
                angle,
                power,
                vel.x,
                vel.y
            );
            state.events.push(GameEvent::Shot { angle, power });
        }
        Some(AimAction::Cancel) => {
            state.events.push(GameEvent::ShotCancelled);
        }
        None => {}
    }
}

fn tick_flying(state: &mut GameState, dt: f32) {
    let substeps = state.config.flight_substeps.max(1);
    let sub_dt = dt / substeps as f32;
    let canvas_width = state.config.canvas_width;
    let ground_y = state.config.ground_y();

    for step in 1..=substeps {
        if !state.arrow.active {
            break;
        }
        advance(&mut state.arrow, state.config.gravity, state.wind.force, sub_dt);

        // Priority: apple, then stump, then bounds
        let outcome = if collides_with_apple(&state.arrow, state.apple()) {
            log::debug!("Apple hit detected in sub-step {}", step);
            state.target.mark_apple_hit();
            state.events.push(GameEvent::AppleHit);
            RoundOutcome::Hit
        } else if collides_with_stump(&state.arrow, state.stump()) {
            log::debug!("Stump hit detected in sub-step {}", step);
            state.events.push(GameEvent::StumpHit);
            RoundOutcome::Miss
        } else if is_out_of_bounds(&state.arrow, canvas_width, ground_y) {
            log::debug!("Out of bounds detected in sub-step {}", step);
            state.events.push(GameEvent::OutOfBounds);
            RoundOutcome::Miss
        } else {
            continue;
        };

        state.arrow.active = false;
        state.phase = match outcome {
            RoundOutcome::Hit => GamePhase::HitPause,
            RoundOutcome::Miss => GamePhase::MissPause,
        };
        state.scheduled = Some(ScheduledAdvance {
            outcome,
            remaining: state.config.settle_delay_frames(),
        });
        break;
    }
}

fn tick_settle(state: &mut GameState, dt: f32) {
    let Some(scheduled) = state.scheduled.as_mut() else {
        // Paused with nothing scheduled can't resolve on its own
        log::warn!("Settle pause without a scheduled advance; resuming aiming");
        state.phase = GamePhase::Aiming;
        return;
    };

    scheduled.remaining -= dt;
    if scheduled.remaining > 0.0 {
        return;
    }
    let outcome = scheduled.outcome;
    state.scheduled = None;
    advance_round(state, outcome);
}

/// Prepare the next shot after a hit or a miss
pub fn advance_round(state: &mut GameState, outcome: RoundOutcome) {
    match outcome {
        RoundOutcome::Hit => {
            state.score += 1;

            let distance = state.target_distance + state.config.distance_increment;
            state.target_distance = distance.min(state.config.max_target_distance());

            let height = random_stump_height(&mut state.rng, &state.config);
            let x = state.config.archer_x + state.target_distance;
            state.target.reposition(x, height);

            if state.score > state.config.wind_score_threshold {
                update_wind(state);
            }

            log::info!(
                "Apple Hit! Score: {}. Next round distance: {:.0}, Stump Height: {:.0}",
                state.score,
                state.target_distance,
                height
            );
        }
        RoundOutcome::Miss => {
            state.arrows_remaining = state.arrows_remaining.saturating_sub(1);
            log::info!("Miss! Arrows remaining: {}", state.arrows_remaining);

            if state.arrows_remaining == 0 {
                state.phase = GamePhase::GameOver;
                state.arrow.active = false;
                log::info!("Game Over! Final Score: {}", state.score);
                state.events.push(GameEvent::GameOver { score: state.score });
                return;
            }
        }
    }

    state.target.restore_apple();
    state.arrow = state.archer.nock(state.config.arrow_length);
    state.aim.consume_action();
    state.phase = GamePhase::Aiming;
    state.events.push(GameEvent::RoundStarted {
        score: state.score,
        arrows_remaining: state.arrows_remaining,
    });
}

/// Scale wind with score above the threshold, maybe flip it
fn update_wind(state: &mut GameState) {
    let config = &state.config;
    let above = (state.score - config.wind_score_threshold) as f32;
    let magnitude = (above * config.wind_per_point).min(config.max_wind_force);

    if state.rng.random_bool(config.wind_direction_change_chance.clamp(0.0, 1.0)) {
        state.wind.direction = if state.rng.random_bool(0.5) { 1.0 } else { -1.0 };
    }
    state.wind.force = magnitude * state.wind.direction;

    log::info!("Wind Force: {:.3}", state.wind.force);
    state.events.push(GameEvent::WindChanged {
        force: state.wind.force,
    });
}
