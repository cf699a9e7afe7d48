//! Per-frame simulation tick
//!
//! One logical tick per rendered frame, in strict order: deferred
//! transitions, input, disc integration, collision resolution, turn
//! routing. The presentation layer supplies a `TickInput` and drains
//! events afterwards.

use glam::{Quat, Vec3};
use rand::Rng;

use super::collision;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::horizontal_distance;
use crate::platform::Navigator;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Horizontal aim direction (need not be normalized)
    pub aim: Option<Vec3>,
    /// Charge button held
    pub charge: bool,
    /// Charge button released this tick (throw)
    pub release: bool,
    /// AI plays every seat (demo/headless mode)
    pub idle_mode: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, nav: &mut dyn Navigator, dt: f32) {
    // A fired portal abandons the session; nothing runs mid-navigation
    if state.portal.fired() {
        return;
    }

    state.time_ticks += 1;

    // Deferred transitions fire on the same queue as ticks, never overlapped
    for transition in state.scheduler.due(state.time_ticks) {
        state.apply_transition(transition);
    }

    if state.phase == GamePhase::GameComplete {
        return;
    }

    // AI seats synthesize their own input
    let synthesized;
    let input = if input.idle_mode || state.current_player().is_ai {
        synthesized = idle_input(state);
        &synthesized
    } else {
        input
    };

    match state.phase {
        GamePhase::AwaitingThrow => {
            if input.charge {
                state.phase = GamePhase::Charging;
                state.charge_power = 0.0;
            }
        }

        GamePhase::Charging => {
            state.charge_power = (state.charge_power + CHARGE_RATE * dt).min(100.0);
            if input.release {
                match input.aim {
                    Some(aim) if aim.length_squared() > 1e-6 => {
                        let power = state.charge_power;
                        throw(state, aim, power);
                    }
                    // Zero-length aim is rejected here, not inside the
                    // integrator; the charge simply keeps ramping
                    _ => log::warn!("Throw released without a usable aim direction"),
                }
            }
        }

        GamePhase::InFlight => {
            state.disc.step(dt, &mut state.events);

            let hit = collision::resolve(state.disc.pos, &state.course.obstacles);
            if let Some(index) = hit.obstacle {
                let obstacle = &state.course.obstacles[index];
                if let Some(spec) = obstacle.portal_spec().cloned() {
                    let obstacle_id = obstacle.id;
                    let player = &state.players[state.current_player];
                    // A misconfigured portal declines the navigation;
                    // flight (and the settle check below) must go on
                    if state.portal.trigger(&spec, player, &state.disc, nav) {
                        state
                            .events
                            .push(GameEvent::PortalTriggered { obstacle_id });
                        return;
                    }
                } else {
                    state.disc.deflect();
                }
            }

            if state.disc.take_settled() {
                on_disc_settled(state);
            }
        }

        GamePhase::GameComplete => {}
    }
}

/// Record the throw and put the disc in the air
fn throw(state: &mut GameState, aim: Vec3, power: f32) {
    state.players[state.current_player].throws += 1;
    state.disc.launch(aim, power);
    state.phase = GamePhase::InFlight;
    log::debug!(
        "{} throw #{} at power {:.0}",
        state.current_player().name,
        state.current_player().throws,
        power
    );
}

/// Settle routing: hole check, then turn advance or hole completion
fn on_disc_settled(state: &mut GameState) {
    let rest = state.disc.pos;
    state.players[state.current_player].last_disc_position = Some(rest);

    let target = state.course.current_hole().target;
    if horizontal_distance(rest, target) <= HOLE_RADIUS {
        state.complete_hole(state.current_player);
    }
    // complete_hole schedules the hole/game transition when everyone is
    // done; only pass the turn while somebody can still play
    if !state.all_completed() {
        state.advance_turn();
    }
}

/// Synthesize input for an AI seat: aim at the target with seeded jitter,
/// charge to a power proportional to the remaining distance.
fn idle_input(state: &mut GameState) -> TickInput {
    let target = state.course.current_hole().target;
    let from = state.disc.pos;

    let mut dir = Vec3::new(target.x - from.x, 0.0, target.z - from.z);
    if dir.length_squared() < 1e-6 {
        dir = Vec3::X;
    }
    let jitter = state.rng.random_range(-0.08f32..0.08);
    let aim = Quat::from_rotation_y(jitter) * dir.normalize();

    let distance = horizontal_distance(from, target);
    let desired_power = (distance * 4.0).clamp(15.0, 100.0);

    match state.phase {
        GamePhase::AwaitingThrow => TickInput {
            aim: Some(aim),
            charge: true,
            release: false,
            idle_mode: true,
        },
        GamePhase::Charging => TickInput {
            aim: Some(aim),
            charge: true,
            release: state.charge_power >= desired_power,
            idle_mode: true,
        },
        _ => TickInput {
            idle_mode: true,
            ..TickInput::default()
        },
    }
}
