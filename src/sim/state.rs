//! Game state and core simulation types
//!
//! The roster, the shared disc, and session-wide bookkeeping live here.
//! Turn progression rules are in `turn`, per-tick orchestration in `tick`.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::disc::Disc;
use super::scheduler::Scheduler;
use crate::consts::*;
use crate::course::Course;
use crate::portal::PortalEffect;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Current player holds the disc, waiting for charge input
    AwaitingThrow,
    /// Charge power ramping while input is held
    Charging,
    /// Disc is airborne (or rolling) until it settles
    InFlight,
    /// All holes played; session resets after a delay
    GameComplete,
}

/// RGB player color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form used by the scorecard and portal parameters
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A disc model in a player's bag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscSpec {
    pub name: String,
    /// Speed rating (drivers ~12, putters ~4); scales launch velocity
    pub speed: u8,
}

/// A roster member (human or AI seat). Created once at game start,
/// never destroyed during a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub color: Color,
    pub position: Vec3,
    pub throws: u32,
    /// Cumulative across holes, non-decreasing
    pub score: u32,
    pub completed_hole: bool,
    pub current_turn: bool,
    pub is_ai: bool,
    pub bag: Vec<DiscSpec>,
    pub selected_disc: usize,
    /// Where this player's last throw came to rest (this hole)
    pub last_disc_position: Option<Vec3>,
}

impl Player {
    pub fn new(id: u32, name: &str, color: Color, is_ai: bool) -> Self {
        Self {
            id,
            name: name.to_string(),
            color,
            position: Vec3::ZERO,
            throws: 0,
            score: 0,
            completed_hole: false,
            current_turn: false,
            is_ai,
            bag: default_bag(),
            selected_disc: 0,
            last_disc_position: None,
        }
    }

    /// The disc model in hand. A stale selection falls back to the last
    /// bag slot; an empty bag yields `None`.
    pub fn selected_disc(&self) -> Option<&DiscSpec> {
        self.bag.get(self.selected_disc).or_else(|| self.bag.last())
    }
}

fn default_bag() -> Vec<DiscSpec> {
    vec![
        DiscSpec { name: "Driver".into(), speed: 12 },
        DiscSpec { name: "Midrange".into(), speed: 7 },
        DiscSpec { name: "Putter".into(), speed: 4 },
    ]
}

/// AI seat names and colors, paired by index
const AI_SEATS: [(&str, Color); 3] = [
    ("Hyzer", Color::new(0xe6, 0x4a, 0x3c)),
    ("Anny", Color::new(0x3c, 0x8f, 0xe6)),
    ("Mully", Color::new(0x4a, 0xc0, 0x5a)),
];

/// Build the standard roster: one human seat plus `ai_count` named AI seats
pub fn default_roster(human_name: &str, ai_count: usize) -> Vec<Player> {
    let mut players = vec![Player::new(
        0,
        human_name,
        Color::new(0xf0, 0xc0, 0x30),
        false,
    )];
    for i in 0..ai_count.min(AI_SEATS.len()) {
        let (name, color) = AI_SEATS[i];
        players.push(Player::new(i as u32 + 1, name, color, true));
    }
    players
}

/// Events emitted by the simulation for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Turn passed to a new player
    PlayerChanged { player_id: u32 },
    /// Disc touched the ground with the given impact speed
    GroundTouch { position: Vec3, impact_speed: f32 },
    /// Disc came to rest
    DiscSettled { position: Vec3 },
    /// Player holed out; score delta equals their throw count
    HoleCompleted { player_id: u32, throws: u32 },
    /// Roster moved to a new hole
    HoleChanged { hole_index: usize },
    /// Disc entered a portal volume
    PortalTriggered { obstacle_id: u32 },
    /// Last hole finished; winner has the minimum score
    GameComplete { winner_id: u32 },
    /// Scores and positions reset for a fresh session
    SessionReset,
}

/// Complete session state. Owns the roster, the shared disc, the course,
/// and the deferred-transition scheduler; constructed once and threaded
/// by reference (no globals).
#[derive(Debug)]
pub struct GameState {
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub time_ticks: u64,
    pub players: Vec<Player>,
    pub current_player: usize,
    pub disc: Disc,
    pub course: Course,
    /// Charge power in [0, 100] while in `Charging`
    pub charge_power: f32,
    pub scheduler: Scheduler,
    pub portal: PortalEffect,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, course: Course, players: Vec<Player>, portal: PortalEffect) -> Self {
        assert!(!players.is_empty(), "roster must have at least one player");
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::AwaitingThrow,
            time_ticks: 0,
            players,
            current_player: 0,
            disc: Disc::at_rest(Vec3::ZERO, 12),
            course,
            charge_power: 0.0,
            scheduler: Scheduler::new(),
            portal,
            events: Vec::new(),
        };
        state.place_roster_at_tee();
        state.give_turn(0);
        state
    }

    /// Move every player to the current hole's tee and clear per-hole state
    pub(crate) fn place_roster_at_tee(&mut self) {
        let tee = self.course.current_hole().tee;
        for (i, player) in self.players.iter_mut().enumerate() {
            // Fan the roster out slightly so seats don't overlap
            player.position = tee + Vec3::new(i as f32 * 0.6, 0.0, 0.0);
            player.throws = 0;
            player.completed_hole = false;
            player.current_turn = false;
            player.last_disc_position = None;
        }
    }

    /// Hand the turn to `idx` and respawn the disc at their lie
    pub(crate) fn give_turn(&mut self, idx: usize) {
        for player in &mut self.players {
            player.current_turn = false;
        }
        let player = &mut self.players[idx];
        player.current_turn = true;
        self.current_player = idx;

        let spawn = if player.throws == 0 {
            player.position
        } else {
            player.last_disc_position.unwrap_or(player.position)
        };
        let rating = player
            .selected_disc()
            .map_or(FALLBACK_DISC_SPEED, |d| d.speed);
        self.disc = Disc::at_rest(spawn + Vec3::Y * HAND_HEIGHT, rating);
        self.phase = GamePhase::AwaitingThrow;
        self.charge_power = 0.0;
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player]
    }

    pub fn all_completed(&self) -> bool {
        self.players.iter().all(|p| p.completed_hole)
    }

    /// Drain events accumulated since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
