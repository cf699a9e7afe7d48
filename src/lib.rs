//! Portal Golf - A turn-based disc golf simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (disc physics, collisions, turn logic)
//! - `course`: Hole/course model, terrain descriptors, save/load
//! - `portal`: Portal navigation side effect (query parameter encoding)
//! - `scorecard`: Read-only scorecard view over the roster
//! - `platform`: Storage/navigation boundaries (kept abstract for testing)

pub mod course;
pub mod platform;
pub mod portal;
pub mod scorecard;
pub mod sim;

pub use scorecard::{ScorecardRow, scorecard};
pub use sim::{GameEvent, GamePhase, GameState, TickInput, tick};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Gravity acceleration (world units/s²)
    pub const GRAVITY: f32 = 9.8;
    /// Resting height of the disc above the ground plane
    pub const FLOOR_OFFSET: f32 = 0.025;
    /// Fraction of vertical speed retained (inverted) after a ground bounce
    pub const RESTITUTION: f32 = 0.1;
    /// Horizontal velocity retained per ground contact
    pub const GROUND_FRICTION: f32 = 0.8;
    /// Spin retained per ground contact
    pub const SPIN_DAMPING: f32 = 0.7;
    /// Speed below which the disc counts as grounded
    pub const SETTLE_SPEED: f32 = 0.03;
    /// Consecutive grounded ticks before the disc settles (1s at 60 Hz)
    pub const SETTLE_TICKS: u32 = 60;

    /// Launch speed = aim · (rating/10) · (power/100) · this
    pub const LAUNCH_SPEED_SCALE: f32 = 18.0;
    /// Vertical launch component per point of charge power
    pub const LAUNCH_LIFT_PER_POWER: f32 = 0.06;
    /// Spin magnitude per full-power launch (rad/s)
    pub const LAUNCH_SPIN_RATE: f32 = 6.0;
    /// Charge power gained per second while holding
    pub const CHARGE_RATE: f32 = 60.0;
    /// Disc spawn height above the holding player's position
    pub const HAND_HEIGHT: f32 = 1.0;
    /// Putter-rated speed used when a player's bag is empty
    pub const FALLBACK_DISC_SPEED: u8 = 4;

    /// Uniform AABB expansion applied to portal hitboxes
    pub const PORTAL_MARGIN: f32 = 0.5;
    /// Bushes only collide below this height (walk/fly-through above)
    pub const BUSH_MAX_HEIGHT: f32 = 0.3;
    /// Bush footprint shrink factor (about center, full height)
    pub const BUSH_FOOTPRINT_SCALE: f32 = 0.4;
    /// Rock footprint shrink factor (about center, full height)
    pub const ROCK_FOOTPRINT_SCALE: f32 = 0.7;

    /// Horizontal distance from the target within which a settled disc holes out
    pub const HOLE_RADIUS: f32 = 1.2;

    /// Delay before moving the roster to the next hole (3s)
    pub const HOLE_TRANSITION_DELAY_TICKS: u64 = 180;
    /// Delay before a finished game resets for a new session (5s)
    pub const SESSION_RESET_DELAY_TICKS: u64 = 300;
}

/// Horizontal (xz-plane) length of a vector
#[inline]
pub fn horizontal_speed(v: Vec3) -> f32 {
    (v.x * v.x + v.z * v.z).sqrt()
}

/// Horizontal (xz-plane) distance between two points
#[inline]
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    horizontal_speed(a - b)
}

/// Round to two decimal places (portal query parameters)
#[inline]
pub fn round2(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}
