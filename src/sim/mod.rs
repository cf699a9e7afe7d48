//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies beyond the injected boundaries

pub mod collision;
pub mod disc;
pub mod scheduler;
pub mod state;
pub mod tick;
pub mod turn;

pub use collision::{CollisionHit, Obstacle, ObstacleKind, PortalKind, PortalSpec, resolve};
pub use disc::Disc;
pub use scheduler::{Scheduler, Transition};
pub use state::{Color, DiscSpec, GameEvent, GamePhase, GameState, Player, default_roster};
pub use tick::{TickInput, tick};
