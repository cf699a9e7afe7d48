//! Scorecard view
//!
//! Pure read over the roster for the presentation layer; recomputed on
//! demand and never mutates player state.

use serde::Serialize;

use crate::sim::state::Player;

/// One row per roster seat
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorecardRow {
    pub name: String,
    pub score: u32,
    pub throws: u32,
    pub is_current_turn: bool,
    pub has_completed_hole: bool,
    /// `#rrggbb`
    pub color: String,
}

/// Build the scorecard in roster order
pub fn scorecard(players: &[Player]) -> Vec<ScorecardRow> {
    players
        .iter()
        .map(|p| ScorecardRow {
            name: p.name.clone(),
            score: p.score,
            throws: p.throws,
            is_current_turn: p.current_turn,
            has_completed_hole: p.completed_hole,
            color: p.color.hex(),
        })
        .collect()
}
