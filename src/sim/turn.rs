//! Turn ownership and hole/game progression
//!
//! Owns the "current player" pointer and the hole lifecycle. Turn advance
//! and hole completion are local, idempotent operations; the only deferred
//! work (hole change, session reset) goes through the scheduler.

use crate::consts::*;

use super::scheduler::Transition;
use super::state::{GameEvent, GamePhase, GameState};

impl GameState {
    /// Pass the turn to the next player who has not finished the hole.
    ///
    /// Scans forward cyclically from the current seat, bounded to one full
    /// lap by the loop itself, so a roster where everyone has completed
    /// falls through to hole-completion handling instead of spinning.
    pub fn advance_turn(&mut self) {
        let n = self.players.len();
        self.players[self.current_player].current_turn = false;

        let start = self.current_player;
        let next = (1..=n)
            .map(|step| (start + step) % n)
            .find(|&candidate| !self.players[candidate].completed_hole);

        match next {
            Some(idx) => {
                self.give_turn(idx);
                let player_id = self.players[idx].id;
                log::debug!("Turn -> {} ({})", self.players[idx].name, player_id);
                self.events.push(GameEvent::PlayerChanged { player_id });
            }
            None => self.handle_all_completed(),
        }
    }

    /// Mark a player as having holed out. Idempotent: a duplicate call
    /// (e.g. from a stale deferred task) changes nothing.
    pub fn complete_hole(&mut self, idx: usize) {
        if self.players[idx].completed_hole {
            return;
        }
        let player = &mut self.players[idx];
        player.completed_hole = true;
        player.score += player.throws;
        let (player_id, throws) = (player.id, player.throws);
        log::info!(
            "{} holed out in {} throw(s)",
            self.players[idx].name,
            throws
        );
        self.events.push(GameEvent::HoleCompleted { player_id, throws });

        if self.all_completed() {
            self.handle_all_completed();
        }
    }

    /// Every player has finished the hole: queue the next hole or end the
    /// game. Nobody holds the turn flag until the transition lands.
    fn handle_all_completed(&mut self) {
        for player in &mut self.players {
            player.current_turn = false;
        }
        if self.course.has_next_hole() {
            self.scheduler.schedule(
                self.time_ticks,
                HOLE_TRANSITION_DELAY_TICKS,
                Transition::NextHole,
            );
        } else {
            self.finish_game();
        }
    }

    /// Apply a fired scheduler transition
    pub(crate) fn apply_transition(&mut self, transition: Transition) {
        match transition {
            Transition::NextHole => self.start_next_hole(),
            Transition::SessionReset => self.reset_session(),
        }
    }

    fn start_next_hole(&mut self) {
        if !self.course.advance_hole() {
            // Stale task raced past the last hole; completion handling
            // already ended the game
            return;
        }
        self.place_roster_at_tee();
        let hole_index = self.course.current;
        log::info!("Hole {} (par {})", hole_index + 1, self.course.current_hole().par);
        self.events.push(GameEvent::HoleChanged { hole_index });
        self.give_turn(0);
        self.events.push(GameEvent::PlayerChanged {
            player_id: self.players[0].id,
        });
    }

    fn finish_game(&mut self) {
        self.phase = GamePhase::GameComplete;
        let winner_id = self.winner().map(|p| p.id).unwrap_or(0);
        log::info!("Game complete, winner id {winner_id}");
        self.events.push(GameEvent::GameComplete { winner_id });
        self.scheduler.schedule(
            self.time_ticks,
            SESSION_RESET_DELAY_TICKS,
            Transition::SessionReset,
        );
    }

    /// Minimum-score player (first seat wins ties)
    pub fn winner(&self) -> Option<&crate::sim::state::Player> {
        self.players.iter().min_by_key(|p| p.score)
    }

    /// Start a fresh session on the same course instead of exiting
    fn reset_session(&mut self) {
        for player in &mut self.players {
            player.score = 0;
        }
        self.course.reset();
        self.place_roster_at_tee();
        self.events.push(GameEvent::SessionReset);
        self.give_turn(0);
        self.events.push(GameEvent::PlayerChanged {
            player_id: self.players[0].id,
        });
    }
}
