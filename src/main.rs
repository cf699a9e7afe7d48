//! Portal Golf headless demo
//!
//! Runs a full AI session on the built-in course at a fixed timestep and
//! prints the resulting scorecard. Useful for exercising the simulation
//! without a renderer attached.

use portal_golf::consts::SIM_DT;
use portal_golf::course::Course;
use portal_golf::platform::LogNavigator;
use portal_golf::portal::PortalEffect;
use portal_golf::sim::{GameEvent, TickInput, default_roster, tick};
use portal_golf::{GameState, scorecard};

/// Demo runs at most ten simulated minutes
const MAX_TICKS: u64 = 60 * 60 * 10;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = 0x9e3779b9;
    let mut state = GameState::new(
        seed,
        Course::demo(),
        default_roster("You", 3),
        PortalEffect::from_location("https://golf.example/play"),
    );
    let mut nav = LogNavigator;
    let input = TickInput { idle_mode: true, ..TickInput::default() };

    log::info!(
        "Starting '{}' with {} players (seed {seed:#x})",
        state.course.name,
        state.players.len()
    );

    let mut done = false;
    while state.time_ticks < MAX_TICKS && !done {
        tick(&mut state, &input, &mut nav, SIM_DT);
        for event in state.take_events() {
            match event {
                GameEvent::HoleCompleted { player_id, throws } => {
                    log::info!("Player {player_id} finished the hole in {throws}");
                }
                GameEvent::HoleChanged { hole_index } => {
                    log::info!("Moving to hole {}", hole_index + 1);
                }
                GameEvent::GameComplete { winner_id } => {
                    log::info!("Winner: player {winner_id}");
                    done = true;
                }
                GameEvent::PortalTriggered { obstacle_id } => {
                    log::info!("Disc entered portal {obstacle_id}");
                    done = true;
                }
                _ => {}
            }
        }
    }

    println!("\nFinal scorecard for '{}':", state.course.name);
    for row in scorecard(&state.players) {
        println!(
            "  {:<10} {} score {:>2}  throws {:>2}{}",
            row.name,
            row.color,
            row.score,
            row.throws,
            if row.has_completed_hole { "  (holed out)" } else { "" }
        );
    }
}
