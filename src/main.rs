//! Dash Runner entry point
//!
//! Native builds run headless autopilot sessions for smoke-testing the
//! simulation; the browser host drives the library directly and renders it.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use dash_runner::consts::*;
    use dash_runner::sim::{
        GameEvent, GamePhase, GameState, ObstacleKind, acknowledge_game_over, request_jump,
        start_session, tick,
    };
    use dash_runner::Profile;

    env_logger::init();
    log::info!("Dash Runner (native) starting headless demo...");

    let mut profile = Profile::load();
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut state = GameState::new(seed);

    const SESSIONS: u32 = 3;
    const MAX_TICKS: u64 = 20_000;

    for session in 1..=SESSIONS {
        start_session(&mut state, &profile);

        while state.phase == GamePhase::Running && state.frame < MAX_TICKS {
            autopilot(&mut state);
            tick(&mut state, &mut profile, NOMINAL_TICK_MS);

            for event in state.drain_events() {
                match event {
                    GameEvent::GameEnded {
                        final_score,
                        high_score,
                        new_record,
                    } => log::info!(
                        "Session {session}: score {final_score}, high score {high_score}, new record: {new_record}"
                    ),
                    other => log::debug!("Event: {other:?}"),
                }
            }
        }

        if state.phase == GamePhase::Running {
            log::info!("Session {session} hit the tick cap, abandoning run");
            state.phase = GamePhase::Idle;
        }
        acknowledge_game_over(&mut state);
        profile.save();
    }

    log::info!(
        "Demo done: {} currency, high score {}, distance mission {:.0}",
        profile.currency,
        profile.high_score,
        profile.missions.run_distance.progress
    );

    // Simple jump AI: hop over approaching ground obstacles. Flying
    // obstacles pass over a grounded runner, so stay down for those.
    fn autopilot(state: &mut GameState) {
        if state.player.airborne {
            return;
        }
        let player_right = state.player.pos.x + state.player.size.x;
        let lead = state.scroll_speed * 28.0;
        let threat = state.obstacles.iter().any(|obs| {
            obs.kind != ObstacleKind::Flying
                && obs.pos.x > player_right
                && obs.pos.x - player_right < lead
        });
        if threat {
            request_jump(state);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives the library; nothing to run here
}
