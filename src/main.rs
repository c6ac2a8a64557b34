//! Star Strike entry point
//!
//! Native builds run a headless session: load settings, let the demo AI (or
//! an idle pilot) play at display rate until the run ends, then print the
//! final HUD as JSON.

use std::time::{SystemTime, UNIX_EPOCH};

use star_strike::Settings;
use star_strike::consts::SIM_DT;
use star_strike::platform::FrameClock;
use star_strike::settings::DEFAULT_SETTINGS_PATH;
use star_strike::sim::{ControlInput, GameEvent, GamePhase, GameState, autopilot_input, tick};

fn main() {
    env_logger::init();
    log::info!("Star Strike (headless) starting...");

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());
    let settings = Settings::load(&path);
    let seed = settings.seed.unwrap_or_else(clock_seed);

    let mut state = GameState::with_tuning(seed, settings.tuning.clone());
    state.start(settings.control_scheme);

    // Simulated display refresh timestamps, one per frame
    let mut frame_clock = FrameClock::new();
    let frame_ms = f64::from(SIM_DT) * 1000.0;
    let mut now_ms = 0.0;
    frame_clock.delta(now_ms);

    let mut frames = 0u32;
    while !state.phase.is_terminal() && frames < settings.max_frames {
        now_ms += frame_ms;
        let dt = frame_clock.delta(now_ms);
        let input = if settings.autopilot {
            autopilot_input(&state)
        } else {
            ControlInput::default()
        };

        for event in tick(&mut state, &input, dt) {
            match event {
                GameEvent::BossSpawned(id) => log::info!("Boss {} incoming", id),
                GameEvent::CraftHit => log::info!("Craft hit at frame {}", frames),
                GameEvent::Fired { .. } | GameEvent::BossFired => {}
                other => log::trace!("{:?}", other),
            }
        }
        frames += 1;
    }

    match state.phase {
        GamePhase::Won => log::info!("Boss defeated after {} frames", frames),
        GamePhase::GameOver => log::info!("Game over after {} frames", frames),
        phase => log::warn!("Stopped in {:?} after {} frames (frame cap)", phase, frames),
    }

    match serde_json::to_string_pretty(&state.hud()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not encode HUD: {}", e),
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
