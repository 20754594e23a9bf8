//! Dracula's Revenge - headless native runner
//!
//! Plays the campaign with a simple autopilot, logging HUD, audio and
//! telemetry output. Set `RUST_LOG=debug` to see every cue.

use draculas_revenge::App;
use draculas_revenge::audio::LogAudio;
use draculas_revenge::consts::STEP_MS;
use draculas_revenge::hud::LogHud;
use draculas_revenge::platform::FileStore;
use draculas_revenge::sim::{Controls, GamePhase, GameState};
use draculas_revenge::telemetry::LogTelemetry;

/// Ten minutes of frames at 60Hz
const MAX_FRAMES: u64 = 60 * 60 * 10;

/// Walks toward the nearest live enemy, shooting the whole time and hopping
/// every so often
#[derive(Debug, Default)]
struct Autopilot {
    frame: u64,
}

impl Autopilot {
    fn decide(&mut self, state: &GameState) -> Controls {
        self.frame += 1;
        let px = state.player.rect().center().x;
        let target = state
            .enemies
            .iter()
            .filter(|e| e.alive)
            .map(|e| e.rect().center().x)
            .min_by(|a, b| {
                (a - px)
                    .abs()
                    .partial_cmp(&(b - px).abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        let mut controls = Controls {
            shoot: true,
            jump: self.frame % 45 < 3,
            ..Default::default()
        };
        if let Some(x) = target {
            controls.left = x < px - 60.0;
            controls.right = x > px + 60.0;
            if !controls.left && !controls.right {
                // Close enough: face it and let the shots do the work
                controls.left = x < px && state.player.facing > 0.0;
                controls.right = x > px && state.player.facing < 0.0;
            }
        }
        controls
    }
}

fn main() {
    env_logger::init();
    log::info!("Dracula's Revenge (native) starting...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xD4AC_u64);
    log::info!("Game initialized with seed: {seed}");

    let mut app = App::new(seed)
        .with_audio(Box::new(LogAudio))
        .with_telemetry(Box::new(LogTelemetry))
        .with_hud(Box::new(LogHud::default()));

    let save_dir = std::env::temp_dir().join("draculas-revenge");
    match FileStore::open(&save_dir) {
        Ok(store) => {
            log::info!("Saving to {}", store.dir().display());
            app = app.with_store(Box::new(store));
        }
        Err(e) => log::warn!("Storage unavailable, progress will not persist: {e}"),
    }

    app.start_game();
    let mut pilot = Autopilot::default();
    for _ in 0..MAX_FRAMES {
        let controls = pilot.decide(app.state());
        app.frame(STEP_MS, controls);
        if matches!(app.state().phase, GamePhase::GameOver | GamePhase::Victory) {
            break;
        }
    }

    let state = app.state();
    log::info!(
        "Run finished: {:?} on level {} with score {} after {:.1}s",
        state.phase,
        state.level_index + 1,
        state.score,
        state.game_time / 1000.0
    );
    for achievement in state.achievements.unlocked() {
        log::info!("Unlocked: {}", achievement.title());
    }
    app.return_to_menu();
}
