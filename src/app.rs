//! Host-facing driver
//!
//! Owns the game state plus the scheduler, edge detection and every optional
//! collaborator. The host calls `frame` once per display frame with the real
//! elapsed time and the current controls.

use crate::audio::{AudioManager, AudioSink};
use crate::hud::{HudSink, HudSnapshot};
use crate::persistence;
use crate::platform::{FrameClock, InputSource, KeyValueStore};
use crate::settings::Settings;
use crate::sim::{Controls, EdgeDetector, GamePhase, GameState, tick};
use crate::telemetry::{TelemetryEvent, TelemetrySink};

pub struct App {
    state: GameState,
    settings: Settings,
    clock: FrameClock,
    edges: EdgeDetector,
    // Track phase for auto-save
    last_phase: GamePhase,
    audio: Option<AudioManager>,
    telemetry: Option<Box<dyn TelemetrySink>>,
    hud: Option<Box<dyn HudSink>>,
    store: Option<Box<dyn KeyValueStore>>,
}

impl App {
    /// App on the built-in campaign with no collaborators attached
    pub fn new(seed: u64) -> Self {
        Self::from_state(GameState::new(seed))
    }

    pub fn from_state(state: GameState) -> Self {
        let last_phase = state.phase;
        let mut app = Self {
            state,
            settings: Settings::default(),
            clock: FrameClock::default(),
            edges: EdgeDetector::default(),
            last_phase,
            audio: None,
            telemetry: None,
            hud: None,
            store: None,
        };
        app.apply_settings();
        app
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self.apply_settings();
        self
    }

    pub fn with_audio(mut self, sink: Box<dyn AudioSink>) -> Self {
        self.audio = Some(AudioManager::new(sink));
        self.apply_settings();
        self
    }

    pub fn with_telemetry(mut self, sink: Box<dyn TelemetrySink>) -> Self {
        self.telemetry = Some(sink);
        self
    }

    pub fn with_hud(mut self, sink: Box<dyn HudSink>) -> Self {
        self.hud = Some(sink);
        self
    }

    /// Attach storage and pull settings and achievements from it
    pub fn with_store(mut self, store: Box<dyn KeyValueStore>) -> Self {
        self.settings = Settings::load(&*store);
        self.state.achievements = persistence::load_achievements(&*store);
        self.store = Some(store);
        self.apply_settings();
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> Option<&dyn KeyValueStore> {
        self.store.as_deref()
    }

    pub fn ticks(&self) -> u64 {
        self.clock.ticks()
    }

    /// Change settings at runtime and persist them if storage is attached
    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.apply_settings();
        if let Some(store) = self.store.as_deref_mut() {
            if let Err(e) = self.settings.save(store) {
                log::warn!("Failed to save settings: {e}");
            }
        }
    }

    fn apply_settings(&mut self) {
        self.state.max_particles = self.settings.max_particles();
        if let Some(audio) = &mut self.audio {
            audio.apply_settings(&self.settings);
        }
    }

    /// Leave the title screen and begin a run
    pub fn start_game(&mut self) {
        self.state.start();
        self.clock.reset();
        self.edges = EdgeDetector::default();
        self.last_phase = self.state.phase;
        self.dispatch();
    }

    /// Abandon the run and go back to the title screen
    pub fn return_to_menu(&mut self) {
        self.save_achievements();
        self.state.return_to_menu();
        self.last_phase = self.state.phase;
        self.clock.reset();
    }

    /// One display frame. Returns true if a simulation step ran.
    pub fn frame(&mut self, elapsed_ms: f32, controls: Controls) -> bool {
        self.edges.observe(controls);
        let Some(dt) = self.clock.advance(elapsed_ms) else {
            return false;
        };

        let input = self.edges.tick_input();
        tick(&mut self.state, &input, dt);
        // Clear one-shot inputs after processing
        self.edges.consume();

        if !self.settings.screen_shake() {
            self.state.screen_shake = 0.0;
        }
        self.dispatch();

        // Auto-save on phase transitions
        let phase = self.state.phase;
        if phase != self.last_phase {
            if matches!(
                phase,
                GamePhase::Paused | GamePhase::GameOver | GamePhase::Victory
            ) {
                self.save_achievements();
            }
            self.last_phase = phase;
        }
        true
    }

    /// `frame` with controls polled from `source`
    pub fn frame_from(&mut self, elapsed_ms: f32, source: &mut dyn InputSource) -> bool {
        let controls = source.poll();
        self.frame(elapsed_ms, controls)
    }

    /// Hand queued events to whichever collaborators are attached
    fn dispatch(&mut self) {
        for event in self.state.drain_events() {
            if let Some(audio) = &mut self.audio {
                audio.handle(&event);
            }
            if let Some(telemetry) = &mut self.telemetry {
                if let Some(tracked) = TelemetryEvent::from_game_event(&event) {
                    telemetry.track(&tracked);
                }
            }
        }
        if let Some(hud) = &mut self.hud {
            hud.show(&HudSnapshot::from_state(&self.state));
        }
    }

    fn save_achievements(&mut self) {
        let Some(store) = self.store.as_deref_mut() else {
            return;
        };
        match persistence::save_achievements(store, &self.state.achievements) {
            Ok(()) => log::info!("Achievements saved"),
            Err(e) => log::warn!("Failed to save achievements: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::STEP_MS;
    use crate::persistence::ACHIEVEMENTS_KEY;
    use crate::platform::MemoryStore;
    use crate::sim::{Achievement, LevelDescriptor, Species};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Tracker(Rc<RefCell<Vec<TelemetryEvent>>>);

    impl TelemetrySink for Tracker {
        fn track(&mut self, event: &TelemetryEvent) {
            self.0.borrow_mut().push(event.clone());
        }
    }

    fn one_cat() -> LevelDescriptor {
        LevelDescriptor::new("one").enemy(Species::Cat, 800.0, 465.0)
    }

    #[test]
    fn test_runs_without_collaborators() {
        let mut app = App::new(7);
        app.start_game();
        for _ in 0..10 {
            assert!(app.frame(STEP_MS, Controls::default()));
        }
        assert_eq!(app.ticks(), 10);
        assert_eq!(app.state().phase, GamePhase::Playing);
    }

    #[test]
    fn test_frame_from_polls_source() {
        use crate::platform::ScriptedInput;

        let mut app = App::from_state(GameState::with_levels(1, vec![one_cat()]));
        app.start_game();
        let right = Controls {
            right: true,
            ..Default::default()
        };
        let mut input = ScriptedInput::default().hold(right, 5);
        for _ in 0..5 {
            app.frame_from(STEP_MS, &mut input);
        }
        assert_eq!(input.remaining(), 0);
        assert!(app.state().player.pos.x > 120.0);
        assert_eq!(app.state().player.facing, 1.0);
    }

    #[test]
    fn test_short_frames_skip_ticks() {
        let mut app = App::new(7);
        app.start_game();
        assert!(!app.frame(STEP_MS / 2.5, Controls::default()));
        assert!(app.frame(STEP_MS, Controls::default()));
    }

    #[test]
    fn test_jump_press_between_ticks_is_not_lost() {
        let mut app = App::from_state(GameState::with_levels(1, vec![one_cat()]));
        app.start_game();
        for _ in 0..60 {
            app.frame(STEP_MS, Controls::default());
        }
        assert!(app.state().player.on_ground);

        let jump = Controls {
            jump: true,
            ..Default::default()
        };
        // Pressed on a frame too short to tick, still held when the tick lands
        assert!(!app.frame(1.0, jump));
        assert!(app.frame(STEP_MS, jump));
        assert_eq!(app.state().player.jumps_remaining, 1);
    }

    #[test]
    fn test_telemetry_sees_start_and_defeat() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut app = App::from_state(GameState::with_levels(1, vec![one_cat(), one_cat()]))
            .with_telemetry(Box::new(Tracker(seen.clone())));
        app.start_game();
        app.state_mut()
            .defeat_enemy(0, crate::sim::DefeatCause::Projectile);
        app.frame(STEP_MS, Controls::default());

        let seen = seen.borrow();
        assert_eq!(seen[0], TelemetryEvent::GameStart);
        assert!(seen.contains(&TelemetryEvent::EnemyDefeated { enemy_type: "cat" }));
    }

    #[test]
    fn test_game_over_persists_achievements() {
        let mut app = App::from_state(GameState::with_levels(1, vec![one_cat()]))
            .with_store(Box::new(MemoryStore::new()));
        app.start_game();
        app.state_mut().achievements.unlock(Achievement::ComboMaster);
        app.state_mut().lives = 1;
        app.state_mut().damage_player();
        app.frame(STEP_MS, Controls::default());

        assert_eq!(app.state().phase, GamePhase::GameOver);
        let stored = app.store().and_then(|s| s.get(ACHIEVEMENTS_KEY));
        let loaded: crate::sim::Achievements =
            persistence::decode(&stored.expect("achievements saved")).unwrap();
        assert!(loaded.is_unlocked(Achievement::ComboMaster));
    }

    #[test]
    fn test_settings_drive_particle_cap_and_shake() {
        let settings = Settings {
            particles: false,
            reduced_motion: true,
            ..Settings::default()
        };
        let mut app = App::new(3).with_settings(settings);
        assert_eq!(app.state().max_particles, 0);
        app.start_game();
        app.state_mut().screen_shake = 1.0;
        app.frame(STEP_MS, Controls::default());
        assert_eq!(app.state().screen_shake, 0.0);
    }

    #[test]
    fn test_return_to_menu_discards_run() {
        let mut app = App::new(3);
        app.start_game();
        app.frame(STEP_MS, Controls::default());
        app.return_to_menu();
        assert_eq!(app.state().phase, GamePhase::Start);
        assert!(app.state().enemies.is_empty());
        // Frames on the menu do nothing
        app.frame(STEP_MS, Controls::default());
        assert_eq!(app.state().phase, GamePhase::Start);
    }
}
