//! Audio and haptics
//!
//! The simulation never plays anything itself. The host maps drained
//! `GameEvent`s to cues and rumbles here and hands them to whatever backend
//! it has.

use crate::settings::Settings;
use crate::sim::{CollectibleKind, DefeatCause, GameEvent, RunResult};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Jump,
    DoubleJump,
    Shoot,
    /// Enemy stomped
    Stomp,
    /// Enemy shot down
    EnemyDefeat,
    /// Projectile chipped the boss
    BossHit,
    BossDefeat,
    /// Hammer slam
    BossSlam,
    PlayerHurt,
    Coin,
    Heart,
    Star,
    Achievement,
    LevelComplete,
    Victory,
    GameOver,
}

/// A vibration request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rumble {
    pub duration_ms: f32,
    /// 0.0 - 1.0
    pub intensity: f32,
}

/// Backend that actually makes noise
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue, volume: f32);
    fn rumble(&mut self, rumble: Rumble);
}

/// The cue for an event, if it has one
pub fn cue_for(event: &GameEvent) -> Option<SoundCue> {
    let cue = match event {
        GameEvent::Jumped { double: false } => SoundCue::Jump,
        GameEvent::Jumped { double: true } => SoundCue::DoubleJump,
        GameEvent::Shot => SoundCue::Shoot,
        GameEvent::EnemyDefeated {
            species, cause, ..
        } => {
            if species.is_boss() {
                SoundCue::BossDefeat
            } else if *cause == DefeatCause::Stomp {
                SoundCue::Stomp
            } else {
                SoundCue::EnemyDefeat
            }
        }
        GameEvent::BossHit { hp, .. } if *hp > 0 => SoundCue::BossHit,
        GameEvent::BossSlam { .. } => SoundCue::BossSlam,
        GameEvent::PlayerDamaged { .. } => SoundCue::PlayerHurt,
        GameEvent::Collected { kind } => match kind {
            CollectibleKind::Coin => SoundCue::Coin,
            CollectibleKind::Heart => SoundCue::Heart,
            CollectibleKind::Star => SoundCue::Star,
        },
        GameEvent::AchievementUnlocked(_) => SoundCue::Achievement,
        GameEvent::LevelComplete { .. } => SoundCue::LevelComplete,
        GameEvent::RunEnded { result, .. } => match result {
            RunResult::Victory => SoundCue::Victory,
            RunResult::GameOver => SoundCue::GameOver,
        },
        _ => return None,
    };
    Some(cue)
}

/// The rumble for an event, if it has one
pub fn rumble_for(event: &GameEvent) -> Option<Rumble> {
    match event {
        GameEvent::BossSlam { .. } => Some(Rumble {
            duration_ms: 400.0,
            intensity: 1.0,
        }),
        GameEvent::PlayerDamaged { .. } => Some(Rumble {
            duration_ms: 200.0,
            intensity: 0.5,
        }),
        _ => None,
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    haptics: bool,
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            haptics: true,
        }
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.muted = settings.muted;
        self.haptics = settings.haptics;
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(cue, vol);
    }

    /// Play whatever an event calls for
    pub fn handle(&mut self, event: &GameEvent) {
        if let Some(cue) = cue_for(event) {
            self.play(cue);
        }
        if !self.haptics {
            return;
        }
        if let Some(rumble) = rumble_for(event) {
            self.sink.rumble(rumble);
        }
    }
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        log::debug!("sfx {cue:?} at {volume:.2}");
    }

    fn rumble(&mut self, rumble: Rumble) {
        log::debug!(
            "rumble {:.0}ms at {:.1}",
            rumble.duration_ms,
            rumble.intensity
        );
    }
}
