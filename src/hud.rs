//! HUD text
//!
//! A flat snapshot of what the heads-up display shows, built from the state
//! after each tick. Pure output: nothing here feeds back into the game.

use crate::sim::{GamePhase, GameState};

#[derive(Debug, Clone, PartialEq)]
pub struct HudSnapshot {
    pub score: u64,
    pub lives: u8,
    /// 1-based level number
    pub level: usize,
    pub level_name: String,
    /// Whole seconds of play
    pub seconds: u32,
    pub combo: Option<String>,
    /// (hp, max) while a boss is alive
    pub boss_hp: Option<(u32, u32)>,
    pub paused: bool,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        let boss_hp = state
            .enemies
            .iter()
            .filter(|e| e.alive)
            .find_map(|e| e.boss().map(|b| (b.hp, b.max_hp)));
        Self {
            score: state.score,
            lives: state.lives,
            level: state.level_index + 1,
            level_name: state
                .current_level()
                .map(|l| l.name.clone())
                .unwrap_or_default(),
            seconds: (state.game_time / 1000.0) as u32,
            combo: combo_text(state.combo.count, state.combo.multiplier),
            boss_hp,
            paused: state.phase == GamePhase::Paused,
        }
    }

    /// One heart per life
    pub fn hearts(&self) -> String {
        "♥".repeat(usize::from(self.lives))
    }

    pub fn line(&self) -> String {
        let mut line = format!(
            "L{} {} | score {} | {} | {}s",
            self.level,
            self.level_name,
            self.score,
            self.hearts(),
            self.seconds
        );
        if let Some(combo) = &self.combo {
            line.push_str(" | ");
            line.push_str(combo);
        }
        if let Some((hp, max)) = self.boss_hp {
            line.push_str(&format!(" | boss {hp}/{max}"));
        }
        if self.paused {
            line.push_str(" | PAUSED");
        }
        line
    }
}

/// Combo banner, shown once a multiplier is in effect
pub fn combo_text(count: u32, multiplier: u32) -> Option<String> {
    (multiplier > 1).then(|| format!("{count} HIT COMBO x{multiplier}"))
}

pub trait HudSink {
    fn show(&mut self, hud: &HudSnapshot);
}

/// Logs the HUD line whenever it changes
#[derive(Debug, Default)]
pub struct LogHud {
    last: Option<String>,
}

impl HudSink for LogHud {
    fn show(&mut self, hud: &HudSnapshot) {
        let line = hud.line();
        if self.last.as_deref() != Some(line.as_str()) {
            log::debug!("{line}");
            self.last = Some(line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{LevelDescriptor, Species};

    #[test]
    fn test_combo_text_needs_multiplier() {
        assert_eq!(combo_text(2, 1), None);
        assert_eq!(combo_text(5, 3).as_deref(), Some("5 HIT COMBO x3"));
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let level = LevelDescriptor::new("Golem's Lair").enemy(Species::CatGolem, 600.0, 380.0);
        let mut state = GameState::with_levels(1, vec![level]);
        state.start();
        state.score = 1234;
        state.game_time = 65_432.0;

        let hud = HudSnapshot::from_state(&state);
        assert_eq!(hud.level, 1);
        assert_eq!(hud.level_name, "Golem's Lair");
        assert_eq!(hud.seconds, 65);
        assert_eq!(hud.boss_hp, Some((10, 10)));
        assert_eq!(hud.hearts(), "♥♥♥");
        assert!(hud.line().contains("boss 10/10"));
        assert!(hud.combo.is_none());
    }
}
