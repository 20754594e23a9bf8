//! Achievements
//!
//! Unlocks are one-way. Counters are cumulative and travel with the unlock
//! set when persisted.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Multiplier needed for "Combo Master"
pub const COMBO_MASTER_MULTIPLIER: u32 = 3;
/// Projectile kills needed for "Sharpshooter"
pub const SHARPSHOOTER_KILLS: u32 = 10;
/// Double jumps needed for "Acrobat"
pub const ACROBAT_DOUBLE_JUMPS: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Achievement {
    ComboMaster,
    Sharpshooter,
    Acrobat,
}

impl Achievement {
    pub const ALL: [Achievement; 3] = [
        Achievement::ComboMaster,
        Achievement::Sharpshooter,
        Achievement::Acrobat,
    ];

    /// Stable identifier (telemetry, storage)
    pub fn id(&self) -> &'static str {
        match self {
            Achievement::ComboMaster => "combo_master",
            Achievement::Sharpshooter => "sharpshooter",
            Achievement::Acrobat => "acrobat",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Achievement::ComboMaster => "Combo Master",
            Achievement::Sharpshooter => "Sharpshooter",
            Achievement::Acrobat => "Acrobat",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Achievements {
    unlocked: BTreeSet<Achievement>,
    pub projectile_kills: u32,
    pub double_jumps: u32,
}

impl Achievements {
    pub fn is_unlocked(&self, achievement: Achievement) -> bool {
        self.unlocked.contains(&achievement)
    }

    pub fn unlocked(&self) -> impl Iterator<Item = Achievement> + '_ {
        self.unlocked.iter().copied()
    }

    /// Returns true only if this call unlocked it
    pub fn unlock(&mut self, achievement: Achievement) -> bool {
        self.unlocked.insert(achievement)
    }

    /// Count a projectile hit; returns "Sharpshooter" if this one earned it
    pub fn record_projectile_kill(&mut self) -> Option<Achievement> {
        self.projectile_kills = self.projectile_kills.saturating_add(1);
        self.unlock_if(
            Achievement::Sharpshooter,
            self.projectile_kills >= SHARPSHOOTER_KILLS,
        )
    }

    /// Count a double jump; returns "Acrobat" if this one earned it
    pub fn record_double_jump(&mut self) -> Option<Achievement> {
        self.double_jumps = self.double_jumps.saturating_add(1);
        self.unlock_if(
            Achievement::Acrobat,
            self.double_jumps >= ACROBAT_DOUBLE_JUMPS,
        )
    }

    /// Check the multiplier after a combo increment
    pub fn record_combo(&mut self, multiplier: u32) -> Option<Achievement> {
        self.unlock_if(
            Achievement::ComboMaster,
            multiplier >= COMBO_MASTER_MULTIPLIER,
        )
    }

    fn unlock_if(&mut self, achievement: Achievement, met: bool) -> Option<Achievement> {
        (met && self.unlock(achievement)).then_some(achievement)
    }
}
