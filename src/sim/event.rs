//! Events emitted by the simulation
//!
//! The tick never calls audio, telemetry or HUD code directly. It queues
//! these and the host drains them after the step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::achievements::Achievement;
use super::enemy::Species;
use super::state::CollectibleKind;

/// How an enemy went down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefeatCause {
    /// Landed on from above (or struck from below, for crawlers)
    Stomp,
    Projectile,
}

/// Why the run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunResult {
    Victory,
    GameOver,
}

impl RunResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunResult::Victory => "victory",
            RunResult::GameOver => "game_over",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted,
    Paused,
    Resumed,
    Jumped { double: bool },
    Shot,
    EnemyDefeated {
        species: Species,
        cause: DefeatCause,
        points: u64,
    },
    BossHit { hp: u32, max_hp: u32 },
    BossJumped,
    /// Hammer raised
    BossWindup,
    /// Hammer landed at `pos` (boss feet)
    BossSlam { pos: Vec2, hit_player: bool },
    PlayerDamaged { lives: u8 },
    Collected { kind: CollectibleKind },
    ComboIncreased { count: u32, multiplier: u32 },
    AchievementUnlocked(Achievement),
    /// `level` was cleared and `next` loaded
    LevelComplete { level: usize, next: usize },
    RunEnded { result: RunResult, score: u64 },
}
