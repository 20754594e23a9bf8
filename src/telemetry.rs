//! Telemetry
//!
//! A handful of named events with primitive parameters. Delivery is the
//! sink's problem; nothing waits on it.

use serde::Serialize;

use crate::sim::GameEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TelemetryEvent {
    GameStart,
    GameEnd { score: u64, result: &'static str },
    EnemyDefeated { enemy_type: &'static str },
    UnlockAchievement { achievement_id: &'static str },
}

impl TelemetryEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TelemetryEvent::GameStart => "game_start",
            TelemetryEvent::GameEnd { .. } => "game_end",
            TelemetryEvent::EnemyDefeated { .. } => "enemy_defeated",
            TelemetryEvent::UnlockAchievement { .. } => "unlock_achievement",
        }
    }

    /// The telemetry counterpart of a simulation event, if any
    pub fn from_game_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::GameStarted => Some(TelemetryEvent::GameStart),
            GameEvent::RunEnded { result, score } => Some(TelemetryEvent::GameEnd {
                score: *score,
                result: result.as_str(),
            }),
            GameEvent::EnemyDefeated { species, .. } => Some(TelemetryEvent::EnemyDefeated {
                enemy_type: species.telemetry_name(),
            }),
            GameEvent::AchievementUnlocked(achievement) => {
                Some(TelemetryEvent::UnlockAchievement {
                    achievement_id: achievement.id(),
                })
            }
            _ => None,
        }
    }
}

pub trait TelemetrySink {
    fn track(&mut self, event: &TelemetryEvent);
}

/// Writes each event as a JSON line to the log
#[derive(Debug, Default)]
pub struct LogTelemetry;

impl TelemetrySink for LogTelemetry {
    fn track(&mut self, event: &TelemetryEvent) {
        match serde_json::to_string(event) {
            Ok(json) => log::info!("telemetry {json}"),
            Err(e) => log::warn!("telemetry {} not serializable: {e}", event.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Achievement, DefeatCause, RunResult, Species};

    #[test]
    fn test_maps_tracked_events() {
        assert_eq!(
            TelemetryEvent::from_game_event(&GameEvent::GameStarted),
            Some(TelemetryEvent::GameStart)
        );
        assert_eq!(
            TelemetryEvent::from_game_event(&GameEvent::EnemyDefeated {
                species: Species::CatGolem,
                cause: DefeatCause::Projectile,
                points: 1000,
            }),
            Some(TelemetryEvent::EnemyDefeated {
                enemy_type: "catgolem_boss"
            })
        );
        assert_eq!(
            TelemetryEvent::from_game_event(&GameEvent::AchievementUnlocked(
                Achievement::Sharpshooter
            )),
            Some(TelemetryEvent::UnlockAchievement {
                achievement_id: "sharpshooter"
            })
        );
        assert_eq!(TelemetryEvent::from_game_event(&GameEvent::Shot), None);
    }

    #[test]
    fn test_game_end_payload() {
        let event = TelemetryEvent::from_game_event(&GameEvent::RunEnded {
            result: RunResult::GameOver,
            score: 4200,
        })
        .unwrap();
        assert_eq!(event.name(), "game_end");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "game_end");
        assert_eq!(json["score"], 4200);
        assert_eq!(json["result"], "game_over");
    }
}
