//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of platform and
//! presentation dependencies:
//! - Time only arrives through the tick's `dt`
//! - Seeded RNG only
//! - Entities are processed in spawn order
//! - Side effects leave as `GameEvent`s

pub mod achievements;
pub mod collision;
pub mod combo;
pub mod enemy;
pub mod event;
pub mod geometry;
pub mod level;
pub mod physics;
pub mod state;
pub mod tick;

pub use achievements::{Achievement, Achievements};
pub use collision::{Contact, player_vs_collectible, player_vs_enemy, projectile_vs_enemy};
pub use combo::{Combo, multiplier_for};
pub use enemy::{AttackPhase, Boss, Enemy, EnemyKind, HitResult, Species};
pub use event::{DefeatCause, GameEvent, RunResult};
pub use geometry::{Rect, intersects};
pub use level::{LevelDescriptor, campaign};
pub use state::{
    Collectible, CollectibleKind, GamePhase, GameState, JumpKind, MovingPlatform, Particle,
    Platform, Player, Projectile,
};
pub use tick::{Controls, EdgeDetector, TickInput, tick};
