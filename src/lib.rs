//! Dracula's Revenge - a side-scrolling vampire platformer
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (motion, combat, combos, levels)
//! - `platform`: Input, storage and frame-timing abstraction
//! - `persistence`: Achievement save/load with a versioned envelope
//! - `settings`: Player preferences
//! - `audio`, `telemetry`, `hud`: Fire-and-forget output sinks
//! - `app`: Host-facing driver tying the scheduler, state and sinks together

pub mod app;
pub mod audio;
pub mod hud;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod telemetry;

pub use app::App;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
///
/// Distances are world units, velocities are units per tick and timers are
/// milliseconds of elapsed tick time.
pub mod consts {
    /// Logical tick rate
    pub const TICK_HZ: f32 = 60.0;
    /// Fixed step duration (ms)
    pub const STEP_MS: f32 = 1000.0 / TICK_HZ;

    /// World bounds
    pub const WORLD_WIDTH: f32 = 1000.0;
    pub const FLOOR_Y: f32 = 500.0;

    /// Constant gravity added to vertical velocity each tick
    pub const GRAVITY: f32 = 0.6;
    /// Initial vertical velocity of a jump (negative is up)
    pub const JUMP_FORCE: f32 = -13.0;
    /// Horizontal decay applied when no direction is held
    pub const FRICTION: f32 = 0.8;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    pub const PLAYER_SPAWN_X: f32 = 100.0;
    pub const PLAYER_SPAWN_Y: f32 = 300.0;
    pub const MAX_JUMPS: u8 = 2;
    pub const SHOOT_COOLDOWN_MS: f32 = 300.0;

    /// Session defaults
    pub const START_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 5;
    pub const DAMAGE_INVINCIBLE_MS: f32 = 2000.0;
    pub const STAR_INVINCIBLE_MS: f32 = 5000.0;

    pub const PLATFORM_HEIGHT: f32 = 20.0;
    /// Vertical slack for "standing on a moving platform"
    pub const RIDE_TOLERANCE: f32 = 5.0;
    /// Patrollers turn when this close to a platform's end
    pub const EDGE_TURN_MARGIN: f32 = 10.0;

    pub const PROJECTILE_SIZE: f32 = 8.0;
    pub const PROJECTILE_SPEED: f32 = 10.0;

    pub const COLLECTIBLE_SIZE: f32 = 20.0;

    /// Score awards (before combo scaling where applicable)
    pub const COIN_SCORE: u64 = 50;
    pub const PROJECTILE_KILL_SCORE: u64 = 150;
    pub const BOSS_SCORE: u64 = 1000;

    /// Combo window (ms)
    pub const COMBO_WINDOW_MS: f32 = 3000.0;
}
