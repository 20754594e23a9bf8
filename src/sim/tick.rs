//! Simulation tick
//!
//! One logical step: timers, player control, motion, boss signals, platforms,
//! combat, lifetime pruning and the level-complete check, in that order.

use glam::Vec2;

use super::collision::resolve_combat;
use super::enemy::{AttackSignal, BOSS_ATTACK_RANGE};
use super::event::GameEvent;
use super::physics::{self, EnemyStep};
use super::state::{BURST_SIZE, GamePhase, GameState, JumpKind, Projectile};
use crate::consts::*;

/// Knockback applied to the player by a boss slam
pub const SLAM_KNOCKBACK: Vec2 = Vec2::new(10.0, -8.0);
const SLAM_DUST_COLOR: u32 = 0x888888;

/// Controls held right now, as reported by an input source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub shoot: bool,
    pub pause: bool,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Jump held
    pub jump: bool,
    /// Jump went down since the last tick
    pub jump_pressed: bool,
    /// Fire while held (subject to cooldown)
    pub shoot: bool,
    /// Pause toggle (edge)
    pub pause: bool,
}

/// Turns held controls into rising edges.
///
/// Edges latch until `consume` so a press seen on a frame that does not tick
/// is still delivered on the next tick.
#[derive(Debug, Clone, Default)]
pub struct EdgeDetector {
    held: Controls,
    jump_latched: bool,
    pause_latched: bool,
}

impl EdgeDetector {
    /// Record this frame's controls
    pub fn observe(&mut self, controls: Controls) {
        self.jump_latched |= controls.jump && !self.held.jump;
        self.pause_latched |= controls.pause && !self.held.pause;
        self.held = controls;
    }

    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: self.held.left,
            right: self.held.right,
            jump: self.held.jump,
            jump_pressed: self.jump_latched,
            shoot: self.held.shoot,
            pause: self.pause_latched,
        }
    }

    /// Clear latched edges once a tick has used them
    pub fn consume(&mut self) {
        self.jump_latched = false;
        self.pause_latched = false;
    }
}

/// Advance the game state by one step of `dt` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                state.push_event(GameEvent::Paused);
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                state.push_event(GameEvent::Resumed);
            }
            _ => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.game_time += dt;
    if state.combo.tick(dt) {
        log::debug!("Combo expired");
    }
    state.screen_shake *= 0.9;
    if state.screen_shake < 0.01 {
        state.screen_shake = 0.0;
    }

    // Player control
    state.player.tick_timers(dt);
    if let Some(kind) = state
        .player
        .apply_input(input.left, input.right, input.jump_pressed)
    {
        let double = kind == JumpKind::Double;
        state.push_event(GameEvent::Jumped { double });
        if double {
            if let Some(achievement) = state.achievements.record_double_jump() {
                state.announce_unlock(achievement);
            }
        }
    }
    if input.shoot && state.player.can_shoot() {
        fire(state);
    }

    // Motion
    let solids = state.solid_rects();
    physics::step_player(&mut state.player, &solids);

    let player_rect = state.player.rect();
    let mut boss_steps: Vec<(usize, EnemyStep)> = Vec::new();
    for (i, enemy) in state.enemies.iter_mut().enumerate() {
        let step = physics::step_enemy(enemy, &solids, &player_rect, dt, &mut state.rng);
        if !step.is_quiet() {
            boss_steps.push((i, step));
        }
    }
    for (i, step) in boss_steps {
        if step.boss_jumped {
            state.push_event(GameEvent::BossJumped);
        }
        match step.attack {
            Some(AttackSignal::Windup) => state.push_event(GameEvent::BossWindup),
            Some(AttackSignal::Impact) => boss_slam(state, i),
            None => {}
        }
    }

    for i in 0..state.moving_platforms.len() {
        let before = state.moving_platforms[i].rect();
        let delta = state.moving_platforms[i].advance();
        physics::carry_rider(&mut state.player, &before, delta);
    }

    for projectile in &mut state.projectiles {
        projectile.advance();
    }
    for collectible in &mut state.collectibles {
        collectible.animate();
    }

    // Combat
    resolve_combat(state);

    // Lifetimes
    for particle in &mut state.particles {
        particle.update();
    }
    state.particles.retain(|p| p.life > 0.0);
    state.projectiles.retain(|p| p.active);

    // Level progression
    if state.phase == GamePhase::Playing && state.alive_enemies() == 0 {
        state.advance_level();
    }
}

/// Spawn a projectile from the player's centre in the facing direction
fn fire(state: &mut GameState) {
    let origin = state.player.rect().center() - Vec2::splat(PROJECTILE_SIZE / 2.0);
    state
        .projectiles
        .push(Projectile::new(origin, state.player.facing));
    state.player.shoot_cooldown = SHOOT_COOLDOWN_MS;
    state.push_event(GameEvent::Shot);
}

/// The boss hammer lands: area damage with knockback, dust and shake
fn boss_slam(state: &mut GameState, index: usize) {
    let body = state.enemies[index].rect();
    let feet = Vec2::new(body.center().x, body.bottom());
    let dx = state.player.rect().center().x - body.center().x;

    let mut hit_player = false;
    if dx.abs() < BOSS_ATTACK_RANGE && state.damage_player() {
        state.player.vel = Vec2::new(SLAM_KNOCKBACK.x * dx.signum(), SLAM_KNOCKBACK.y);
        hit_player = true;
    }

    state.spawn_burst(feet, SLAM_DUST_COLOR, BURST_SIZE);
    state.shake(0.5);
    state.push_event(GameEvent::BossSlam {
        pos: feet,
        hit_player,
    });
}
