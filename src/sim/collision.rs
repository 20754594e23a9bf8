//! Combat resolution
//!
//! Decides what an overlap means for each archetype, then applies the outcome
//! through `GameState`. The rules are pure functions over read-only entities
//! so they can be checked without running a tick.

use super::enemy::{Enemy, EnemyKind};
use super::event::DefeatCause;
use super::state::{Collectible, GamePhase, GameState, Player, Projectile};
use crate::consts::JUMP_FORCE;

/// Upward bounce after stomping a ground enemy or a bat
pub const STOMP_BOUNCE: f32 = JUMP_FORCE / 2.0;
/// Downward bounce after striking a crawler from below
pub const CRAWLER_BOUNCE: f32 = 5.0;
/// Bounce off the boss when landing on it
pub const BOSS_BOUNCE: f32 = -8.0;

/// Outcome of the player touching an enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    None,
    /// Player defeats the enemy and takes `bounce` as vertical velocity
    Defeat { bounce: f32 },
    /// Player is hurt, optionally bounced
    Hurt { bounce: Option<f32> },
}

/// Falling, with the pre-move bottom edge above the enemy's midpoint
pub fn is_stomp(player: &Player, enemy: &Enemy) -> bool {
    player.vel.y > 0.0 && player.prev_bottom() < enemy.rect().mid_y()
}

/// Rising, with the top edge below the enemy's midpoint
pub fn is_uppercut(player: &Player, enemy: &Enemy) -> bool {
    player.vel.y < 0.0 && player.pos.y > enemy.rect().mid_y()
}

pub fn player_vs_enemy(player: &Player, enemy: &Enemy) -> Contact {
    if !enemy.alive || !player.rect().intersects(&enemy.rect()) {
        return Contact::None;
    }
    match enemy.kind {
        EnemyKind::Ground | EnemyKind::Flyer(_) => {
            if is_stomp(player, enemy) {
                Contact::Defeat {
                    bounce: STOMP_BOUNCE,
                }
            } else {
                Contact::Hurt { bounce: None }
            }
        }
        EnemyKind::Crawler { .. } => {
            if is_uppercut(player, enemy) {
                Contact::Defeat {
                    bounce: CRAWLER_BOUNCE,
                }
            } else {
                Contact::Hurt { bounce: None }
            }
        }
        EnemyKind::Floater(_) => Contact::Hurt { bounce: None },
        EnemyKind::Boss(_) => Contact::Hurt {
            bounce: is_stomp(player, enemy).then_some(BOSS_BOUNCE),
        },
    }
}

pub fn projectile_vs_enemy(projectile: &Projectile, enemy: &Enemy) -> bool {
    projectile.active && enemy.alive && projectile.rect().intersects(&enemy.rect())
}

pub fn player_vs_collectible(player: &Player, collectible: &Collectible) -> bool {
    !collectible.collected && player.rect().intersects(&collectible.rect())
}

/// Resolve every player/enemy, projectile/enemy and player/collectible pair
/// in spawn order. Stops early if the run ends mid-pass.
pub(crate) fn resolve_combat(state: &mut GameState) {
    for i in 0..state.enemies.len() {
        if state.phase != GamePhase::Playing {
            return;
        }
        match player_vs_enemy(&state.player, &state.enemies[i]) {
            Contact::None => {}
            Contact::Defeat { bounce } => {
                state.player.vel.y = bounce;
                state.defeat_enemy(i, DefeatCause::Stomp);
            }
            Contact::Hurt { bounce } => {
                if let Some(vy) = bounce {
                    state.player.vel.y = vy;
                }
                state.damage_player();
            }
        }
    }
    if state.phase != GamePhase::Playing {
        return;
    }

    for p in 0..state.projectiles.len() {
        let Some(target) = state
            .enemies
            .iter()
            .position(|enemy| projectile_vs_enemy(&state.projectiles[p], enemy))
        else {
            continue;
        };
        let projectile = &mut state.projectiles[p];
        projectile.active = false;
        let damage = projectile.damage;
        state.strike_enemy(target, damage);
        if let Some(achievement) = state.achievements.record_projectile_kill() {
            state.announce_unlock(achievement);
        }
    }

    for c in 0..state.collectibles.len() {
        if player_vs_collectible(&state.player, &state.collectibles[c]) {
            state.collect(c);
        }
    }
}
