//! Motion integrator
//!
//! Constant-gravity kinematics, floor and platform landing, patrol turning and
//! moving-platform carry. Everything here works on one entity at a time; the
//! tick hands in whatever read-only context it needs.

use glam::Vec2;
use rand::Rng;

use super::enemy::{AttackSignal, BOSS_TRIGGER_DISTANCE, Enemy, EnemyKind};
use super::geometry::Rect;
use super::state::Player;
use crate::consts::*;

/// What a boss did during its motion step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnemyStep {
    pub boss_jumped: bool,
    pub attack: Option<AttackSignal>,
}

impl EnemyStep {
    pub fn is_quiet(&self) -> bool {
        !self.boss_jumped && self.attack.is_none()
    }
}

/// Rest a falling body on the floor or on the first solid it dropped onto.
///
/// Platforms only catch a body moving down whose bottom edge was at or above
/// the platform top before this tick's move. Returns true when grounded.
fn settle(pos: &mut Vec2, vel: &mut Vec2, size: Vec2, solids: &[Rect]) -> bool {
    if pos.y + size.y >= FLOOR_Y {
        pos.y = FLOOR_Y - size.y;
        vel.y = 0.0;
        return true;
    }
    if vel.y <= 0.0 {
        return false;
    }

    let body = Rect::from_pos_size(*pos, size);
    let prev_bottom = body.bottom() - vel.y;
    for solid in solids {
        if body.intersects(solid) && prev_bottom <= solid.y {
            pos.y = solid.y - size.y;
            vel.y = 0.0;
            return true;
        }
    }
    false
}

/// Gravity, movement, world clamp and landing for the player
pub fn step_player(player: &mut Player, solids: &[Rect]) {
    player.vel.y += GRAVITY;
    player.pos += player.vel;
    player.pos.x = player.pos.x.clamp(0.0, WORLD_WIDTH - player.size.x);

    player.on_ground = false;
    if settle(&mut player.pos, &mut player.vel, player.size, solids) {
        player.land();
    }
}

/// Translate a grounded player standing on `platform` (its rect before the
/// move) by the platform's displacement
pub fn carry_rider(player: &mut Player, platform: &Rect, delta: Vec2) -> bool {
    if !player.on_ground || delta == Vec2::ZERO {
        return false;
    }
    let body = player.rect();
    let standing = (body.bottom() - platform.y).abs() < RIDE_TOLERANCE;
    let above = body.x < platform.right() && body.right() > platform.x;
    if standing && above {
        player.pos += delta;
        true
    } else {
        false
    }
}

/// Reverse a patroller that is standing on a solid and about to walk off it
fn turn_at_platform_edges(enemy: &mut Enemy, solids: &[Rect]) {
    let body = enemy.rect();
    for solid in solids {
        let standing = (body.bottom() - solid.y).abs() < 1.0;
        let above = body.x < solid.right() && body.right() > solid.x;
        if !standing || !above {
            continue;
        }
        if enemy.direction < 0.0 && body.x <= solid.x + EDGE_TURN_MARGIN {
            enemy.direction = 1.0;
        } else if enemy.direction > 0.0 && body.right() >= solid.right() - EDGE_TURN_MARGIN {
            enemy.direction = -1.0;
        }
        return;
    }
}

/// Advance one enemy by a tick. Dead enemies do not move.
///
/// `player` is only consulted by the boss, to decide whether to attack.
pub fn step_enemy<R: Rng>(
    enemy: &mut Enemy,
    solids: &[Rect],
    player: &Rect,
    dt: f32,
    rng: &mut R,
) -> EnemyStep {
    let mut step = EnemyStep::default();
    if !enemy.alive {
        return step;
    }

    enemy.pos.x += enemy.vel.x * enemy.direction;
    match &mut enemy.kind {
        EnemyKind::Ground => {
            enemy.vel.y += GRAVITY;
            enemy.pos.y += enemy.vel.y;
            let grounded = settle(&mut enemy.pos, &mut enemy.vel, enemy.size, solids);
            enemy.turn_at_world_edges(WORLD_WIDTH);
            if grounded {
                turn_at_platform_edges(enemy, solids);
            }
        }
        EnemyKind::Flyer(wave) | EnemyKind::Floater(wave) => {
            enemy.pos.y = wave.step();
            enemy.turn_at_world_edges(WORLD_WIDTH);
        }
        EnemyKind::Crawler { ceiling_y } => {
            enemy.pos.y = *ceiling_y;
            enemy.turn_at_world_edges(WORLD_WIDTH);
        }
        EnemyKind::Boss(boss) => {
            enemy.vel.y += GRAVITY;
            enemy.pos.y += enemy.vel.y;
            boss.on_ground = settle(&mut enemy.pos, &mut enemy.vel, enemy.size, solids);

            if let Some(vy) = boss.try_jump(dt, rng) {
                enemy.vel.y = vy;
                step.boss_jumped = true;
            }
            let near = (player.x - enemy.pos.x).abs() < BOSS_TRIGGER_DISTANCE;
            step.attack = boss.update_attack(dt, near);
            enemy.turn_at_world_edges(WORLD_WIDTH);
        }
    }

    enemy.animate(dt);
    step
}
