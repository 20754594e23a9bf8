//! Enemy archetypes
//!
//! One shared `Enemy` record plus a tagged `EnemyKind` payload. Motion and
//! combat code dispatch on the tag; no enemy holds a reference to the player.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::level::EnemySpawn;

/// Attack animation length (ms): first half raises the hammer, second half slams
pub const BOSS_ATTACK_DURATION_MS: f32 = 800.0;
/// The slam lands this close to the end of the attack
pub const BOSS_IMPACT_LEAD_MS: f32 = 50.0;
pub const BOSS_ATTACK_COOLDOWN_MS: f32 = 3000.0;
/// Horizontal distance (centre to centre) inside which the slam hurts
pub const BOSS_ATTACK_RANGE: f32 = 100.0;
/// Player must be this close (left edges) for the boss to start an attack
pub const BOSS_TRIGGER_DISTANCE: f32 = 200.0;
pub const BOSS_MAX_HP: u32 = 10;
pub const BOSS_JUMP_FORCE: f32 = -12.0;
pub const BOSS_JUMP_COOLDOWN_MS: f32 = 2000.0;
pub const BOSS_JUMP_RETRY_MS: f32 = 500.0;
pub const BOSS_JUMP_CHANCE: f64 = 0.3;
/// How far the hammer rises during the wind-up (presentation)
const HAMMER_LIFT: f32 = 30.0;

/// Which creature an enemy is. Fixes size, speed, score and archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Species {
    Cat,
    Dog,
    Bat,
    Spider,
    Ghost,
    CatGolem,
}

impl Species {
    pub fn size(&self) -> Vec2 {
        match self {
            Species::Cat | Species::Dog => Vec2::new(35.0, 35.0),
            Species::Bat | Species::Spider => Vec2::new(30.0, 25.0),
            Species::Ghost => Vec2::new(28.0, 32.0),
            Species::CatGolem => Vec2::new(100.0, 120.0),
        }
    }

    /// Patrol speed (units per tick)
    pub fn speed(&self) -> f32 {
        match self {
            Species::Cat => 2.0,
            Species::Dog | Species::Bat => 3.0,
            Species::Spider | Species::CatGolem => 1.5,
            Species::Ghost => 1.0,
        }
    }

    /// Base reward for a contact defeat; `None` if contact can never defeat it
    pub fn stomp_score(&self) -> Option<u64> {
        match self {
            Species::Cat => Some(100),
            Species::Dog => Some(200),
            Species::Bat => Some(150),
            Species::Spider => Some(120),
            Species::Ghost | Species::CatGolem => None,
        }
    }

    pub fn is_boss(&self) -> bool {
        matches!(self, Species::CatGolem)
    }

    /// Name reported to telemetry
    pub fn telemetry_name(&self) -> &'static str {
        match self {
            Species::Cat => "cat",
            Species::Dog => "dog",
            Species::Bat => "bat",
            Species::Spider => "spider",
            Species::Ghost => "ghost",
            Species::CatGolem => "catgolem_boss",
        }
    }

    /// Particle color for defeat bursts (0xRRGGBB)
    pub fn color(&self) -> u32 {
        match self {
            Species::Cat => 0xff8800,
            Species::Dog | Species::CatGolem => 0x8b4513,
            Species::Bat => 0x663399,
            Species::Spider => 0x333333,
            Species::Ghost => 0xccddff,
        }
    }

    /// Animation frame period (ms)
    fn frame_period(&self) -> f32 {
        match self {
            Species::Bat => 100.0,
            Species::Spider => 120.0,
            Species::CatGolem => 200.0,
            _ => 150.0,
        }
    }
}

/// Vertical sine motion shared by flyers and floaters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wave {
    /// Centre line of the oscillation
    pub base_y: f32,
    pub amplitude: f32,
    /// Phase advance per tick (radians)
    pub frequency: f32,
    pub phase: f32,
}

impl Wave {
    /// Advance one tick and return the new Y
    pub fn step(&mut self) -> f32 {
        self.phase += self.frequency;
        self.base_y + self.phase.sin() * self.amplitude
    }
}

/// Boss hammer attack sub-state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AttackPhase {
    #[default]
    Idle,
    Raising,
    Slamming,
    /// Hammer has landed; waiting out the rest of the attack
    Struck,
}

/// Transitions of the boss attack machine the orchestrator reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackSignal {
    /// Idle -> Raising
    Windup,
    /// Slamming -> Struck, fires exactly once per attack
    Impact,
}

/// Boss-only state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub hp: u32,
    pub max_hp: u32,
    pub attack: AttackPhase,
    pub attack_timer: f32,
    pub attack_cooldown: f32,
    pub jump_cooldown: f32,
    pub on_ground: bool,
}

impl Boss {
    pub fn new(max_hp: u32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            attack: AttackPhase::Idle,
            attack_timer: 0.0,
            attack_cooldown: 0.0,
            jump_cooldown: 0.0,
            on_ground: true,
        }
    }

    /// Advance the attack machine by `dt`.
    ///
    /// `player_near` gates the Idle -> Raising transition. If a long tick
    /// skips the impact window, the impact still fires before going idle.
    pub fn update_attack(&mut self, dt: f32, player_near: bool) -> Option<AttackSignal> {
        if self.attack_cooldown > 0.0 {
            self.attack_cooldown -= dt;
        }

        if self.attack == AttackPhase::Idle {
            if player_near && self.attack_cooldown <= 0.0 {
                self.attack = AttackPhase::Raising;
                self.attack_timer = 0.0;
                return Some(AttackSignal::Windup);
            }
            return None;
        }

        self.attack_timer += dt;
        let half = BOSS_ATTACK_DURATION_MS / 2.0;
        let mut signal = None;

        if self.attack_timer >= half && self.attack == AttackPhase::Raising {
            self.attack = AttackPhase::Slamming;
        }
        if self.attack == AttackPhase::Slamming
            && self.attack_timer >= BOSS_ATTACK_DURATION_MS - BOSS_IMPACT_LEAD_MS
        {
            self.attack = AttackPhase::Struck;
            signal = Some(AttackSignal::Impact);
        }
        if self.attack_timer >= BOSS_ATTACK_DURATION_MS {
            self.attack = AttackPhase::Idle;
            self.attack_timer = 0.0;
            self.attack_cooldown = BOSS_ATTACK_COOLDOWN_MS;
        }

        signal
    }

    /// Hammer height offset for presentation (0 at rest, negative when raised)
    pub fn hammer_offset(&self) -> f32 {
        let half = BOSS_ATTACK_DURATION_MS / 2.0;
        match self.attack {
            AttackPhase::Idle => 0.0,
            AttackPhase::Raising => -HAMMER_LIFT * (self.attack_timer / half).min(1.0),
            AttackPhase::Slamming | AttackPhase::Struck => {
                (-HAMMER_LIFT + HAMMER_LIFT * ((self.attack_timer - half) / half)).min(0.0)
            }
        }
    }

    /// Random hop while grounded. Returns the jump velocity if it jumped.
    pub fn try_jump<R: Rng>(&mut self, dt: f32, rng: &mut R) -> Option<f32> {
        if self.jump_cooldown > 0.0 {
            self.jump_cooldown -= dt;
        }
        if !self.on_ground || self.jump_cooldown > 0.0 {
            return None;
        }
        if rng.random_bool(BOSS_JUMP_CHANCE) {
            self.on_ground = false;
            self.jump_cooldown = BOSS_JUMP_COOLDOWN_MS;
            Some(BOSS_JUMP_FORCE)
        } else {
            self.jump_cooldown = BOSS_JUMP_RETRY_MS;
            None
        }
    }
}

/// Archetype payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Walks under gravity, turns at world and platform edges
    Ground,
    /// Sine-wave flight, ignores platforms
    Flyer(Wave),
    /// Pinned to a ceiling line
    Crawler { ceiling_y: f32 },
    /// Drifts through platforms; only projectiles can defeat it
    Floater(Wave),
    Boss(Boss),
}

/// Outcome of a projectile striking an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitResult {
    /// Boss absorbed the hit and survives with `hp`
    Damaged { hp: u32 },
    /// This hit defeated the enemy
    Defeated,
    /// Enemy was already dead
    Ignored,
}

/// A live enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub species: Species,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// -1 (left) or +1 (right)
    pub direction: f32,
    pub alive: bool,
    pub anim_frame: u8,
    pub anim_timer: f32,
    pub kind: EnemyKind,
}

impl Enemy {
    /// Instantiate from a level descriptor entry
    pub fn spawn<R: Rng>(spawn: &EnemySpawn, rng: &mut R) -> Self {
        let species = spawn.species;
        let pos = Vec2::new(spawn.x, spawn.y);
        let kind = match species {
            Species::Cat | Species::Dog => EnemyKind::Ground,
            Species::Bat => EnemyKind::Flyer(Wave {
                base_y: spawn.y,
                amplitude: 40.0,
                frequency: 0.05,
                phase: 0.0,
            }),
            Species::Spider => EnemyKind::Crawler {
                ceiling_y: spawn.ceiling_y.unwrap_or(50.0),
            },
            Species::Ghost => EnemyKind::Floater(Wave {
                base_y: spawn.y,
                amplitude: 40.0,
                frequency: 0.03,
                phase: rng.random_range(0.0..std::f32::consts::TAU),
            }),
            Species::CatGolem => EnemyKind::Boss(Boss::new(BOSS_MAX_HP)),
        };
        Self {
            species,
            pos,
            vel: Vec2::new(species.speed(), 0.0),
            size: species.size(),
            direction: 1.0,
            alive: true,
            anim_frame: 0,
            anim_timer: 0.0,
            kind,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn is_boss(&self) -> bool {
        matches!(self.kind, EnemyKind::Boss(_))
    }

    pub fn boss(&self) -> Option<&Boss> {
        match &self.kind {
            EnemyKind::Boss(boss) => Some(boss),
            _ => None,
        }
    }

    /// Mark dead. Returns true only on the call that actually killed it.
    pub fn defeat(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.alive = false;
        if let EnemyKind::Boss(boss) = &mut self.kind {
            boss.hp = 0;
        }
        true
    }

    /// Apply a projectile hit of `damage`
    pub fn take_hit(&mut self, damage: u32) -> HitResult {
        if !self.alive {
            return HitResult::Ignored;
        }
        let hp = match &mut self.kind {
            EnemyKind::Boss(boss) => {
                boss.hp = boss.hp.saturating_sub(damage);
                boss.hp
            }
            _ => 0,
        };
        if hp == 0 {
            self.defeat();
            HitResult::Defeated
        } else {
            HitResult::Damaged { hp }
        }
    }

    /// Face right if past the left edge, left if past the right edge
    pub fn turn_at_world_edges(&mut self, world_width: f32) {
        if self.pos.x < 0.0 {
            self.direction = 1.0;
        } else if self.pos.x > world_width - self.size.x {
            self.direction = -1.0;
        }
    }

    pub fn animate(&mut self, dt: f32) {
        self.anim_timer += dt;
        if self.anim_timer > self.species.frame_period() {
            self.anim_frame = (self.anim_frame + 1) % 2;
            self.anim_timer = 0.0;
        }
    }
}
