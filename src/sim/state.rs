//! Game state and core simulation types
//!
//! `GameState` owns every live entity. Cross-entity effects go through its
//! methods during the tick; entities never reference one another.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::achievements::{Achievement, Achievements};
use super::combo::Combo;
use super::enemy::{Enemy, HitResult};
use super::event::{DefeatCause, GameEvent, RunResult};
use super::geometry::Rect;
use super::level::{LevelDescriptor, MovingPlatformSpec, campaign};
use crate::consts::*;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title/menu, nothing simulates
    Start,
    Playing,
    Paused,
    /// Lives exhausted
    GameOver,
    /// Every level cleared
    Victory,
}

/// How a jump was performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Ground,
    /// Started while airborne
    Double,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// -1 (left) or +1 (right)
    pub facing: f32,
    pub on_ground: bool,
    pub invincible: bool,
    /// Remaining invincibility (ms)
    pub invincible_time: f32,
    /// Jump charges left, 0..=MAX_JUMPS
    pub jumps_remaining: u8,
    /// Time until the next shot is allowed (ms)
    pub shoot_cooldown: f32,
    pub anim_frame: u8,
    pub anim_timer: f32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            facing: 1.0,
            on_ground: false,
            invincible: false,
            invincible_time: 0.0,
            jumps_remaining: MAX_JUMPS,
            shoot_cooldown: 0.0,
            anim_frame: 0,
            anim_timer: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Bottom edge before this tick's vertical move
    pub fn prev_bottom(&self) -> f32 {
        self.pos.y + self.size.y - self.vel.y
    }

    /// Move to a level's spawn point, keeping timers and facing
    pub fn reposition(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.on_ground = false;
        self.jumps_remaining = MAX_JUMPS;
        self.shoot_cooldown = 0.0;
    }

    /// Horizontal control and jump. Returns the jump performed, if any.
    pub fn apply_input(&mut self, left: bool, right: bool, jump_pressed: bool) -> Option<JumpKind> {
        if left {
            self.vel.x = -PLAYER_SPEED;
            self.facing = -1.0;
        } else if right {
            self.vel.x = PLAYER_SPEED;
            self.facing = 1.0;
        } else {
            self.vel.x *= FRICTION;
        }

        if !jump_pressed || self.jumps_remaining == 0 {
            return None;
        }
        let kind = if self.on_ground {
            JumpKind::Ground
        } else {
            JumpKind::Double
        };
        self.vel.y = JUMP_FORCE;
        self.jumps_remaining -= 1;
        self.on_ground = false;
        Some(kind)
    }

    /// Ground contact refills jump charges
    pub fn land(&mut self) {
        self.on_ground = true;
        self.jumps_remaining = MAX_JUMPS;
    }

    pub fn grant_invincibility(&mut self, ms: f32) {
        self.invincible = true;
        self.invincible_time = ms;
    }

    pub fn can_shoot(&self) -> bool {
        self.shoot_cooldown <= 0.0
    }

    /// Count down invincibility and shot cooldown, advance animation
    pub fn tick_timers(&mut self, dt: f32) {
        if self.invincible {
            self.invincible_time -= dt;
            if self.invincible_time <= 0.0 {
                self.invincible = false;
                self.invincible_time = 0.0;
            }
        }
        if self.shoot_cooldown > 0.0 {
            self.shoot_cooldown = (self.shoot_cooldown - dt).max(0.0);
        }
        if self.vel.x.abs() > 0.5 {
            self.anim_timer += dt;
            if self.anim_timer > 100.0 {
                self.anim_frame = (self.anim_frame + 1) % 2;
                self.anim_timer = 0.0;
            }
        } else {
            self.anim_frame = 0;
        }
    }
}

/// A static platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub pos: Vec2,
    pub width: f32,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            width,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, PLATFORM_HEIGHT)
    }
}

/// A platform shuttling between two waypoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingPlatform {
    pub pos: Vec2,
    pub width: f32,
    pub start: Vec2,
    pub end: Vec2,
    /// Units per tick
    pub speed: f32,
    /// +1 toward `end`, -1 toward `start`
    pub direction: f32,
    /// Distance travelled from `start` along the path
    progress: f32,
}

impl MovingPlatform {
    pub fn new(start: Vec2, end: Vec2, width: f32, speed: f32) -> Self {
        Self {
            pos: start,
            width,
            start,
            end,
            speed,
            direction: 1.0,
            progress: 0.0,
        }
    }

    pub fn from_spec(spec: &MovingPlatformSpec) -> Self {
        Self::new(
            Vec2::new(spec.x, spec.y),
            Vec2::new(spec.end_x, spec.end_y),
            spec.width,
            spec.speed,
        )
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, PLATFORM_HEIGHT)
    }

    /// Move one tick along the path, reversing at either end. Returns the
    /// displacement applied.
    pub fn advance(&mut self) -> Vec2 {
        let path = self.end - self.start;
        let length = path.length();
        if length <= f32::EPSILON {
            return Vec2::ZERO;
        }

        self.progress += self.speed * self.direction;
        if self.progress >= length {
            self.progress = length;
            self.direction = -1.0;
        } else if self.progress <= 0.0 {
            self.progress = 0.0;
            self.direction = 1.0;
        }

        let old = self.pos;
        self.pos = self.start + path / length * self.progress;
        self.pos - old
    }
}

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    /// +50 score
    Coin,
    /// +1 life, capped
    Heart,
    /// Timed invincibility
    Star,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub pos: Vec2,
    pub kind: CollectibleKind,
    pub collected: bool,
    /// Bobbing phase (presentation only; hitbox stays at `pos`)
    pub float_phase: f32,
}

impl Collectible {
    pub fn new(kind: CollectibleKind, x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            kind,
            collected: false,
            float_phase: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, COLLECTIBLE_SIZE, COLLECTIBLE_SIZE)
    }

    pub fn animate(&mut self) {
        if !self.collected {
            self.float_phase += 0.05;
        }
    }

    /// Flip to collected. `None` if it already was.
    pub fn take(&mut self) -> Option<CollectibleKind> {
        if self.collected {
            return None;
        }
        self.collected = true;
        Some(self.kind)
    }
}

/// The player's ranged attack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub direction: f32,
    pub speed: f32,
    pub damage: u32,
    pub active: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, direction: f32) -> Self {
        Self {
            pos,
            direction,
            speed: PROJECTILE_SPEED,
            damage: 1,
            active: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, PROJECTILE_SIZE, PROJECTILE_SIZE)
    }

    /// Fly one tick; deactivates on leaving the world
    pub fn advance(&mut self) {
        if !self.active {
            return;
        }
        self.pos.x += self.speed * self.direction;
        if self.pos.x < 0.0 || self.pos.x > WORLD_WIDTH {
            self.active = false;
        }
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32, // 0xRRGGBB
    pub life: f32,  // 0-1, decreases over time
    pub size: f32,
}

impl Particle {
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += 0.3;
        self.life -= 0.02;
    }
}

/// Default particle cap
pub const MAX_PARTICLES: usize = 256;
/// Particles per burst
pub const BURST_SIZE: usize = 15;

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed for particles, ghost phases and boss hops
    pub seed: u64,
    pub phase: GamePhase,
    /// Current level (0-based)
    pub level_index: usize,
    pub score: u64,
    pub lives: u8,
    /// Elapsed play time (ms)
    pub game_time: f32,
    pub combo: Combo,
    pub achievements: Achievements,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub moving_platforms: Vec<MovingPlatform>,
    pub enemies: Vec<Enemy>,
    pub collectibles: Vec<Collectible>,
    pub projectiles: Vec<Projectile>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    pub max_particles: usize,
    /// Camera shake intensity 0-1 (presentation)
    pub screen_shake: f32,
    /// Level templates, in play order
    pub levels: Vec<LevelDescriptor>,
    pub(crate) rng: Pcg32,
    /// Events queued during the current step
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// New session on the built-in campaign, sitting at the start screen
    pub fn new(seed: u64) -> Self {
        Self::with_levels(seed, campaign())
    }

    /// New session on a custom level list
    pub fn with_levels(seed: u64, levels: Vec<LevelDescriptor>) -> Self {
        let mut state = Self {
            seed,
            phase: GamePhase::Start,
            level_index: 0,
            score: 0,
            lives: START_LIVES,
            game_time: 0.0,
            combo: Combo::default(),
            achievements: Achievements::default(),
            player: Player::new(Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y)),
            platforms: Vec::new(),
            moving_platforms: Vec::new(),
            enemies: Vec::new(),
            collectibles: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            max_particles: MAX_PARTICLES,
            screen_shake: 0.0,
            levels,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        };
        state.load_level(0);
        state
    }

    /// Reset score/lives/level and begin playing from the first level
    pub fn start(&mut self) {
        self.score = 0;
        self.lives = START_LIVES;
        self.game_time = 0.0;
        self.combo.reset();
        self.screen_shake = 0.0;
        self.player = Player::new(Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y));
        self.load_level(0);
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::GameStarted);
        log::info!("Game started ({} levels)", self.levels.len());
    }

    /// Back to the title screen, discarding the run
    pub fn return_to_menu(&mut self) {
        self.phase = GamePhase::Start;
        self.enemies.clear();
        self.collectibles.clear();
        self.projectiles.clear();
        self.particles.clear();
        self.platforms.clear();
        self.moving_platforms.clear();
        self.combo.reset();
    }

    /// Replace all live entities with fresh copies of level `index`.
    /// Score, lives, combo and achievements carry over.
    pub fn load_level(&mut self, index: usize) {
        let Some(level) = self.levels.get(index) else {
            log::warn!("No level {index}; keeping current entities");
            return;
        };
        self.level_index = index;
        self.platforms = level
            .platforms
            .iter()
            .map(|p| Platform::new(p.x, p.y, p.width))
            .collect();
        self.moving_platforms = level
            .moving_platforms
            .iter()
            .map(MovingPlatform::from_spec)
            .collect();
        self.collectibles = level
            .collectibles
            .iter()
            .map(|c| Collectible::new(c.kind, c.x, c.y))
            .collect();
        let spawn = level.player_spawn;
        let name = level.name.clone();
        self.enemies = level
            .enemies
            .iter()
            .map(|e| Enemy::spawn(e, &mut self.rng))
            .collect();
        self.projectiles.clear();
        self.particles.clear();
        self.player.reposition(spawn);
        log::info!(
            "Level {} '{}' loaded: {} enemies, {} platforms",
            index + 1,
            name,
            self.enemies.len(),
            self.platforms.len() + self.moving_platforms.len()
        );
    }

    /// Go to the next level, or finish the run if none remain
    pub fn advance_level(&mut self) {
        let cleared = self.level_index;
        let next = cleared + 1;
        if next < self.levels.len() {
            self.load_level(next);
            self.events.push(GameEvent::LevelComplete {
                level: cleared,
                next,
            });
        } else {
            self.phase = GamePhase::Victory;
            log::info!("Victory! Final score {}", self.score);
            self.events.push(GameEvent::RunEnded {
                result: RunResult::Victory,
                score: self.score,
            });
        }
    }

    pub fn current_level(&self) -> Option<&LevelDescriptor> {
        self.levels.get(self.level_index)
    }

    pub fn alive_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }

    /// Solid surfaces at their current positions
    pub fn solid_rects(&self) -> Vec<Rect> {
        self.platforms
            .iter()
            .map(Platform::rect)
            .chain(self.moving_platforms.iter().map(MovingPlatform::rect))
            .collect()
    }

    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Hurt the player unless invincible. Returns true if a life was lost.
    pub fn damage_player(&mut self) -> bool {
        if self.player.invincible {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        self.player.grant_invincibility(DAMAGE_INVINCIBLE_MS);
        self.events.push(GameEvent::PlayerDamaged { lives: self.lives });
        if self.lives == 0 && self.phase == GamePhase::Playing {
            self.phase = GamePhase::GameOver;
            log::info!("Game over with score {}", self.score);
            self.events.push(GameEvent::RunEnded {
                result: RunResult::GameOver,
                score: self.score,
            });
        }
        true
    }

    /// Defeat enemy `index` and do the bookkeeping: combo, score,
    /// particles, achievements. No-op if it was already dead.
    pub fn defeat_enemy(&mut self, index: usize, cause: DefeatCause) {
        let Some(enemy) = self.enemies.get_mut(index) else {
            return;
        };
        if !enemy.defeat() {
            return;
        }
        self.on_enemy_defeated(index, cause);
    }

    /// Land a projectile hit of `damage` on enemy `index`
    pub fn strike_enemy(&mut self, index: usize, damage: u32) -> HitResult {
        let Some(enemy) = self.enemies.get_mut(index) else {
            return HitResult::Ignored;
        };
        let result = enemy.take_hit(damage);
        let rect = enemy.rect();
        let max_hp = enemy.boss().map(|b| b.max_hp);
        match result {
            HitResult::Damaged { hp } => {
                self.spawn_burst(rect.center(), 0xff0000, BURST_SIZE);
                self.shake(0.25);
                self.events.push(GameEvent::BossHit {
                    hp,
                    max_hp: max_hp.unwrap_or(hp),
                });
            }
            HitResult::Defeated => {
                if let Some(max_hp) = max_hp {
                    self.events.push(GameEvent::BossHit { hp: 0, max_hp });
                }
                self.on_enemy_defeated(index, DefeatCause::Projectile);
            }
            HitResult::Ignored => {}
        }
        result
    }

    fn on_enemy_defeated(&mut self, index: usize, cause: DefeatCause) {
        let enemy = &self.enemies[index];
        let species = enemy.species;
        let rect = enemy.rect();

        let multiplier = self.combo.register_kill();
        self.events.push(GameEvent::ComboIncreased {
            count: self.combo.count,
            multiplier,
        });

        let base = if species.is_boss() {
            BOSS_SCORE
        } else {
            match cause {
                DefeatCause::Stomp => species.stomp_score().unwrap_or(0),
                DefeatCause::Projectile => PROJECTILE_KILL_SCORE,
            }
        };
        let points = base.saturating_mul(u64::from(multiplier));
        self.add_score(points);

        if species.is_boss() {
            for _ in 0..6 {
                let at = Vec2::new(
                    rect.x + self.rng.random::<f32>() * rect.width,
                    rect.y + self.rng.random::<f32>() * rect.height,
                );
                self.spawn_burst(at, species.color(), BURST_SIZE);
            }
            self.shake(1.0);
            log::info!("Boss defeated for {points} points");
        } else {
            self.spawn_burst(rect.center(), species.color(), BURST_SIZE);
        }

        self.events.push(GameEvent::EnemyDefeated {
            species,
            cause,
            points,
        });
        if let Some(achievement) = self.achievements.record_combo(multiplier) {
            self.announce_unlock(achievement);
        }
    }

    /// Apply a collectible's effect. Idempotent per collectible.
    pub fn collect(&mut self, index: usize) -> bool {
        let Some(kind) = self.collectibles.get_mut(index).and_then(Collectible::take) else {
            return false;
        };
        match kind {
            CollectibleKind::Coin => self.add_score(COIN_SCORE),
            CollectibleKind::Heart => {
                if self.lives < MAX_LIVES {
                    self.lives += 1;
                }
            }
            CollectibleKind::Star => self.player.grant_invincibility(STAR_INVINCIBLE_MS),
        }
        self.events.push(GameEvent::Collected { kind });
        true
    }

    pub(crate) fn announce_unlock(&mut self, achievement: Achievement) {
        log::info!("Achievement unlocked: {}", achievement.title());
        self.events.push(GameEvent::AchievementUnlocked(achievement));
    }

    /// Spawn `count` particles at `at`, evicting the oldest past the cap
    pub fn spawn_burst(&mut self, at: Vec2, color: u32, count: usize) {
        if self.max_particles == 0 {
            return;
        }
        for _ in 0..count {
            if self.particles.len() >= self.max_particles {
                self.particles.remove(0);
            }
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * 8.0,
                (self.rng.random::<f32>() - 0.5) * 8.0 - 2.0,
            );
            let size = self.rng.random::<f32>() * 4.0 + 2.0;
            self.particles.push(Particle {
                pos: at,
                vel,
                color,
                life: 1.0,
                size,
            });
        }
    }

    pub(crate) fn shake(&mut self, amount: f32) {
        self.screen_shake = (self.screen_shake + amount).min(1.0);
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
