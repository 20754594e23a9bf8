//! Level descriptors
//!
//! Immutable templates cloned into live entities on load. The campaign is
//! compiled in; there is no file format.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::Species;
use super::state::CollectibleKind;
use crate::consts::{PLAYER_SPAWN_X, PLAYER_SPAWN_Y};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformSpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingPlatformSpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub end_x: f32,
    pub end_y: f32,
    /// Units per tick
    pub speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub species: Species,
    pub x: f32,
    pub y: f32,
    /// Ceiling line for crawlers; ignored by other species
    pub ceiling_y: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollectibleSpawn {
    pub kind: CollectibleKind,
    pub x: f32,
    pub y: f32,
}

/// A level template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    pub name: String,
    pub player_spawn: Vec2,
    pub platforms: Vec<PlatformSpec>,
    pub moving_platforms: Vec<MovingPlatformSpec>,
    pub enemies: Vec<EnemySpawn>,
    pub collectibles: Vec<CollectibleSpawn>,
}

impl LevelDescriptor {
    /// Empty level with the default player spawn
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            player_spawn: Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
            platforms: Vec::new(),
            moving_platforms: Vec::new(),
            enemies: Vec::new(),
            collectibles: Vec::new(),
        }
    }

    pub fn platform(mut self, x: f32, y: f32, width: f32) -> Self {
        self.platforms.push(PlatformSpec { x, y, width });
        self
    }

    pub fn moving_platform(
        mut self,
        (x, y): (f32, f32),
        width: f32,
        (end_x, end_y): (f32, f32),
        speed: f32,
    ) -> Self {
        self.moving_platforms.push(MovingPlatformSpec {
            x,
            y,
            width,
            end_x,
            end_y,
            speed,
        });
        self
    }

    pub fn enemy(mut self, species: Species, x: f32, y: f32) -> Self {
        self.enemies.push(EnemySpawn {
            species,
            x,
            y,
            ceiling_y: None,
        });
        self
    }

    pub fn crawler(mut self, x: f32, ceiling_y: f32) -> Self {
        self.enemies.push(EnemySpawn {
            species: Species::Spider,
            x,
            y: ceiling_y,
            ceiling_y: Some(ceiling_y),
        });
        self
    }

    pub fn item(mut self, kind: CollectibleKind, x: f32, y: f32) -> Self {
        self.collectibles.push(CollectibleSpawn { kind, x, y });
        self
    }
}

/// The four hand-authored levels, in play order
pub fn campaign() -> Vec<LevelDescriptor> {
    use CollectibleKind::{Coin, Heart, Star};
    use Species::*;

    let graveyard = LevelDescriptor::new("Graveyard")
        .platform(200.0, 450.0, 150.0)
        .platform(400.0, 380.0, 120.0)
        .platform(600.0, 320.0, 150.0)
        .platform(150.0, 280.0, 100.0)
        .platform(800.0, 400.0, 180.0)
        .platform(350.0, 200.0, 130.0)
        .platform(700.0, 180.0, 120.0)
        .enemy(Cat, 300.0, 200.0)
        .enemy(Dog, 500.0, 200.0)
        .enemy(Cat, 700.0, 150.0)
        .enemy(Cat, 850.0, 200.0)
        .enemy(Dog, 200.0, 200.0)
        .enemy(Cat, 600.0, 200.0)
        .item(Coin, 265.0, 420.0)
        .item(Coin, 450.0, 350.0)
        .item(Coin, 665.0, 290.0)
        .item(Coin, 405.0, 170.0)
        .item(Heart, 750.0, 150.0)
        .item(Coin, 880.0, 370.0);

    let belfry = LevelDescriptor::new("Belfry")
        .platform(100.0, 430.0, 140.0)
        .platform(320.0, 360.0, 120.0)
        .platform(720.0, 360.0, 140.0)
        .platform(520.0, 250.0, 110.0)
        .platform(850.0, 220.0, 120.0)
        .moving_platform((420.0, 450.0), 100.0, (620.0, 450.0), 2.0)
        .enemy(Bat, 300.0, 250.0)
        .enemy(Bat, 650.0, 180.0)
        .enemy(Cat, 350.0, 300.0)
        .enemy(Dog, 750.0, 300.0)
        .crawler(450.0, 60.0)
        .crawler(800.0, 60.0)
        .item(Coin, 150.0, 400.0)
        .item(Coin, 365.0, 330.0)
        .item(Coin, 565.0, 220.0)
        .item(Star, 900.0, 190.0)
        .item(Coin, 780.0, 330.0);

    let haunted_halls = LevelDescriptor::new("Haunted Halls")
        .platform(50.0, 420.0, 120.0)
        .platform(800.0, 420.0, 150.0)
        .platform(400.0, 300.0, 200.0)
        .platform(150.0, 200.0, 120.0)
        .platform(730.0, 200.0, 120.0)
        .moving_platform((220.0, 340.0), 90.0, (220.0, 440.0), 1.5)
        .moving_platform((620.0, 250.0), 90.0, (620.0, 380.0), 1.5)
        .enemy(Ghost, 300.0, 250.0)
        .enemy(Ghost, 700.0, 300.0)
        .enemy(Ghost, 500.0, 150.0)
        .enemy(Dog, 450.0, 200.0)
        .crawler(200.0, 50.0)
        .crawler(650.0, 50.0)
        .enemy(Bat, 850.0, 150.0)
        .item(Coin, 100.0, 390.0)
        .item(Coin, 490.0, 270.0)
        .item(Heart, 200.0, 170.0)
        .item(Coin, 780.0, 170.0)
        .item(Star, 870.0, 390.0);

    let golems_lair = LevelDescriptor::new("Golem's Lair")
        .platform(80.0, 380.0, 140.0)
        .platform(780.0, 380.0, 140.0)
        .platform(420.0, 280.0, 160.0)
        .moving_platform((250.0, 200.0), 100.0, (650.0, 200.0), 2.5)
        .enemy(CatGolem, 600.0, 380.0)
        .item(Heart, 140.0, 350.0)
        .item(Heart, 840.0, 350.0)
        .item(Star, 490.0, 250.0)
        .item(Coin, 300.0, 170.0)
        .item(Coin, 600.0, 170.0);

    vec![graveyard, belfry, haunted_halls, golems_lair]
}
