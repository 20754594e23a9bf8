//! Whole-session scenarios driven through the public API

use draculas_revenge::App;
use draculas_revenge::consts::*;
use draculas_revenge::persistence::{ACHIEVEMENTS_KEY, load_achievements, save_achievements};
use draculas_revenge::platform::{KeyValueStore, MemoryStore};
use draculas_revenge::sim::{
    Achievement, CollectibleKind, Controls, GameEvent, GamePhase, GameState, LevelDescriptor,
    Projectile, RunResult, Species, TickInput, tick,
};
use glam::Vec2;

fn playing(levels: Vec<LevelDescriptor>) -> GameState {
    let mut state = GameState::with_levels(2024, levels);
    state.start();
    state
}

fn quiet_level() -> LevelDescriptor {
    LevelDescriptor::new("quiet").crawler(900.0, 50.0)
}

#[test]
fn shooting_three_enemies_loads_next_level_and_keeps_score() {
    let three = LevelDescriptor::new("three cats")
        .enemy(Species::Cat, 300.0, 465.0)
        .enemy(Species::Cat, 500.0, 465.0)
        .enemy(Species::Cat, 700.0, 465.0);
    let mut state = playing(vec![three, quiet_level()]);
    let shoot = TickInput {
        shoot: true,
        ..Default::default()
    };

    for _ in 0..600 {
        tick(&mut state, &shoot, STEP_MS);
        if state.level_index == 1 {
            break;
        }
    }

    assert_eq!(state.level_index, 1);
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.lives, START_LIVES);
    assert_eq!(state.achievements.projectile_kills, 3);
    // 150 + 150 + 150 x2 (third kill lifts the combo to x2)
    assert_eq!(state.score, 600);
    assert_eq!(state.alive_enemies(), 1);
}

#[test]
fn boss_falls_on_tenth_hit_and_pays_once() {
    let lair = LevelDescriptor::new("lair").enemy(Species::CatGolem, 600.0, 380.0);
    let mut state = playing(vec![lair]);
    let idle = TickInput::default();

    for hit in 1..=10 {
        let boss = state.enemies[0].rect();
        state
            .projectiles
            .push(Projectile::new(Vec2::new(boss.x - 5.0, boss.y + 50.0), 1.0));
        tick(&mut state, &idle, STEP_MS);

        let hp = state.enemies[0].boss().map(|b| b.hp);
        if hit < 10 {
            assert!(state.enemies[0].alive, "boss died early on hit {hit}");
            assert_eq!(hp, Some(10 - hit));
            assert_eq!(state.score, 0);
        } else {
            assert!(!state.enemies[0].alive);
            assert_eq!(hp, Some(0));
        }
    }

    assert_eq!(state.score, BOSS_SCORE);
    assert_eq!(state.phase, GamePhase::Victory);
    assert!(state.achievements.is_unlocked(Achievement::Sharpshooter));

    let events = state.drain_events();
    let defeats = events
        .iter()
        .filter(|e| matches!(e, GameEvent::EnemyDefeated { .. }))
        .count();
    assert_eq!(defeats, 1);
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::RunEnded {
            result: RunResult::Victory,
            score: BOSS_SCORE
        }
    )));
}

#[test]
fn invincibility_window_absorbs_second_hit() {
    let mut state = playing(vec![quiet_level()]);
    assert!(state.damage_player());
    assert_eq!(state.lives, 2);
    assert!(state.player.invincible);
    assert_eq!(state.player.invincible_time, DAMAGE_INVINCIBLE_MS);

    // 500ms later
    for _ in 0..10 {
        tick(&mut state, &TickInput::default(), 50.0);
    }
    assert!(state.player.invincible);
    assert!(!state.damage_player());
    assert_eq!(state.lives, 2);

    // Window closes after 2000ms total
    for _ in 0..30 {
        tick(&mut state, &TickInput::default(), 50.0);
    }
    assert!(!state.player.invincible);
    assert!(state.damage_player());
    assert_eq!(state.lives, 1);
}

#[test]
fn star_sets_full_invincibility_and_items_collect_once() {
    let level = quiet_level()
        .item(CollectibleKind::Star, 110.0, 320.0)
        .item(CollectibleKind::Coin, 120.0, 320.0);
    let mut state = playing(vec![level]);

    tick(&mut state, &TickInput::default(), STEP_MS);
    assert!(state.player.invincible);
    assert_eq!(state.player.invincible_time, STAR_INVINCIBLE_MS);
    assert_eq!(state.score, COIN_SCORE);

    for _ in 0..5 {
        tick(&mut state, &TickInput::default(), STEP_MS);
    }
    assert_eq!(state.score, COIN_SCORE);
    assert!(state.collectibles.iter().all(|c| c.collected));
    assert_eq!(state.collectibles.len(), 2);
}

#[test]
fn losing_every_life_ends_the_run() {
    let mut state = playing(vec![quiet_level()]);
    for _ in 0..START_LIVES {
        state.player.invincible = false;
        state.damage_player();
    }
    assert_eq!(state.lives, 0);
    assert_eq!(state.phase, GamePhase::GameOver);

    // Terminal: ticks no longer simulate
    let time = state.game_time;
    tick(&mut state, &TickInput::default(), STEP_MS);
    assert_eq!(state.game_time, time);
}

#[test]
fn corrupt_save_means_nothing_unlocked() {
    let mut store = MemoryStore::new();
    store.set(ACHIEVEMENTS_KEY, b"\x00\x01garbage").unwrap();
    let achievements = load_achievements(&store);
    assert_eq!(achievements.unlocked().count(), 0);

    let app = App::new(1).with_store(Box::new(store));
    assert_eq!(app.state().achievements.unlocked().count(), 0);
    assert_eq!(app.settings().max_particles(), 256);
}

#[test]
fn unlocks_carry_into_new_sessions() {
    let mut store = MemoryStore::new();
    let mut state = playing(vec![quiet_level()]);
    state.achievements.unlock(Achievement::Acrobat);
    state.achievements.double_jumps = 20;
    save_achievements(&mut store, &state.achievements).unwrap();

    let mut app = App::new(5).with_store(Box::new(store));
    app.start_game();
    assert!(app.state().achievements.is_unlocked(Achievement::Acrobat));
    assert_eq!(app.state().achievements.double_jumps, 20);
    // Restarting a run keeps unlocks
    app.frame(STEP_MS, Controls::default());
    app.start_game();
    assert!(app.state().achievements.is_unlocked(Achievement::Acrobat));
}

#[test]
fn pause_freezes_everything_until_toggled_again() {
    let mut app = App::from_state(GameState::with_levels(8, vec![quiet_level()]));
    app.start_game();
    app.frame(STEP_MS, Controls::default());

    let pause = Controls {
        pause: true,
        ..Default::default()
    };
    app.frame(STEP_MS, pause);
    assert_eq!(app.state().phase, GamePhase::Paused);

    let snapshot = (app.state().player.pos, app.state().game_time);
    for _ in 0..20 {
        app.frame(STEP_MS, Controls::default());
    }
    assert_eq!((app.state().player.pos, app.state().game_time), snapshot);

    app.frame(STEP_MS, pause);
    assert_eq!(app.state().phase, GamePhase::Playing);
}

#[test]
fn restart_after_progress_resets_the_run() {
    let two_cats = LevelDescriptor::new("two cats")
        .enemy(Species::Cat, 300.0, 465.0)
        .enemy(Species::Cat, 700.0, 465.0);
    let mut app = App::from_state(GameState::with_levels(9, vec![two_cats, quiet_level()]));
    app.start_game();

    // Clear level one, then take a hit on level two
    app.state_mut().strike_enemy(0, 1);
    app.state_mut().strike_enemy(1, 1);
    app.frame(STEP_MS, Controls::default());
    assert_eq!(app.state().level_index, 1);
    assert!(app.state_mut().damage_player());
    for _ in 0..5 {
        app.frame(STEP_MS, Controls::default());
    }
    assert_eq!(app.state().score, 2 * PROJECTILE_KILL_SCORE);
    assert_eq!(app.state().lives, START_LIVES - 1);

    app.start_game();
    let state = app.state();
    assert_eq!((state.level_index, state.score, state.lives), (0, 0, START_LIVES));
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.enemies.len(), 2);
    assert_eq!(state.alive_enemies(), 2);
    assert_eq!(state.combo.count, 0);
    assert!(!state.player.invincible);
    assert_eq!(state.player.pos, Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y));
}
