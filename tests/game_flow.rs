//! Controller scenarios driven through the public tick API

use arrows_away::consts::TICK_MS;
use arrows_away::sim::{EnemyState, GamePhase, GameState, PadInput, TickInput, tick};
use arrows_away::{AssetBundle, Scene, Tuning};
use glam::{IVec2, Vec2};

fn new_game() -> GameState {
    GameState::new(
        2024,
        IVec2::new(1000, 1000),
        Tuning::default(),
        AssetBundle::builtin(),
    )
}

fn pad(ack: bool) -> TickInput {
    TickInput {
        devices: vec![PadInput {
            id: 3,
            ack,
            ..Default::default()
        }],
    }
}

/// Put the first living enemy on top of the hero and run one tick
fn get_caught(state: &mut GameState) {
    let hero = state.hero.pos();
    let enemy = state
        .enemies
        .iter_mut()
        .find(|e| e.state == EnemyState::Alive)
        .expect("a living enemy");
    enemy.sprite.pos = hero;
    tick(state, &pad(false), TICK_MS);
}

#[test]
fn connect_start_and_clear_a_wave() {
    let mut state = new_game();
    tick(&mut state, &TickInput::default(), TICK_MS);
    assert_eq!(state.phase, GamePhase::NoInputDevice);

    tick(&mut state, &pad(false), TICK_MS);
    assert_eq!(state.phase, GamePhase::NextStage);

    tick(&mut state, &pad(true), TICK_MS);
    assert_eq!(state.phase, GamePhase::Running);

    state.enemies.clear();
    tick(&mut state, &pad(false), TICK_MS);
    assert_eq!(state.phase, GamePhase::NextStage);
    assert_eq!(state.level_index, 0);
    assert_eq!(state.levels[0].stage(), 1);
}

#[test]
fn third_catch_is_game_over_and_ack_resets() {
    let mut state = new_game();
    state.tuning.pursuit_chance = 0.0;
    tick(&mut state, &pad(false), TICK_MS);
    tick(&mut state, &pad(true), TICK_MS);
    state.score = 70;

    get_caught(&mut state);
    assert_eq!(state.phase, GamePhase::LostLife);
    assert_eq!(state.lives, 2);
    tick(&mut state, &pad(true), TICK_MS);
    assert_eq!(state.phase, GamePhase::Running);

    get_caught(&mut state);
    assert_eq!(state.phase, GamePhase::LostLife);
    tick(&mut state, &pad(true), TICK_MS);

    get_caught(&mut state);
    assert_eq!(state.lives, 0);
    assert_eq!(state.phase, GamePhase::GameOver);
    assert!(state.enemies.iter().any(|e| e.is_alive()));

    tick(&mut state, &pad(true), TICK_MS);
    assert_eq!(state.phase, GamePhase::NextStage);
    assert_eq!(state.score, 0);
    assert_eq!(state.lives, 3);
    assert_eq!(state.level_index, 0);
    assert_eq!(state.enemies.len(), 40);
}

#[test]
fn unplugging_at_game_over_still_requires_a_reset() {
    let mut state = new_game();
    state.tuning.pursuit_chance = 0.0;
    tick(&mut state, &pad(false), TICK_MS);
    tick(&mut state, &pad(true), TICK_MS);
    state.score = 70;
    for _ in 0..3 {
        get_caught(&mut state);
        if state.phase == GamePhase::LostLife {
            tick(&mut state, &pad(true), TICK_MS);
        }
    }
    assert_eq!(state.phase, GamePhase::GameOver);

    tick(&mut state, &TickInput::default(), TICK_MS);
    assert_eq!(state.phase, GamePhase::NoInputDevice);
    tick(&mut state, &pad(false), TICK_MS);
    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.lives, 0);

    tick(&mut state, &pad(true), TICK_MS);
    assert_eq!(state.phase, GamePhase::NextStage);
    assert_eq!(state.lives, 3);
    assert_eq!(state.score, 0);

    tick(&mut state, &pad(true), TICK_MS);
    assert_eq!(state.phase, GamePhase::Running);
    assert_eq!(state.lives, 3);
}

#[test]
fn clearing_every_level_wins() {
    let mut state = new_game();
    tick(&mut state, &pad(false), TICK_MS);

    let mut waves = 0;
    while state.phase != GamePhase::Winner && waves < 10 {
        tick(&mut state, &pad(true), TICK_MS);
        assert_eq!(state.phase, GamePhase::Running);
        state.enemies.clear();
        tick(&mut state, &pad(false), TICK_MS);
        waves += 1;
    }
    // Two levels of one stage and one boss each
    assert_eq!(waves, 4);
    assert_eq!(state.phase, GamePhase::Winner);

    let scene = Scene::capture(&state);
    assert_eq!(scene.text[0].text, "You won! Press a button to play again");
}

#[test]
fn shooting_a_living_enemy_scores() {
    let mut state = new_game();
    state.tuning.pursuit_chance = 0.0;
    tick(&mut state, &pad(false), TICK_MS);
    tick(&mut state, &pad(true), TICK_MS);

    // Right edge enemy level with the hero, pulled in a fifth of its sheet
    let hero = state.hero.pos();
    assert!(
        state
            .enemies
            .iter()
            .any(|e| e.pos() == IVec2::new(1000 - 96 / 5, hero.y))
    );

    let fire = TickInput {
        devices: vec![PadInput {
            id: 3,
            right: Vec2::X,
            ..Default::default()
        }],
    };
    tick(&mut state, &fire, TICK_MS);
    for _ in 0..80 {
        tick(&mut state, &pad(false), TICK_MS);
    }
    assert_eq!(state.score, 10);
    assert!(state.arrows.is_empty());
}
