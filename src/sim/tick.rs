//! Per-frame simulation tick
//!
//! One call advances the game by one rendered frame, in a fixed order:
//! input sampling, hero, arrows, enemies, wave-clear check.

use glam::{IVec2, Vec2};

use super::arrow::Arrow;
use super::state::{GamePhase, GameState};

/// One controller's readings for a single tick
#[derive(Debug, Clone, Default)]
pub struct PadInput {
    /// Stable controller id
    pub id: u32,
    /// Movement stick, each axis in [-1, 1]
    pub left: Vec2,
    /// Aim/fire stick, each axis in [-1, 1]
    pub right: Vec2,
    /// An acknowledgment button went down this tick
    pub ack: bool,
}

/// Input for a single tick
///
/// Every connected controller appears exactly once; a controller missing
/// from the list is disconnected.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub devices: Vec<PadInput>,
}

impl TickInput {
    pub fn acknowledged(&self) -> bool {
        self.devices.iter().any(|d| d.ack)
    }
}

/// Advance the game state by one frame of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: u64) {
    state.time_ms += dt_ms;
    state.time_ticks += 1;

    sync_devices(state, input);
    if state.devices.is_empty() && state.phase != GamePhase::NoInputDevice {
        state.interrupted = Some(state.phase);
        state.set_phase(GamePhase::NoInputDevice);
    }

    match state.phase {
        GamePhase::NoInputDevice => {
            if !state.devices.is_empty() {
                // Waiting screens keep their own acknowledgment handling;
                // an interrupted wave restarts from its title card
                let resume = match state.interrupted.take() {
                    Some(
                        phase @ (GamePhase::LostLife | GamePhase::GameOver | GamePhase::Winner),
                    ) => phase,
                    _ => GamePhase::NextStage,
                };
                state.set_phase(resume);
            }
        }

        GamePhase::NextStage => {
            if input.acknowledged() {
                state.hero.center(state.screen);
                state.set_phase(GamePhase::Running);
            }
        }

        GamePhase::Running => run(state, input),

        GamePhase::LostLife => {
            if input.acknowledged() {
                state.hero.center(state.screen);
                state.enemies.retain(|e| e.is_alive());
                for enemy in &mut state.enemies {
                    enemy.to_start();
                }
                state.set_phase(GamePhase::Running);
            }
        }

        GamePhase::GameOver | GamePhase::Winner => {
            if input.acknowledged() {
                state.restart();
            }
        }
    }
}

/// Track connects and disconnects
fn sync_devices(state: &mut GameState, input: &TickInput) {
    for pad in &input.devices {
        if state.devices.insert(pad.id) {
            log::info!("Controller {} connected", pad.id);
        }
    }
    let gone: Vec<u32> = state
        .devices
        .iter()
        .copied()
        .filter(|id| !input.devices.iter().any(|pad| pad.id == *id))
        .collect();
    for id in gone {
        log::info!("Controller {} disconnected", id);
        state.devices.remove(&id);
        state.last_shot_ms.remove(&id);
    }
}

/// One frame of active gameplay
fn run(state: &mut GameState, input: &TickInput) {
    state
        .hero
        .update(&input.devices, state.screen, &state.tuning);

    if hero_caught(state) {
        return;
    }

    fire_arrows(state, input);
    resolve_arrows(state);
    update_enemies(state);
    check_wave_clear(state);
}

/// Lose a life if any living enemy overlaps the hero
fn hero_caught(state: &mut GameState) -> bool {
    let hero = state.hero.bounds();
    let caught = state
        .enemies
        .iter()
        .any(|e| e.is_alive() && e.sprite.scaled_bounds().intersects(&hero));
    if !caught {
        return false;
    }

    state.lives = state.lives.saturating_sub(1);
    if state.lives == 0 {
        log::info!("Out of lives with score {}", state.score);
        state.set_phase(GamePhase::GameOver);
    } else {
        log::info!("Life lost, {} left", state.lives);
        state.set_phase(GamePhase::LostLife);
    }
    true
}

/// Launch an arrow for each deflected aim stick whose cooldown has expired
fn fire_arrows(state: &mut GameState, input: &TickInput) {
    let threshold = state.tuning.stick_threshold;
    let origin = state.hero.pos();

    for pad in &input.devices {
        let aim = pad.right;
        if aim.x.abs() <= threshold && aim.y.abs() <= threshold {
            state.last_shot_ms.remove(&pad.id);
            continue;
        }

        let ready = state
            .last_shot_ms
            .get(&pad.id)
            .is_none_or(|last| state.time_ms >= last + state.tuning.shot_cooldown_ms);
        if !ready {
            continue;
        }

        let target = shot_target(origin, aim, state.screen);
        let id = state.next_entity_id();
        let arrow = Arrow::new(id, origin, target, state.tuning.arrow_steps, &state.assets);
        log::debug!("Arrow {} launched toward {:?}", id, target);
        state.arrows.push(arrow);
        state.last_shot_ms.insert(pad.id, state.time_ms);
    }
}

/// Test arrows against enemies, drop spent arrows, move the rest
fn resolve_arrows(state: &mut GameState) {
    let hero = state.hero.pos();
    let now = state.time_ms;
    let mut spent: Vec<u32> = Vec::new();

    for arrow in &state.arrows {
        let mut hit = false;
        for enemy in &mut state.enemies {
            let outcome = enemy.is_hit(arrow, hero, now, &state.tuning);
            if outcome.while_alive {
                state.score += state.tuning.score_per_hit;
            }
            hit |= outcome.hit;
        }
        if hit || arrow.is_off_screen(state.screen) || arrow.is_stalled() {
            spent.push(arrow.id);
        }
    }

    if !spent.is_empty() {
        state.arrows.retain(|a| !spent.contains(&a.id));
    }
    for arrow in &mut state.arrows {
        arrow.update();
    }
}

/// Drop buried enemies, then advance the rest
fn update_enemies(state: &mut GameState) {
    state.enemies.retain(|e| !e.is_buried());

    let hero = state.hero.pos();
    for enemy in &mut state.enemies {
        enemy.update(hero, state.time_ms, &mut state.rng, &state.tuning);
    }
}

/// Advance stage or level once the wave is gone
fn check_wave_clear(state: &mut GameState) {
    if !state.enemies.is_empty() {
        return;
    }
    state.arrows.clear();
    state.last_shot_ms.clear();

    let Some(level) = state.levels.get_mut(state.level_index) else {
        state.set_phase(GamePhase::Winner);
        return;
    };

    if level.complete() {
        log::info!("Level {} cleared: {}", state.level_index + 1, level.name());
        state.level_index += 1;
        if state.level_index == state.levels.len() {
            log::info!("All levels cleared with score {}", state.score);
            state.set_phase(GamePhase::Winner);
            return;
        }
    } else {
        level.next_stage();
        log::info!("{} stage {}", level.name(), level.stage() + 1);
    }

    state.populate_current_level();
    state.set_phase(GamePhase::NextStage);
}

/// Where a shot aimed with `aim` from `origin` is headed: half a screen out
/// at full deflection
pub fn shot_target(origin: IVec2, aim: Vec2, screen: IVec2) -> IVec2 {
    origin + ((screen / 2).as_vec2() * aim).as_ivec2()
}
