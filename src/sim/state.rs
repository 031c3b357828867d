//! Game state and core simulation types
//!
//! Everything the controller owns lives here: the flow phase, the hero, the
//! levels, and the active enemy and arrow sets.

use std::collections::{BTreeMap, BTreeSet};

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arrow::Arrow;
use super::enemy::Enemy;
use super::hero::Hero;
use super::level::{Level, SpawnContext};
use crate::assets::AssetBundle;
use crate::tuning::Tuning;

/// Current phase of the game flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No controller connected; waiting for one
    NoInputDevice,
    /// Title card for the upcoming wave, waiting for a button
    NextStage,
    /// Active gameplay
    Running,
    /// Hero was caught; waiting for a button to resume the same wave
    LostLife,
    /// Out of lives
    GameOver,
    /// Every level cleared
    Winner,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::NoInputDevice => "NoInputDevice",
            GamePhase::NextStage => "NextStage",
            GamePhase::Running => "Running",
            GamePhase::LostLife => "LostLife",
            GamePhase::GameOver => "GameOver",
            GamePhase::Winner => "Winner",
        }
    }
}

/// Allocator for entity handles.
///
/// Ids increase monotonically and are never reused within a run, so an id
/// stays valid as a key even after its entity is removed.
#[derive(Debug, Clone)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn allocate(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Drives stochastic enemy pursuit
    pub rng: Pcg32,
    /// Playfield size in pixels
    pub screen: IVec2,
    pub phase: GamePhase,
    /// Phase left when the last controller disconnected, resumed on reconnect
    pub interrupted: Option<GamePhase>,
    /// Simulation clock; every timer reads this
    pub time_ms: u64,
    pub time_ticks: u64,
    pub lives: u32,
    pub score: u64,
    pub hero: Hero,
    pub level_index: usize,
    pub levels: Vec<Level>,
    /// Active enemies (sorted by id)
    pub enemies: Vec<Enemy>,
    /// Arrows in flight (sorted by id)
    pub arrows: Vec<Arrow>,
    /// Connected controllers
    pub devices: BTreeSet<u32>,
    /// Last shot time per controller; absent while its aim stick is neutral
    pub last_shot_ms: BTreeMap<u32, u64>,
    pub tuning: Tuning,
    pub assets: AssetBundle,
    ids: EntityIds,
}

impl GameState {
    /// Create a new game on a `screen`-sized field
    pub fn new(seed: u64, screen: IVec2, tuning: Tuning, assets: AssetBundle) -> Self {
        let levels = Level::builtin(&tuning);
        let hero = Hero::new(screen, &assets);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            screen,
            phase: GamePhase::NoInputDevice,
            interrupted: None,
            time_ms: 0,
            time_ticks: 0,
            lives: tuning.starting_lives,
            score: 0,
            hero,
            level_index: 0,
            levels,
            enemies: Vec::new(),
            arrows: Vec::new(),
            devices: BTreeSet::new(),
            last_shot_ms: BTreeMap::new(),
            tuning,
            assets,
            ids: EntityIds::default(),
        };

        state.populate_current_level();

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        self.ids.allocate()
    }

    /// The level being played (clamped once every level is won)
    pub fn current_level(&self) -> Option<&Level> {
        self.levels
            .get(self.level_index)
            .or_else(|| self.levels.last())
    }

    /// Spawn the wave for the current level and stage
    pub fn populate_current_level(&mut self) {
        let Some(level) = self.levels.get(self.level_index) else {
            return;
        };
        let ctx = SpawnContext {
            screen: self.screen,
            tuning: &self.tuning,
            assets: &self.assets,
            now_ms: self.time_ms,
        };
        level.populate_enemies(&ctx, &mut self.ids, &mut self.enemies);
    }

    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("{} -> {}", self.phase.as_str(), phase.as_str());
            self.phase = phase;
        }
    }

    /// Start over from the first level with full lives and no score
    pub fn restart(&mut self) {
        self.enemies.clear();
        self.arrows.clear();
        self.last_shot_ms.clear();
        self.hero.center(self.screen);
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.level_index = 0;
        for level in &mut self.levels {
            level.reset();
        }
        self.populate_current_level();
        self.set_phase(GamePhase::NextStage);
    }

    pub fn alive_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_alive()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_state() -> GameState {
        GameState::new(
            7,
            IVec2::new(1000, 1000),
            Tuning::default(),
            AssetBundle::builtin(),
        )
    }

    #[test]
    fn test_new_game() {
        let state = new_state();
        assert_eq!(state.phase, GamePhase::NoInputDevice);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.enemies.len(), 40);
        assert_eq!(state.hero.pos(), IVec2::new(500, 500));
        assert_eq!(state.current_level().map(|l| l.name()), Some("Goblins in the grass"));
    }

    #[test]
    fn test_entity_ids_never_repeat() {
        let mut state = new_state();
        let max = state.enemies.iter().map(|e| e.id).max().unwrap();
        let next = state.next_entity_id();
        assert!(next > max);
        assert!(state.next_entity_id() > next);
    }

    #[test]
    fn test_restart_resets_every_level() {
        let mut state = new_state();
        for level in &mut state.levels {
            level.next_stage();
        }
        state.level_index = 1;
        state.score = 120;
        state.lives = 1;
        state.enemies.clear();

        state.restart();
        assert_eq!(state.phase, GamePhase::NextStage);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level_index, 0);
        assert!(state.levels.iter().all(|l| l.stage() == 0));
        assert_eq!(state.enemies.len(), 40);
    }

    #[test]
    fn test_current_level_after_last() {
        let mut state = new_state();
        state.level_index = state.levels.len();
        assert_eq!(
            state.current_level().map(|l| l.name()),
            Some("Skeletons on the stone")
        );
    }
}
