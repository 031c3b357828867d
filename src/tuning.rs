//! Data-driven game balance
//!
//! Every hand-tuned number lives here. Defaults reproduce the shipped game;
//! a JSON file may override any subset of fields.

use std::path::Path;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Lives at the start of a run
    pub starting_lives: u32,
    /// Pixels moved per tick at full stick deflection
    pub hero_speed: i32,
    /// Stick deflection needed to fire or aim
    pub stick_threshold: f32,
    /// Minimum time between shots from one device
    pub shot_cooldown_ms: u64,
    /// Points per arrow that lands on a living enemy
    pub score_per_hit: u64,

    // === Arrows ===
    /// Ticks an arrow takes to cover launch -> target
    pub arrow_steps: i32,

    // === Enemies ===
    /// Base hitpoints; every enemy hitpoint total is a multiple of this
    pub hitpoint_increment: u32,
    /// Extra scale per hitpoint tier above the first
    pub enemy_scale_factor: f32,
    /// Chance per tick that a living enemy steps toward the hero
    pub pursuit_chance: f64,
    /// Time a dead enemy lingers before it is buried
    pub death_decay_ms: u64,
    /// Time each walk frame is held
    pub animation_frame_ms: u64,
    /// Gap between an enemy and its health bar
    pub health_bar_margin: i32,

    // === Waves ===
    /// Enemies per regular wave (split evenly across the four edges)
    pub enemies_per_wave: u32,
    /// Regular stages per level before the boss
    pub stage_count: u32,
    /// Hitpoint modulus per stage; stages past the end reuse the last entry
    pub hitpoint_moduli: Vec<u32>,

    // === Boss ===
    pub boss_hitpoints: u32,
    /// Boss scale is `hitpoints / boss_scale_divisor`, never below 1
    pub boss_scale_divisor: f32,
    pub boss_spawn: IVec2,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            hero_speed: 10,
            stick_threshold: 0.5,
            shot_cooldown_ms: 250,
            score_per_hit: 10,

            arrow_steps: 50,

            hitpoint_increment: 50,
            enemy_scale_factor: 0.25,
            pursuit_chance: 0.5,
            death_decay_ms: 2000,
            animation_frame_ms: 1000,
            health_bar_margin: 2,

            enemies_per_wave: 40,
            stage_count: 1,
            hitpoint_moduli: vec![1, 2, 3, 4],

            boss_hitpoints: 1000,
            boss_scale_divisor: 200.0,
            boss_spawn: IVec2::new(200, 200),
        }
    }
}

impl Tuning {
    /// Parse overrides from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load overrides from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Hitpoint modulus for a stage (1 = every enemy gets base hitpoints)
    pub fn hitpoint_modulus(&self, stage: u32) -> u32 {
        let idx = (stage as usize).min(self.hitpoint_moduli.len().saturating_sub(1));
        self.hitpoint_moduli.get(idx).copied().unwrap_or(1).max(1)
    }

    /// Reject values that would divide by zero or stall the game
    pub fn validate(&self) -> Result<()> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> Result<()> {
            Err(Error::InvalidTuning {
                field,
                reason: reason.into(),
            })
        }

        if self.starting_lives == 0 {
            return invalid("starting_lives", "must be at least 1");
        }
        if self.hero_speed < 0 {
            return invalid("hero_speed", "must not be negative");
        }
        if !(0.0..1.0).contains(&self.stick_threshold) {
            return invalid("stick_threshold", "must be in [0, 1)");
        }
        if self.arrow_steps <= 0 {
            return invalid("arrow_steps", "must be positive");
        }
        if self.hitpoint_increment == 0 {
            return invalid("hitpoint_increment", "must be positive");
        }
        if !(0.0..=1.0).contains(&self.pursuit_chance) {
            return invalid("pursuit_chance", "must be a probability");
        }
        if self.animation_frame_ms == 0 {
            return invalid("animation_frame_ms", "must be positive");
        }
        if self.stage_count == 0 {
            return invalid("stage_count", "a level needs at least one stage");
        }
        if self.hitpoint_moduli.is_empty() || self.hitpoint_moduli.contains(&0) {
            return invalid("hitpoint_moduli", "needs at least one non-zero entry");
        }
        if self.boss_hitpoints == 0 {
            return invalid("boss_hitpoints", "must be positive");
        }
        if self.boss_scale_divisor <= 0.0 {
            return invalid("boss_scale_divisor", "must be positive");
        }
        if self.enemies_per_wave % 4 != 0 {
            log::warn!(
                "enemies_per_wave {} is not a multiple of 4; {} will not spawn",
                self.enemies_per_wave,
                self.enemies_per_wave % 4
            );
        }
        Ok(())
    }
}
