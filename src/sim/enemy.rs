//! Enemies and their Alive -> Dead -> Buried lifecycle

use glam::{IVec2, Vec2};
use rand::Rng;

use super::arrow::Arrow;
use super::sprite::Sprite;
use crate::assets::{AssetBundle, AssetId};
use crate::tuning::Tuning;

/// Lifecycle of an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyState {
    /// Moving, hittable, shows a health bar
    Alive,
    /// Frozen on the decay frame until the decay timer runs out
    Dead,
    /// Ready to be removed from the wave
    Buried,
}

/// Result of testing an arrow against an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitOutcome {
    /// The arrow is inside the enemy's box, whatever its state
    pub hit: bool,
    /// The enemy was alive when hit (the hit counted)
    pub while_alive: bool,
}

/// Sprite sheet frame shown while dead
pub const DECAY_FRAME: u32 = 2;

#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub sprite: Sprite,
    /// Spawn point, restored after the hero loses a life
    pub start: IVec2,
    pub frame: u32,
    pub state: EnemyState,
    /// Simulation time the current state was entered
    pub state_since_ms: u64,
    pub hitpoints: u32,
    pub total_hitpoints: u32,
    pub boss: bool,
    /// Health bar; drawn cropped to the remaining hitpoints
    pub health_bar: Sprite,
}

impl Enemy {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u32,
        pos: IVec2,
        hitpoints: u32,
        boss: bool,
        asset: AssetId,
        assets: &AssetBundle,
        now_ms: u64,
        tuning: &Tuning,
    ) -> Self {
        let mut enemy = Self {
            id,
            sprite: Sprite::new(asset, assets.get(asset)).with_pos(pos),
            start: pos,
            frame: 0,
            state: EnemyState::Alive,
            state_since_ms: now_ms,
            hitpoints,
            total_hitpoints: hitpoints,
            boss,
            health_bar: Sprite::new(AssetId::EnemyHealth, assets.get(AssetId::EnemyHealth)),
        };
        enemy.sprite.set_scale(enemy.scale(tuning));
        enemy
    }

    /// Draw/hit scale.
    ///
    /// Bosses shrink as they take damage. Regular enemies are sized by their
    /// hitpoint tier, so tougher ones look bigger for their whole life.
    pub fn scale(&self, tuning: &Tuning) -> f32 {
        if self.state != EnemyState::Alive {
            return 1.0;
        }
        if self.boss {
            (self.hitpoints as f32 / tuning.boss_scale_divisor).max(1.0)
        } else {
            let tier = self.total_hitpoints / tuning.hitpoint_increment.max(1);
            1.0 + (tier as f32 - 1.0) * tuning.enemy_scale_factor
        }
    }

    fn set_state(&mut self, state: EnemyState, now_ms: u64) {
        self.state = state;
        self.state_since_ms = now_ms;
    }

    #[inline]
    pub fn pos(&self) -> IVec2 {
        self.sprite.pos
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.state == EnemyState::Alive
    }

    #[inline]
    pub fn is_buried(&self) -> bool {
        self.state == EnemyState::Buried
    }

    /// Remaining health in `[0, 1]`
    pub fn health_fraction(&self) -> f32 {
        if self.total_hitpoints == 0 {
            0.0
        } else {
            self.hitpoints as f32 / self.total_hitpoints as f32
        }
    }

    /// One pixel toward `hero` on each axis where they differ
    fn step_toward(&mut self, hero: IVec2) {
        self.sprite.pos += (hero - self.sprite.pos).signum();
    }

    /// One pixel away from `hero` on each axis where they differ
    fn step_away(&mut self, hero: IVec2) {
        self.sprite.pos -= (hero - self.sprite.pos).signum();
    }

    /// Take one arrow: lose a hitpoint, die at zero, otherwise get knocked back
    pub fn shot(&mut self, hero: IVec2, now_ms: u64, tuning: &Tuning) {
        self.hitpoints = self.hitpoints.saturating_sub(1);
        if self.hitpoints == 0 {
            self.set_state(EnemyState::Dead, now_ms);
            self.frame = DECAY_FRAME;
            self.sprite.set_scale(self.scale(tuning));
        } else {
            self.step_away(hero);
        }
    }

    /// Advance one tick
    pub fn update<R: Rng>(&mut self, hero: IVec2, now_ms: u64, rng: &mut R, tuning: &Tuning) {
        let elapsed = now_ms.saturating_sub(self.state_since_ms);
        match self.state {
            EnemyState::Alive => {
                if rng.random_bool(tuning.pursuit_chance) {
                    self.step_toward(hero);
                }
                self.frame = ((elapsed / tuning.animation_frame_ms.max(1)) % 2) as u32;
                self.sprite.flip_x = hero.x < self.sprite.pos.x;
                self.sprite.set_scale(self.scale(tuning));
            }
            EnemyState::Dead => {
                if elapsed >= tuning.death_decay_ms {
                    self.set_state(EnemyState::Buried, now_ms);
                } else {
                    self.frame = DECAY_FRAME;
                }
            }
            EnemyState::Buried => {}
        }
    }

    /// Test an arrow against the scaled hit box; a hit on a living enemy shoots it
    pub fn is_hit(
        &mut self,
        arrow: &Arrow,
        hero: IVec2,
        now_ms: u64,
        tuning: &Tuning,
    ) -> HitOutcome {
        if !self.sprite.scaled_bounds().contains(arrow.pos()) {
            return HitOutcome::default();
        }
        let while_alive = self.is_alive();
        if while_alive {
            self.shot(hero, now_ms, tuning);
        }
        HitOutcome {
            hit: true,
            while_alive,
        }
    }

    /// Return to the spawn point
    pub fn to_start(&mut self) {
        self.sprite.pos = self.start;
    }

    /// Health bar sprite laid out under the enemy (over it if it would fall
    /// off the bottom of the screen), plus the visible width of the bar.
    ///
    /// `None` unless alive.
    pub fn health_bar_layout(&self, screen_height: i32, margin: i32) -> Option<(Sprite, i32)> {
        if !self.is_alive() {
            return None;
        }
        let scale = self.sprite.scale.x;
        let body = self.sprite.scaled_bounds();
        let half_bar = self.health_bar.height / 2;

        let mut y = body.max.y + margin + half_bar;
        if y + half_bar > screen_height {
            y = body.min.y - margin - half_bar;
        }

        let visible = (self.health_bar.width as f32 * self.health_fraction()) as i32;
        let mut bar = self.health_bar.clone();
        bar.pos = IVec2::new(self.sprite.pos.x, y);
        bar.scale = Vec2::new(scale, 1.0);
        Some((bar, visible))
    }
}
