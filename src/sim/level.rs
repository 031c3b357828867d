//! Levels: one environment, a run of stages, then a boss
//!
//! A level starts at stage 0. Each cleared wave advances the stage; once the
//! stage reaches the stage count the next population is a single boss, and
//! clearing that completes the level.

use glam::IVec2;

use super::enemy::Enemy;
use super::state::EntityIds;
use crate::assets::{AssetBundle, AssetId};
use crate::tuning::Tuning;

/// Everything `populate_enemies` needs besides the level itself
#[derive(Debug, Clone, Copy)]
pub struct SpawnContext<'a> {
    pub screen: IVec2,
    pub tuning: &'a Tuning,
    pub assets: &'a AssetBundle,
    pub now_ms: u64,
}

#[derive(Debug, Clone)]
pub struct Level {
    name: String,
    pub enemy_asset: AssetId,
    pub background: AssetId,
    num_enemies: u32,
    stage: u32,
    num_stages: u32,
}

impl Level {
    pub fn new(
        name: impl Into<String>,
        enemy_asset: AssetId,
        background: AssetId,
        num_enemies: u32,
        num_stages: u32,
    ) -> Self {
        Self {
            name: name.into(),
            enemy_asset,
            background,
            num_enemies,
            stage: 0,
            num_stages: num_stages.max(1),
        }
    }

    /// The two levels the game ships with
    pub fn builtin(tuning: &Tuning) -> Vec<Level> {
        vec![
            Level::new(
                "Goblins in the grass",
                AssetId::Goblin,
                AssetId::Grass,
                tuning.enemies_per_wave,
                tuning.stage_count,
            ),
            Level::new(
                "Skeletons on the stone",
                AssetId::Skeleton,
                AssetId::Stone,
                tuning.enemies_per_wave,
                tuning.stage_count,
            ),
        ]
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stage(&self) -> u32 {
        self.stage
    }

    /// Regular stages are exhausted. The wave populated in this state is the
    /// boss, so once the enemy set empties again the level is done.
    pub fn complete(&self) -> bool {
        self.stage == self.num_stages
    }

    pub fn next_stage(&mut self) {
        self.stage = (self.stage + 1).min(self.num_stages);
    }

    pub fn reset(&mut self) {
        self.stage = 0;
    }

    /// Hitpoints for the `i`th enemy along an edge at the current stage
    pub fn hitpoints_for(&self, i: u32, tuning: &Tuning) -> u32 {
        let base = tuning.hitpoint_increment;
        base + base * (i % tuning.hitpoint_modulus(self.stage))
    }

    /// Add this stage's wave to `target`.
    ///
    /// Regular stages spread `num_enemies / 4` enemies evenly along each screen
    /// edge; a remainder that does not divide by four is not spawned. The right
    /// and bottom rows are pulled in from the edge so they start mostly on
    /// screen. The boss stage spawns a single boss at a fixed point.
    pub fn populate_enemies(
        &self,
        ctx: &SpawnContext<'_>,
        ids: &mut EntityIds,
        target: &mut Vec<Enemy>,
    ) {
        let SpawnContext {
            screen,
            tuning,
            assets,
            now_ms,
        } = *ctx;

        let spawn = |ids: &mut EntityIds, pos: IVec2, hitpoints: u32, boss: bool| {
            Enemy::new(
                ids.allocate(),
                pos,
                hitpoints,
                boss,
                self.enemy_asset,
                assets,
                now_ms,
                tuning,
            )
        };

        if self.complete() {
            target.push(spawn(ids, tuning.boss_spawn, tuning.boss_hitpoints, true));
            log::debug!("{}: boss spawned", self.name);
            return;
        }

        let per_side = (self.num_enemies / 4) as i32;
        if per_side == 0 {
            return;
        }
        let gap = IVec2::new(screen.x / per_side, screen.y / per_side);
        let sheet = assets.get(self.enemy_asset);
        let far = IVec2::new(screen.x - sheet.width / 5, screen.y - sheet.height);

        let edges: [fn(i32, IVec2, IVec2) -> IVec2; 4] = [
            |i, _, gap| IVec2::new(0, i * gap.y),
            |i, _, gap| IVec2::new(i * gap.x, 0),
            |i, far, gap| IVec2::new(far.x, i * gap.y),
            |i, far, gap| IVec2::new(i * gap.x, far.y),
        ];
        for edge in edges {
            for i in 0..per_side {
                let hitpoints = self.hitpoints_for(i as u32, tuning);
                target.push(spawn(ids, edge(i, far, gap), hitpoints, false));
            }
        }
        log::debug!(
            "{} stage {}: spawned {} enemies",
            self.name,
            self.stage + 1,
            per_side * 4
        );
    }
}
