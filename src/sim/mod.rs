//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes only from the `dt_ms` handed to `tick`
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod arrow;
pub mod enemy;
pub mod hero;
pub mod level;
pub mod sprite;
pub mod state;
pub mod tick;

pub use arrow::Arrow;
pub use enemy::{Enemy, EnemyState, HitOutcome};
pub use hero::Hero;
pub use level::{Level, SpawnContext};
pub use sprite::{Rect, Sprite};
pub use state::{EntityIds, GamePhase, GameState};
pub use tick::{PadInput, TickInput, shot_target, tick};
