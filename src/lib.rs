//! Arrows Away - a single-screen archer arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game flow)
//! - `scene`: Read-only per-tick snapshot for the drawing collaborator
//! - `assets`: Explicit asset bundle (sizes and frame layout of each image)
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod error;
pub mod scene;
pub mod sim;
pub mod tuning;

pub use assets::{AssetBundle, AssetId, AssetInfo};
pub use error::{Error, Result};
pub use scene::Scene;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default playfield size in pixels
    pub const SCREEN_WIDTH: i32 = 1000;
    pub const SCREEN_HEIGHT: i32 = 1000;

    /// Simulation ticks per second (one tick per rendered frame)
    pub const TICKS_PER_SECOND: u64 = 60;
    /// Nominal tick length handed to `tick` by the frame loop
    pub const TICK_MS: u64 = 1000 / TICKS_PER_SECOND;

    /// Game over / winner pose scale
    pub const POSE_SCALE: f32 = 10.0;

    /// Prompt layout: first line y, gap between lines
    pub const PROMPT_TOP: i32 = 40;
    pub const PROMPT_LINE_HEIGHT: i32 = 26;

    /// Sky blue fill for every waiting screen
    pub const SKY_RGBA: [u8; 4] = [0x87, 0xCE, 0xEB, 0xFF];
    /// HUD text colour
    pub const TEXT_RGBA: [u8; 4] = [0x00, 0x00, 0x00, 0xFF];
}

/// Facing angle (radians) for a displacement.
///
/// A zero displacement has no direction and faces 0.
#[inline]
pub fn aim_angle(delta: Vec2) -> f32 {
    if delta == Vec2::ZERO {
        0.0
    } else {
        delta.y.atan2(delta.x)
    }
}
