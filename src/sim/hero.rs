//! The archer

use glam::{IVec2, Vec2};

use super::sprite::{Rect, Sprite};
use super::tick::PadInput;
use crate::aim_angle;
use crate::assets::{AssetBundle, AssetId};
use crate::tuning::Tuning;

/// Hero sheet frames
pub const FRAME_NORMAL: u32 = 0;
pub const FRAME_GAME_OVER: u32 = 1;
pub const FRAME_WINNER: u32 = 2;

#[derive(Debug, Clone)]
pub struct Hero {
    pub sprite: Sprite,
}

impl Hero {
    /// Create the hero in the middle of the screen
    pub fn new(screen: IVec2, assets: &AssetBundle) -> Self {
        let mut sprite = Sprite::new(AssetId::Hero, assets.get(AssetId::Hero));
        sprite.center(screen);
        Self { sprite }
    }

    #[inline]
    pub fn pos(&self) -> IVec2 {
        self.sprite.pos
    }

    pub fn bounds(&self) -> Rect {
        self.sprite.bounds()
    }

    pub fn center(&mut self, screen: IVec2) {
        self.sprite.center(screen);
        self.sprite.rotation = 0.0;
    }

    /// Move by every connected pad's left stick, then aim with the right stick
    pub fn update(&mut self, pads: &[PadInput], screen: IVec2, tuning: &Tuning) {
        for pad in pads {
            self.steer(pad.left, screen, tuning.hero_speed);
        }
        self.aim(pads, screen, tuning.stick_threshold);
    }

    /// Move by one stick reading, rounded to tenths, kept fully on screen
    pub fn steer(&mut self, stick: Vec2, screen: IVec2, speed: i32) {
        let tenths = (stick * 10.0).round().as_ivec2();
        let half = self.sprite.half_size();
        let lo = half;
        let hi = (screen - half).max(lo);
        self.sprite.pos = (self.sprite.pos + tenths * speed / 10).clamp(lo, hi);
    }

    /// Face where the first deflected right stick points; neutral faces 0
    fn aim(&mut self, pads: &[PadInput], screen: IVec2, threshold: f32) {
        let reach = (screen / 2).as_vec2();
        self.sprite.rotation = pads
            .iter()
            .map(|pad| pad.right)
            .find(|stick| stick.x.abs() > threshold || stick.y.abs() > threshold)
            .map_or(0.0, |stick| aim_angle((reach * stick).as_ivec2().as_vec2()));
    }
}
