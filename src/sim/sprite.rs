//! Sprite geometry shared by every entity
//!
//! A sprite is positioned by its center in pixel space. Rotation and flip are
//! draw-time only; scale feeds the hit box through [`Sprite::scaled_bounds`].

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::assets::{AssetId, AssetInfo};

/// Axis-aligned pixel rectangle, `min` inclusive, `max` exclusive for overlap tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub min: IVec2,
    pub max: IVec2,
}

impl Rect {
    pub fn new(min: IVec2, max: IVec2) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    /// Point test, edges included on all four sides
    pub fn contains(&self, p: IVec2) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }

    /// True when the rectangles share a non-empty area (touching edges do not count)
    pub fn intersects(&self, other: &Rect) -> bool {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        min.x < max.x && min.y < max.y
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    /// Center position
    pub pos: IVec2,
    /// Width of one frame
    pub width: i32,
    pub height: i32,
    /// Draw rotation in radians
    pub rotation: f32,
    pub scale: Vec2,
    /// Mirror horizontally when drawing
    pub flip_x: bool,
    pub asset: AssetId,
}

impl Sprite {
    pub fn new(asset: AssetId, info: AssetInfo) -> Self {
        Self {
            pos: IVec2::ZERO,
            width: info.frame_width(),
            height: info.height,
            rotation: 0.0,
            scale: Vec2::ONE,
            flip_x: false,
            asset,
        }
    }

    pub fn with_pos(mut self, pos: IVec2) -> Self {
        self.pos = pos;
        self
    }

    /// Uniform scale on both axes
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = Vec2::splat(scale);
    }

    #[inline]
    pub fn half_size(&self) -> IVec2 {
        IVec2::new(self.width / 2, self.height / 2)
    }

    /// Unscaled box centered on the sprite
    pub fn bounds(&self) -> Rect {
        let half = self.half_size();
        Rect::new(self.pos - half, self.pos + half)
    }

    /// Box after applying the sprite's scale
    pub fn scaled_bounds(&self) -> Rect {
        let half = Vec2::new(self.width as f32, self.height as f32) * self.scale.abs() / 2.0;
        let center = self.pos.as_vec2();
        Rect::new((center - half).as_ivec2(), (center + half).as_ivec2())
    }

    pub fn intersects(&self, other: &Sprite) -> bool {
        self.scaled_bounds().intersects(&other.scaled_bounds())
    }

    /// Move to the middle of a `screen`-sized field
    pub fn center(&mut self, screen: IVec2) {
        self.pos = screen / 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sprite(x: i32, y: i32) -> Sprite {
        Sprite::new(AssetId::Goblin, AssetInfo::new(96, 32, 3)).with_pos(IVec2::new(x, y))
    }

    #[test]
    fn test_bounds_centered() {
        let s = sprite(100, 50);
        assert_eq!(s.bounds(), Rect::new(IVec2::new(84, 34), IVec2::new(116, 66)));
        assert_eq!(s.scaled_bounds(), s.bounds());
    }

    #[test]
    fn test_scaled_bounds_grow_around_center() {
        let mut s = sprite(100, 100);
        s.set_scale(2.0);
        assert_eq!(
            s.scaled_bounds(),
            Rect::new(IVec2::new(68, 68), IVec2::new(132, 132))
        );
        // Unscaled box is untouched
        assert_eq!(s.bounds().width(), 32);
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = sprite(0, 0);
        let b = sprite(32, 0);
        assert!(!a.intersects(&b));
        let c = sprite(31, 0);
        assert!(a.intersects(&c));
    }

    #[test]
    fn test_rect_contains_edges() {
        let r = Rect::new(IVec2::new(0, 0), IVec2::new(10, 10));
        assert!(r.contains(IVec2::new(0, 0)));
        assert!(r.contains(IVec2::new(10, 10)));
        assert!(!r.contains(IVec2::new(11, 5)));
    }

    #[test]
    fn test_center() {
        let mut s = sprite(3, 4);
        s.center(IVec2::new(1000, 800));
        assert_eq!(s.pos, IVec2::new(500, 400));
    }

    proptest! {
        #[test]
        fn scaled_bounds_contain_center(
            x in -2000i32..2000,
            y in -2000i32..2000,
            scale in 0.1f32..8.0,
        ) {
            let mut s = sprite(x, y);
            s.set_scale(scale);
            prop_assert!(s.scaled_bounds().contains(s.pos));
        }

        #[test]
        fn intersects_is_symmetric(
            ax in -100i32..100,
            ay in -100i32..100,
            bx in -100i32..100,
            by in -100i32..100,
        ) {
            let a = sprite(ax, ay);
            let b = sprite(bx, by);
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }
    }
}
