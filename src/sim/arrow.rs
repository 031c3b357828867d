//! Arrows: straight-line projectiles
//!
//! An arrow covers the distance from its launch point to its target in a
//! fixed number of ticks, then keeps going until it leaves the screen.
//! The axis with the larger displacement is stepped; the other axis is
//! read back from the line equation so the path stays straight.

use glam::IVec2;

use super::sprite::Sprite;
use crate::aim_angle;
use crate::assets::{AssetBundle, AssetId};

/// Which coordinate an arrow advances each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Travel {
    /// Step x, derive y from `y = m*x + b`
    Horizontal,
    /// Step y, derive x from the inverse line (or hold x for vertical shots)
    Vertical,
    /// Launch point equals target: no direction to travel in
    Stalled,
}

#[derive(Debug, Clone)]
pub struct Arrow {
    pub id: u32,
    pub start: IVec2,
    pub target: IVec2,
    /// `None` for vertical lines, where the slope is undefined
    slope: Option<f32>,
    intercept: f32,
    step: IVec2,
    travel: Travel,
    pub sprite: Sprite,
}

impl Arrow {
    /// Build an arrow from `start` toward `target`, crossing that span in `steps` ticks
    pub fn new(id: u32, start: IVec2, target: IVec2, steps: i32, assets: &AssetBundle) -> Self {
        let delta = target - start;
        let steps = steps.max(1);

        let slope = (delta.x != 0).then(|| delta.y as f32 / delta.x as f32);
        let intercept = slope.map_or(0.0, |m| start.y as f32 - m * start.x as f32);

        let travel = if delta == IVec2::ZERO {
            Travel::Stalled
        } else if delta.x.abs() >= delta.y.abs() {
            Travel::Horizontal
        } else {
            Travel::Vertical
        };

        // Short shots would truncate to a zero step on the driving axis and
        // never move; always advance at least one pixel.
        let mut step = delta / steps;
        match travel {
            Travel::Horizontal if step.x == 0 => step.x = delta.x.signum(),
            Travel::Vertical if step.y == 0 => step.y = delta.y.signum(),
            _ => {}
        }

        let mut sprite = Sprite::new(AssetId::Arrow, assets.get(AssetId::Arrow)).with_pos(start);
        // Arrow art points up-right; rotate so it points along the flight line
        sprite.rotation = aim_angle(delta.as_vec2()) - std::f32::consts::FRAC_PI_4;

        Self {
            id,
            start,
            target,
            slope,
            intercept,
            step,
            travel,
            sprite,
        }
    }

    #[inline]
    pub fn pos(&self) -> IVec2 {
        self.sprite.pos
    }

    /// Per-tick displacement on each axis
    pub fn step(&self) -> IVec2 {
        self.step
    }

    /// Advance one tick along the flight line
    pub fn update(&mut self) {
        let pos = &mut self.sprite.pos;
        match self.travel {
            Travel::Horizontal => {
                pos.x += self.step.x;
                // Horizontal travel implies delta.x != 0, so the slope exists
                let m = self.slope.unwrap_or(0.0);
                pos.y = (m * pos.x as f32 + self.intercept).round() as i32;
            }
            Travel::Vertical => {
                pos.y += self.step.y;
                pos.x = match self.slope {
                    Some(m) if m != 0.0 => ((pos.y as f32 - self.intercept) / m).round() as i32,
                    _ => self.start.x,
                };
            }
            Travel::Stalled => {}
        }
    }

    /// True once the arrow is outside `[0, width] x [0, height]`
    pub fn is_off_screen(&self, screen: IVec2) -> bool {
        let p = self.pos();
        p.x < 0 || p.x > screen.x || p.y < 0 || p.y > screen.y
    }

    /// An arrow with no direction never leaves the screen on its own
    pub fn is_stalled(&self) -> bool {
        self.travel == Travel::Stalled
    }
}
