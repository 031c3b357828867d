//! Per-tick render snapshot
//!
//! The drawing side never reads `GameState` directly. After each tick the
//! host captures a `Scene`: plain data listing the background, every sprite
//! with its frame and transform, and every line of text, in draw order.

use glam::{IVec2, Vec2};
use serde::Serialize;

use crate::assets::AssetId;
use crate::consts::{POSE_SCALE, PROMPT_LINE_HEIGHT, PROMPT_TOP, SKY_RGBA, TEXT_RGBA};
use crate::sim::hero::{FRAME_GAME_OVER, FRAME_NORMAL, FRAME_WINNER};
use crate::sim::{GamePhase, GameState, Sprite};

/// Gap between HUD elements and the screen edge
const HUD_MARGIN: i32 = 10;
/// Baseline of the score text above the bottom edge
const SCORE_BASELINE: i32 = 20;
/// Space between life icons
const LIFE_SPACING: i32 = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Background {
    /// Solid colour over the whole screen
    Fill { rgba: [u8; 4] },
    /// One image repeated from the top-left corner
    Tiled {
        asset: AssetId,
        tile: IVec2,
        cols: i32,
        rows: i32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    Center,
}

/// One sprite to draw, centered on `pos`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpriteView {
    pub asset: AssetId,
    pub pos: IVec2,
    pub rotation: f32,
    pub scale: Vec2,
    /// Sheet frame; the source rect starts at `frame * frame_width`
    pub frame: u32,
    pub frame_width: i32,
    pub height: i32,
    /// Draw only this many source pixels from the left of the frame
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_width: Option<i32>,
    pub flip_x: bool,
}

impl SpriteView {
    fn of(sprite: &Sprite, frame: u32) -> Self {
        Self {
            asset: sprite.asset,
            pos: sprite.pos,
            rotation: sprite.rotation,
            scale: sprite.scale,
            frame,
            frame_width: sprite.width,
            height: sprite.height,
            crop_width: None,
            flip_x: sprite.flip_x,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLine {
    pub text: String,
    pub pos: IVec2,
    pub align: Align,
    pub rgba: [u8; 4],
}

impl TextLine {
    fn new(text: impl Into<String>, pos: IVec2, align: Align) -> Self {
        Self {
            text: text.into(),
            pos,
            align,
            rgba: TEXT_RGBA,
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub phase: GamePhase,
    pub screen: IVec2,
    pub background: Background,
    pub sprites: Vec<SpriteView>,
    pub text: Vec<TextLine>,
}

impl Scene {
    pub fn capture(state: &GameState) -> Self {
        let mut scene = Self {
            phase: state.phase,
            screen: state.screen,
            background: Background::Fill { rgba: SKY_RGBA },
            sprites: Vec::new(),
            text: Vec::new(),
        };

        match state.phase {
            GamePhase::NoInputDevice => {
                scene.prompt(&["Plugin a clicker to get started.".to_string()]);
            }
            GamePhase::NextStage => {
                if let Some(level) = state.current_level() {
                    scene.prompt(&[
                        level.name().to_string(),
                        format!("{} - {}", state.level_index + 1, level.stage() + 1),
                        "Press a button to start".to_string(),
                    ]);
                }
            }
            GamePhase::Running => scene.playfield(state),
            GamePhase::LostLife => {
                scene.prompt(&[format!(
                    "{} lives left. Press a button to keep trying.",
                    state.lives
                )]);
            }
            GamePhase::GameOver => {
                scene.prompt(&["Game over. Press a button to try again".to_string()]);
                scene.pose(state, FRAME_GAME_OVER);
            }
            GamePhase::Winner => {
                scene.prompt(&["You won! Press a button to play again".to_string()]);
                scene.pose(state, FRAME_WINNER);
            }
        }

        scene
    }

    /// Centered lines stacked down from the top of the screen
    fn prompt(&mut self, lines: &[String]) {
        let x = self.screen.x / 2;
        for (i, line) in lines.iter().enumerate() {
            let y = PROMPT_TOP + i as i32 * PROMPT_LINE_HEIGHT;
            self.text
                .push(TextLine::new(line.clone(), IVec2::new(x, y), Align::Center));
        }
    }

    /// Hero end-screen pose, blown up in the middle of the screen
    fn pose(&mut self, state: &GameState, frame: u32) {
        let mut hero = state.hero.sprite.clone();
        hero.center(self.screen);
        hero.rotation = 0.0;
        hero.set_scale(POSE_SCALE);
        self.sprites.push(SpriteView::of(&hero, frame));
    }

    fn playfield(&mut self, state: &GameState) {
        if let Some(level) = state.current_level() {
            let tile = state.assets.get(level.background);
            let tile = IVec2::new(tile.width.max(1), tile.height.max(1));
            self.background = Background::Tiled {
                asset: level.background,
                tile,
                cols: (self.screen.x + tile.x - 1) / tile.x,
                rows: (self.screen.y + tile.y - 1) / tile.y,
            };
        }

        self.sprites
            .push(SpriteView::of(&state.hero.sprite, FRAME_NORMAL));
        for arrow in &state.arrows {
            self.sprites.push(SpriteView::of(&arrow.sprite, 0));
        }
        for enemy in &state.enemies {
            self.sprites.push(SpriteView::of(&enemy.sprite, enemy.frame));
            if let Some((bar, visible)) =
                enemy.health_bar_layout(self.screen.y, state.tuning.health_bar_margin)
            {
                let mut view = SpriteView::of(&bar, 0);
                view.crop_width = Some(visible);
                self.sprites.push(view);
            }
        }

        self.hud(state);
    }

    /// Score bottom-left, one icon per remaining life bottom-right
    fn hud(&mut self, state: &GameState) {
        self.text.push(TextLine::new(
            format!("Score: {}", state.score),
            IVec2::new(HUD_MARGIN, self.screen.y - SCORE_BASELINE),
            Align::Left,
        ));

        let life = Sprite::new(AssetId::Life, state.assets.get(AssetId::Life));
        let half = life.half_size();
        for i in 0..state.lives as i32 {
            let x = self.screen.x - HUD_MARGIN - half.x - i * (life.width + LIFE_SPACING);
            let y = self.screen.y - HUD_MARGIN - half.y;
            self.sprites
                .push(SpriteView::of(&life.clone().with_pos(IVec2::new(x, y)), 0));
        }
    }
}
