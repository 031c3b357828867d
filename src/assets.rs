//! Visual asset bundle
//!
//! The simulation never touches pixels, but hit boxes, spawn offsets and HUD
//! layout all depend on image sizes. The bundle is built once at startup and
//! handed by reference to whatever needs a size.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Every image the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetId {
    Arrow,
    EnemyHealth,
    Goblin,
    Grass,
    Hero,
    Life,
    Skeleton,
    Stone,
}

impl AssetId {
    pub const ALL: [AssetId; 8] = [
        AssetId::Arrow,
        AssetId::EnemyHealth,
        AssetId::Goblin,
        AssetId::Grass,
        AssetId::Hero,
        AssetId::Life,
        AssetId::Skeleton,
        AssetId::Stone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetId::Arrow => "arrow",
            AssetId::EnemyHealth => "enemy_health",
            AssetId::Goblin => "goblin",
            AssetId::Grass => "grass",
            AssetId::Hero => "hero",
            AssetId::Life => "life",
            AssetId::Skeleton => "skeleton",
            AssetId::Stone => "stone",
        }
    }

    /// Size of the image shipped with the game
    fn builtin_info(&self) -> AssetInfo {
        match self {
            AssetId::Arrow => AssetInfo::new(32, 32, 1),
            AssetId::EnemyHealth => AssetInfo::new(32, 4, 1),
            // Sprite sheets: walk, walk, decay
            AssetId::Goblin | AssetId::Skeleton => AssetInfo::new(96, 32, 3),
            AssetId::Grass | AssetId::Stone => AssetInfo::new(64, 64, 1),
            // normal, game over pose, winner pose
            AssetId::Hero => AssetInfo::new(96, 32, 3),
            AssetId::Life => AssetInfo::new(16, 16, 1),
        }
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pixel size of an image and how many equal-width frames it holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetInfo {
    pub width: i32,
    pub height: i32,
    #[serde(default = "one_frame")]
    pub frames: i32,
}

fn one_frame() -> i32 {
    1
}

impl AssetInfo {
    pub const fn new(width: i32, height: i32, frames: i32) -> Self {
        Self {
            width,
            height,
            frames,
        }
    }

    /// Width of a single animation frame
    #[inline]
    pub fn frame_width(&self) -> i32 {
        self.width / self.frames.max(1)
    }
}

/// Size table for every [`AssetId`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetBundle {
    entries: HashMap<AssetId, AssetInfo>,
}

impl Default for AssetBundle {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AssetBundle {
    /// Sizes of the images shipped with the game
    pub fn builtin() -> Self {
        let entries = AssetId::ALL
            .iter()
            .map(|id| (*id, id.builtin_info()))
            .collect();
        Self { entries }
    }

    /// Parse a JSON manifest (`{"hero": {"width": 96, "height": 32, "frames": 3}, ...}`).
    ///
    /// Entries missing from the manifest keep their built-in size.
    pub fn from_json(json: &str) -> Result<Self> {
        let overrides: HashMap<AssetId, AssetInfo> = serde_json::from_str(json)?;
        let mut bundle = Self::builtin();
        for (id, info) in overrides {
            bundle.insert(id, info);
        }
        bundle.validate()?;
        log::info!("Loaded asset manifest ({} entries)", bundle.entries.len());
        Ok(bundle)
    }

    pub fn insert(&mut self, id: AssetId, info: AssetInfo) {
        self.entries.insert(id, info);
    }

    pub fn get(&self, id: AssetId) -> AssetInfo {
        self.entries
            .get(&id)
            .copied()
            .unwrap_or_else(|| id.builtin_info())
    }

    /// Reject images the geometry code cannot work with
    pub fn validate(&self) -> Result<()> {
        for id in AssetId::ALL {
            let info = self.get(id);
            if info.width <= 0 || info.height <= 0 {
                return Err(Error::InvalidAsset {
                    asset: id.as_str(),
                    reason: format!("size {}x{} is not positive", info.width, info.height),
                });
            }
            if info.frames <= 0 || info.width % info.frames != 0 {
                return Err(Error::InvalidAsset {
                    asset: id.as_str(),
                    reason: format!(
                        "width {} does not split into {} frames",
                        info.width, info.frames
                    ),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_bundle_is_valid() {
        let bundle = AssetBundle::builtin();
        assert!(bundle.validate().is_ok());
        assert_eq!(bundle.get(AssetId::Goblin).frame_width(), 32);
        assert_eq!(bundle.get(AssetId::Hero).frame_width(), 32);
    }

    #[test]
    fn test_manifest_overrides_single_entry() {
        let bundle =
            AssetBundle::from_json(r#"{"arrow": {"width": 40, "height": 8}}"#).unwrap();
        assert_eq!(bundle.get(AssetId::Arrow), AssetInfo::new(40, 8, 1));
        assert_eq!(bundle.get(AssetId::Life), AssetInfo::new(16, 16, 1));
    }

    #[test]
    fn test_manifest_rejects_bad_frames() {
        let err = AssetBundle::from_json(r#"{"hero": {"width": 100, "height": 32, "frames": 3}}"#)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidAsset { asset: "hero", .. }));
    }

    #[test]
    fn test_manifest_rejects_garbage() {
        assert!(matches!(
            AssetBundle::from_json("not json"),
            Err(Error::Parse(_))
        ));
    }
}
