//! # Asset Loading
//!
//! Loads tile, building, NPC and character images from the asset directory.
//! A missing or unreadable file is logged and skipped: the game still runs,
//! the corresponding element is simply not drawn (and, for tiles, not
//! walkable).

use crate::config::{GameConfig, IDLE_SHEET, LANDMARKS, RUN_SHEET, TILE_COUNT};
use crate::game::{AnimationSet, LandmarkImages, TileCatalog, TileId};
use crate::rendering::{animation_set, SpriteSheet};
use log::{info, warn};
use macroquad::texture::{load_image, Image};
use std::collections::HashMap;

/// Relative path of a tile image inside the asset directory.
pub fn tile_path(id: TileId) -> String {
    format!("tiles/tile{}.png", id)
}

/// Joins the asset directory and a relative asset path.
pub fn asset_path(asset_dir: &str, relative: &str) -> String {
    let dir = asset_dir.trim_end_matches('/');
    if dir.is_empty() {
        relative.to_string()
    } else {
        format!("{}/{}", dir, relative)
    }
}

async fn load_optional(asset_dir: &str, relative: &str) -> Option<Image> {
    let path = asset_path(asset_dir, relative);
    match load_image(&path).await {
        Ok(image) => Some(image),
        Err(e) => {
            warn!("Could not load {}: {:?}", path, e);
            None
        }
    }
}

/// Every image the game uses, decoded once at startup.
#[derive(Default)]
pub struct AssetCatalog {
    pub tiles: TileCatalog,
    /// Building images keyed by landmark name
    pub buildings: HashMap<String, Image>,
    /// NPC images keyed by landmark name
    pub npcs: HashMap<String, Image>,
    pub idle: SpriteSheet,
    pub run: SpriteSheet,
}

impl std::fmt::Debug for AssetCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetCatalog")
            .field("tiles", &self.tiles.len())
            .field("buildings", &self.buildings.keys().collect::<Vec<_>>())
            .field("npcs", &self.npcs.keys().collect::<Vec<_>>())
            .field("idle", &self.idle)
            .field("run", &self.run)
            .finish()
    }
}

impl AssetCatalog {
    /// Loads all assets below `config.asset_dir`.
    pub async fn load(config: &GameConfig) -> Self {
        let dir = config.asset_dir.as_str();

        let mut tiles = TileCatalog::new();
        for id in 1..=TILE_COUNT {
            if let Some(image) = load_optional(dir, &tile_path(id)).await {
                tiles.insert(id, image);
            }
        }

        let mut buildings = HashMap::new();
        let mut npcs = HashMap::new();
        for landmark in LANDMARKS.iter() {
            if let Some(image) = load_optional(dir, landmark.building_file).await {
                buildings.insert(landmark.name.to_string(), image);
            }
            if let Some(image) = load_optional(dir, landmark.npc_file).await {
                npcs.insert(landmark.name.to_string(), image);
            }
        }

        let frame = config.frame_size as u16;
        let idle = match load_optional(dir, IDLE_SHEET).await {
            Some(sheet) => SpriteSheet::slice(&sheet, frame, frame),
            None => SpriteSheet::missing(),
        };
        let run = match load_optional(dir, RUN_SHEET).await {
            Some(sheet) => SpriteSheet::slice(&sheet, frame, frame),
            None => SpriteSheet::missing(),
        };

        info!(
            "Loaded {}/{} tiles, {} buildings, {} NPCs, idle frames {:?}, run frames {:?}",
            tiles.len(),
            TILE_COUNT,
            buildings.len(),
            npcs.len(),
            idle.frame_counts(),
            run.frame_counts()
        );

        Self {
            tiles,
            buildings,
            npcs,
            idle,
            run,
        }
    }

    /// Frame counts for the player's animation controller.
    pub fn animation_set(&self) -> AnimationSet {
        animation_set(&self.idle, &self.run)
    }

    /// Which landmarks can be placed in the scene.
    pub fn landmark_images(&self) -> LandmarkImages {
        let mut images = LandmarkImages::new();
        for name in self.buildings.keys() {
            images.add_building(name);
        }
        for name in self.npcs.keys() {
            images.add_npc(name);
        }
        images
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_paths() {
        assert_eq!(tile_path(14), "tiles/tile14.png");
        assert_eq!(asset_path("assets", &tile_path(1)), "assets/tiles/tile1.png");
        assert_eq!(asset_path("assets/", "mosque.png"), "assets/mosque.png");
        assert_eq!(asset_path("", "rabbi.png"), "rabbi.png");
    }

    #[test]
    fn test_empty_catalog_has_no_frames() {
        let catalog = AssetCatalog::default();
        assert!(catalog.tiles.is_empty());
        assert!(catalog.animation_set().idle.is_empty());
    }

    #[test]
    fn test_landmark_images_follow_loaded_files() {
        let image = || Image {
            bytes: vec![0, 0, 0, 255],
            width: 1,
            height: 1,
        };
        let mut catalog = AssetCatalog::default();
        catalog.buildings.insert("mosque".to_string(), image());
        catalog.npcs.insert("cathedral".to_string(), image());

        let images = catalog.landmark_images();
        assert!(images.has_building("mosque"));
        assert!(!images.has_npc("mosque"));
        assert!(images.has_npc("cathedral"));
        assert!(!images.has_building("cathedral"));
        assert_eq!(AssetCatalog::default().landmark_images(), LandmarkImages::new());
    }
}
