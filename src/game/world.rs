//! # Scene Layout
//!
//! Buildings and NPCs are not authored separately: their rectangles are
//! derived once from the tile map so they always sit on the fork's prongs.

use crate::config::Landmark;
use crate::game::{PixelRect, TileId, TileMap};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Fraction of a tile the building base sits below the anchor cell centre.
const BUILDING_DROP_IN_TILES: f32 = 1.5;

/// NPC size in tiles (width, height).
const NPC_SIZE_IN_TILES: (f32, f32) = (0.5, 1.15);

/// How far the NPC's top overlaps the building base, in tiles.
const NPC_OVERLAP_IN_TILES: f32 = 0.15;

/// Scales a tile count to whole pixels, truncating.
fn tiles_to_px(tile_size: i32, tiles: f32) -> i32 {
    (tile_size as f32 * tiles) as i32
}

/// A landmark building: drawn at `visual_rect`, solid only at `collider_rect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub name: String,
    pub visual_rect: PixelRect,
    /// Footprint near the base of the image. The player can walk behind the
    /// upper part of the building but not through its base.
    pub collider_rect: PixelRect,
}

impl Building {
    /// Places a building of `size` pixels with its bottom-centre at
    /// `(x, y)` and derives its collider.
    pub fn new(name: &str, x: i32, y: i32, size: (i32, i32)) -> Self {
        let visual_rect = PixelRect::from_mid_bottom(x, y, size.0, size.1);
        let collider_height = visual_rect.h / 4;
        let collider_rect = PixelRect::new(
            visual_rect.center_x() - visual_rect.w / 4,
            visual_rect.bottom() - collider_height,
            visual_rect.w / 2,
            collider_height,
        );
        Self {
            name: name.to_string(),
            visual_rect,
            collider_rect,
        }
    }
}

/// An NPC standing in front of a building, talkable from its dialogue zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Npc {
    pub name: String,
    pub visual_rect: PixelRect,
    /// Proximity area for the interaction hint and the interact signal.
    pub dialogue_zone: PixelRect,
    pub dialogue_lines: Vec<String>,
}

impl Npc {
    /// Places the NPC for `building` at the building's base.
    pub fn for_building(building: &Building, tile_size: i32, lines: &[&str]) -> Self {
        let width = tiles_to_px(tile_size, NPC_SIZE_IN_TILES.0);
        let height = tiles_to_px(tile_size, NPC_SIZE_IN_TILES.1);
        let visual_rect = PixelRect::new(
            building.visual_rect.center_x() - width / 2,
            building.visual_rect.bottom() - tiles_to_px(tile_size, NPC_OVERLAP_IN_TILES),
            width,
            height,
        );
        let dialogue_zone = PixelRect::new(
            visual_rect.center_x() - tile_size,
            visual_rect.bottom() - tile_size / 2,
            tile_size * 2,
            tile_size,
        );
        Self {
            name: building.name.clone(),
            visual_rect,
            dialogue_zone,
            dialogue_lines: lines.iter().map(|line| line.to_string()).collect(),
        }
    }
}

/// Names of the landmarks whose building and NPC images were loaded.
///
/// A landmark without its building image is left out of the scene
/// entirely. An NPC without its image is not placed and cannot be talked to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandmarkImages {
    buildings: BTreeSet<String>,
    npcs: BTreeSet<String>,
}

impl LandmarkImages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every building and NPC image of `landmarks` present.
    pub fn complete(landmarks: &[Landmark]) -> Self {
        let mut images = Self::new();
        for landmark in landmarks {
            images.add_building(landmark.name);
            images.add_npc(landmark.name);
        }
        images
    }

    pub fn add_building(&mut self, name: &str) {
        self.buildings.insert(name.to_string());
    }

    pub fn add_npc(&mut self, name: &str) {
        self.npcs.insert(name.to_string());
    }

    pub fn has_building(&self, name: &str) -> bool {
        self.buildings.contains(name)
    }

    pub fn has_npc(&self, name: &str) -> bool {
        self.npcs.contains(name)
    }
}

/// Buildings and NPCs of the scene, in landmark enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneLayout {
    pub buildings: Vec<Building>,
    pub npcs: Vec<Npc>,
}

impl SceneLayout {
    /// Derives building and NPC placement from the map.
    ///
    /// Anchors are the cells holding `anchor_tile` in the top-most row that
    /// has any: the first, middle and last such column. With fewer than
    /// three columns the scene has no buildings. Anchors are assigned by
    /// landmark position, so a skipped landmark leaves its prong empty.
    pub fn derive(
        map: &TileMap,
        anchor_tile: TileId,
        landmarks: &[Landmark],
        images: &LandmarkImages,
    ) -> Self {
        let Some((row, cols)) = map.first_row_with(anchor_tile) else {
            warn!("No anchor tile {} on the map, scene has no buildings", anchor_tile);
            return Self::default();
        };
        if cols.len() < 3 {
            warn!(
                "Only {} anchor columns in row {}, scene has no buildings",
                cols.len(),
                row
            );
            return Self::default();
        }

        let tile_size = map.tile_size();
        let anchors = [cols[0], cols[cols.len() / 2], cols[cols.len() - 1]];
        let drop = tiles_to_px(tile_size, BUILDING_DROP_IN_TILES);

        let mut layout = Self::default();
        for (landmark, col) in landmarks.iter().zip(anchors) {
            if !images.has_building(landmark.name) {
                warn!("No building image for {}, leaving it out", landmark.name);
                continue;
            }
            let (x, y) = map.cell_center(row as i32, col as i32);
            let size = (
                tiles_to_px(tile_size, landmark.size_in_tiles.0),
                tiles_to_px(tile_size, landmark.size_in_tiles.1),
            );
            let building = Building::new(landmark.name, x, y + drop, size);
            debug!("Placed {} at {:?}", landmark.name, building.visual_rect);
            if images.has_npc(landmark.name) {
                let npc = Npc::for_building(&building, tile_size, landmark.lines);
                debug!("Dialogue zone for {} at {:?}", landmark.name, npc.dialogue_zone);
                layout.npcs.push(npc);
            } else {
                warn!("No NPC image for {}, nobody to talk to there", landmark.name);
            }
            layout.buildings.push(building);
        }
        layout
    }

    /// Building collider rectangles.
    pub fn colliders(&self) -> Vec<PixelRect> {
        self.buildings.iter().map(|b| b.collider_rect).collect()
    }

    pub fn npc(&self, name: &str) -> Option<&Npc> {
        self.npcs.iter().find(|npc| npc.name == name)
    }
}
