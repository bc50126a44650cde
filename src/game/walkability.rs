//! # Walkability
//!
//! Per-pixel traversability derived from the tile art itself. There is no
//! authored collision layer: a pixel is walkable when the colour of the tile
//! image under it looks like path rather than vegetation.

use crate::game::{TileId, TileMap};
use log::debug;
use macroquad::texture::Image;
use std::collections::HashMap;

/// Classifies a tile pixel colour as path (`true`) or not (`false`).
///
/// First match wins:
/// 1. green dominates red and blue by more than 20 and exceeds 100: vegetation
/// 2. warm earth tones: path
/// 3. mid-range greys: path
/// 4. anything else: path
///
/// The last branch makes walkability a matter of excluding green, not of
/// including path colours. The tile palette relies on that.
///
/// # Examples
///
/// ```
/// use pitchfork_path::classify_path_color;
///
/// assert!(!classify_path_color(0, 150, 0));
/// assert!(classify_path_color(100, 90, 40));
/// assert!(classify_path_color(120, 120, 120));
/// assert!(classify_path_color(255, 0, 0));
/// ```
pub fn classify_path_color(r: u8, g: u8, b: u8) -> bool {
    let (r, g, b) = (i32::from(r), i32::from(g), i32::from(b));

    if g > r + 20 && g > b + 20 && g > 100 {
        return false;
    }
    if r > 80 && g > 60 && b < 80 && (r - g).abs() < 40 {
        return true;
    }
    if (r - g).abs() < 20 && (g - b).abs() < 20 && r > 50 && r < 180 {
        return true;
    }
    true
}

/// Decoded tile image, sampled as if scaled to the map's tile size.
#[derive(Clone)]
pub struct TileVisual {
    image: Image,
}

impl std::fmt::Debug for TileVisual {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileVisual")
            .field("width", &self.image.width)
            .field("height", &self.image.height)
            .finish()
    }
}

impl TileVisual {
    pub fn new(image: Image) -> Self {
        Self { image }
    }

    /// The source image, used by the renderer to build a texture.
    pub fn image(&self) -> &Image {
        &self.image
    }

    /// Reads the RGB colour at `(local_x, local_y)` of the tile drawn at
    /// `tile_size` pixels, mapping back to source pixels by nearest
    /// neighbour. Returns `None` for coordinates outside the image.
    pub fn sample(&self, local_x: i32, local_y: i32, tile_size: i32) -> Option<(u8, u8, u8)> {
        if local_x < 0 || local_y < 0 || tile_size <= 0 {
            return None;
        }
        let width = i64::from(self.image.width);
        let height = i64::from(self.image.height);
        let src_x = i64::from(local_x) * width / i64::from(tile_size);
        let src_y = i64::from(local_y) * height / i64::from(tile_size);
        if src_x >= width || src_y >= height {
            return None;
        }

        let index = ((src_y * width + src_x) * 4) as usize;
        let pixel = self.image.bytes.get(index..index + 3)?;
        Some((pixel[0], pixel[1], pixel[2]))
    }
}

/// Tile images keyed by identifier. Identifiers without an entry are not
/// rendered and never walkable.
#[derive(Debug, Clone, Default)]
pub struct TileCatalog {
    visuals: HashMap<TileId, TileVisual>,
}

impl TileCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the image for a tile identifier.
    pub fn insert(&mut self, id: TileId, image: Image) {
        self.visuals.insert(id, TileVisual::new(image));
    }

    pub fn get(&self, id: TileId) -> Option<&TileVisual> {
        self.visuals.get(&id)
    }

    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }

    /// Iterates over registered tiles in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (TileId, &TileVisual)> {
        self.visuals.iter().map(|(&id, visual)| (id, visual))
    }
}

/// Answers "can an actor stand on this world pixel?" for one map.
#[derive(Debug, Clone, Copy)]
pub struct WalkabilityOracle<'a> {
    map: &'a TileMap,
    tiles: &'a TileCatalog,
}

impl<'a> WalkabilityOracle<'a> {
    pub fn new(map: &'a TileMap, tiles: &'a TileCatalog) -> Self {
        Self { map, tiles }
    }

    /// Whether the world pixel `(x, y)` is traversable.
    ///
    /// Pixels outside the grid, on tiles without an image, or outside the
    /// sampled image are not walkable.
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        let (row, col) = self.map.world_to_grid(x, y);
        let Some(tile) = self.map.cell_at(row, col) else {
            return false;
        };
        let Some(visual) = self.tiles.get(tile) else {
            return false;
        };

        let (local_x, local_y) = self.map.local_offset(x, y);
        match visual.sample(local_x, local_y, self.map.tile_size()) {
            Some((r, g, b)) => classify_path_color(r, g, b),
            None => {
                debug!("Sample ({}, {}) falls outside tile {} image", local_x, local_y, tile);
                false
            }
        }
    }
}
