//! # Tile Map
//!
//! The static grid of tile identifiers for the single scene, built from a
//! symbolic template and never mutated afterwards.

use crate::{PitchforkError, PitchforkResult};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Small integer tagging one grid cell's visual/semantic type.
pub type TileId = u16;

/// Placeholder-to-tile-run dictionary used when expanding a template.
#[derive(Debug, Clone, Default)]
pub struct MacroTable {
    macros: HashMap<String, Vec<TileId>>,
}

impl MacroTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(token, tiles)` pairs.
    pub fn from_pairs(pairs: &[(&str, &[TileId])]) -> Self {
        let mut table = Self::new();
        for (token, tiles) in pairs {
            table.insert(token, tiles);
        }
        table
    }

    /// Registers a token; a repeated token replaces the earlier expansion.
    pub fn insert(&mut self, token: &str, tiles: &[TileId]) {
        self.macros.insert(token.to_string(), tiles.to_vec());
    }

    /// Returns the expansion of a token.
    pub fn get(&self, token: &str) -> Option<&[TileId]> {
        self.macros.get(token).map(Vec::as_slice)
    }
}

/// Static rectangular grid of tile identifiers placed on screen.
///
/// # Examples
///
/// ```
/// use pitchfork_path::{MacroTable, TileMap};
///
/// let macros = MacroTable::from_pairs(&[("PATH", &[12, 14, 10])]);
/// let map = TileMap::from_template(&["58 PATH", "58"], &macros, 58, 64).unwrap();
/// assert_eq!((map.rows(), map.cols()), (2, 4));
/// assert_eq!(map.cell_at(0, 2), Some(14));
/// assert_eq!(map.cell_at(1, 3), Some(58));
/// assert_eq!(map.cell_at(2, 0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMap {
    grid: Vec<Vec<TileId>>,
    rows: usize,
    cols: usize,
    tile_size: i32,
    background: TileId,
    offset_x: i32,
    offset_y: i32,
}

impl TileMap {
    /// Expands a symbolic template into a dense grid.
    ///
    /// Each template row is a whitespace-separated list of tokens: numbers
    /// are tile identifiers, anything else must be a macro. Rows shorter
    /// than the longest one are right-padded with `background`. The map is
    /// placed at offset `(0, 0)`; see [`TileMap::centered_in`].
    pub fn from_template(
        template: &[&str],
        macros: &MacroTable,
        background: TileId,
        tile_size: i32,
    ) -> PitchforkResult<Self> {
        if tile_size <= 0 {
            return Err(PitchforkError::MalformedLayout(format!(
                "tile size must be positive, got {}",
                tile_size
            )));
        }

        let mut grid = Vec::with_capacity(template.len());
        for (row_index, row) in template.iter().enumerate() {
            grid.push(expand_row(row_index, row, macros)?);
        }

        let cols = grid.iter().map(Vec::len).max().unwrap_or(0);
        if cols == 0 {
            return Err(PitchforkError::MalformedLayout(
                "template contains no tiles".to_string(),
            ));
        }
        for row in &mut grid {
            row.resize(cols, background);
        }

        let rows = grid.len();
        debug!("Expanded tile map template to {}x{} cells", rows, cols);

        Ok(Self {
            grid,
            rows,
            cols,
            tile_size,
            background,
            offset_x: 0,
            offset_y: 0,
        })
    }

    /// Centres the map on a screen of the given size.
    ///
    /// The offset uses floor division so it may be negative when the map is
    /// larger than the screen.
    pub fn centered_in(mut self, screen_width: i32, screen_height: i32) -> Self {
        self.offset_x = (screen_width - self.pixel_width()).div_euclid(2);
        self.offset_y = (screen_height - self.pixel_height()).div_euclid(2);
        self
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// The reserved fill identifier.
    pub fn background(&self) -> TileId {
        self.background
    }

    /// Top-left corner of the grid in world pixels.
    pub fn offset(&self) -> (i32, i32) {
        (self.offset_x, self.offset_y)
    }

    pub fn pixel_width(&self) -> i32 {
        self.cols as i32 * self.tile_size
    }

    pub fn pixel_height(&self) -> i32 {
        self.rows as i32 * self.tile_size
    }

    /// Tile identifier at a cell, `None` outside the grid.
    pub fn cell_at(&self, row: i32, col: i32) -> Option<TileId> {
        if !self.in_bounds(row, col) {
            return None;
        }
        self.grid
            .get(row as usize)
            .and_then(|cells| cells.get(col as usize))
            .copied()
    }

    /// Whether `(row, col)` lies inside the grid.
    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    /// Maps a world pixel to its `(row, col)` cell. The result may lie
    /// outside the grid.
    pub fn world_to_grid(&self, x: i32, y: i32) -> (i32, i32) {
        (
            (y - self.offset_y).div_euclid(self.tile_size),
            (x - self.offset_x).div_euclid(self.tile_size),
        )
    }

    /// Offset of a world pixel inside its tile, always in `0..tile_size`.
    pub fn local_offset(&self, x: i32, y: i32) -> (i32, i32) {
        (
            (x - self.offset_x).rem_euclid(self.tile_size),
            (y - self.offset_y).rem_euclid(self.tile_size),
        )
    }

    /// Top-left world pixel of a cell.
    pub fn cell_origin(&self, row: i32, col: i32) -> (i32, i32) {
        (
            self.offset_x + col * self.tile_size,
            self.offset_y + row * self.tile_size,
        )
    }

    /// Centre world pixel of a cell.
    pub fn cell_center(&self, row: i32, col: i32) -> (i32, i32) {
        let (x, y) = self.cell_origin(row, col);
        (x + self.tile_size / 2, y + self.tile_size / 2)
    }

    /// Iterates over every cell as `(row, col, tile)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, TileId)> + '_ {
        self.grid.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, &tile)| (row, col, tile))
        })
    }

    /// Finds the spawn cell: the first `spawn_tile` scanning rows from the
    /// bottom up and columns left to right.
    pub fn find_spawn(&self, spawn_tile: TileId) -> Option<(usize, usize)> {
        self.grid.iter().enumerate().rev().find_map(|(row, cells)| {
            cells
                .iter()
                .position(|&tile| tile == spawn_tile)
                .map(|col| (row, col))
        })
    }

    /// Deterministic spawn cell used when the map holds no spawn tile.
    pub fn fallback_spawn(&self) -> (usize, usize) {
        (self.rows - 1, self.cols / 2)
    }

    /// The top-most row containing `tile` and the sorted columns holding it
    /// in that row.
    pub fn first_row_with(&self, tile: TileId) -> Option<(usize, Vec<usize>)> {
        self.grid.iter().enumerate().find_map(|(row, cells)| {
            let cols: Vec<usize> = cells
                .iter()
                .enumerate()
                .filter(|&(_, &t)| t == tile)
                .map(|(col, _)| col)
                .collect();
            (!cols.is_empty()).then_some((row, cols))
        })
    }
}

/// Expands one template row into tile identifiers.
fn expand_row(row_index: usize, row: &str, macros: &MacroTable) -> PitchforkResult<Vec<TileId>> {
    let mut expanded = Vec::new();
    for token in row.split_whitespace() {
        if let Ok(tile) = token.parse::<TileId>() {
            expanded.push(tile);
        } else if let Some(tiles) = macros.get(token) {
            expanded.extend_from_slice(tiles);
        } else {
            return Err(PitchforkError::MalformedLayout(format!(
                "unknown token '{}' in template row {}",
                token, row_index
            )));
        }
    }
    Ok(expanded)
}
