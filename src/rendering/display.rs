//! # Display Management
//!
//! Draws one frame of the scene with macroquad: tiled background, tile map,
//! buildings, NPCs, the player and the overlays on top.

use crate::config::JOURNAL_TEXT;
use crate::game::{DialogueState, GameState, MovementState, PixelRect, TileId};
use crate::input::TouchControls;
use crate::rendering::{AssetCatalog, SpriteSheet, UI};
use log::debug;
use macroquad::prelude::*;
use std::collections::HashMap;

/// Drawn in place of the player when no frame is available.
const PLACEHOLDER_COLOR: Color = Color::new(1.0, 0.0, 0.0, 150.0 / 255.0);

fn texture(image: &Image) -> Texture2D {
    let texture = Texture2D::from_image(image);
    texture.set_filter(FilterMode::Nearest);
    texture
}

fn sheet_textures(sheet: &SpriteSheet) -> Vec<Vec<Texture2D>> {
    sheet
        .rows()
        .iter()
        .map(|row| row.iter().map(texture).collect())
        .collect()
}

fn draw_in(texture: &Texture2D, rect: &PixelRect) {
    draw_texture_ex(
        texture,
        rect.x as f32,
        rect.y as f32,
        WHITE,
        DrawTextureParams {
            dest_size: Some(vec2(rect.w as f32, rect.h as f32)),
            ..Default::default()
        },
    );
}

/// Macroquad display manager for the game.
///
/// Holds GPU textures for every loaded image. Anything whose image failed to
/// load is skipped when drawing.
pub struct MacroquadDisplay {
    /// Tile textures
    pub tile_textures: HashMap<TileId, Texture2D>,
    pub building_textures: HashMap<String, Texture2D>,
    pub npc_textures: HashMap<String, Texture2D>,
    idle_frames: Vec<Vec<Texture2D>>,
    run_frames: Vec<Vec<Texture2D>>,
    /// UI component for overlays and touch controls
    pub ui: UI,
    /// Present when touch controls are drawn
    pub touch_controls: Option<TouchControls>,
}

impl MacroquadDisplay {
    /// Uploads all loaded images as textures.
    ///
    /// Needs a live macroquad context.
    pub fn new(assets: &AssetCatalog, font_scale: f32, touch_controls: Option<TouchControls>) -> Self {
        let tile_textures: HashMap<TileId, Texture2D> = assets
            .tiles
            .iter()
            .map(|(id, visual)| (id, texture(visual.image())))
            .collect();
        let building_textures = assets
            .buildings
            .iter()
            .map(|(name, image)| (name.clone(), texture(image)))
            .collect();
        let npc_textures = assets
            .npcs
            .iter()
            .map(|(name, image)| (name.clone(), texture(image)))
            .collect();
        debug!("Uploaded {} tile textures", tile_textures.len());

        Self {
            tile_textures,
            building_textures,
            npc_textures,
            idle_frames: sheet_textures(&assets.idle),
            run_frames: sheet_textures(&assets.run),
            ui: UI::new(font_scale),
            touch_controls,
        }
    }

    /// Renders the complete game screen.
    pub fn render_game(&self, game_state: &GameState) {
        clear_background(BLACK);

        self.render_background(game_state);
        self.render_map(game_state);
        self.render_landmarks(game_state);
        self.render_player(game_state);

        if game_state.debug_collision {
            self.render_collision_debug(game_state);
        }
        if let Some(controls) = &self.touch_controls {
            self.ui.draw_touch_controls(controls);
        }
        self.render_dialogue(game_state);
    }

    /// Fills the whole window with the background tile.
    fn render_background(&self, game_state: &GameState) {
        let Some(texture) = self.tile_textures.get(&game_state.map.background()) else {
            return;
        };
        let size = game_state.map.tile_size();
        let (sw, sh) = (screen_width() as i32, screen_height() as i32);
        for y in (0..sh).step_by(size as usize) {
            for x in (0..sw).step_by(size as usize) {
                draw_in(texture, &PixelRect::new(x, y, size, size));
            }
        }
    }

    fn render_map(&self, game_state: &GameState) {
        let map = &game_state.map;
        let size = map.tile_size();
        for (row, col, tile) in map.cells() {
            if let Some(texture) = self.tile_textures.get(&tile) {
                let (x, y) = map.cell_origin(row as i32, col as i32);
                draw_in(texture, &PixelRect::new(x, y, size, size));
            }
        }
    }

    fn render_landmarks(&self, game_state: &GameState) {
        for building in &game_state.layout.buildings {
            if let Some(texture) = self.building_textures.get(&building.name) {
                draw_in(texture, &building.visual_rect);
            }
        }
        for npc in &game_state.layout.npcs {
            if let Some(texture) = self.npc_textures.get(&npc.name) {
                draw_in(texture, &npc.visual_rect);
            }
        }
    }

    fn render_player(&self, game_state: &GameState) {
        let player = &game_state.player;
        let frame = player.animation.current_frame().and_then(|frame| {
            let frames = match frame.state {
                MovementState::Idle => &self.idle_frames,
                MovementState::Run => &self.run_frames,
            };
            frames.get(frame.row).and_then(|row| row.get(frame.index))
        });

        match frame {
            Some(texture) => draw_in(texture, &player.sprite_rect),
            None => {
                let rect = player.sprite_rect.to_rect();
                draw_rectangle(rect.x, rect.y, rect.w, rect.h, PLACEHOLDER_COLOR);
            }
        }
    }

    /// Outlines of the player hitbox, building colliders and dialogue zones.
    fn render_collision_debug(&self, game_state: &GameState) {
        let outline = |rect: &PixelRect, color: Color| {
            let r = rect.to_rect();
            draw_rectangle_lines(r.x, r.y, r.w, r.h, 2.0, color);
        };
        outline(&game_state.player.hitbox, RED);
        for collider in game_state.colliders() {
            outline(collider, ORANGE);
        }
        for target in game_state.interaction.targets() {
            outline(&target.zone, GREEN);
        }
    }

    fn render_dialogue(&self, game_state: &GameState) {
        match game_state.dialogue_state() {
            DialogueState::Idle => {
                let Some(target) = game_state.proximity_target() else {
                    return;
                };
                if let Some(npc) = game_state.layout.npc(&target.name) {
                    self.ui.draw_hint(&npc.visual_rect, self.touch_controls.is_some());
                }
            }
            DialogueState::Talking { .. } => {
                let Some((target, line)) = game_state.interaction.current_line() else {
                    return;
                };
                let speaker = game_state
                    .layout
                    .npc(&target.name)
                    .map(|npc| npc.visual_rect)
                    .unwrap_or(target.zone);
                self.ui.draw_dialogue(line, &speaker);
            }
            DialogueState::JournalShown => self.ui.draw_journal(JOURNAL_TEXT),
        }
    }
}
