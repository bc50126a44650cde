//! # Game State Module
//!
//! Central game state and the per-frame step.
//!
//! `GameState` owns everything that changes during a session: the player,
//! the dialogue session and the debug flag, next to the static map, tile
//! images and scene layout. The main loop owns the single instance and is
//! the only writer.

use crate::config::{GameConfig, BACKGROUND_TILE, BASE_TEMPLATE, LANDMARKS, SPAWN_TILE, TEMPLATE_MACROS};
use crate::game::{
    Actor, AnimationSet, CollisionGate, DialogueState, DialogueTarget, Displacement,
    InteractionController, InteractionEvent, LandmarkImages, MacroTable, PixelRect, SceneLayout, TileCatalog,
    TileMap, WalkabilityOracle,
};
use crate::PitchforkResult;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Logical input signals for one frame, however they were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Talk, advance a line or dismiss the journal
    pub interact: bool,
    /// Show or hide collision outlines
    pub toggle_debug: bool,
    pub quit: bool,
}

impl FrameInput {
    /// Combines two input sources; a signal is set if either source sets it.
    pub fn merge(self, other: FrameInput) -> FrameInput {
        FrameInput {
            left: self.left || other.left,
            right: self.right || other.right,
            up: self.up || other.up,
            down: self.down || other.down,
            interact: self.interact || other.interact,
            toggle_debug: self.toggle_debug || other.toggle_debug,
            quit: self.quit || other.quit,
        }
    }
}

/// Things that happened during a frame step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The player hitbox moved
    PlayerMoved { from: PixelRect, to: PixelRect },
    /// The proposed hitbox was rejected
    MoveBlocked { candidate: PixelRect },
    /// Dialogue or journal transition
    Interaction(InteractionEvent),
    /// Collision outlines switched on or off
    DebugToggled { enabled: bool },
    /// The session should end
    QuitRequested,
}

/// Central game state containing all session data.
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub map: TileMap,
    pub tiles: TileCatalog,
    pub layout: SceneLayout,
    colliders: Vec<PixelRect>,
    pub player: Actor,
    pub interaction: InteractionController,
    pub debug_collision: bool,
    /// Number of completed frame steps
    pub frame_number: u64,
    pub quit_requested: bool,
}

impl GameState {
    /// Creates the game state for the built-in scene.
    ///
    /// Fails only when the configuration or the static layout is invalid.
    /// Landmarks missing from `images` are left out of the scene.
    pub fn new(
        config: GameConfig,
        tiles: TileCatalog,
        images: &LandmarkImages,
        frames: AnimationSet,
    ) -> PitchforkResult<Self> {
        config.validate()?;
        let macros = MacroTable::from_pairs(TEMPLATE_MACROS);
        let map = TileMap::from_template(BASE_TEMPLATE, &macros, BACKGROUND_TILE, config.tile_size())?
            .centered_in(config.screen_width, config.screen_height);
        Self::with_map(config, map, tiles, images, frames)
    }

    /// Creates the game state for an already built map.
    pub fn with_map(
        config: GameConfig,
        map: TileMap,
        tiles: TileCatalog,
        images: &LandmarkImages,
        frames: AnimationSet,
    ) -> PitchforkResult<Self> {
        config.validate()?;
        let layout = SceneLayout::derive(&map, SPAWN_TILE, &LANDMARKS, images);
        let colliders = layout.colliders();
        let targets: Vec<DialogueTarget> = layout.npcs.iter().map(DialogueTarget::from).collect();

        let (row, col) = match map.find_spawn(SPAWN_TILE) {
            Some(cell) => cell,
            None => {
                let cell = map.fallback_spawn();
                warn!("No spawn tile on the map, falling back to cell {:?}", cell);
                cell
            }
        };
        let center = map.cell_center(row as i32, col as i32);
        let player = Actor::spawn(center, config.frame_size, config.sprite_size(), frames);
        info!(
            "Player spawned at cell ({}, {}) with hitbox {:?}",
            row, col, player.hitbox
        );

        if tiles.is_empty() {
            warn!("No tile images registered, nothing on the map is walkable");
        }

        Ok(Self {
            debug_collision: config.debug_collision,
            config,
            map,
            tiles,
            layout,
            colliders,
            player,
            interaction: InteractionController::new(targets),
            frame_number: 0,
            quit_requested: false,
        })
    }

    /// Pixel walkability for the current map and tile images.
    pub fn oracle(&self) -> WalkabilityOracle<'_> {
        WalkabilityOracle::new(&self.map, &self.tiles)
    }

    /// Movement check against walkability and building colliders.
    pub fn collision_gate(&self) -> CollisionGate<'_> {
        CollisionGate::new(self.oracle(), &self.colliders)
    }

    /// Building collider rectangles.
    pub fn colliders(&self) -> &[PixelRect] {
        &self.colliders
    }

    /// Whether a dialogue box or the journal is on screen.
    pub fn is_engaged(&self) -> bool {
        self.interaction.state().is_engaged()
    }

    pub fn dialogue_state(&self) -> &DialogueState {
        self.interaction.state()
    }

    /// NPC the player can talk to right now, for the interaction hint.
    pub fn proximity_target(&self) -> Option<&DialogueTarget> {
        self.interaction.proximity(&self.player.hitbox)
    }

    /// Moves the player hitbox without any collision check.
    pub fn place_player(&mut self, hitbox: PixelRect) {
        self.player.hitbox = hitbox;
        self.player.anchor_sprite();
    }

    /// Executes one frame: movement, animation, then interaction.
    ///
    /// `dt_ms` is the frame delta sampled once at frame start. Movement is
    /// frozen while a dialogue or the journal is on screen.
    pub fn step(&mut self, input: &FrameInput, dt_ms: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();

        if input.quit {
            self.quit_requested = true;
            events.push(GameEvent::QuitRequested);
            return events;
        }

        if input.toggle_debug {
            self.debug_collision = !self.debug_collision;
            debug!("Debug collision outlines {}", self.debug_collision);
            events.push(GameEvent::DebugToggled {
                enabled: self.debug_collision,
            });
        }

        let step = if self.is_engaged() {
            Displacement::default()
        } else {
            Displacement::from_input(input, self.config.player_speed)
        };

        let moving = !step.is_zero();
        if moving {
            let from = self.player.hitbox;
            let candidate = from.translated(step.dx, step.dy);
            if self.collision_gate().approves(&candidate) {
                self.player.hitbox = candidate;
                events.push(GameEvent::PlayerMoved { from, to: candidate });
            } else {
                events.push(GameEvent::MoveBlocked { candidate });
            }
        }

        let direction = step.direction.unwrap_or(self.player.direction());
        self.player.update_animation(dt_ms, moving, direction);

        if let Some(event) = self.interaction.update(&self.player.hitbox, input.interact) {
            events.push(GameEvent::Interaction(event));
        }

        self.frame_number += 1;
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::walkability::tests::solid_image;
    use crate::game::{Direction, MovementState};

    const DIRT: (u8, u8, u8) = (140, 110, 60);
    const GRASS: (u8, u8, u8) = (30, 160, 40);

    /// Every tile of the scene is dirt except the grass background.
    fn scene_tiles() -> TileCatalog {
        let mut tiles = TileCatalog::new();
        for id in 1..=crate::config::TILE_COUNT {
            let colour = if id == BACKGROUND_TILE { GRASS } else { DIRT };
            tiles.insert(id, solid_image(8, colour));
        }
        tiles
    }

    fn game_state() -> GameState {
        let images = LandmarkImages::complete(&LANDMARKS);
        GameState::new(GameConfig::desktop(), scene_tiles(), &images, AnimationSet::uniform(4)).unwrap()
    }

    fn held(direction: Direction) -> FrameInput {
        let mut input = FrameInput::default();
        match direction {
            Direction::Down => input.down = true,
            Direction::Left => input.left = true,
            Direction::Right => input.right = true,
            Direction::Up => input.up = true,
        }
        input
    }

    #[test]
    fn test_game_state_creation() {
        let state = game_state();
        assert_eq!(state.frame_number, 0);
        assert_eq!(state.layout.buildings.len(), 3);
        assert_eq!(state.colliders().len(), 3);
        assert_eq!(state.interaction.targets().len(), 3);
        assert_eq!(state.dialogue_state(), &DialogueState::Idle);
        assert!(!state.debug_collision);

        // the spawn tile is dirt, so the player starts on walkable ground
        assert!(state.collision_gate().can_move(&state.player.hitbox));
    }

    #[test]
    fn test_movement_along_path() {
        let mut state = game_state();
        let start = state.player.hitbox;
        let events = state.step(&held(Direction::Up), 16.0);
        assert_eq!(state.player.hitbox, start.translated(0, -4));
        assert!(matches!(events[0], GameEvent::PlayerMoved { .. }));
        assert_eq!(state.player.movement(), MovementState::Run);
        assert_eq!(state.player.direction(), Direction::Up);
        assert_eq!(state.player.sprite_rect.mid_bottom(), state.player.hitbox.mid_bottom());
        assert_eq!(state.frame_number, 1);
    }

    #[test]
    fn test_grass_blocks_movement() {
        let mut state = game_state();
        // walk right until the hitbox would step onto the grass column
        let mut blocked = false;
        for _ in 0..200 {
            let events = state.step(&held(Direction::Right), 16.0);
            if events.iter().any(|e| matches!(e, GameEvent::MoveBlocked { .. })) {
                blocked = true;
                break;
            }
        }
        assert!(blocked);
        // still running animation even when the move was rejected
        assert_eq!(state.player.movement(), MovementState::Run);
        assert!(state.collision_gate().can_move(&state.player.hitbox));
    }

    #[test]
    fn test_release_keys_idles_facing_last_direction() {
        let mut state = game_state();
        state.step(&held(Direction::Left), 16.0);
        state.step(&FrameInput::default(), 16.0);
        assert_eq!(state.player.movement(), MovementState::Idle);
        assert_eq!(state.player.direction(), Direction::Left);
    }

    #[test]
    fn test_dialogue_freezes_movement() {
        let mut state = game_state();
        let zone = state.layout.npc("mosque").unwrap().dialogue_zone;
        state.place_player(PixelRect::new(zone.x + 10, zone.y + 10, 76, 38));

        let interact = FrameInput {
            interact: true,
            ..FrameInput::default()
        };
        state.step(&interact, 16.0);
        assert!(state.is_engaged());

        let before = state.player.hitbox;
        let events = state.step(&held(Direction::Down), 16.0);
        assert!(events.is_empty());
        assert_eq!(state.player.hitbox, before);
        assert_eq!(state.player.movement(), MovementState::Idle);
    }

    #[test]
    fn test_debug_toggle_and_quit() {
        let mut state = game_state();
        let toggle = FrameInput {
            toggle_debug: true,
            ..FrameInput::default()
        };
        assert_eq!(
            state.step(&toggle, 16.0),
            vec![GameEvent::DebugToggled { enabled: true }]
        );
        state.step(&toggle, 16.0);
        assert!(!state.debug_collision);

        let quit = FrameInput {
            quit: true,
            left: true,
            ..FrameInput::default()
        };
        let hitbox = state.player.hitbox;
        assert_eq!(state.step(&quit, 16.0), vec![GameEvent::QuitRequested]);
        assert!(state.quit_requested);
        assert_eq!(state.player.hitbox, hitbox);
    }

    #[test]
    fn test_missing_spawn_tile_uses_fallback() {
        let map = TileMap::from_template(&["1 1 1", "1 1 1"], &MacroTable::new(), 58, 128).unwrap();
        let images = LandmarkImages::complete(&LANDMARKS);
        let state = GameState::with_map(
            GameConfig::desktop(),
            map.clone(),
            scene_tiles(),
            &images,
            AnimationSet::default(),
        )
        .unwrap();
        assert!(state.layout.buildings.is_empty());
        let center = map.cell_center(1, 1);
        let expected = Actor::spawn(center, 64, 192, AnimationSet::default());
        assert_eq!(state.player.hitbox, expected.hitbox);
    }

    #[test]
    fn test_missing_building_image_drops_collider_and_target() {
        let mut images = LandmarkImages::new();
        for landmark in &LANDMARKS {
            images.add_npc(landmark.name);
            if landmark.name != "synagogue" {
                images.add_building(landmark.name);
            }
        }
        let state =
            GameState::new(GameConfig::desktop(), scene_tiles(), &images, AnimationSet::uniform(4)).unwrap();
        assert_eq!(state.colliders().len(), 2);
        assert_eq!(state.interaction.targets().len(), 2);
        assert!(state.interaction.target("synagogue").is_none());
    }

    #[test]
    fn test_merge_inputs() {
        let keyboard = held(Direction::Left);
        let touch = FrameInput {
            interact: true,
            ..FrameInput::default()
        };
        let merged = keyboard.merge(touch);
        assert!(merged.left && merged.interact);
        assert!(!merged.right && !merged.quit);
    }
}
