//! # Configuration
//!
//! Runtime tuning for the game session plus the static scene content in
//! [`layout`].

pub mod layout;

pub use layout::*;

use crate::{PitchforkError, PitchforkResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Runtime configuration for one game session.
///
/// Controls screen geometry, scaling of tiles and the character, movement
/// speed and whether touch controls are shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Logical screen width in pixels
    pub screen_width: i32,
    /// Logical screen height in pixels
    pub screen_height: i32,
    /// Source tile size in pixels before scaling
    pub base_tile_size: i32,
    /// Tile scale factor
    pub scale: f32,
    /// Player displacement per frame in pixels
    pub player_speed: i32,
    /// Spritesheet frame size in pixels (square frames)
    pub frame_size: i32,
    /// Scale applied to spritesheet frames
    pub character_scale: f32,
    /// Multiplier for all UI font sizes
    pub font_scale: f32,
    /// Whether the virtual D-pad and action button are active
    pub touch_controls: bool,
    /// Whether collision outlines are drawn at startup
    pub debug_collision: bool,
    /// Directory all asset paths are relative to
    pub asset_dir: String,
}

impl GameConfig {
    /// Creates the desktop configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use pitchfork_path::GameConfig;
    ///
    /// let config = GameConfig::desktop();
    /// assert_eq!(config.tile_size(), 128);
    /// assert!(!config.touch_controls);
    /// ```
    pub fn desktop() -> Self {
        Self {
            screen_width: 1200,
            screen_height: 800,
            base_tile_size: 64,
            scale: 2.0,
            player_speed: 4,
            frame_size: 64,
            character_scale: 3.0,
            font_scale: 1.0,
            touch_controls: false,
            debug_collision: false,
            asset_dir: "assets".to_string(),
        }
    }

    /// Creates the tablet configuration for a full-screen display.
    ///
    /// Larger tiles, a faster and larger character, bigger text and touch
    /// controls.
    pub fn tablet(screen_width: i32, screen_height: i32) -> Self {
        Self {
            screen_width,
            screen_height,
            scale: 2.5,
            player_speed: 6,
            character_scale: 3.5,
            font_scale: 1.3,
            touch_controls: true,
            ..Self::desktop()
        }
    }

    /// Tile edge length in screen pixels.
    pub fn tile_size(&self) -> i32 {
        (self.base_tile_size as f32 * self.scale) as i32
    }

    /// Rendered character frame size in pixels.
    pub fn sprite_size(&self) -> i32 {
        (self.frame_size as f32 * self.character_scale) as i32
    }

    /// Checks that every size and scale is usable.
    pub fn validate(&self) -> PitchforkResult<()> {
        if self.screen_width <= 0 || self.screen_height <= 0 {
            return Err(PitchforkError::InvalidConfig(format!(
                "screen size must be positive, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        if self.base_tile_size <= 0 || self.frame_size <= 0 {
            return Err(PitchforkError::InvalidConfig(
                "tile and frame sizes must be positive".to_string(),
            ));
        }
        if self.scale <= 0.0 || self.character_scale <= 0.0 || self.font_scale <= 0.0 {
            return Err(PitchforkError::InvalidConfig(
                "scale factors must be positive".to_string(),
            ));
        }
        if self.tile_size() < 1 || self.sprite_size() < 1 {
            return Err(PitchforkError::InvalidConfig(
                "scaled tile and sprite sizes must be at least one pixel".to_string(),
            ));
        }
        if self.player_speed < 0 {
            return Err(PitchforkError::InvalidConfig(format!(
                "player speed must not be negative, got {}",
                self.player_speed
            )));
        }
        Ok(())
    }

    /// Saves the configuration to JSON.
    pub fn save_to_json(&self) -> PitchforkResult<String> {
        serde_json::to_string_pretty(self).map_err(PitchforkError::from)
    }

    /// Loads a configuration from JSON and validates it.
    pub fn load_from_json(json: &str) -> PitchforkResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration file.
    pub fn load_from_file(path: impl AsRef<Path>) -> PitchforkResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::load_from_json(&json)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::desktop()
    }
}
