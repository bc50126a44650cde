//! # Pitchfork Path
//!
//! A small top-down exploration game: one tile-based scene, three landmark
//! buildings, one NPC per building and a closing journal once every NPC has
//! been met.
//!
//! ## Architecture Overview
//!
//! The game logic is kept free of rendering calls so that every decision can
//! be tested without a window:
//!
//! - **Tile Map**: static grid expanded from a compact symbolic template
//! - **Walkability**: per-pixel traversability derived from tile art colour
//! - **Collision**: nine-point hitbox sampling plus static building footprints
//! - **Animation**: `{idle, run} × direction` frame selection on a timer
//! - **Interaction**: proximity detection and the dialogue/journal state machine
//! - **Rendering**: a separate macroquad pass that only reads the final state
//!
//! All mutable session state lives in one [`GameState`] owned by the main loop.

pub mod config;
pub mod game;
pub mod input;
pub mod rendering;
pub mod scenes;

// Core module re-exports
pub use config::*;
pub use game::*;
pub use input::*;
pub use rendering::*;
pub use scenes::*;

/// Core error type for the Pitchfork Path game.
#[derive(thiserror::Error, Debug)]
pub enum PitchforkError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// The static map layout could not be expanded
    #[error("Malformed layout: {0}")]
    MalformedLayout(String),

    /// Configuration values are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the Pitchfork Path codebase.
pub type PitchforkResult<T> = Result<T, PitchforkError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
