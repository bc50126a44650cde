//! # Rendering Module
//!
//! Asset loading and macroquad drawing. Game logic never calls into this
//! module; it only reads the state it is handed.

pub mod assets;
pub mod display;
pub mod sprites;
pub mod ui;

pub use assets::*;
pub use display::*;
pub use sprites::*;
pub use ui::*;
