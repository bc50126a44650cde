//! # Spritesheets
//!
//! Splits a character sheet into per-direction frame rows. Blank cells are
//! dropped so that incomplete sheets yield short rows rather than invisible
//! frames.

use crate::game::AnimationSet;
use macroquad::texture::Image;

/// A pixel counts as drawn when its alpha is above this value.
pub const MASK_ALPHA_THRESHOLD: u8 = 127;

/// Whether no pixel of the image is drawn.
pub fn frame_is_blank(image: &Image) -> bool {
    !image
        .bytes
        .chunks_exact(4)
        .any(|pixel| pixel[3] > MASK_ALPHA_THRESHOLD)
}

/// Copies the `w × h` region at `(x, y)` out of `image`.
///
/// The region must lie inside the image.
fn crop(image: &Image, x: usize, y: usize, w: usize, h: usize) -> Image {
    let stride = image.width as usize * 4;
    let mut bytes = Vec::with_capacity(w * h * 4);
    for row in y..y + h {
        let start = row * stride + x * 4;
        bytes.extend_from_slice(&image.bytes[start..start + w * 4]);
    }
    Image {
        bytes,
        width: w as u16,
        height: h as u16,
    }
}

/// Frames of a character sheet, one row per direction.
#[derive(Clone, Default)]
pub struct SpriteSheet {
    rows: Vec<Vec<Image>>,
}

impl std::fmt::Debug for SpriteSheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpriteSheet")
            .field("frame_counts", &self.frame_counts())
            .finish()
    }
}

impl SpriteSheet {
    /// Splits `sheet` into `frame_w × frame_h` cells, dropping blank ones.
    ///
    /// Partial cells at the right and bottom edges are ignored.
    pub fn slice(sheet: &Image, frame_w: u16, frame_h: u16) -> Self {
        if frame_w == 0 || frame_h == 0 {
            return Self::missing();
        }
        let (fw, fh) = (frame_w as usize, frame_h as usize);
        let cols = sheet.width as usize / fw;
        let row_count = sheet.height as usize / fh;

        let rows = (0..row_count)
            .map(|row| {
                (0..cols)
                    .map(|col| crop(sheet, col * fw, row * fh, fw, fh))
                    .filter(|frame| !frame_is_blank(frame))
                    .collect()
            })
            .collect();
        Self { rows }
    }

    /// Stand-in for a sheet that could not be loaded: one empty row.
    pub fn missing() -> Self {
        Self {
            rows: vec![Vec::new()],
        }
    }

    pub fn rows(&self) -> &[Vec<Image>] {
        &self.rows
    }

    /// Number of usable frames in each row.
    pub fn frame_counts(&self) -> Vec<usize> {
        self.rows.iter().map(Vec::len).collect()
    }
}

/// Frame counts the animation controller works from.
pub fn animation_set(idle: &SpriteSheet, run: &SpriteSheet) -> AnimationSet {
    AnimationSet::new(idle.frame_counts(), run.frame_counts())
}
