//! # User Interface Elements
//!
//! Dialogue boxes, the journal, the interaction hint and the touch
//! controls. Box placement and word wrapping are plain functions so they can
//! be checked without a window.

use crate::game::PixelRect;
use crate::input::TouchControls;
use macroquad::prelude::*;

/// Hint shown near an NPC with keyboard controls.
pub const KEYBOARD_HINT: &str = "Appuyez sur ESPACE pour parler";
/// Hint shown near an NPC with touch controls.
pub const TOUCH_HINT: &str = "Touchez pour parler";

const DIALOGUE_FONT_SIZE: f32 = 30.0;
const DIALOGUE_PADDING: f32 = 20.0;
const JOURNAL_FONT_SIZE: f32 = 36.0;
const JOURNAL_LINE_HEIGHT: f32 = 45.0;
/// Boxes never come closer than this to the screen edge.
const SCREEN_MARGIN: f32 = 10.0;

/// Greedy word wrap: words are added to a line while `measure` of the line
/// stays within `max_width`. A single word wider than `max_width` gets a line
/// of its own.
///
/// # Examples
///
/// ```
/// use pitchfork_path::wrap_text;
///
/// let lines = wrap_text("aa bb cc", 5.0, |s| s.len() as f32);
/// assert_eq!(lines, vec!["aa bb", "cc"]);
/// ```
pub fn wrap_text(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if measure(&candidate) <= max_width || current.is_empty() {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Places a box of `width × height` centred above `anchor`, clamped to
/// stay on screen.
pub fn dialogue_box_rect(anchor: &PixelRect, width: f32, height: f32, screen_width: f32) -> Rect {
    let x = anchor.center_x() as f32 - width / 2.0;
    let y = anchor.top() as f32 - height - DIALOGUE_PADDING;
    let max_x = (screen_width - width - SCREEN_MARGIN).max(SCREEN_MARGIN);
    Rect::new(x.clamp(SCREEN_MARGIN, max_x), y.max(SCREEN_MARGIN), width, height)
}

/// Journal box: 75% of the screen width, centred.
pub fn journal_box_rect(line_count: usize, screen_width: f32, screen_height: f32) -> Rect {
    let width = screen_width * 0.75;
    let height = 100.0 + JOURNAL_LINE_HEIGHT * line_count as f32;
    Rect::new(
        (screen_width - width) / 2.0,
        (screen_height - height) / 2.0,
        width,
        height,
    )
}

/// Draws the overlay widgets. Text sizes follow the configured font scale.
#[derive(Debug, Clone, Copy)]
pub struct UI {
    pub font_scale: f32,
}

impl Default for UI {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl UI {
    /// Creates a new UI instance.
    pub fn new(font_scale: f32) -> Self {
        Self { font_scale }
    }

    fn font_size(&self, base: f32) -> u16 {
        (base * self.font_scale).round() as u16
    }

    fn wrap(&self, text: &str, max_width: f32, font_size: u16) -> Vec<String> {
        wrap_text(text, max_width, |line| {
            measure_text(line, None, font_size, 1.0).width
        })
    }

    /// Speech bubble above the NPC currently talking.
    pub fn draw_dialogue(&self, text: &str, speaker: &PixelRect) {
        let sw = screen_width();
        let font_size = self.font_size(DIALOGUE_FONT_SIZE);
        let line_height = font_size as f32;
        let lines = self.wrap(text, sw * 0.5 - DIALOGUE_PADDING * 2.0, font_size);

        let text_width = lines
            .iter()
            .map(|line| measure_text(line, None, font_size, 1.0).width)
            .fold(0.0_f32, f32::max);
        let width = text_width + DIALOGUE_PADDING * 2.0;
        let height = lines.len() as f32 * line_height + DIALOGUE_PADDING * 2.0;
        let rect = dialogue_box_rect(speaker, width, height, sw);

        draw_rectangle(rect.x, rect.y, rect.w, rect.h, Color::new(0.0, 0.0, 0.0, 0.78));
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 2.0, WHITE);
        for (i, line) in lines.iter().enumerate() {
            // draw_text positions the baseline
            let baseline = rect.y + DIALOGUE_PADDING + line_height * (i as f32 + 0.8);
            draw_text(line, rect.x + DIALOGUE_PADDING, baseline, font_size as f32, WHITE);
        }
    }

    /// Centred journal shown once every NPC has been heard.
    pub fn draw_journal(&self, journal: &[&str]) {
        let (sw, sh) = (screen_width(), screen_height());
        let font_size = self.font_size(JOURNAL_FONT_SIZE);
        let lines = self.wrap(&journal.join(" "), sw * 0.7, font_size);
        let rect = journal_box_rect(lines.len(), sw, sh);

        draw_rectangle(rect.x, rect.y, rect.w, rect.h, Color::new(0.0, 0.0, 0.0, 0.86));
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 3.0, WHITE);
        for (i, line) in lines.iter().enumerate() {
            let baseline = rect.y + 40.0 + JOURNAL_LINE_HEIGHT * i as f32 + font_size as f32 * 0.8;
            draw_text(line, rect.x + 30.0, baseline, font_size as f32, WHITE);
        }
    }

    /// "Press to talk" hint above an NPC.
    pub fn draw_hint(&self, npc: &PixelRect, touch: bool) {
        let text = if touch { TOUCH_HINT } else { KEYBOARD_HINT };
        let font_size = self.font_size(DIALOGUE_FONT_SIZE);
        let dims = measure_text(text, None, font_size, 1.0);
        let x = npc.center_x() as f32 - dims.width / 2.0;
        let y = npc.top() as f32 - 40.0;

        draw_rectangle(
            x - 10.0,
            y - 5.0,
            dims.width + 20.0,
            dims.height + 10.0,
            Color::new(0.0, 0.0, 0.0, 0.7),
        );
        draw_text(text, x, y + dims.offset_y, font_size as f32, WHITE);
    }

    /// Translucent circles for the D-pad and the action button.
    pub fn draw_touch_controls(&self, controls: &TouchControls) {
        let font_size = self.font_size(DIALOGUE_FONT_SIZE);
        for (button, rect) in controls.buttons() {
            let (cx, cy) = (rect.center_x() as f32, rect.center_y() as f32);
            let radius = rect.w as f32 / 2.0;
            draw_circle(cx, cy, radius, Color::new(1.0, 1.0, 1.0, 0.25));
            draw_circle_lines(cx, cy, radius, 2.0, Color::new(1.0, 1.0, 1.0, 0.6));

            let label = button.label();
            let dims = measure_text(label, None, font_size, 1.0);
            draw_text(
                label,
                cx - dims.width / 2.0,
                cy + dims.offset_y / 2.0,
                font_size as f32,
                WHITE,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> f32 {
        s.chars().count() as f32
    }

    #[test]
    fn test_wrap_text() {
        let lines = wrap_text("Bonjour mon enfant, que la paix soit avec toi.", 20.0, chars);
        assert_eq!(lines, vec!["Bonjour mon enfant,", "que la paix soit", "avec toi."]);
        assert!(lines.iter().all(|l| chars(l) <= 20.0));
    }

    #[test]
    fn test_wrap_keeps_oversized_word() {
        let lines = wrap_text("a extraordinairement b", 5.0, chars);
        assert_eq!(lines, vec!["a", "extraordinairement", "b"]);
        assert!(wrap_text("   ", 5.0, chars).is_empty());
    }

    #[test]
    fn test_dialogue_box_above_speaker() {
        let npc = PixelRect::new(500, 300, 64, 147);
        let rect = dialogue_box_rect(&npc, 200.0, 100.0, 1200.0);
        assert_eq!((rect.x, rect.y), (432.0, 180.0));
    }

    #[test]
    fn test_dialogue_box_clamped_to_screen() {
        let left = PixelRect::new(-40, 50, 64, 147);
        let rect = dialogue_box_rect(&left, 300.0, 100.0, 1200.0);
        assert_eq!((rect.x, rect.y), (10.0, 10.0));

        let right = PixelRect::new(1180, 400, 64, 147);
        let rect = dialogue_box_rect(&right, 300.0, 100.0, 1200.0);
        assert_eq!(rect.x, 890.0);
    }

    #[test]
    fn test_journal_box_centered() {
        let rect = journal_box_rect(4, 1200.0, 800.0);
        assert_eq!(rect.w, 900.0);
        assert_eq!(rect.h, 280.0);
        assert_eq!((rect.x, rect.y), (150.0, 260.0));
    }
}
