//! # Text Rendering
//!
//! Draws bitmap-font text onto the logical landscape canvas. There is no
//! frame buffer in the pipeline: every lit glyph pixel becomes one
//! [`Panel::write_pixel`] call after [`geometry::to_physical_on`] has rotated
//! it into panel space.
//!
//! ## Layout Rules
//! - Each character advances the cursor by `6 * scale` pixels (5 glyph
//!   columns plus a spacing column); there is no wrapping or kerning
//! - Characters without a glyph advance the cursor and draw nothing
//! - [`Canvas::draw_centered_text`] assumes `8 * scale` pixels per character
//!   when computing the left margin, which leaves text slightly left of
//!   centre. Slide layouts are tuned around that offset.

use crate::display::{color_bytes, Panel, PanelError};
use crate::font::{self, GLYPH_ADVANCE, GLYPH_COLUMNS, GLYPH_ROWS};
use crate::geometry::{self, LOGICAL_WIDTH};
use embedded_graphics::pixelcolor::Rgb565;

/// Per-character width assumed by centred layout.
const CENTER_CHAR_WIDTH: i32 = 8;

/// Drawing surface over a borrowed panel.
pub struct Canvas<'a, P: Panel> {
    panel: &'a mut P,
}

impl<'a, P: Panel> Canvas<'a, P> {
    pub fn new(panel: &'a mut P) -> Self {
        Self { panel }
    }

    /// Fill the entire physical canvas.
    pub fn clear(&mut self, color: Rgb565) -> Result<(), PanelError> {
        self.panel.clear(color)
    }

    /// Plot one logical pixel. Off-canvas coordinates are ignored.
    pub fn plot(&mut self, x: i32, y: i32, color: Rgb565) -> Result<(), PanelError> {
        let (width, height) = (self.panel.width(), self.panel.height());
        match geometry::to_physical_on(x, y, width, height) {
            Some((xp, yp)) => self.panel.write_pixel(xp, yp, color_bytes(color)),
            None => Ok(()),
        }
    }

    /// Draw one character with its top-left corner at (`x`, `y`).
    ///
    /// Returns the horizontal advance, `6 * scale`.
    pub fn draw_char(
        &mut self,
        ch: char,
        x: i32,
        y: i32,
        color: Rgb565,
        scale: i32,
    ) -> Result<i32, PanelError> {
        let scale = scale.max(1);
        let advance = GLYPH_ADVANCE * scale;
        let Some(glyph) = font::glyph(ch) else {
            return Ok(advance);
        };

        for col in 0..GLYPH_COLUMNS {
            for row in 0..GLYPH_ROWS {
                if !font::is_lit(glyph, col, row) {
                    continue;
                }
                let px = x + col as i32 * scale;
                let py = y + row as i32 * scale;
                for dx in 0..scale {
                    for dy in 0..scale {
                        self.plot(px + dx, py + dy, color)?;
                    }
                }
            }
        }
        Ok(advance)
    }

    /// Draw `text` left to right starting at (`x`, `y`).
    pub fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        color: Rgb565,
        scale: i32,
    ) -> Result<(), PanelError> {
        let mut cursor = x;
        for ch in text.chars() {
            cursor += self.draw_char(ch, cursor, y, color, scale)?;
        }
        Ok(())
    }

    /// Draw `text` horizontally centred (see module docs) at row `y`.
    pub fn draw_centered_text(
        &mut self,
        text: &str,
        y: i32,
        color: Rgb565,
        scale: i32,
    ) -> Result<(), PanelError> {
        let x = centered_x(text, scale);
        self.draw_text(text, x, y, color, scale)
    }
}

/// Left margin used by [`Canvas::draw_centered_text`].
pub fn centered_x(text: &str, scale: i32) -> i32 {
    let char_width = CENTER_CHAR_WIDTH * scale.max(1);
    let len = i32::try_from(text.chars().count()).unwrap_or(i32::MAX);
    ((LOGICAL_WIDTH - len.saturating_mul(char_width)) / 2).max(0)
}
