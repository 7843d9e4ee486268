//! In-memory panel
//!
//! Stores the physical 240x320 frame as packed RGB565 words. Used for the
//! `--stdout` development mode and as the panel in tests.

use crate::display::{color_bytes, Panel, PanelError};
use crate::geometry::{self, LOGICAL_HEIGHT, LOGICAL_WIDTH, PHYSICAL_HEIGHT, PHYSICAL_WIDTH};
use embedded_graphics::pixelcolor::{IntoStorage, Rgb565};

pub struct FrameBuffer {
    width: u16,
    height: u16,
    pixels: Vec<u16>,
    writes: usize,
}

impl FrameBuffer {
    /// Frame buffer matching the standard 240x320 portrait panel.
    pub fn new() -> Self {
        Self::with_size(PHYSICAL_WIDTH, PHYSICAL_HEIGHT)
    }

    pub fn with_size(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; usize::from(width) * usize::from(height)],
            writes: 0,
        }
    }

    /// Packed RGB565 value at a physical coordinate.
    pub fn pixel(&self, x: u16, y: u16) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(usize::from(y) * usize::from(self.width) + usize::from(x))
            .copied()
    }

    /// Packed RGB565 value at a logical (landscape) coordinate.
    pub fn logical_pixel(&self, x: i32, y: i32) -> Option<u16> {
        let (xp, yp) = geometry::to_physical_on(x, y, self.width, self.height)?;
        self.pixel(xp, yp)
    }

    /// Number of pixels currently set to `color`.
    pub fn count(&self, color: Rgb565) -> usize {
        let raw = color.into_storage();
        self.pixels.iter().filter(|&&p| p == raw).count()
    }

    /// Number of single-pixel writes since creation.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Render the frame in landscape orientation as ASCII art.
    ///
    /// Each character covers a `cell`x`cell` block (doubled vertically to
    /// compensate for terminal glyph aspect) and shows `#` if any pixel in
    /// the block differs from `background`.
    pub fn to_ascii(&self, background: Rgb565, cell: i32) -> String {
        let cell = cell.max(1);
        let cols = (LOGICAL_WIDTH + cell - 1) / cell;
        let rows = (LOGICAL_HEIGHT + cell * 2 - 1) / (cell * 2);
        let bg = background.into_storage();

        let mut lit = vec![false; (cols * rows) as usize];
        for yp in 0..self.height {
            for xp in 0..self.width {
                if self.pixel(xp, yp).map_or(true, |p| p == bg) {
                    continue;
                }
                let (x, y) = geometry::to_logical_on(xp, yp, self.height);
                if geometry::in_logical_bounds(x, y) {
                    lit[((y / (cell * 2)) * cols + x / cell) as usize] = true;
                }
            }
        }

        let mut out = String::with_capacity(((cols + 1) * rows) as usize);
        for row in lit.chunks(cols as usize) {
            out.extend(row.iter().map(|&on| if on { '#' } else { ' ' }));
            out.push('\n');
        }
        out
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for FrameBuffer {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn write_pixel(&mut self, x: u16, y: u16, color: [u8; 2]) -> Result<(), PanelError> {
        if x >= self.width || y >= self.height {
            return Ok(());
        }
        let index = usize::from(y) * usize::from(self.width) + usize::from(x);
        self.pixels[index] = u16::from_be_bytes(color);
        self.writes += 1;
        Ok(())
    }

    fn clear(&mut self, color: Rgb565) -> Result<(), PanelError> {
        let raw = u16::from_be_bytes(color_bytes(color));
        self.pixels.fill(raw);
        Ok(())
    }
}
