//! Panel abstraction
//!
//! The renderer never talks to hardware directly. It hands fully mapped
//! physical coordinates and packed RGB565 bytes to a [`Panel`], which may be
//! the ILI9341 driver, the in-memory [`crate::framebuffer::FrameBuffer`], or a
//! test double.

use embedded_graphics::pixelcolor::{IntoStorage, Rgb565, RgbColor};
use thiserror::Error;

pub const WHITE: Rgb565 = <Rgb565 as RgbColor>::WHITE;
pub const BLACK: Rgb565 = <Rgb565 as RgbColor>::BLACK;
pub const YELLOW: Rgb565 = <Rgb565 as RgbColor>::YELLOW;
pub const CYAN: Rgb565 = <Rgb565 as RgbColor>::CYAN;
pub const GREEN: Rgb565 = <Rgb565 as RgbColor>::GREEN;
pub const RED: Rgb565 = <Rgb565 as RgbColor>::RED;

/// Errors raised by a panel implementation.
#[derive(Error, Debug)]
pub enum PanelError {
    /// SPI transfer failed
    #[error("panel bus error: {0}")]
    Bus(String),

    /// Data/command, reset or backlight line could not be driven
    #[error("panel pin error: {0}")]
    Pin(String),
}

/// A physical display that accepts single-pixel writes.
pub trait Panel {
    /// Physical width in pixels (portrait).
    fn width(&self) -> u16;

    /// Physical height in pixels (portrait).
    fn height(&self) -> u16;

    /// Write one pixel. `color` is RGB565, high byte first.
    ///
    /// Coordinates are already bounds-checked by the renderer.
    fn write_pixel(&mut self, x: u16, y: u16, color: [u8; 2]) -> Result<(), PanelError>;

    /// Fill the whole physical canvas with one colour.
    fn clear(&mut self, color: Rgb565) -> Result<(), PanelError>;
}

impl<P: Panel + ?Sized> Panel for &mut P {
    fn width(&self) -> u16 {
        (**self).width()
    }

    fn height(&self) -> u16 {
        (**self).height()
    }

    fn write_pixel(&mut self, x: u16, y: u16, color: [u8; 2]) -> Result<(), PanelError> {
        (**self).write_pixel(x, y, color)
    }

    fn clear(&mut self, color: Rgb565) -> Result<(), PanelError> {
        (**self).clear(color)
    }
}

/// Split an RGB565 colour into the two bytes the panel expects.
pub fn color_bytes(color: Rgb565) -> [u8; 2] {
    color.into_storage().to_be_bytes()
}
