//! ILI9341 SPI TFT driver (240x320, RGB565)
//!
//! Generic over the `embedded-hal` 1.0 traits so the same code runs on a
//! Raspberry Pi through `linux-embedded-hal` or against a mock bus.
//! Only the subset needed for pixel writes is implemented.

use crate::display::{color_bytes, Panel, PanelError};
use crate::geometry::{PHYSICAL_HEIGHT, PHYSICAL_WIDTH};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

const SWRESET: u8 = 0x01;
const SLPOUT: u8 = 0x11;
const DISPON: u8 = 0x29;
const CASET: u8 = 0x2A;
const PASET: u8 = 0x2B;
const RAMWR: u8 = 0x2C;
const MADCTL: u8 = 0x36;
const COLMOD: u8 = 0x3A;

/// Row/column exchange off, BGR order, portrait.
const MADCTL_PORTRAIT_BGR: u8 = 0x48;
/// 16 bits per pixel.
const COLMOD_RGB565: u8 = 0x55;

/// Pixels pushed per SPI transaction when filling.
const FILL_CHUNK: usize = 512;

pub struct Ili9341<SPI, DC, RST, BL> {
    spi: SPI,
    dc: DC,
    rst: RST,
    backlight: BL,
}

impl<SPI, DC, RST, BL> Ili9341<SPI, DC, RST, BL>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BL: OutputPin,
{
    pub fn new(spi: SPI, dc: DC, rst: RST, backlight: BL) -> Self {
        Self {
            spi,
            dc,
            rst,
            backlight,
        }
    }

    /// Hardware reset, wake the controller and switch the backlight on.
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), PanelError> {
        log::info!("Initializing ILI9341...");

        self.rst.set_high().map_err(pin_error)?;
        delay.delay_ms(5);
        self.rst.set_low().map_err(pin_error)?;
        delay.delay_ms(20);
        self.rst.set_high().map_err(pin_error)?;
        delay.delay_ms(150);

        self.command(SWRESET, &[])?;
        delay.delay_ms(150);
        self.command(SLPOUT, &[])?;
        delay.delay_ms(120);
        self.command(COLMOD, &[COLMOD_RGB565])?;
        self.command(MADCTL, &[MADCTL_PORTRAIT_BGR])?;
        self.command(DISPON, &[])?;
        delay.delay_ms(20);

        self.backlight.set_high().map_err(pin_error)?;
        log::info!("ILI9341 ready");
        Ok(())
    }

    fn command(&mut self, cmd: u8, params: &[u8]) -> Result<(), PanelError> {
        self.dc.set_low().map_err(pin_error)?;
        self.spi.write(&[cmd]).map_err(bus_error)?;
        if !params.is_empty() {
            self.data(params)?;
        }
        Ok(())
    }

    fn data(&mut self, bytes: &[u8]) -> Result<(), PanelError> {
        self.dc.set_high().map_err(pin_error)?;
        self.spi.write(bytes).map_err(bus_error)
    }

    /// Select an inclusive pixel window and start a RAM write.
    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), PanelError> {
        let [x0h, x0l] = x0.to_be_bytes();
        let [x1h, x1l] = x1.to_be_bytes();
        let [y0h, y0l] = y0.to_be_bytes();
        let [y1h, y1l] = y1.to_be_bytes();
        self.command(CASET, &[x0h, x0l, x1h, x1l])?;
        self.command(PASET, &[y0h, y0l, y1h, y1l])?;
        self.command(RAMWR, &[])
    }
}

impl<SPI, DC, RST, BL> Panel for Ili9341<SPI, DC, RST, BL>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BL: OutputPin,
{
    fn width(&self) -> u16 {
        PHYSICAL_WIDTH
    }

    fn height(&self) -> u16 {
        PHYSICAL_HEIGHT
    }

    fn write_pixel(&mut self, x: u16, y: u16, color: [u8; 2]) -> Result<(), PanelError> {
        self.set_window(x, y, x, y)?;
        self.data(&color)
    }

    fn clear(&mut self, color: Rgb565) -> Result<(), PanelError> {
        self.set_window(0, 0, PHYSICAL_WIDTH - 1, PHYSICAL_HEIGHT - 1)?;

        let chunk = color_bytes(color).repeat(FILL_CHUNK);
        let mut remaining = usize::from(PHYSICAL_WIDTH) * usize::from(PHYSICAL_HEIGHT);
        while remaining > 0 {
            let pixels = remaining.min(FILL_CHUNK);
            self.data(&chunk[..pixels * 2])?;
            remaining -= pixels;
        }
        Ok(())
    }
}

fn bus_error(e: impl std::fmt::Debug) -> PanelError {
    PanelError::Bus(format!("{:?}", e))
}

fn pin_error(e: impl std::fmt::Debug) -> PanelError {
    PanelError::Pin(format!("{:?}", e))
}
