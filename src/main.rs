//! # Rotating Display Entry Point
//!
//! Wires the configuration, the network feeds and a panel into the control
//! loop. Two modes:
//!
//! - **Hardware** (`--features hardware`, Linux only): drives an ILI9341 over
//!   spidev and loops forever
//! - **Development** (`--stdout`): fetches every feed once and prints the
//!   three slides as ASCII art
//!
//! `--verbose` turns on debug logging.

#[cfg(test)]
mod tests;

use rotating_display_lib::app::{App, SystemClock};
use rotating_display_lib::config::Config;
use rotating_display_lib::display::BLACK;
use rotating_display_lib::feeds::HttpFeeds;
use rotating_display_lib::framebuffer::FrameBuffer;
use rotating_display_lib::rotator::Slide;
use std::env;

/// Logical pixels per ASCII cell in development mode.
const ASCII_CELL: i32 = 4;

/// Fetch everything once and print each slide.
fn print_slides(config: &Config, rt: &tokio::runtime::Runtime) -> anyhow::Result<()> {
    let feeds = HttpFeeds::new(config)?;

    rt.block_on(async {
        let mut app = App::new(FrameBuffer::new(), feeds, SystemClock::new(), config);
        app.refresh().await;
        for slide in Slide::ALL {
            app.draw(slide);
            println!("[{}]", slide.name());
            print!("{}", app.panel().to_ascii(BLACK, ASCII_CELL));
        }
    });
    Ok(())
}

#[cfg(all(target_os = "linux", feature = "hardware"))]
fn output_pin(number: u64) -> anyhow::Result<linux_embedded_hal::SysfsPin> {
    use anyhow::Context;
    use linux_embedded_hal::sysfs_gpio::Direction;

    let pin = linux_embedded_hal::SysfsPin::new(number);
    pin.export()
        .with_context(|| format!("export GPIO {}", number))?;
    pin.set_direction(Direction::Out)
        .with_context(|| format!("set GPIO {} as output", number))?;
    Ok(pin)
}

/// Bring up the TFT and run the display loop until the process is killed.
#[cfg(all(target_os = "linux", feature = "hardware"))]
fn run_panel(config: &Config, rt: &tokio::runtime::Runtime) -> anyhow::Result<()> {
    use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
    use linux_embedded_hal::{Delay, SpidevDevice};
    use rotating_display_lib::ili9341::Ili9341;

    let hw = &config.hardware;
    log::info!(
        "Panel wiring: SPI {} DC GPIO {} RST GPIO {} BL GPIO {}",
        hw.spi_device,
        hw.dc_pin,
        hw.rst_pin,
        hw.backlight_pin
    );

    let mut spi = SpidevDevice::open(&hw.spi_device)
        .map_err(|e| anyhow::anyhow!("open {}: {:?}", hw.spi_device, e))?;
    let options = SpidevOptions::new()
        .bits_per_word(8)
        .max_speed_hz(32_000_000)
        .mode(SpiModeFlags::SPI_MODE_0)
        .build();
    spi.0.configure(&options)?;

    let dc = output_pin(hw.dc_pin)?;
    let rst = output_pin(hw.rst_pin)?;
    let backlight = output_pin(hw.backlight_pin)?;

    let mut tft = Ili9341::new(spi, dc, rst, backlight);
    tft.init(&mut Delay)?;

    let feeds = HttpFeeds::new(config)?;
    rt.block_on(async {
        let app = App::new(tft, feeds, SystemClock::new(), config);
        app.run().await
    });
    Ok(())
}

/// Stderr logging at `info`, or `debug` with `--verbose`. `RUST_LOG` is not
/// consulted.
fn init_logging(verbose: bool) -> Result<(), log::SetLoggerError> {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new().filter_level(level).try_init()
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let development_mode = args.iter().any(|arg| arg == "--stdout");
    let verbose = args.iter().any(|arg| arg == "--verbose");

    init_logging(verbose)?;

    let config = Config::load();

    // Single-threaded: the loop is strictly sequential
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    if development_mode {
        return print_slides(&config, &rt);
    }

    #[cfg(all(target_os = "linux", feature = "hardware"))]
    {
        run_panel(&config, &rt)
    }

    #[cfg(not(all(target_os = "linux", feature = "hardware")))]
    {
        log::warn!(
            "Panel support not enabled. Rebuild with --features hardware on Linux; showing ASCII output instead"
        );
        print_slides(&config, &rt)
    }
}
