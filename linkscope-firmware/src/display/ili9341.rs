//! ILI9341 TFT driver
//!
//! Driver for 320x240 ILI9341 panels over a write-only SPI bus with
//! separate data/command and chip-select lines. Pixels are RGB565, written
//! straight to panel RAM; there is no frame buffer.

use embassy_time::Timer;
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{Dimensions, OriginDimensions, Size};
use embedded_graphics::pixelcolor::{IntoStorage, Rgb565};
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::Pixel;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

/// Display dimensions (landscape)
const WIDTH: u16 = 320;
const HEIGHT: u16 = 240;

/// Pixels streamed per bus write when filling
const FILL_CHUNK: usize = 32;

/// ILI9341 commands
#[allow(dead_code)]
mod cmd {
    pub const SOFT_RESET: u8 = 0x01;
    pub const SLEEP_OUT: u8 = 0x11;
    pub const DISPLAY_OFF: u8 = 0x28;
    pub const DISPLAY_ON: u8 = 0x29;
    pub const COLUMN_ADDR: u8 = 0x2A;
    pub const PAGE_ADDR: u8 = 0x2B;
    pub const MEMORY_WRITE: u8 = 0x2C;
    pub const MEMORY_ACCESS: u8 = 0x36;
    pub const PIXEL_FORMAT: u8 = 0x3A;
}

/// MADCTL: row/column exchange plus BGR order gives landscape
const MADCTL_LANDSCAPE: u8 = 0x28;
/// COLMOD: 16 bits per pixel
const PIXEL_FORMAT_16BIT: u8 = 0x55;

/// Bus or pin failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ili9341Error {
    Bus,
    Pin,
}

/// ILI9341 driver
pub struct Ili9341<SPI, DC, CS> {
    spi: SPI,
    dc: DC,
    cs: CS,
}

impl<SPI, DC, CS> Ili9341<SPI, DC, CS>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
{
    /// Create a new ILI9341 driver
    pub fn new(spi: SPI, dc: DC, cs: CS) -> Self {
        Self { spi, dc, cs }
    }

    /// Initialize the display
    pub async fn init(&mut self) -> Result<(), Ili9341Error> {
        self.command(cmd::SOFT_RESET, &[])?;
        Timer::after_millis(120).await;

        self.command(cmd::SLEEP_OUT, &[])?;
        Timer::after_millis(120).await;

        self.command(cmd::MEMORY_ACCESS, &[MADCTL_LANDSCAPE])?;
        self.command(cmd::PIXEL_FORMAT, &[PIXEL_FORMAT_16BIT])?;
        self.command(cmd::DISPLAY_ON, &[])?;

        Ok(())
    }

    /// Send a command followed by its parameters
    fn command(&mut self, command: u8, params: &[u8]) -> Result<(), Ili9341Error> {
        self.cs.set_low().map_err(|_| Ili9341Error::Pin)?;
        let result = self.write_command(command, params);
        self.cs.set_high().map_err(|_| Ili9341Error::Pin)?;
        result
    }

    fn write_command(&mut self, command: u8, params: &[u8]) -> Result<(), Ili9341Error> {
        self.dc.set_low().map_err(|_| Ili9341Error::Pin)?;
        self.spi.write(&[command]).map_err(|_| Ili9341Error::Bus)?;
        if !params.is_empty() {
            self.dc.set_high().map_err(|_| Ili9341Error::Pin)?;
            self.spi.write(params).map_err(|_| Ili9341Error::Bus)?;
        }
        self.spi.flush().map_err(|_| Ili9341Error::Bus)
    }

    /// Set the RAM window for the next pixel writes (inclusive)
    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), Ili9341Error> {
        let [x0h, x0l] = x0.to_be_bytes();
        let [x1h, x1l] = x1.to_be_bytes();
        let [y0h, y0l] = y0.to_be_bytes();
        let [y1h, y1l] = y1.to_be_bytes();
        self.command(cmd::COLUMN_ADDR, &[x0h, x0l, x1h, x1l])?;
        self.command(cmd::PAGE_ADDR, &[y0h, y0l, y1h, y1l])
    }

    /// Stream `count` pixels of one color into the current window
    fn write_repeated(&mut self, color: Rgb565, count: u32) -> Result<(), Ili9341Error> {
        self.cs.set_low().map_err(|_| Ili9341Error::Pin)?;
        let result = self.stream(color, count as usize);
        self.cs.set_high().map_err(|_| Ili9341Error::Pin)?;
        result
    }

    fn stream(&mut self, color: Rgb565, mut remaining: usize) -> Result<(), Ili9341Error> {
        let [hi, lo] = color.into_storage().to_be_bytes();
        let mut chunk = [0u8; FILL_CHUNK * 2];
        for pair in chunk.chunks_exact_mut(2) {
            pair[0] = hi;
            pair[1] = lo;
        }

        self.dc.set_low().map_err(|_| Ili9341Error::Pin)?;
        self.spi
            .write(&[cmd::MEMORY_WRITE])
            .map_err(|_| Ili9341Error::Bus)?;
        self.dc.set_high().map_err(|_| Ili9341Error::Pin)?;

        while remaining > 0 {
            let n = remaining.min(FILL_CHUNK);
            self.spi
                .write(&chunk[..n * 2])
                .map_err(|_| Ili9341Error::Bus)?;
            remaining -= n;
        }
        self.spi.flush().map_err(|_| Ili9341Error::Bus)
    }
}

impl<SPI, DC, CS> OriginDimensions for Ili9341<SPI, DC, CS> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl<SPI, DC, CS> DrawTarget for Ili9341<SPI, DC, CS>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
{
    type Color = Rgb565;
    type Error = Ili9341Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if !(0..WIDTH as i32).contains(&point.x) || !(0..HEIGHT as i32).contains(&point.y) {
                continue;
            }
            let (x, y) = (point.x as u16, point.y as u16);
            self.set_window(x, y, x, y)?;
            self.write_repeated(color, 1)?;
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };

        self.set_window(
            area.top_left.x as u16,
            area.top_left.y as u16,
            bottom_right.x as u16,
            bottom_right.y as u16,
        )?;
        self.write_repeated(color, area.size.width * area.size.height)
    }
}
