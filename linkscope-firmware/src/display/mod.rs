//! Display hardware
//!
//! The dashboard draws through a `GraphicsCanvas` over the ILI9341 panel
//! on SPI2.

pub mod ili9341;

use embassy_stm32::gpio::Output;
use embassy_stm32::mode::Blocking;
use embassy_stm32::spi::Spi;
use linkscope_display::GraphicsCanvas;

pub use ili9341::{Ili9341, Ili9341Error};

/// The panel as wired on the board
pub type Panel = Ili9341<Spi<'static, Blocking>, Output<'static>, Output<'static>>;

/// Canvas the controller task draws on
pub type PanelCanvas = GraphicsCanvas<Panel>;
