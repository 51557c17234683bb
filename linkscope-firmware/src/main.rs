//! Linkscope - SPI telemetry display firmware
//!
//! Receives tagged telemetry words from an SDR test rig on SPI1 (slave),
//! reassembles them in the SPI1 interrupt and renders status panels and
//! scrolling traces on an ILI9341 panel on SPI2.

#![no_std]
#![no_main]

mod channels;
mod display;
mod tasks;

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::exti::{self, ExtiInput};
use embassy_stm32::gpio::{Level, Output, Pull, Speed};
use embassy_stm32::spi::{self, Spi};
use embassy_stm32::time::Hertz;
use embassy_stm32::{bind_interrupts, interrupt};
use portable_atomic::Ordering;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use linkscope_core::config::{parse_config, LinkscopeConfig};
use linkscope_core::panel::Button;
use linkscope_core::store::SampleStore;
use linkscope_display::GraphicsCanvas;
use linkscope_hal::WordSource;
use linkscope_hal_stm32f0::{Spi1Gate, SpiSlave};

use crate::channels::{OVERRUNS, RECEIVER};
use crate::display::Ili9341;

/// Embedded configuration (compiled into firmware)
/// Edit receiver.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../receiver.toml");

/// Display SPI clock
const DISPLAY_SPI_HZ: u32 = 12_000_000;

bind_interrupts!(struct Irqs {
    EXTI0_1 => exti::InterruptHandler<interrupt::typelevel::EXTI0_1>;
});

static CONFIG: StaticCell<LinkscopeConfig> = StaticCell::new();

/// Drain the SPI1 receive FIFO into the shared receiver
#[interrupt]
fn SPI1() {
    let mut link = SpiSlave::attached();
    while let Some(word) = link.read_word() {
        RECEIVER.on_word(word);
    }
    if link.take_overrun().is_err() {
        OVERRUNS.fetch_add(1, Ordering::Relaxed);
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Linkscope firmware starting...");

    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    let config = CONFIG.init(load_config());

    // Telemetry link on SPI1 (PA4=NSS, PA5=SCK, PA7=MOSI)
    let link_config = config.link.link_config();
    info!(
        "SPI link: mode {}, {}-bit words, slave",
        link_config.mode.number(),
        link_config.word_size.bits()
    );

    if config.link.demo_seed {
        info!("Seeding store with the bench pattern");
        RECEIVER.seed(SampleStore::demo());
    }

    let _link = SpiSlave::init(link_config);
    let mut gate = Spi1Gate;
    gate.start();
    info!("SPI1 slave listening");

    // Display on SPI2 (PB13=SCK, PB15=MOSI, PB12=CS, PB11=DC; RST tied high)
    let mut spi_config = spi::Config::default();
    spi_config.frequency = Hertz(DISPLAY_SPI_HZ);
    let spi = Spi::new_blocking_txonly(p.SPI2, p.PB13, p.PB15, spi_config);

    let cs = Output::new(p.PB12, Level::High, Speed::VeryHigh);
    let dc = Output::new(p.PB11, Level::Low, Speed::VeryHigh);

    let mut panel = Ili9341::new(spi, dc, cs);
    if let Err(e) = panel.init().await {
        error!("Failed to initialize display: {:?}", e);
    } else {
        info!("Display initialized");
    }
    let canvas = GraphicsCanvas::new(panel);

    // Navigation buttons (PA0=next, PA1=previous)
    let next_btn = ExtiInput::new(p.PA0, p.EXTI0, Pull::Up, Irqs);
    let prev_btn = ExtiInput::new(p.PA1, p.EXTI1, Pull::Up, Irqs);

    // Spawn tasks
    spawner.spawn(tasks::tick_task(config.tick.rate_hz)).unwrap();
    spawner
        .spawn(tasks::button_task(next_btn, Button::Next))
        .unwrap();
    spawner
        .spawn(tasks::button_task(prev_btn, Button::Previous))
        .unwrap();
    if config.console.enabled {
        spawner.spawn(tasks::console_task()).unwrap();
    }
    spawner
        .spawn(tasks::controller_task(canvas, config, gate))
        .unwrap();

    info!("All tasks spawned, firmware running");
}

/// Parse the embedded configuration
///
/// Falls back to defaults if parsing fails, which build.rs should have
/// prevented.
fn load_config() -> LinkscopeConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using default configuration");
            LinkscopeConfig::default()
        }
    }
}
