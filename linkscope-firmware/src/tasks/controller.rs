//! Controller task
//!
//! The consumer loop. Wakes on a tick or a button event:
//! - input: map the press to a navigation event, queue it on the widget
//!   table and let the dashboard apply it
//! - tick: drain the receiver with SPI1 masked, decode, refresh the
//!   active panel, hand a report to the console
//!
//! Pending widget changes are rendered and flushed after every wake.

use defmt::*;
use embassy_futures::select::{select, Either};

use linkscope_core::config::LinkscopeConfig;
use linkscope_core::panel::{ButtonMap, Press};
use linkscope_core::store::SampleStore;
use linkscope_core::telemetry::TelemetryDecoder;
use linkscope_display::dashboard::draw_banner;
use linkscope_display::{Canvas, Dashboard, WidgetTable};
use linkscope_hal_stm32f0::Spi1Gate;

use crate::channels::{ConsoleReport, CONSOLE, INPUT_CHANNEL, RECEIVER, TICK_GATE, TICK_SIGNAL};
use crate::display::PanelCanvas;

/// State owned by the consumer loop
struct Consumer {
    dashboard: Dashboard<WidgetTable>,
    buttons: ButtonMap,
    decoder: TelemetryDecoder,
    snapshot: SampleStore,
    gate: Spi1Gate,
    ticks: u32,
    console_every: Option<u32>,
}

impl Consumer {
    fn new(config: &LinkscopeConfig, gate: Spi1Gate) -> Self {
        Self {
            dashboard: Dashboard::new(WidgetTable::new()),
            buttons: ButtonMap::new(),
            decoder: config.telemetry.decoder(),
            snapshot: SampleStore::new(),
            gate,
            ticks: 0,
            console_every: config
                .console
                .enabled
                .then_some(config.console.every_n_ticks.max(1)),
        }
    }

    /// One gated pass over the received data
    fn tick(&mut self, canvas: &mut PanelCanvas) {
        let drain = RECEIVER.drain(&mut self.gate, &mut self.snapshot);
        let telemetry = self.decoder.decode(&self.snapshot);

        if let Err(e) = self.dashboard.refresh(&telemetry, canvas) {
            warn!("Panel refresh failed: {:?}", e);
        }

        self.ticks = self.ticks.wrapping_add(1);
        if let Some(every) = self.console_every {
            if self.ticks % every == 0 {
                CONSOLE.signal(ConsoleReport {
                    telemetry,
                    drain,
                    coalesced: TICK_GATE.take_coalesced(),
                });
            }
        }
    }

    fn input(&mut self, first: Press) {
        let mut next = Some(first);
        while let Some(press) = next {
            // Each press maps against the view the previous one left
            let event = self.buttons.map(press, self.dashboard.active());
            if !self.dashboard.widgets_mut().push_input(event) {
                warn!("Widget input queue full");
            }
            if self.dashboard.poll_input() > 0 {
                debug!("{} -> {}, showing {}", press, event, self.dashboard.active());
            }
            next = INPUT_CHANNEL.try_receive().ok();
        }
    }

    fn render(&mut self, canvas: &mut PanelCanvas) {
        if !self.dashboard.widgets().is_clean() {
            if let Err(e) = self.dashboard.widgets_mut().render(canvas) {
                warn!("Widget render failed: {:?}", e);
            }
        }
        if let Err(e) = canvas.flush() {
            warn!("Display flush failed: {:?}", e);
        }
    }
}

#[embassy_executor::task]
pub async fn controller_task(
    mut canvas: PanelCanvas,
    config: &'static LinkscopeConfig,
    gate: Spi1Gate,
) {
    info!("Controller task started");

    let mut consumer = Consumer::new(config, gate);

    if let Err(e) = draw_banner(&mut canvas, config.display.banner.as_str()) {
        warn!("Banner draw failed: {:?}", e);
    }
    consumer.dashboard.start();
    consumer.render(&mut canvas);

    loop {
        match select(TICK_SIGNAL.wait(), INPUT_CHANNEL.receive()).await {
            Either::First(()) => {
                if TICK_GATE.is_pending() {
                    consumer.tick(&mut canvas);
                    TICK_GATE.clear();
                }
            }
            Either::Second(event) => consumer.input(event),
        }

        consumer.render(&mut canvas);
    }
}
