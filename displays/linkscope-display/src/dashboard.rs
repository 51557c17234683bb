//! Dashboard controller
//!
//! Owns the panel state machine and the scope buffers. Navigation events
//! become widget operations; every gated tick the active panel is
//! refreshed from the decoded telemetry.

use linkscope_core::panel::{
    Affordances, BlockButton, BlockStatus, NavEvent, Outcome, PanelController, PanelState,
    Transition,
};
use linkscope_core::scope::{ScopeBuffer, Trace};
use linkscope_core::telemetry::{Channel, Health, Telemetry};

use crate::canvas::{Canvas, Color, DisplayError, ImageId, Point, TextAlign};
use crate::layout::{self, DATA_LEFT_X, DATA_RIGHT_X, DATA_ROWS, DETAIL_ADVISORY_Y};
use crate::scope;
use crate::widgets::{BlockId, WidgetTree};

/// Draw the startup banner
pub fn draw_banner<C: Canvas>(canvas: &mut C, text: &str) -> Result<(), DisplayError> {
    canvas.set_foreground(Color::DARK_BLUE);
    canvas.fill_rect(layout::BANNER)?;
    canvas.set_foreground(Color::WHITE);
    canvas.draw_rect(layout::BANNER)?;
    canvas.draw_text(text, layout::BANNER_TEXT, TextAlign::Center, false)
}

fn status_fill(health: Health) -> Color {
    match health {
        Health::Green => Color::LIGHT_GREEN,
        Health::Yellow => Color::YELLOW,
        Health::Red => Color::RED,
    }
}

fn led_color(health: Health) -> Color {
    match health {
        Health::Green => Color::LIME,
        Health::Yellow => Color::YELLOW,
        Health::Red => Color::RED,
    }
}

/// Background behind an advisory line
fn advisory_background(health: Health) -> Color {
    match health {
        Health::Green => Color::LIME,
        Health::Yellow => Color::YELLOW,
        Health::Red => Color::RED,
    }
}

/// Panel controller bound to a widget tree
pub struct Dashboard<W> {
    widgets: W,
    controller: PanelController,
    traces: [ScopeBuffer; Trace::ALL.len()],
    /// Health sum the overview picture was drawn for
    shown_health: Option<u8>,
}

impl<W: WidgetTree> Dashboard<W> {
    pub fn new(widgets: W) -> Self {
        Self {
            widgets,
            controller: PanelController::new(),
            traces: Trace::ALL.map(Trace::buffer),
            shown_health: None,
        }
    }

    /// Attach the initial panel and set up the navigation strip
    pub fn start(&mut self) {
        let panel = self.controller.active();
        self.widgets.add_panel(panel);
        self.widgets.paint_panel(panel);
        self.widgets.set_caption(panel.caption());
        self.widgets
            .set_nav_visible(Affordances::for_state(panel));
        self.shown_health = None;
    }

    pub fn active(&self) -> PanelState {
        self.controller.active()
    }

    pub fn controller(&self) -> &PanelController {
        &self.controller
    }

    pub fn widgets(&self) -> &W {
        &self.widgets
    }

    pub fn widgets_mut(&mut self) -> &mut W {
        &mut self.widgets
    }

    pub fn trace(&self, trace: Trace) -> &ScopeBuffer {
        &self.traces[trace.index()]
    }

    /// Apply one navigation event
    pub fn handle(&mut self, event: NavEvent) -> Outcome {
        let outcome = self.controller.handle(event);
        match outcome {
            Outcome::Moved(transition) => self.apply(transition),
            Outcome::Toggled { button, on } => {
                let fill = if on { Color::RED } else { Color::LIGHT_GREEN };
                self.widgets.set_block_fill(BlockId::Toggle(button), fill);
            }
            Outcome::Ignored => {}
        }
        outcome
    }

    /// Handle every queued input event; returns how many were taken
    pub fn poll_input(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.widgets.poll_input() {
            self.handle(event);
            handled += 1;
        }
        handled
    }

    fn apply(&mut self, transition: Transition) {
        self.widgets.remove_panel(transition.from);
        self.widgets.add_panel(transition.to);
        self.widgets.paint_panel(transition.to);
        self.widgets.set_caption(transition.to.caption());
        self.widgets.set_nav_visible(transition.affordances);

        // The overview repaint clears its picture
        if transition.to == PanelState::Overview {
            self.shown_health = None;
        }
    }

    /// Refresh the active panel for one tick
    pub fn refresh<C: Canvas>(
        &mut self,
        telemetry: &Telemetry,
        canvas: &mut C,
    ) -> Result<(), DisplayError> {
        match self.controller.active() {
            PanelState::Overview => self.refresh_overview(telemetry, canvas),
            PanelState::BlockDiagram => self.refresh_block_diagram(telemetry, canvas),
            PanelState::LedStatus => refresh_leds(telemetry, canvas),
            PanelState::DataTable => refresh_data_table(telemetry, canvas),
            PanelState::RxStatus => self.refresh_rx(telemetry, canvas),
            PanelState::PllStatus => self.refresh_pll(telemetry, canvas),
            PanelState::SyncStatus => self.refresh_sync(telemetry, canvas),
            PanelState::RxMsgStatus => self.refresh_rx_msg(telemetry, canvas),
        }
    }

    fn refresh_overview<C: Canvas>(
        &mut self,
        telemetry: &Telemetry,
        canvas: &mut C,
    ) -> Result<(), DisplayError> {
        let health = telemetry.health_sum();
        if self.shown_health != Some(health) {
            let image = if health == 0 {
                ImageId::Flower
            } else {
                ImageId::Lightning
            };
            canvas.draw_image(image, layout::OVERVIEW_IMAGE)?;
            self.shown_health = Some(health);
        }

        if health != 0 {
            canvas.set_foreground(Color::RED);
            canvas.set_background(Color::SEASHELL);
            canvas.draw_text(
                "Touch Screen to Take Action",
                layout::ADVISORY,
                TextAlign::Left,
                true,
            )?;
        }
        Ok(())
    }

    fn refresh_block_diagram<C: Canvas>(
        &mut self,
        telemetry: &Telemetry,
        canvas: &mut C,
    ) -> Result<(), DisplayError> {
        let status = BlockStatus::from_telemetry(telemetry);
        for button in BlockButton::ALL {
            self.widgets
                .set_block_fill(BlockId::Status(button), status_fill(status.get(button)));
        }

        // Drawn in the background color when healthy to clear the line
        let fg = if telemetry.is_healthy() {
            Color::SEASHELL
        } else {
            Color::RED
        };
        canvas.set_foreground(fg);
        canvas.set_background(Color::SEASHELL);
        canvas.draw_text(
            "Touch Red Block to Take Action",
            layout::ADVISORY,
            TextAlign::Left,
            true,
        )
    }

    fn refresh_rx<C: Canvas>(
        &mut self,
        telemetry: &Telemetry,
        canvas: &mut C,
    ) -> Result<(), DisplayError> {
        let health = telemetry.health(Channel::Agc);
        let advisory = match health {
            Health::Red => "Check input to RX1A ",
            Health::Yellow => "Weak Input Signal ",
            Health::Green => "AGC within Range    ",
        };

        canvas.set_foreground(Color::BLACK);
        canvas.set_background(advisory_background(health));
        canvas.draw_text(
            advisory,
            Point::new(32, DETAIL_ADVISORY_Y),
            TextAlign::Left,
            true,
        )?;
        canvas.draw_text(
            telemetry.text(Channel::Agc),
            Point::new(DATA_LEFT_X + 10, DATA_ROWS[0]),
            TextAlign::Left,
            true,
        )?;

        self.update_trace(Trace::Agc, telemetry, canvas)
    }

    fn refresh_pll<C: Canvas>(
        &mut self,
        telemetry: &Telemetry,
        canvas: &mut C,
    ) -> Result<(), DisplayError> {
        canvas.set_foreground(Color::BLACK);
        canvas.set_background(Color::LIME);
        canvas.draw_text(
            telemetry.text(Channel::Lock),
            Point::new(DATA_LEFT_X + 80, DATA_ROWS[0]),
            TextAlign::Right,
            true,
        )?;
        canvas.draw_text(
            telemetry.text(Channel::Hold),
            Point::new(DATA_RIGHT_X + 70, DATA_ROWS[0]),
            TextAlign::Right,
            true,
        )?;

        let lock = telemetry.health(Channel::Lock);
        let lock_advisory = match lock {
            Health::Red => "PLL unLocked ",
            Health::Yellow => "PLL Lock Weak",
            Health::Green => "PLL Locked   ",
        };
        canvas.set_background(advisory_background(lock));
        canvas.draw_text(
            lock_advisory,
            Point::new(20, DETAIL_ADVISORY_Y),
            TextAlign::Left,
            true,
        )?;

        let hold = telemetry.health(Channel::Hold);
        let hold_advisory = match hold {
            Health::Red => "PLL Hold Mode ",
            _ => "PLL Track Mode",
        };
        canvas.set_background(advisory_background(hold));
        canvas.draw_text(
            hold_advisory,
            Point::new(170, DETAIL_ADVISORY_Y),
            TextAlign::Left,
            true,
        )?;

        self.update_trace(Trace::Lock, telemetry, canvas)?;
        self.update_trace(Trace::Hold, telemetry, canvas)
    }

    fn refresh_sync<C: Canvas>(
        &mut self,
        telemetry: &Telemetry,
        canvas: &mut C,
    ) -> Result<(), DisplayError> {
        let health = telemetry.health(Channel::Frame);
        let advisory = match health {
            Health::Red => "Synchronization Error ",
            _ => "Synchronization Ok    ",
        };

        canvas.set_foreground(Color::BLACK);
        canvas.set_background(advisory_background(health));
        canvas.draw_text(
            advisory,
            Point::new(32, DETAIL_ADVISORY_Y),
            TextAlign::Left,
            true,
        )?;
        canvas.draw_text(
            telemetry.text(Channel::Frame),
            Point::new(DATA_LEFT_X + 100, DATA_ROWS[0]),
            TextAlign::Right,
            true,
        )?;

        self.update_trace(Trace::Frame, telemetry, canvas)
    }

    fn refresh_rx_msg<C: Canvas>(
        &mut self,
        telemetry: &Telemetry,
        canvas: &mut C,
    ) -> Result<(), DisplayError> {
        let health = telemetry.health(Channel::Crc);
        let advisory = match health {
            Health::Red => "Check Sum Error ",
            _ => "Check Sum Ok    ",
        };

        canvas.set_foreground(Color::BLACK);
        canvas.set_background(advisory_background(health));
        canvas.draw_text(
            advisory,
            Point::new(32, DETAIL_ADVISORY_Y),
            TextAlign::Left,
            true,
        )?;
        canvas.draw_text(
            telemetry.text(Channel::Crc),
            Point::new(DATA_LEFT_X + 70, DATA_ROWS[0]),
            TextAlign::Right,
            true,
        )?;

        self.update_trace(Trace::Crc, telemetry, canvas)
    }

    fn update_trace<C: Canvas>(
        &mut self,
        trace: Trace,
        telemetry: &Telemetry,
        canvas: &mut C,
    ) -> Result<(), DisplayError> {
        let value = telemetry.get(trace.channel()).value;
        scope::update(
            canvas,
            &mut self.traces[trace.index()],
            value,
            trace.label(),
        )
    }
}

fn refresh_leds<C: Canvas>(telemetry: &Telemetry, canvas: &mut C) -> Result<(), DisplayError> {
    for (i, channel) in layout::LED_CHANNELS.iter().enumerate() {
        let color = channel
            .map(|c| led_color(telemetry.health(c)))
            .unwrap_or(Color::LIME);
        canvas.set_foreground(color);
        canvas.fill_circle(layout::led_center(i), layout::LED_RADIUS)?;
    }
    Ok(())
}

fn refresh_data_table<C: Canvas>(
    telemetry: &Telemetry,
    canvas: &mut C,
) -> Result<(), DisplayError> {
    canvas.set_foreground(Color::BLACK);
    canvas.set_background(Color::LIME);

    canvas.draw_text(
        telemetry.text(Channel::Agc),
        Point::new(DATA_LEFT_X, DATA_ROWS[0]),
        TextAlign::Left,
        true,
    )?;
    canvas.draw_text(
        telemetry.text(Channel::Lock),
        Point::new(DATA_RIGHT_X, DATA_ROWS[0]),
        TextAlign::Left,
        true,
    )?;

    // Remaining rows are right-aligned, row-major over both columns
    let grid = [
        Channel::Hold,
        Channel::Evm,
        Channel::Frame,
        Channel::Crc,
        Channel::Ber,
        Channel::Temp2,
        Channel::TempInt,
    ];
    for (i, channel) in grid.iter().enumerate() {
        let x = if i % 2 == 0 { DATA_LEFT_X } else { DATA_RIGHT_X };
        canvas.draw_text(
            telemetry.text(*channel),
            Point::new(x + 70, DATA_ROWS[1 + i / 2]),
            TextAlign::Right,
            true,
        )?;
    }
    Ok(())
}
