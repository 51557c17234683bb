//! Two-button input
//!
//! A short press steps through the views. On the block diagram a long
//! press of next opens the detail views in turn, and a long press of
//! previous flips the toggle buttons in turn. Elsewhere a long press acts
//! like a short one.

use super::controller::{NavEvent, ToggleButton};
use super::state::PanelState;

/// Physical navigation buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Next,
    Previous,
}

/// A debounced button press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Press {
    pub button: Button,
    /// Held past the long-press threshold
    pub long: bool,
}

impl Press {
    pub const fn short(button: Button) -> Self {
        Self {
            button,
            long: false,
        }
    }

    pub const fn long(button: Button) -> Self {
        Self { button, long: true }
    }
}

/// Detail views reachable from the block diagram
pub const DETAIL_VIEWS: [PanelState; 4] = [
    PanelState::RxStatus,
    PanelState::PllStatus,
    PanelState::SyncStatus,
    PanelState::RxMsgStatus,
];

/// Turns button presses into navigation events
#[derive(Debug, Clone, Default)]
pub struct ButtonMap {
    detail: usize,
    toggle: usize,
}

impl ButtonMap {
    pub const fn new() -> Self {
        Self {
            detail: 0,
            toggle: 0,
        }
    }

    /// Event for `press` while `active` is shown
    pub fn map(&mut self, press: Press, active: PanelState) -> NavEvent {
        let shortcut = press.long && active == PanelState::BlockDiagram;

        match (press.button, shortcut) {
            (Button::Next, false) => NavEvent::Next,
            (Button::Previous, false) => NavEvent::Previous,
            (Button::Next, true) => {
                let target = DETAIL_VIEWS[self.detail];
                self.detail = (self.detail + 1) % DETAIL_VIEWS.len();
                NavEvent::Select(target)
            }
            (Button::Previous, true) => {
                let button = ToggleButton::ALL[self.toggle];
                self.toggle = (self.toggle + 1) % ToggleButton::ALL.len();
                NavEvent::Toggle(button)
            }
        }
    }
}
