use super::state::PanelState;

/// Latching buttons on the block diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ToggleButton {
    Tx,
    Rrc,
    Bpsk,
    Msg2,
}

impl ToggleButton {
    pub const ALL: [ToggleButton; 4] = [
        ToggleButton::Tx,
        ToggleButton::Rrc,
        ToggleButton::Bpsk,
        ToggleButton::Msg2,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ToggleButton::Tx => "TX",
            ToggleButton::Rrc => "RRC",
            ToggleButton::Bpsk => "BPSK",
            ToggleButton::Msg2 => "MSG2",
        }
    }

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// User input reaching the controller
///
/// Buttons produce these through `ButtonMap`. `Select` and `Toggle` come
/// from long presses on the block diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavEvent {
    Next,
    Previous,
    /// Jump straight to a view
    Select(PanelState),
    Toggle(ToggleButton),
}

/// Visibility of the navigation buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Affordances {
    pub previous: bool,
    pub next: bool,
}

impl Affordances {
    pub fn for_state(state: PanelState) -> Self {
        Self {
            previous: state != PanelState::Overview,
            next: state < PanelState::LAST_NAVIGABLE,
        }
    }
}

/// A change of active view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub from: PanelState,
    pub to: PanelState,
    pub affordances: Affordances,
}

/// Result of handling one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Nothing changed
    Ignored,
    Moved(Transition),
    /// A block button latched on or off
    Toggled { button: ToggleButton, on: bool },
}

/// Panel state machine
#[derive(Debug, Clone, Default)]
pub struct PanelController {
    active: PanelState,
    toggles: u8,
}

impl PanelController {
    pub const fn new() -> Self {
        Self {
            active: PanelState::Overview,
            toggles: 0,
        }
    }

    pub fn active(&self) -> PanelState {
        self.active
    }

    pub fn is_toggled(&self, button: ToggleButton) -> bool {
        self.toggles & button.bit() != 0
    }

    pub fn handle(&mut self, event: NavEvent) -> Outcome {
        let target = match (self.active, event) {
            (_, NavEvent::Toggle(button)) => {
                self.toggles ^= button.bit();
                return Outcome::Toggled {
                    button,
                    on: self.is_toggled(button),
                };
            }
            (state, NavEvent::Next) if state < PanelState::LAST_NAVIGABLE => {
                PanelState::from_index(state.index() + 1)
            }
            (state, NavEvent::Previous) if state.is_detail() => Some(PanelState::Overview),
            (state, NavEvent::Previous) if state > PanelState::Overview => {
                PanelState::from_index(state.index() - 1)
            }
            (state, NavEvent::Select(target)) if target != state => Some(target),
            _ => None,
        };

        match target {
            Some(to) => {
                let from = self.active;
                self.active = to;
                Outcome::Moved(Transition {
                    from,
                    to,
                    affordances: Affordances::for_state(to),
                })
            }
            None => Outcome::Ignored,
        }
    }
}
