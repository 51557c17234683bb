//! Block diagram status buttons

use crate::telemetry::{Channel, Health, Telemetry};

/// Status buttons of the block diagram, each a shortcut to a detail view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlockButton {
    Rx,
    Pll,
    Sync,
    Msg,
}

impl BlockButton {
    pub const ALL: [BlockButton; 4] = [
        BlockButton::Rx,
        BlockButton::Pll,
        BlockButton::Sync,
        BlockButton::Msg,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            BlockButton::Rx => "RX",
            BlockButton::Pll => "PLL",
            BlockButton::Sync => "SYNC",
            BlockButton::Msg => "MSG",
        }
    }

    /// Detail view opened by this button
    pub const fn target(self) -> super::PanelState {
        match self {
            BlockButton::Rx => super::PanelState::RxStatus,
            BlockButton::Pll => super::PanelState::PllStatus,
            BlockButton::Sync => super::PanelState::SyncStatus,
            BlockButton::Msg => super::PanelState::RxMsgStatus,
        }
    }
}

/// Highlight state of the four status buttons
///
/// At most one button is highlighted: the first failing stage wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlockStatus {
    states: [Health; 4],
}

impl BlockStatus {
    pub fn from_telemetry(telemetry: &Telemetry) -> Self {
        let rules = [
            (Channel::Agc, Health::Red, BlockButton::Rx),
            (Channel::Lock, Health::Red, BlockButton::Pll),
            (Channel::Hold, Health::Red, BlockButton::Pll),
            (Channel::Frame, Health::Red, BlockButton::Sync),
            (Channel::Crc, Health::Red, BlockButton::Msg),
            (Channel::Agc, Health::Yellow, BlockButton::Rx),
            (Channel::Lock, Health::Yellow, BlockButton::Pll),
        ];

        let mut status = Self::default();
        if let Some(&(_, health, button)) = rules
            .iter()
            .find(|(channel, health, _)| telemetry.health(*channel) == *health)
        {
            status.states[button as usize] = health;
        }
        status
    }

    pub fn get(&self, button: BlockButton) -> Health {
        self.states[button as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SampleStore;
    use crate::telemetry::{DecodePolicy, TelemetryDecoder};

    fn status(slots: &[(usize, i32)]) -> BlockStatus {
        let mut store = SampleStore::new();
        store.set(24, 0x8000); // frame ok
        for &(slot, value) in slots {
            store.set(slot, value);
        }
        let telemetry = TelemetryDecoder::new(DecodePolicy::Linear, 0.0).decode(&store);
        BlockStatus::from_telemetry(&telemetry)
    }

    #[test]
    fn test_all_green() {
        assert_eq!(status(&[]), BlockStatus::default());
    }

    #[test]
    fn test_red_beats_yellow() {
        // AGC yellow, CRC red
        let s = status(&[(12, 30000), (14, 100)]);
        assert_eq!(s.get(BlockButton::Msg), Health::Red);
        assert_eq!(s.get(BlockButton::Rx), Health::Green);
    }

    #[test]
    fn test_hold_marks_pll() {
        let s = status(&[(22, 1)]);
        assert_eq!(s.get(BlockButton::Pll), Health::Red);
    }

    #[test]
    fn test_agc_yellow() {
        let s = status(&[(12, 30000)]);
        assert_eq!(s.get(BlockButton::Rx), Health::Yellow);
        assert_eq!(BlockButton::Rx.target(), crate::panel::PanelState::RxStatus);
    }
}
