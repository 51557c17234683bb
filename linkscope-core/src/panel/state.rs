/// Views of the display, in navigation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelState {
    #[default]
    Overview = 0,
    BlockDiagram = 1,
    LedStatus = 2,
    DataTable = 3,
    RxStatus = 4,
    PllStatus = 5,
    SyncStatus = 6,
    RxMsgStatus = 7,
}

impl PanelState {
    pub const COUNT: usize = 8;

    pub const ALL: [PanelState; Self::COUNT] = [
        PanelState::Overview,
        PanelState::BlockDiagram,
        PanelState::LedStatus,
        PanelState::DataTable,
        PanelState::RxStatus,
        PanelState::PllStatus,
        PanelState::SyncStatus,
        PanelState::RxMsgStatus,
    ];

    /// Last view reachable with `Next`
    pub const LAST_NAVIGABLE: PanelState = PanelState::DataTable;

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Title bar text
    pub const fn caption(self) -> &'static str {
        match self {
            PanelState::Overview => "First Panel",
            PanelState::BlockDiagram => "Block Diagram",
            PanelState::LedStatus => "Status LEDs",
            PanelState::DataTable => "Status Data",
            PanelState::RxStatus => "Rx Status",
            PanelState::PllStatus => "PLL Status",
            PanelState::SyncStatus => "SYNC Status",
            PanelState::RxMsgStatus => "Rx MSG Status",
        }
    }

    /// Detail views are only reached from the block diagram
    pub fn is_detail(self) -> bool {
        self > Self::LAST_NAVIGABLE
    }

    /// Detail views draw a black scope backdrop
    pub fn has_scope(self) -> bool {
        self.is_detail()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for state in PanelState::ALL {
            assert_eq!(PanelState::from_index(state.index()), Some(state));
        }
        assert_eq!(PanelState::from_index(PanelState::COUNT), None);
    }

    #[test]
    fn test_detail_states() {
        assert!(!PanelState::DataTable.is_detail());
        assert!(PanelState::RxStatus.is_detail());
        assert!(PanelState::RxMsgStatus.is_detail());
        assert_eq!(PanelState::default().caption(), "First Panel");
    }
}
