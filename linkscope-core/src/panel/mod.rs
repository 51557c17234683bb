//! Panel navigation
//!
//! ```text
//!   Overview -> BlockDiagram -> LedStatus -> DataTable
//!       ^            |
//!       |            +--> RxStatus | PllStatus | SyncStatus | RxMsgStatus
//!       +---------------------- Previous ---------------------+
//! ```

mod block;
mod buttons;
mod controller;
mod state;

pub use block::{BlockButton, BlockStatus};
pub use buttons::{Button, ButtonMap, Press, DETAIL_VIEWS};
pub use controller::{Affordances, NavEvent, Outcome, PanelController, ToggleButton, Transition};
pub use state::PanelState;
