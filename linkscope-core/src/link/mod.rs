//! Link reception
//!
//! The receiver runs in the SPI interrupt and commits samples to the
//! store. The consumer drains it once per tick with reception masked.

pub mod receiver;
pub mod shared;

pub use receiver::{LinkStats, Receiver};
pub use shared::{DrainReport, SharedReceiver};
