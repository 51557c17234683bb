//! Inter-task communication
//!
//! Statics shared between the SPI1 interrupt and the Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use portable_atomic::AtomicU32;

use linkscope_core::link::{DrainReport, SharedReceiver};
use linkscope_core::panel::Press;
use linkscope_core::telemetry::Telemetry;
use linkscope_core::tick::TickGate;

/// Channel capacity for button presses
const INPUT_CHANNEL_SIZE: usize = 8;

/// Assembler and store fed by the SPI1 interrupt
pub static RECEIVER: SharedReceiver = SharedReceiver::new();

/// Receive FIFO overruns seen by the SPI1 interrupt
pub static OVERRUNS: AtomicU32 = AtomicU32::new(0);

/// Latch set by the tick task, cleared by the controller after its pass
pub static TICK_GATE: TickGate = TickGate::new();

/// Wakes the controller when the tick gate is set
pub static TICK_SIGNAL: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Debounced presses from the buttons
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, Press, INPUT_CHANNEL_SIZE> =
    Channel::new();

/// One console report
pub struct ConsoleReport {
    pub telemetry: Telemetry,
    pub drain: DrainReport,
    /// Ticks merged because a pass overran its period
    pub coalesced: u32,
}

/// Latest report for the console task; older unread reports are replaced
pub static CONSOLE: Signal<CriticalSectionRawMutex, ConsoleReport> = Signal::new();
