//! Tick task
//!
//! Sets the tick gate at the configured rate and wakes the controller.

use defmt::*;
use embassy_time::{Duration, Ticker};

use linkscope_core::tick::period_ms;

use crate::channels::{TICK_GATE, TICK_SIGNAL};

#[embassy_executor::task]
pub async fn tick_task(rate_hz: u32) {
    let period = period_ms(rate_hz);
    info!("Tick task started ({} ms)", period);

    let mut ticker = Ticker::every(Duration::from_millis(period as u64));

    loop {
        ticker.next().await;

        if !TICK_GATE.fire() {
            trace!("Tick coalesced");
        }
        TICK_SIGNAL.signal(());
    }
}
