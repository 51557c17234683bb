//! Console task
//!
//! Fire-and-forget report of the decoded values and link counters over
//! defmt. Reports that arrive while one is being printed replace each
//! other, so the controller never waits on the console.

use defmt::*;
use portable_atomic::Ordering;

use crate::channels::{CONSOLE, OVERRUNS};

#[embassy_executor::task]
pub async fn console_task() {
    info!("Console task started");

    loop {
        let report = CONSOLE.wait().await;

        for reading in report.telemetry.readings() {
            info!("{} = {}", reading.channel.label(), reading.text.as_str());
        }
        info!("Health sum {}", report.telemetry.health_sum());

        let stats = report.drain.stats;
        info!(
            "Link: {} new, {} committed, {} dropped (tag {}, counter {}, slot {}), {} overruns",
            report.drain.received,
            stats.committed,
            stats.dropped(),
            stats.tag_mismatches,
            stats.counter_mismatches,
            stats.out_of_range,
            OVERRUNS.load(Ordering::Relaxed)
        );
        if report.coalesced > 0 {
            warn!("{} ticks coalesced", report.coalesced);
        }
    }
}
