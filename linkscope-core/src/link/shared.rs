//! Receiver shared between the SPI interrupt and the consumer loop
//!
//! The interrupt calls [`SharedReceiver::on_word`] for every word it pulls
//! from the FIFO. The consumer calls [`SharedReceiver::drain`] once per
//! tick, which masks reception, copies the store, resets the per-tick count
//! and unmasks again.

use core::cell::RefCell;

use critical_section::Mutex;
use linkscope_hal::InterruptGate;
use linkscope_protocol::{Sample, TaggedWord};

use super::receiver::{LinkStats, Receiver};
use crate::store::SampleStore;

/// Outcome of one drain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrainReport {
    /// Samples committed since the previous drain
    pub received: u32,
    /// Link counters since boot
    pub stats: LinkStats,
}

/// Interrupt-safe wrapper around [`Receiver`]
pub struct SharedReceiver {
    inner: Mutex<RefCell<Receiver>>,
}

impl Default for SharedReceiver {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedReceiver {
    /// Create an empty shared receiver, usable in a `static`
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Receiver::new())),
        }
    }

    /// Interrupt side: process one raw word
    pub fn on_word(&self, raw: u16) -> Option<Sample> {
        critical_section::with(|cs| {
            self.inner
                .borrow_ref_mut(cs)
                .on_word(TaggedWord::new(raw))
        })
    }

    /// Replace the store contents before reception starts
    pub fn seed(&self, store: SampleStore) {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).seed(store));
    }

    /// Consumer side: take a stable snapshot for this tick
    pub fn drain<G: InterruptGate>(&self, gate: &mut G, snapshot: &mut SampleStore) -> DrainReport {
        let _masked = gate.masked();
        critical_section::with(|cs| {
            let mut receiver = self.inner.borrow_ref_mut(cs);
            let received = receiver.drain_into(snapshot);
            DrainReport {
                received,
                stats: receiver.stats(),
            }
        })
    }
}
