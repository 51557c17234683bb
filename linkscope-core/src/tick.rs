//! Periodic tick gate
//!
//! A timer sets the gate; the consumer loop checks it, does one pass of
//! work and clears it. Ticks that land while the gate is already set are
//! coalesced, so a slow pass never queues up a backlog.

use portable_atomic::{AtomicBool, AtomicU32, Ordering};

/// Default tick rate
pub const DEFAULT_TICK_HZ: u32 = 100;

/// Single-flag tick latch shared between timer and consumer
#[derive(Debug)]
pub struct TickGate {
    pending: AtomicBool,
    coalesced: AtomicU32,
}

impl Default for TickGate {
    fn default() -> Self {
        Self::new()
    }
}

impl TickGate {
    /// Create a cleared gate
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
            coalesced: AtomicU32::new(0),
        }
    }

    /// Set the gate (timer side)
    ///
    /// Returns false if the previous tick had not been consumed yet.
    pub fn fire(&self) -> bool {
        let was_pending = self.pending.swap(true, Ordering::AcqRel);
        if was_pending {
            self.coalesced.fetch_add(1, Ordering::Relaxed);
        }
        !was_pending
    }

    /// Check whether a tick is waiting (consumer side)
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Clear the gate after the pass is done
    pub fn clear(&self) {
        self.pending.store(false, Ordering::Release);
    }

    /// Number of ticks merged into an already pending one, then reset
    pub fn take_coalesced(&self) -> u32 {
        self.coalesced.swap(0, Ordering::Relaxed)
    }
}

/// Tick period in milliseconds for a rate in Hz
pub fn period_ms(rate_hz: u32) -> u32 {
    1000 / rate_hz.clamp(1, 1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_and_clear() {
        let gate = TickGate::new();
        assert!(!gate.is_pending());

        assert!(gate.fire());
        assert!(gate.is_pending());

        gate.clear();
        assert!(!gate.is_pending());
    }

    #[test]
    fn test_ticks_coalesce() {
        let gate = TickGate::new();
        assert!(gate.fire());
        assert!(!gate.fire());
        assert!(!gate.fire());

        assert_eq!(gate.take_coalesced(), 2);
        assert_eq!(gate.take_coalesced(), 0);

        // One clear releases all merged ticks at once
        gate.clear();
        assert!(!gate.is_pending());
    }

    #[test]
    fn test_period() {
        assert_eq!(period_ms(DEFAULT_TICK_HZ), 10);
        assert_eq!(period_ms(4), 250);
        assert_eq!(period_ms(0), 1000);
    }
}
