//! Interrupt-side receiver state

use linkscope_protocol::{FramingError, QuartetAssembler, Sample, TaggedWord};

use crate::store::SampleStore;

/// Running counters of link activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    /// Samples committed to the store
    pub committed: u32,
    /// Quartets dropped for out-of-order tags
    pub tag_mismatches: u32,
    /// Quartets dropped for disagreeing counters
    pub counter_mismatches: u32,
    /// Quartets dropped for addressing no slot
    pub out_of_range: u32,
}

impl LinkStats {
    /// All zero
    pub const fn new() -> Self {
        Self {
            committed: 0,
            tag_mismatches: 0,
            counter_mismatches: 0,
            out_of_range: 0,
        }
    }

    /// Count a dropped quartet
    pub fn record(&mut self, error: FramingError) {
        let counter = match error {
            FramingError::UnexpectedTag { .. } => &mut self.tag_mismatches,
            FramingError::CounterMismatch => &mut self.counter_mismatches,
            FramingError::ZeroCounter => &mut self.out_of_range,
        };
        *counter = counter.wrapping_add(1);
    }

    /// Total quartets dropped
    pub fn dropped(&self) -> u32 {
        self.tag_mismatches
            .wrapping_add(self.counter_mismatches)
            .wrapping_add(self.out_of_range)
    }
}

/// Assembler, store and per-tick count owned by the reception interrupt
#[derive(Debug, Clone)]
pub struct Receiver {
    assembler: QuartetAssembler,
    store: SampleStore,
    /// Samples committed since the last drain
    received: u32,
    stats: LinkStats,
}

impl Default for Receiver {
    fn default() -> Self {
        Self::new()
    }
}

impl Receiver {
    /// Create a receiver with an empty store
    pub const fn new() -> Self {
        Self {
            assembler: QuartetAssembler::new(),
            store: SampleStore::new(),
            received: 0,
            stats: LinkStats::new(),
        }
    }

    /// Process one received word
    ///
    /// Framing errors drop the in-flight quartet and are only counted.
    pub fn on_word(&mut self, word: TaggedWord) -> Option<Sample> {
        match self.assembler.feed(word) {
            Ok(Some(sample)) => {
                if self.store.commit(sample) {
                    self.received = self.received.wrapping_add(1);
                    self.stats.committed = self.stats.committed.wrapping_add(1);
                    Some(sample)
                } else {
                    self.stats.out_of_range = self.stats.out_of_range.wrapping_add(1);
                    None
                }
            }
            Ok(None) => None,
            Err(error) => {
                self.stats.record(error);
                None
            }
        }
    }

    /// Samples committed since the last drain
    pub fn received(&self) -> u32 {
        self.received
    }

    /// Current store contents
    pub fn store(&self) -> &SampleStore {
        &self.store
    }

    /// Replace the store contents (boot-time seeding)
    pub fn seed(&mut self, store: SampleStore) {
        self.store = store;
    }

    /// Link counters since boot
    pub fn stats(&self) -> LinkStats {
        self.stats
    }

    /// Copy the store out and reset the per-tick count
    ///
    /// Returns the number of samples committed since the previous drain.
    pub fn drain_into(&mut self, snapshot: &mut SampleStore) -> u32 {
        snapshot.clone_from(&self.store);
        core::mem::take(&mut self.received)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkscope_protocol::{encode_sample, Tag};

    fn feed(receiver: &mut Receiver, words: &[TaggedWord]) {
        for &word in words {
            receiver.on_word(word);
        }
    }

    #[test]
    fn test_counter_five_lands_in_slot_four() {
        let mut receiver = Receiver::new();
        let words = [
            TaggedWord::from_parts(Tag::Three, 5, 0x04),
            TaggedWord::from_parts(Tag::Two, 5, 0x03),
            TaggedWord::from_parts(Tag::One, 5, 0x02),
            TaggedWord::from_parts(Tag::Zero, 5, 0x01),
        ];
        feed(&mut receiver, &words);

        assert_eq!(receiver.store().get(4), 0x0403_0201);
        assert_eq!(receiver.received(), 1);
    }

    #[test]
    fn test_broken_quartet_not_counted() {
        let mut receiver = Receiver::new();
        let words = [
            TaggedWord::from_parts(Tag::Three, 5, 0x04),
            TaggedWord::from_parts(Tag::Two, 5, 0x03),
            TaggedWord::from_parts(Tag::One, 5, 0x02),
            TaggedWord::from_parts(Tag::One, 5, 0x01),
        ];
        feed(&mut receiver, &words);

        assert_eq!(receiver.received(), 0);
        assert_eq!(receiver.store(), &SampleStore::new());
        assert_eq!(receiver.stats().tag_mismatches, 1);
    }

    #[test]
    fn test_counter_mismatch_leaves_store_unchanged() {
        let mut receiver = Receiver::new();
        feed(&mut receiver, &encode_sample(3, 11));

        let mut words = encode_sample(3, 99);
        words[3] = TaggedWord::from_parts(Tag::Zero, 4, words[3].byte());
        feed(&mut receiver, &words);

        assert_eq!(receiver.store().get(2), 11);
        assert_eq!(receiver.stats().counter_mismatches, 1);
        assert_eq!(receiver.stats().dropped(), 1);
    }

    #[test]
    fn test_drain_resets_count() {
        let mut receiver = Receiver::new();
        feed(&mut receiver, &encode_sample(1, 10));
        feed(&mut receiver, &encode_sample(2, 20));

        let mut snapshot = SampleStore::new();
        assert_eq!(receiver.drain_into(&mut snapshot), 2);
        assert_eq!(snapshot.get(0), 10);
        assert_eq!(snapshot.get(1), 20);

        assert_eq!(receiver.drain_into(&mut snapshot), 0);
        assert_eq!(receiver.stats().committed, 2);
    }
}
