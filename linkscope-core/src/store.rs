//! Latest-value sample store
//!
//! One `i32` per slot, overwritten in place by the receiver. There is no
//! history beyond the most recent value of each slot.

use linkscope_protocol::{Sample, SAMPLE_SLOTS};

/// Fixed-capacity array of the latest committed sample per slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleStore {
    slots: [i32; SAMPLE_SLOTS],
}

impl Default for SampleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleStore {
    /// Create a store with every slot zeroed
    pub const fn new() -> Self {
        Self {
            slots: [0; SAMPLE_SLOTS],
        }
    }

    /// Store pre-loaded with the bench test pattern
    ///
    /// Lets the panels show plausible data before the link is running.
    pub fn demo() -> Self {
        let mut store = Self::new();
        let pattern: [(usize, i32); 13] = [
            (0, 0b1111_0000_1111_0000),
            (1, 0b1100_1100_1111_0000),
            (2, 0b1111_0000_1100_1100),
            (3, 0b1010_1010_1111_0000),
            (4, 0b1010_1010_1100_1100),
            (5, 0b1111_0000_1111_0000),
            (6, 0b1100_1100_1111_0000),
            (7, 0b1111_0000_1100_1100),
            (8, 0b1010_1010_1111_0000),
            (9, 0b1010_1010_1100_1100),
            (10, 0b1111_0000_1111_0000),
            (11, 0b1100_1100_1111_0000),
            (13, 0b1010_1010_1111_0000),
        ];
        for (slot, value) in pattern {
            store.slots[slot] = value;
        }

        store.slots[12] = 0b1_0000_1111_0000_1100_1100; // AGC
        store.slots[10] = 0b1000_0000_0000_0000; // Lock (linear)
        store.slots[21] = 26214; // Lock average, 0.8 full scale
        store.slots[22] = 0; // Hold
        store.slots[14] = 0; // CRC
        store.slots[24] = 0b1000_0000_0000_0000; // Frame
        store
    }

    /// Read a slot; out-of-range slots read as zero
    pub fn get(&self, slot: usize) -> i32 {
        self.slots.get(slot).copied().unwrap_or(0)
    }

    /// Overwrite a slot
    ///
    /// Returns false if the slot is out of range.
    pub fn set(&mut self, slot: usize, value: i32) -> bool {
        match self.slots.get_mut(slot) {
            Some(entry) => {
                *entry = value;
                true
            }
            None => false,
        }
    }

    /// Commit an assembled sample
    pub fn commit(&mut self, sample: Sample) -> bool {
        self.set(sample.slot as usize, sample.value)
    }

    /// All slots in order
    pub fn as_slice(&self) -> &[i32] {
        &self.slots
    }
}
