//! Quartet assembly
//!
//! Reassembles the tagged word stream into 32-bit samples. Runs in the
//! reception interrupt, one call per received word.
//!
//! Rules:
//! - Words must arrive tagged 3, 2, 1, 0. Any other tag aborts the quartet.
//! - A tag-3 word always opens a fresh quartet.
//! - The counters of words 3, 1 and 0 must agree (word 2 is not checked).
//! - Counter 0 has no slot and is rejected.

use crate::word::{Tag, TaggedWord};

/// Number of sample slots addressable by the link
pub const SAMPLE_SLOTS: usize = 128;

/// Reasons a quartet was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FramingError {
    /// A word arrived out of the 3, 2, 1, 0 order
    UnexpectedTag {
        /// Tag the assembler was waiting for
        expected: Tag,
        /// Tag that arrived
        got: Tag,
    },
    /// Counters of words 3, 1 and 0 disagree
    CounterMismatch,
    /// Counter 0 does not address a slot
    ZeroCounter,
}

/// A complete sample ready to be stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    /// Destination slot (`counter - 1`)
    pub slot: u8,
    /// Reassembled value
    pub value: i32,
}

/// State machine for assembling quartets
#[derive(Debug, Clone)]
pub struct QuartetAssembler {
    expected: Tag,
    /// Received words indexed by tag
    words: [TaggedWord; 4],
}

impl Default for QuartetAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl QuartetAssembler {
    /// Create an assembler waiting for a tag-3 word
    pub const fn new() -> Self {
        Self {
            expected: Tag::Three,
            words: [TaggedWord::new(0); 4],
        }
    }

    /// Drop any partial quartet
    pub fn reset(&mut self) {
        self.expected = Tag::Three;
        self.words = [TaggedWord::new(0); 4];
    }

    /// True while no quartet is in flight
    pub fn is_idle(&self) -> bool {
        self.expected == Tag::Three
    }

    /// Feed a single word to the assembler
    ///
    /// Returns `Ok(Some(sample))` when a quartet completes, `Ok(None)` when
    /// more words are needed, or `Err` when the in-flight quartet was dropped.
    pub fn feed(&mut self, word: TaggedWord) -> Result<Option<Sample>, FramingError> {
        let tag = word.tag();

        if tag != self.expected {
            let expected = self.expected;
            self.reset();

            if tag == Tag::Three {
                self.accept(word);
            }

            // Words outside a quartet are noise while hunting for tag 3
            if expected == Tag::Three {
                return Ok(None);
            }
            return Err(FramingError::UnexpectedTag { expected, got: tag });
        }

        self.accept(word);
        if tag != Tag::Zero {
            return Ok(None);
        }

        let [w0, w1, w2, w3] = self.words;
        self.reset();

        let counter = w0.counter();
        if w1.counter() != counter || w3.counter() != counter {
            return Err(FramingError::CounterMismatch);
        }

        let slot = counter.checked_sub(1).ok_or(FramingError::ZeroCounter)?;
        let value = i32::from_le_bytes([w0.byte(), w1.byte(), w2.byte(), w3.byte()]);

        Ok(Some(Sample { slot, value }))
    }

    /// Feed a raw 16-bit word
    pub fn feed_raw(&mut self, raw: u16) -> Result<Option<Sample>, FramingError> {
        self.feed(TaggedWord::new(raw))
    }

    fn accept(&mut self, word: TaggedWord) {
        let tag = word.tag();
        self.words[tag.index()] = word;
        self.expected = tag.next().unwrap_or(Tag::Three);
    }
}
