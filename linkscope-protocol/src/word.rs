//! Tagged word layout
//!
//! - BYTE (bits 0-7): one byte of the sample payload
//! - TAG (bits 8-9): byte position, 3 = most significant
//! - COUNTER (bits 10-15): slot number plus one

/// Mask of the tag bits
pub const TAG_MASK: u16 = 0x0300;

/// Bit offset of the tag
pub const TAG_SHIFT: u16 = 8;

/// Bit offset of the counter
pub const COUNTER_SHIFT: u16 = 10;

/// Largest counter a word can carry
pub const MAX_COUNTER: u8 = 0x3F;

/// Position tag of a word within its quartet
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tag {
    /// Least significant byte, last word of a quartet
    Zero,
    /// Second byte
    One,
    /// Third byte
    Two,
    /// Most significant byte, opens a quartet
    Three,
}

impl Tag {
    /// Decode the two tag bits
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Tag::Zero,
            1 => Tag::One,
            2 => Tag::Two,
            _ => Tag::Three,
        }
    }

    /// Tag value (0-3), also the byte index within the sample
    pub fn index(self) -> usize {
        match self {
            Tag::Zero => 0,
            Tag::One => 1,
            Tag::Two => 2,
            Tag::Three => 3,
        }
    }

    /// Tag expected after this one, `None` once the quartet is complete
    pub fn next(self) -> Option<Self> {
        match self {
            Tag::Three => Some(Tag::Two),
            Tag::Two => Some(Tag::One),
            Tag::One => Some(Tag::Zero),
            Tag::Zero => None,
        }
    }
}

/// One 16-bit word as received from the link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TaggedWord(u16);

impl TaggedWord {
    /// Wrap a raw received word
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Build a word from its fields; the counter is truncated to 6 bits
    pub fn from_parts(tag: Tag, counter: u8, byte: u8) -> Self {
        let counter = (counter & MAX_COUNTER) as u16;
        let tag = tag.index() as u16;
        Self((counter << COUNTER_SHIFT) | (tag << TAG_SHIFT) | byte as u16)
    }

    /// The raw 16-bit value
    pub fn raw(self) -> u16 {
        self.0
    }

    /// Position tag (bits 8-9)
    pub fn tag(self) -> Tag {
        Tag::from_bits(((self.0 & TAG_MASK) >> TAG_SHIFT) as u8)
    }

    /// Slot counter (bits 10-15)
    pub fn counter(self) -> u8 {
        (self.0 >> COUNTER_SHIFT) as u8
    }

    /// Payload byte (bits 0-7)
    pub fn byte(self) -> u8 {
        (self.0 & 0x00FF) as u8
    }
}

impl From<u16> for TaggedWord {
    fn from(raw: u16) -> Self {
        Self::new(raw)
    }
}

/// Encode a sample as the quartet a transmitter sends, tag 3 first
pub fn encode_sample(counter: u8, value: i32) -> [TaggedWord; 4] {
    let [b0, b1, b2, b3] = value.to_le_bytes();
    [
        TaggedWord::from_parts(Tag::Three, counter, b3),
        TaggedWord::from_parts(Tag::Two, counter, b2),
        TaggedWord::from_parts(Tag::One, counter, b1),
        TaggedWord::from_parts(Tag::Zero, counter, b0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_extraction() {
        // counter 5, tag 2, byte 0xA7
        let word = TaggedWord::new((5 << 10) | 0x0200 | 0xA7);
        assert_eq!(word.counter(), 5);
        assert_eq!(word.tag(), Tag::Two);
        assert_eq!(word.byte(), 0xA7);
    }

    #[test]
    fn test_from_parts_layout() {
        let word = TaggedWord::from_parts(Tag::Three, 1, 0x04);
        assert_eq!(word.raw(), 0x0704);
    }

    #[test]
    fn test_counter_truncated_to_six_bits() {
        let word = TaggedWord::from_parts(Tag::Zero, 0xFF, 0);
        assert_eq!(word.counter(), MAX_COUNTER);
        assert_eq!(word.tag(), Tag::Zero);
    }

    #[test]
    fn test_tag_sequence() {
        let mut tag = Some(Tag::Three);
        let mut seen = 0;
        while let Some(t) = tag {
            assert_eq!(t.index(), 3 - seen);
            seen += 1;
            tag = t.next();
        }
        assert_eq!(seen, 4);
    }

    #[test]
    fn test_encode_sample_order() {
        let words = encode_sample(5, 0x0403_0201);
        let bytes: [u8; 4] = [words[0].byte(), words[1].byte(), words[2].byte(), words[3].byte()];
        assert_eq!(bytes, [0x04, 0x03, 0x02, 0x01]);
        assert!(words.iter().all(|w| w.counter() == 5));
    }
}
