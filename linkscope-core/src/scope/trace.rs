use super::buffer::{ScopeBuffer, ScopeRange};
use crate::telemetry::Channel;

/// The standard traces shown on the detail panels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Trace {
    Agc,
    Lock,
    Hold,
    Frame,
    Crc,
}

impl Trace {
    pub const ALL: [Trace; 5] = [Trace::Agc, Trace::Lock, Trace::Hold, Trace::Frame, Trace::Crc];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn range(self) -> ScopeRange {
        match self {
            Trace::Agc => ScopeRange::new(-0.5, 0.5, 136, 186),
            Trace::Lock => ScopeRange::new(-5.0, 5.0, 85, 132),
            Trace::Hold => ScopeRange::new(0.0, 1.0, 138, 186),
            Trace::Frame | Trace::Crc => ScopeRange::new(0.0, 1.0, 136, 186),
        }
    }

    /// Row every column starts at
    pub const fn fill(self) -> u8 {
        match self {
            Trace::Agc => 161,
            Trace::Lock => 132,
            Trace::Hold | Trace::Frame | Trace::Crc => 186,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Trace::Agc => "AGC Graph",
            Trace::Lock => "Lock Graph",
            Trace::Hold => "Hold Graph",
            Trace::Frame => "Frame Graph",
            Trace::Crc => "CRC Graph",
        }
    }

    /// Channel feeding this trace
    pub const fn channel(self) -> Channel {
        match self {
            Trace::Agc => Channel::Agc,
            Trace::Lock => Channel::Lock,
            Trace::Hold => Channel::Hold,
            Trace::Frame => Channel::Frame,
            Trace::Crc => Channel::Crc,
        }
    }

    pub const fn buffer(self) -> ScopeBuffer {
        ScopeBuffer::new(self.range(), self.fill())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rows_inside_band() {
        for trace in Trace::ALL {
            let range = trace.range();
            assert!(trace.fill() >= range.row_min && trace.fill() <= range.row_max);
            assert_eq!(trace.buffer().latest(), trace.fill());
        }
    }

    #[test]
    fn test_lock_trace() {
        assert_eq!(Trace::Lock.label(), "Lock Graph");
        assert_eq!(Trace::Lock.channel(), Channel::Lock);
        assert_eq!(Trace::Lock.range().row(0.0), 108);
    }
}
