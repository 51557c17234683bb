//! Telemetry channel table
//!
//! Each channel reads one store slot and carries its scale, display format
//! and health rule. The AGC and Lock channels depend on the decode policy.

use super::health::HealthRule;

/// Number of telemetry channels
pub const CHANNEL_COUNT: usize = 9;

/// Full-scale divisor of the level channels
const LEVEL_SCALE: f32 = 32768.0;
/// Full-scale divisor of the quality channels
const QUALITY_SCALE: f32 = 16384.0;

/// AGC/Lock decoding variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DecodePolicy {
    /// `log10` of the magnitude, thresholds 0.0 / -0.1
    #[default]
    Logarithmic,
    /// Plain scaled value, thresholds 1.0 / 10^-0.1
    Linear,
}

impl DecodePolicy {
    /// Parse a policy name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "logarithmic" => Some(DecodePolicy::Logarithmic),
            "linear" => Some(DecodePolicy::Linear),
            _ => None,
        }
    }

    /// Red/yellow thresholds for the graded channels
    pub fn thresholds(self) -> (f32, f32) {
        match self {
            DecodePolicy::Logarithmic => (0.0, -0.1),
            // 10^-0.1
            DecodePolicy::Linear => (1.0, 0.794_328_2),
        }
    }
}

/// Display layout of a value string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayFormat {
    /// Minimum width of the integer field
    pub int_width: u8,
    /// Fraction digits shown (1-3)
    pub frac_digits: u8,
    /// Unit suffix
    pub unit: &'static str,
}

impl DisplayFormat {
    const fn new(int_width: u8, frac_digits: u8, unit: &'static str) -> Self {
        Self {
            int_width,
            frac_digits,
            unit,
        }
    }
}

/// Telemetry channels in table order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Agc,
    Lock,
    Hold,
    Evm,
    Frame,
    Crc,
    Ber,
    Temp2,
    TempInt,
}

impl Channel {
    /// Every channel, indexed by [`Channel::index`]
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::Agc,
        Channel::Lock,
        Channel::Hold,
        Channel::Evm,
        Channel::Frame,
        Channel::Crc,
        Channel::Ber,
        Channel::Temp2,
        Channel::TempInt,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short label used by the LED and data panels
    pub const fn label(self) -> &'static str {
        match self {
            Channel::Agc => "AGC",
            Channel::Lock => "Lock",
            Channel::Hold => "HOLD",
            Channel::Evm => "EVM",
            Channel::Frame => "FRAME",
            Channel::Crc => "CRC",
            Channel::Ber => "BER",
            Channel::Temp2 => "Temp2",
            Channel::TempInt => "TempInt",
        }
    }

    /// Store slot read by this channel
    pub const fn slot(self, policy: DecodePolicy) -> usize {
        match self {
            Channel::Agc => 12,
            Channel::Lock => match policy {
                DecodePolicy::Logarithmic => 21,
                DecodePolicy::Linear => 10,
            },
            Channel::Hold => 22,
            Channel::Evm => 3,
            Channel::Frame => 24,
            Channel::Crc => 14,
            Channel::Ber => 6,
            Channel::Temp2 => 7,
            Channel::TempInt => 8,
        }
    }

    /// Full-scale divisor
    pub const fn divisor(self) -> f32 {
        match self {
            Channel::Evm | Channel::Ber | Channel::Temp2 | Channel::TempInt => QUALITY_SCALE,
            _ => LEVEL_SCALE,
        }
    }

    /// Multiplier applied to the configured noise offset
    pub const fn noise_weight(self) -> f32 {
        match self {
            Channel::Evm => 0.1,
            Channel::Ber | Channel::Temp2 | Channel::TempInt => 1.0,
            _ => 0.0,
        }
    }

    pub const fn format(self) -> DisplayFormat {
        match self {
            Channel::Agc => DisplayFormat::new(3, 3, "dB"),
            Channel::Lock => DisplayFormat::new(2, 1, "dB"),
            Channel::Hold | Channel::Evm => DisplayFormat::new(2, 2, ""),
            Channel::Frame | Channel::Crc => DisplayFormat::new(2, 1, ""),
            Channel::Ber => DisplayFormat::new(3, 1, ""),
            Channel::Temp2 | Channel::TempInt => DisplayFormat::new(2, 2, ""),
        }
    }

    /// Health rule under the given policy
    pub fn rule(self, policy: DecodePolicy) -> HealthRule {
        match self {
            Channel::Agc | Channel::Lock => {
                let (red_above, yellow_above) = policy.thresholds();
                HealthRule::Graded {
                    red_above,
                    yellow_above,
                }
            }
            Channel::Hold | Channel::Frame | Channel::Crc => HealthRule::AboveZero,
            Channel::Evm | Channel::Ber => HealthRule::AlwaysGreen,
            Channel::Temp2 | Channel::TempInt => HealthRule::Unclassified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_index_order() {
        for (i, channel) in Channel::ALL.iter().enumerate() {
            assert_eq!(channel.index(), i);
        }
    }

    #[test]
    fn test_lock_slot_follows_policy() {
        assert_eq!(Channel::Lock.slot(DecodePolicy::Logarithmic), 21);
        assert_eq!(Channel::Lock.slot(DecodePolicy::Linear), 10);
        assert_eq!(Channel::Agc.slot(DecodePolicy::Linear), 12);
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(DecodePolicy::from_name("linear"), Some(DecodePolicy::Linear));
        assert_eq!(
            DecodePolicy::from_name("logarithmic"),
            Some(DecodePolicy::Logarithmic)
        );
        assert_eq!(DecodePolicy::from_name("log"), None);
    }

    #[test]
    fn test_noise_only_on_quality_channels() {
        assert_eq!(Channel::Agc.noise_weight(), 0.0);
        assert_eq!(Channel::Evm.noise_weight(), 0.1);
        assert_eq!(Channel::Temp2.divisor(), 16384.0);
    }
}
