//! Health classification

/// Three-level status of a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Health {
    #[default]
    Green = 0,
    Yellow = 1,
    Red = 2,
}

impl Health {
    /// Contribution to the system health sum
    pub const fn weight(self) -> u8 {
        self as u8
    }
}

/// How a channel maps its value to a health state
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HealthRule {
    /// Value is shown but never classified
    Unclassified,
    /// Always green
    AlwaysGreen,
    /// Red for any value above zero
    AboveZero,
    /// Red above `red_above`, yellow above `yellow_above`, else green
    Graded { red_above: f32, yellow_above: f32 },
}

impl HealthRule {
    /// Classify a decoded value
    pub fn classify(self, value: f32) -> Option<Health> {
        match self {
            HealthRule::Unclassified => None,
            HealthRule::AlwaysGreen => Some(Health::Green),
            HealthRule::AboveZero if value > 0.0 => Some(Health::Red),
            HealthRule::AboveZero => Some(Health::Green),
            HealthRule::Graded { red_above, .. } if value > red_above => Some(Health::Red),
            HealthRule::Graded { yellow_above, .. } if value > yellow_above => {
                Some(Health::Yellow)
            }
            HealthRule::Graded { .. } => Some(Health::Green),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graded_boundaries() {
        let rule = HealthRule::Graded {
            red_above: 0.0,
            yellow_above: -0.1,
        };
        assert_eq!(rule.classify(0.01), Some(Health::Red));
        assert_eq!(rule.classify(0.0), Some(Health::Yellow));
        assert_eq!(rule.classify(-0.05), Some(Health::Yellow));
        assert_eq!(rule.classify(-0.1), Some(Health::Green));
    }

    #[test]
    fn test_above_zero() {
        assert_eq!(HealthRule::AboveZero.classify(0.0), Some(Health::Green));
        assert_eq!(HealthRule::AboveZero.classify(0.001), Some(Health::Red));
        assert_eq!(HealthRule::AboveZero.classify(-3.0), Some(Health::Green));
    }

    #[test]
    fn test_unclassified_and_green() {
        assert_eq!(HealthRule::Unclassified.classify(100.0), None);
        assert_eq!(HealthRule::AlwaysGreen.classify(100.0), Some(Health::Green));
        assert_eq!(Health::Red.weight(), 2);
    }
}
