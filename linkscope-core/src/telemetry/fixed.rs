//! Integer/fraction split for display
//!
//! Values are shown as `<int>.<frac>` with the fraction taken to three
//! decimals and then truncated to the digits a channel displays. The sign
//! is carried separately so `-0.5` still shows its minus sign.

use core::fmt::{self, Write};

/// A value split into sign, integer part and a 3-decimal fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FixedPoint {
    /// The value was below zero
    pub negative: bool,
    /// Integer part, truncated toward zero
    pub integer: i32,
    /// Thousandths, always 0..=999
    pub fraction: u16,
}

impl FixedPoint {
    /// Split a value into integer part and non-negative thousandths
    pub fn split(value: f32) -> Self {
        let integer = value as i32;
        let milli = (value * 1000.0) as i64;
        let fraction = (milli - integer as i64 * 1000).unsigned_abs().min(999) as u16;

        Self {
            negative: value < 0.0,
            integer,
            fraction,
        }
    }

    /// True when the integer part alone would hide the minus sign
    pub fn needs_minus_fixup(&self) -> bool {
        self.negative && self.integer == 0
    }

    /// Rebuild the value from its parts
    pub fn to_f32(&self) -> f32 {
        let magnitude = self.integer.unsigned_abs() as f32 + self.fraction as f32 / 1000.0;
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Fraction truncated to `digits` decimals (0-3)
    pub fn fraction_digits(&self, digits: u8) -> u16 {
        match digits {
            0 => 0,
            1 => self.fraction / 100,
            2 => self.fraction / 10,
            _ => self.fraction,
        }
    }

    /// Write as `" <int>.<frac><unit>"`, integer right-aligned to `int_width`
    pub fn write<W: Write>(
        &self,
        out: &mut W,
        int_width: usize,
        frac_digits: u8,
        unit: &str,
    ) -> fmt::Result {
        let frac = self.fraction_digits(frac_digits);
        let digits = frac_digits.min(3) as usize;

        if self.needs_minus_fixup() {
            write!(out, " {:>int_width$}", "-0")?;
        } else {
            write!(out, " {:>int_width$}", self.integer)?;
        }
        if digits > 0 {
            write!(out, ".{:0digits$}", frac)?;
        }
        out.write_str(unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::String;
    use proptest::prelude::*;

    fn render(value: f32, width: usize, digits: u8, unit: &str) -> String<16> {
        let mut s = String::new();
        FixedPoint::split(value).write(&mut s, width, digits, unit).unwrap();
        s
    }

    #[test]
    fn test_split_positive() {
        let fp = FixedPoint::split(12.3456);
        assert!(!fp.negative);
        assert_eq!(fp.integer, 12);
        assert_eq!(fp.fraction, 345);
    }

    #[test]
    fn test_split_negative_keeps_fraction_positive() {
        let fp = FixedPoint::split(-2.25);
        assert!(fp.negative);
        assert_eq!(fp.integer, -2);
        assert_eq!(fp.fraction, 250);
        assert!(!fp.needs_minus_fixup());
    }

    #[test]
    fn test_zero() {
        let fp = FixedPoint::split(0.0);
        assert_eq!(fp, FixedPoint::default());
        assert!(!fp.needs_minus_fixup());
    }

    #[test]
    fn test_minus_fixup_only_for_small_negatives() {
        assert!(FixedPoint::split(-0.5).needs_minus_fixup());
        assert!(!FixedPoint::split(-1.5).needs_minus_fixup());
        assert!(!FixedPoint::split(0.5).needs_minus_fixup());
    }

    #[test]
    fn test_render_formats() {
        assert_eq!(render(-4.0, 3, 3, "dB").as_str(), "  -4.000dB");
        assert_eq!(render(-0.25, 3, 3, "dB").as_str(), "  -0.250dB");
        assert_eq!(render(-0.25, 2, 1, "dB").as_str(), " -0.2dB");
        assert_eq!(render(0.5, 2, 2, "").as_str(), "  0.50");
        assert_eq!(render(1.0, 3, 1, "").as_str(), "   1.0");
    }

    proptest! {
        #[test]
        fn prop_split_reconstructs(value in -1000.0f32..1000.0) {
            let fp = FixedPoint::split(value);
            prop_assert!(fp.fraction < 1000);
            prop_assert!((fp.to_f32() - value).abs() <= 0.0015);
            prop_assert_eq!(fp.needs_minus_fixup(), value < 0.0 && fp.integer == 0);
        }
    }
}
