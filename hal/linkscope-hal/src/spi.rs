//! SPI slave link abstractions
//!
//! The telemetry source is the SPI master; this side only listens.
//! Chip HALs configure their peripheral from a [`LinkConfig`] and hand
//! out received words through [`WordSource`].

/// Source of words received on an SPI slave link
///
/// Called from the reception interrupt, so implementations must not block.
pub trait WordSource {
    /// Error type for link operations
    type Error;

    /// Take one received word, if the receive FIFO holds one
    fn read_word(&mut self) -> Option<u16>;

    /// Check for and clear a receive overrun
    fn take_overrun(&mut self) -> Result<(), Self::Error>;
}

/// SPI slave link configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkConfig {
    /// Clock polarity and phase
    pub mode: Mode,
    /// Bits per frame
    pub word_size: WordSize,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Mode0,
            word_size: WordSize::Sixteen,
        }
    }
}

impl LinkConfig {
    /// Clock polarity for the configured mode
    pub fn polarity(&self) -> Polarity {
        let (polarity, _) = self.mode.into();
        polarity
    }

    /// Clock phase for the configured mode
    pub fn phase(&self) -> Phase {
        let (_, phase) = self.mode.into();
        phase
    }
}

/// Frame width of the link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WordSize {
    /// 8-bit frames
    Eight,
    /// 16-bit frames (the telemetry link)
    Sixteen,
}

impl WordSize {
    /// Width in bits
    pub fn bits(self) -> u8 {
        match self {
            WordSize::Eight => 8,
            WordSize::Sixteen => 16,
        }
    }
}

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}

/// SPI mode (combined polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

impl Mode {
    /// Mode from its conventional number (0-3)
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            0 => Some(Mode::Mode0),
            1 => Some(Mode::Mode1),
            2 => Some(Mode::Mode2),
            3 => Some(Mode::Mode3),
            _ => None,
        }
    }

    /// Conventional mode number
    pub fn number(self) -> u8 {
        match self {
            Mode::Mode0 => 0,
            Mode::Mode1 => 1,
            Mode::Mode2 => 2,
            Mode::Mode3 => 3,
        }
    }
}

impl From<Mode> for (Polarity, Phase) {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Mode0 => (Polarity::IdleLow, Phase::CaptureOnFirstTransition),
            Mode::Mode1 => (Polarity::IdleLow, Phase::CaptureOnSecondTransition),
            Mode::Mode2 => (Polarity::IdleHigh, Phase::CaptureOnFirstTransition),
            Mode::Mode3 => (Polarity::IdleHigh, Phase::CaptureOnSecondTransition),
        }
    }
}
