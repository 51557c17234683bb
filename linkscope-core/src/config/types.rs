//! Configuration type definitions

use heapless::String;
use linkscope_hal::{LinkConfig, Mode, WordSize};

use crate::telemetry::{DecodePolicy, TelemetryDecoder};
use crate::tick::DEFAULT_TICK_HZ;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum banner length
pub const MAX_BANNER_LEN: usize = 32;

/// Default banner text
pub const DEFAULT_BANNER: &str = "ZC706 SDR Test v0.1";

/// Highest accepted tick rate
pub const MAX_TICK_HZ: u32 = 1000;

/// SPI link settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkSettings {
    /// SPI mode number (0-3)
    pub spi_mode: u8,
    /// Frame width; only 16 is accepted
    pub word_bits: u8,
    /// Start from the bench test pattern instead of an empty store
    pub demo_seed: bool,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            spi_mode: 0,
            word_bits: 16,
            demo_seed: false,
        }
    }
}

impl LinkSettings {
    /// Peripheral configuration for the chip HAL
    pub fn link_config(&self) -> LinkConfig {
        LinkConfig {
            mode: Mode::from_number(self.spi_mode).unwrap_or(Mode::Mode0),
            word_size: WordSize::Sixteen,
        }
    }
}

/// Tick timer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TickSettings {
    /// Tick rate (1-1000 Hz)
    pub rate_hz: u32,
}

impl Default for TickSettings {
    fn default() -> Self {
        Self {
            rate_hz: DEFAULT_TICK_HZ,
        }
    }
}

/// Decoder settings
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TelemetrySettings {
    pub policy: DecodePolicy,
    /// Added to the noise-sensitive channels (EVM gets a tenth)
    pub noise_offset: f32,
}

impl TelemetrySettings {
    pub fn decoder(&self) -> TelemetryDecoder {
        TelemetryDecoder::new(self.policy, self.noise_offset)
    }
}

/// Display settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplaySettings {
    /// Text of the startup banner
    pub banner: String<MAX_BANNER_LEN>,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        let mut banner = String::new();
        let _ = banner.push_str(DEFAULT_BANNER);
        Self { banner }
    }
}

/// Console output settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConsoleSettings {
    pub enabled: bool,
    /// Report once every this many ticks
    pub every_n_ticks: u32,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            every_n_ticks: 100,
        }
    }
}

/// Complete receiver configuration
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkscopeConfig {
    pub link: LinkSettings,
    pub tick: TickSettings,
    pub telemetry: TelemetrySettings,
    pub display: DisplaySettings,
    pub console: ConsoleSettings,
}

impl LinkscopeConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LinkscopeConfig::new();
        assert_eq!(config.tick.rate_hz, 100);
        assert_eq!(config.telemetry.policy, DecodePolicy::Logarithmic);
        assert_eq!(config.display.banner.as_str(), DEFAULT_BANNER);
        assert_eq!(config.link.link_config(), LinkConfig::default());
        assert!(config.console.enabled);
    }

    #[test]
    fn test_link_config_mode() {
        let link = LinkSettings {
            spi_mode: 3,
            ..Default::default()
        };
        assert_eq!(link.link_config().mode, Mode::Mode3);
    }
}
