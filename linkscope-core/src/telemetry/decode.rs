//! Per-tick decoding of the sample store

use heapless::String;
use libm::{fabsf, log10f};

use super::channel::{Channel, DecodePolicy, DisplayFormat, CHANNEL_COUNT};
use super::fixed::FixedPoint;
use super::health::Health;
use crate::store::SampleStore;

/// Guard keeping `log10` defined at zero
pub const LOG_EPSILON: f32 = 1e-5;

/// Capacity of a rendered value string
pub const VALUE_TEXT_LEN: usize = 16;

/// Shown in place of a value that does not fit its string
pub const OVERFLOW_TEXT: &str = " ovf";

/// Render a split value, or `OVERFLOW_TEXT` when it does not fit
pub fn format_value(fixed: &FixedPoint, format: DisplayFormat) -> String<VALUE_TEXT_LEN> {
    let mut text = String::new();
    let written = fixed.write(
        &mut text,
        format.int_width as usize,
        format.frac_digits,
        format.unit,
    );
    if written.is_err() {
        return String::try_from(OVERFLOW_TEXT).unwrap_or_default();
    }
    text
}

/// One decoded channel
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub channel: Channel,
    /// Scaled physical value
    pub value: f32,
    pub fixed: FixedPoint,
    /// `None` for channels that are not classified
    pub health: Option<Health>,
    /// Value formatted for the display
    pub text: String<VALUE_TEXT_LEN>,
}

impl Reading {
    /// Health, treating unclassified channels as green
    pub fn status(&self) -> Health {
        self.health.unwrap_or_default()
    }
}

/// Every channel decoded from one store snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Telemetry {
    readings: [Reading; CHANNEL_COUNT],
    health_sum: u8,
}

impl Telemetry {
    pub fn get(&self, channel: Channel) -> &Reading {
        &self.readings[channel.index()]
    }

    pub fn health(&self, channel: Channel) -> Health {
        self.get(channel).status()
    }

    pub fn text(&self, channel: Channel) -> &str {
        self.get(channel).text.as_str()
    }

    /// Sum of all classified channel health weights
    pub fn health_sum(&self) -> u8 {
        self.health_sum
    }

    pub fn is_healthy(&self) -> bool {
        self.health_sum == 0
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }
}

/// Converts store slots into readings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryDecoder {
    policy: DecodePolicy,
    noise_offset: f32,
}

impl Default for TelemetryDecoder {
    fn default() -> Self {
        Self::new(DecodePolicy::Logarithmic, 0.0)
    }
}

impl TelemetryDecoder {
    pub const fn new(policy: DecodePolicy, noise_offset: f32) -> Self {
        Self {
            policy,
            noise_offset,
        }
    }

    pub fn policy(&self) -> DecodePolicy {
        self.policy
    }

    /// Scaled value of one channel
    pub fn value(&self, channel: Channel, store: &SampleStore) -> f32 {
        let raw = store.get(channel.slot(self.policy)) as f32;
        let scaled = raw / channel.divisor();

        match (channel, self.policy) {
            (Channel::Agc, DecodePolicy::Logarithmic) => {
                log10f(fabsf(scaled) / 1000.0 + LOG_EPSILON)
            }
            (Channel::Lock, DecodePolicy::Logarithmic) => log10f(fabsf(scaled) + LOG_EPSILON),
            (Channel::Frame, _) => 1.0 - scaled,
            _ => scaled + self.noise_offset * channel.noise_weight(),
        }
    }

    /// Decode, format and classify one channel
    pub fn reading(&self, channel: Channel, store: &SampleStore) -> Reading {
        let value = self.value(channel, store);
        let fixed = FixedPoint::split(value);
        let format = channel.format();

        Reading {
            channel,
            value,
            fixed,
            health: channel.rule(self.policy).classify(value),
            text: format_value(&fixed, format),
        }
    }

    /// Decode every channel
    pub fn decode(&self, store: &SampleStore) -> Telemetry {
        let readings = Channel::ALL.map(|channel| self.reading(channel, store));
        let health_sum = readings
            .iter()
            .filter_map(|r| r.health)
            .map(Health::weight)
            .sum();

        Telemetry {
            readings,
            health_sum,
        }
    }
}
