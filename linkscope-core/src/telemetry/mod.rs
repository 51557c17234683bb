//! Telemetry decoding
//!
//! Turns raw store slots into scaled values, display strings and
//! green/yellow/red health states.

pub mod channel;
pub mod decode;
pub mod fixed;
pub mod health;

pub use channel::{Channel, DecodePolicy, DisplayFormat, CHANNEL_COUNT};
pub use decode::{Reading, Telemetry, TelemetryDecoder, LOG_EPSILON, VALUE_TEXT_LEN};
pub use fixed::FixedPoint;
pub use health::{Health, HealthRule};
