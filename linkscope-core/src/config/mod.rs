//! Receiver configuration
//!
//! The firmware embeds `receiver.toml` and parses it at boot with
//! [`parse_config`]. Missing keys keep their defaults.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
