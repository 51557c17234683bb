//! Line-based parser for `receiver.toml`
//!
//! Handles the subset the receiver needs: `[section]` headers,
//! `key = value` pairs with string, integer, float and boolean values,
//! and `#` comments. Unknown sections and keys are rejected.

use heapless::String;

use super::types::{LinkscopeConfig, MAX_TICK_HZ};
use crate::telemetry::DecodePolicy;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection { line: usize },
    /// Line is not `key = value`
    InvalidLine { line: usize },
    /// Key not known in its section
    UnknownKey { line: usize },
    /// Value has the wrong type
    InvalidValue { line: usize },
    /// Value outside its allowed range
    OutOfRange { line: usize },
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Link,
    Tick,
    Telemetry,
    Display,
    Console,
}

/// Parse TOML text into a configuration
pub fn parse_config(input: &str) -> Result<LinkscopeConfig, ParseError> {
    let mut config = LinkscopeConfig::new();
    let mut section = Section::Root;

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            let header = strip_comment(line)
                .strip_prefix('[')
                .and_then(|h| h.strip_suffix(']'))
                .ok_or(ParseError::InvalidSection { line: line_no })?;
            section = parse_section_header(header)
                .ok_or(ParseError::InvalidSection { line: line_no })?;
            continue;
        }

        let (key, value) =
            parse_key_value(line).ok_or(ParseError::InvalidLine { line: line_no })?;
        apply_value(section, key, value, &mut config).map_err(|kind| kind.at(line_no))?;
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Option<Section> {
    match header.trim() {
        "link" => Some(Section::Link),
        "tick" => Some(Section::Tick),
        "telemetry" => Some(Section::Telemetry),
        "display" => Some(Section::Display),
        "console" => Some(Section::Console),
        _ => None,
    }
}

/// Drop a trailing `#` comment that is not inside quotes
fn strip_comment(s: &str) -> &str {
    match s.find('#') {
        Some(hash_pos) if s[..hash_pos].matches('"').count() % 2 == 0 => s[..hash_pos].trim(),
        _ => s,
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(line[eq_pos + 1..].trim());

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Error kind before the line number is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueError {
    UnknownKey,
    Invalid,
    OutOfRange,
}

impl ValueError {
    fn at(self, line: usize) -> ParseError {
        match self {
            ValueError::UnknownKey => ParseError::UnknownKey { line },
            ValueError::Invalid => ParseError::InvalidValue { line },
            ValueError::OutOfRange => ParseError::OutOfRange { line },
        }
    }
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> Result<&str, ValueError> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ValueError::Invalid)
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ValueError> {
    value.parse().map_err(|_| ValueError::Invalid)
}

fn parse_float(value: &str) -> Result<f32, ValueError> {
    let v: f32 = value.parse().map_err(|_| ValueError::Invalid)?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ValueError::Invalid)
    }
}

fn parse_bool(value: &str) -> Result<bool, ValueError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ValueError::Invalid),
    }
}

fn in_range<T: PartialOrd>(v: T, min: T, max: T) -> Result<T, ValueError> {
    if v >= min && v <= max {
        Ok(v)
    } else {
        Err(ValueError::OutOfRange)
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut LinkscopeConfig,
) -> Result<(), ValueError> {
    match (section, key) {
        (Section::Link, "spi_mode") => {
            config.link.spi_mode = in_range(parse_int(value)?, 0, 3)?;
        }
        (Section::Link, "word_bits") => {
            config.link.word_bits = in_range(parse_int(value)?, 16, 16)?;
        }
        (Section::Link, "demo_seed") => config.link.demo_seed = parse_bool(value)?,
        (Section::Tick, "rate_hz") => {
            config.tick.rate_hz = in_range(parse_int(value)?, 1, MAX_TICK_HZ)?;
        }
        (Section::Telemetry, "policy") => {
            config.telemetry.policy =
                DecodePolicy::from_name(parse_string(value)?).ok_or(ValueError::Invalid)?;
        }
        (Section::Telemetry, "noise_offset") => {
            config.telemetry.noise_offset = parse_float(value)?;
        }
        (Section::Display, "banner") => {
            config.display.banner =
                String::try_from(parse_string(value)?).map_err(|_| ValueError::OutOfRange)?;
        }
        (Section::Console, "enabled") => config.console.enabled = parse_bool(value)?,
        (Section::Console, "every_n_ticks") => {
            config.console.every_n_ticks = in_range(parse_int(value)?, 1, u32::MAX)?;
        }
        _ => return Err(ValueError::UnknownKey),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_default() {
        assert_eq!(parse_config("").unwrap(), LinkscopeConfig::default());
        assert_eq!(
            parse_config("# only a comment\n\n").unwrap(),
            LinkscopeConfig::default()
        );
    }

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
[link]
spi_mode = 0
word_bits = 16
demo_seed = true   # bench mode

[tick]
rate_hz = 50

[telemetry]
policy = "linear"
noise_offset = 0.25

[display]
banner = "Bench #2"

[console]
enabled = false
every_n_ticks = 10
"#,
        )
        .unwrap();

        assert!(config.link.demo_seed);
        assert_eq!(config.tick.rate_hz, 50);
        assert_eq!(config.telemetry.policy, DecodePolicy::Linear);
        assert_eq!(config.telemetry.noise_offset, 0.25);
        assert_eq!(config.display.banner.as_str(), "Bench #2");
        assert!(!config.console.enabled);
        assert_eq!(config.console.every_n_ticks, 10);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = parse_config("[tick]\nrate = 10\n").unwrap_err();
        assert_eq!(err, ParseError::UnknownKey { line: 2 });
    }

    #[test]
    fn test_unknown_section_rejected() {
        let err = parse_config("[motors]\n").unwrap_err();
        assert_eq!(err, ParseError::InvalidSection { line: 1 });
    }

    #[test]
    fn test_keys_outside_section_rejected() {
        let err = parse_config("rate_hz = 10\n").unwrap_err();
        assert_eq!(err, ParseError::UnknownKey { line: 1 });
    }

    #[test]
    fn test_range_checks() {
        assert_eq!(
            parse_config("[tick]\nrate_hz = 0").unwrap_err(),
            ParseError::OutOfRange { line: 2 }
        );
        assert_eq!(
            parse_config("[tick]\nrate_hz = 1001").unwrap_err(),
            ParseError::OutOfRange { line: 2 }
        );
        assert_eq!(
            parse_config("[link]\nword_bits = 8").unwrap_err(),
            ParseError::OutOfRange { line: 2 }
        );
        assert_eq!(
            parse_config("[link]\nspi_mode = 4").unwrap_err(),
            ParseError::OutOfRange { line: 2 }
        );
    }

    #[test]
    fn test_bad_values() {
        assert_eq!(
            parse_config("[telemetry]\npolicy = \"cubic\"").unwrap_err(),
            ParseError::InvalidValue { line: 2 }
        );
        assert_eq!(
            parse_config("[console]\nenabled = yes").unwrap_err(),
            ParseError::InvalidValue { line: 2 }
        );
        assert_eq!(
            parse_config("[display]\nbanner = unquoted").unwrap_err(),
            ParseError::InvalidValue { line: 2 }
        );
        assert_eq!(
            parse_config("[tick]\nrate_hz").unwrap_err(),
            ParseError::InvalidLine { line: 2 }
        );
    }

    #[test]
    fn test_strip_comment_respects_quotes() {
        assert_eq!(strip_comment("\"a # b\""), "\"a # b\"");
        assert_eq!(strip_comment("42 # answer"), "42");
        assert_eq!(strip_comment("[tick] # timer"), "[tick]");
    }
}
