//! Build script for linkscope-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates receiver.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys accepted in each section, with their expected kind
const SCHEMA: &[(&str, &[(&str, Kind)])] = &[
    (
        "link",
        &[
            ("spi_mode", Kind::Int(0, 3)),
            ("word_bits", Kind::Int(16, 16)),
            ("demo_seed", Kind::Bool),
        ],
    ),
    ("tick", &[("rate_hz", Kind::Int(1, 1000))]),
    (
        "telemetry",
        &[
            ("policy", Kind::OneOf(&["logarithmic", "linear"])),
            ("noise_offset", Kind::Float),
        ],
    ),
    ("display", &[("banner", Kind::Text(32))]),
    (
        "console",
        &[
            ("enabled", Kind::Bool),
            ("every_n_ticks", Kind::Int(1, u32::MAX as i64)),
        ],
    ),
];

#[derive(Clone, Copy)]
enum Kind {
    Int(i64, i64),
    Float,
    Bool,
    Text(usize),
    OneOf(&'static [&'static str]),
}

fn main() {
    setup_linker();
    validate_config();

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate receiver.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=receiver.toml");

    let config_path = Path::new("receiver.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: receiver.toml not found!                                 ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds receiver.toml as its configuration.         ║\n\
            ║  Please create one in the linkscope-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read receiver.toml                             ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in receiver.toml                     ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let errors = check_schema(&config);
    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid receiver configuration                           ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=receiver.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check every section and key against [`SCHEMA`]
fn check_schema(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let table = match config.as_table() {
        Some(t) => t,
        None => return errors,
    };

    for (section, body) in table {
        let keys = match SCHEMA.iter().find(|(name, _)| name == section) {
            Some((_, keys)) => keys,
            None => {
                errors.push(format!("unknown section [{}]", section));
                continue;
            }
        };

        let body = match body.as_table() {
            Some(t) => t,
            None => {
                errors.push(format!("[{}] must be a table", section));
                continue;
            }
        };

        for (key, value) in body {
            match keys.iter().find(|(name, _)| name == key) {
                Some((_, kind)) => {
                    if let Some(problem) = check_value(value, *kind) {
                        errors.push(format!("[{}] {} {}", section, key, problem));
                    }
                }
                None => errors.push(format!("[{}] unknown key '{}'", section, key)),
            }
        }
    }

    errors
}

fn check_value(value: &toml::Value, kind: Kind) -> Option<String> {
    match (kind, value) {
        (Kind::Int(min, max), toml::Value::Integer(n)) => {
            if *n < min || *n > max {
                Some(format!("must be {}-{}", min, max))
            } else {
                None
            }
        }
        (Kind::Float, toml::Value::Float(_)) | (Kind::Float, toml::Value::Integer(_)) => None,
        (Kind::Bool, toml::Value::Boolean(_)) => None,
        (Kind::Text(max), toml::Value::String(s)) => {
            if s.len() > max {
                Some(format!("must be at most {} characters", max))
            } else {
                None
            }
        }
        (Kind::OneOf(options), toml::Value::String(s)) => {
            if options.contains(&s.as_str()) {
                None
            } else {
                Some(format!("must be one of {:?}", options))
            }
        }
        (Kind::Int(..), _) => Some("must be an integer".to_string()),
        (Kind::Float, _) => Some("must be a number".to_string()),
        (Kind::Bool, _) => Some("must be true or false".to_string()),
        (Kind::Text(_), _) | (Kind::OneOf(_), _) => Some("must be a string".to_string()),
    }
}
