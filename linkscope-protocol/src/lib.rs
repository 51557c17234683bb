//! Telemetry Link Framing
//!
//! This crate defines the word format used by the test rig to push 32-bit
//! telemetry samples over a 16-bit SPI slave link, and the assembler that
//! turns the word stream back into samples.
//!
//! # Word Layout
//!
//! Every 16-bit word carries one byte of a sample:
//! ```text
//! ┌─────────────┬───────┬─────────────┐
//! │ COUNTER     │ TAG   │ BYTE        │
//! │ bits 15..10 │ 9..8  │ bits 7..0   │
//! └─────────────┴───────┴─────────────┘
//! ```
//!
//! A sample is four words tagged 3, 2, 1, 0 (MSB first). The counter names
//! the sample slot (`counter - 1`) and must agree across words 3, 1 and 0.
//! Framing is self-synchronising: a broken quartet is dropped and the
//! assembler waits for the next tag-3 word.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod assembler;
pub mod word;

pub use assembler::{FramingError, QuartetAssembler, Sample, SAMPLE_SLOTS};
pub use word::{encode_sample, Tag, TaggedWord, MAX_COUNTER};
