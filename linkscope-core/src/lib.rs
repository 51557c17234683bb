//! Board-agnostic core logic for the Linkscope telemetry display
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Sample store and the interrupt-shared receiver
//! - Tick gate releasing the consumer loop
//! - Telemetry decoding, formatting and health classification
//! - Scrolling scope buffers
//! - Panel navigation state machine
//! - Configuration types and parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod link;
pub mod panel;
pub mod scope;
pub mod store;
pub mod telemetry;
pub mod tick;
