//! Linkscope Hardware Abstraction Layer
//!
//! Hardware traits implemented by chip-specific HALs so the telemetry
//! receiver can be driven from any SPI-slave capable MCU.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (linkscope-firmware)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  linkscope-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌─────────────────┐
//!             │ linkscope-hal-  │
//!             │    stm32f0      │
//!             └─────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`spi::WordSource`] - Pull received words out of an SPI slave
//! - [`irq::InterruptGate`] - Mask/unmask the reception interrupt

#![no_std]
#![deny(unsafe_code)]

pub mod irq;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use irq::{InterruptGate, MaskGuard};
pub use spi::{LinkConfig, Mode, Phase, Polarity, WordSize, WordSource};
