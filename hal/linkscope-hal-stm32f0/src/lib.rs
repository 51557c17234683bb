//! STM32F0 implementation of the Linkscope link traits
//!
//! SPI1 runs as a receive-only slave on PA4 (NSS), PA5 (SCK) and PA7
//! (MOSI). Every received word raises the SPI1 interrupt; the firmware's
//! handler drains the FIFO through [`SpiSlave`] and the consumer masks
//! that interrupt with [`Spi1Gate`] while it snapshots the store.
//!
//! embassy-stm32 has no slave-mode SPI driver, so the peripheral is set up
//! at register level through the PAC.
//!
//! # Features
//!
//! - `stm32f042k6` / `stm32f072rb` - chip selection
//! - `defmt` - Enable debug formatting support

#![no_std]

pub mod link;

pub use link::{LinkError, Spi1Gate, SpiSlave};
