//! SPI1 slave receiver

use embassy_stm32::interrupt::{self, InterruptExt, Priority};
use embassy_stm32::pac;
use embassy_stm32::pac::gpio::vals::Moder;
use embassy_stm32::pac::spi::vals;
use linkscope_hal::{InterruptGate, LinkConfig, Phase, Polarity, WordSize, WordSource};

/// PA4 NSS, PA5 SCK, PA7 MOSI
const LINK_PINS: [usize; 3] = [4, 5, 7];
/// SPI1 sits on alternate function 0 for these pins
const LINK_AF: u8 = 0;

/// Link errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// A word arrived while the receive FIFO was full and was lost
    Overrun,
}

/// Receive-only SPI1 slave
pub struct SpiSlave {
    regs: pac::spi::Spi,
}

impl SpiSlave {
    /// Configure SPI1 and its pins as a slave and enable the RX interrupt
    ///
    /// Must run before the SPI1 interrupt is unmasked.
    pub fn init(config: LinkConfig) -> Self {
        pac::RCC.ahbenr().modify(|w| w.set_gpioaen(true));
        pac::RCC.apb2enr().modify(|w| w.set_spi1en(true));

        for pin in LINK_PINS {
            pac::GPIOA.moder().modify(|w| w.set_moder(pin, Moder::ALTERNATE));
            pac::GPIOA.afr(pin / 8).modify(|w| w.set_afr(pin % 8, LINK_AF));
        }

        let regs = pac::SPI1;
        regs.cr1().modify(|w| w.set_spe(false));
        regs.cr1().write(|w| {
            w.set_cpol(match config.polarity() {
                Polarity::IdleLow => vals::Cpol::IDLE_LOW,
                Polarity::IdleHigh => vals::Cpol::IDLE_HIGH,
            });
            w.set_cpha(match config.phase() {
                Phase::CaptureOnFirstTransition => vals::Cpha::FIRST_EDGE,
                Phase::CaptureOnSecondTransition => vals::Cpha::SECOND_EDGE,
            });
            w.set_mstr(vals::Mstr::SLAVE);
            // Hardware NSS
            w.set_ssm(false);
        });
        regs.cr2().write(|w| {
            w.set_ds(match config.word_size {
                WordSize::Eight => vals::Ds::BITS8,
                WordSize::Sixteen => vals::Ds::BITS16,
            });
            // RXNE on a full 16-bit word
            w.set_frxth(vals::Frxth::HALF);
            w.set_rxneie(true);
        });
        regs.cr1().modify(|w| w.set_spe(true));

        interrupt::SPI1.set_priority(Priority::P1);

        Self { regs }
    }

    /// Handle to an SPI1 already set up by [`SpiSlave::init`]
    ///
    /// Used from the interrupt handler, which cannot own the driver.
    pub fn attached() -> Self {
        Self { regs: pac::SPI1 }
    }
}

impl WordSource for SpiSlave {
    type Error = LinkError;

    fn read_word(&mut self) -> Option<u16> {
        if !self.regs.sr().read().rxne() {
            return None;
        }
        // SAFETY: DR is a valid MMIO register; a 16-bit read pops one frame
        let word = unsafe { core::ptr::read_volatile(self.regs.dr().as_ptr() as *const u16) };
        Some(word)
    }

    fn take_overrun(&mut self) -> Result<(), Self::Error> {
        if !self.regs.sr().read().ovr() {
            return Ok(());
        }
        // OVR clears on a DR read followed by an SR read
        // SAFETY: as in read_word
        let _ = unsafe { core::ptr::read_volatile(self.regs.dr().as_ptr() as *const u16) };
        let _ = self.regs.sr().read();
        Err(LinkError::Overrun)
    }
}

/// Masks the SPI1 interrupt
#[derive(Debug, Default)]
pub struct Spi1Gate;

impl Spi1Gate {
    /// Enable the SPI1 interrupt for the first time
    pub fn start(&mut self) {
        self.unmask();
    }
}

impl InterruptGate for Spi1Gate {
    fn mask(&mut self) {
        interrupt::SPI1.disable();
    }

    fn unmask(&mut self) {
        // SAFETY: the SPI1 handler only touches the shared receiver, which
        // is interrupt-safe
        unsafe { interrupt::SPI1.enable() };
    }
}
