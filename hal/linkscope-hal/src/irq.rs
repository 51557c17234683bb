//! Interrupt gating
//!
//! The telemetry consumer masks the word-reception interrupt while it
//! copies the shared sample store. Chip HALs implement [`InterruptGate`]
//! for their SPI interrupt line.

/// Masks and unmasks a single interrupt source
pub trait InterruptGate {
    /// Stop the interrupt from firing
    fn mask(&mut self);

    /// Allow the interrupt to fire again
    fn unmask(&mut self);

    /// Mask the interrupt until the returned guard is dropped
    fn masked(&mut self) -> MaskGuard<'_, Self>
    where
        Self: Sized,
    {
        self.mask();
        MaskGuard { gate: self }
    }
}

/// Keeps an interrupt masked for the lifetime of the guard
pub struct MaskGuard<'a, G: InterruptGate> {
    gate: &'a mut G,
}

impl<G: InterruptGate> Drop for MaskGuard<'_, G> {
    fn drop(&mut self) {
        self.gate.unmask();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingGate {
        masks: u32,
        unmasks: u32,
    }

    impl InterruptGate for CountingGate {
        fn mask(&mut self) {
            self.masks += 1;
        }

        fn unmask(&mut self) {
            self.unmasks += 1;
        }
    }

    #[test]
    fn test_guard_unmasks_on_drop() {
        let mut gate = CountingGate::default();
        {
            let _guard = gate.masked();
        }
        assert_eq!(gate.masks, 1);
        assert_eq!(gate.unmasks, 1);
    }
}
