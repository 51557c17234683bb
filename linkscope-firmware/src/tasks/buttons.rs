//! Navigation buttons
//!
//! Two active-low buttons stand in for the touch panel: one steps to the
//! next view, the other back. Holding a button past `LONG_PRESS_MS`
//! reports a long press, which the controller maps to the block diagram
//! shortcuts.

use defmt::*;
use embassy_stm32::exti::ExtiInput;
use embassy_time::{with_timeout, Duration, Timer};

use linkscope_core::panel::{Button, Press};

use crate::channels::INPUT_CHANNEL;

/// Debounce interval
const DEBOUNCE_MS: u64 = 20;

/// Hold time for a long press
const LONG_PRESS_MS: u64 = 600;

#[embassy_executor::task(pool_size = 2)]
pub async fn button_task(mut btn: ExtiInput<'static>, button: Button) {
    info!("Button task started ({})", button);

    loop {
        btn.wait_for_falling_edge().await;

        Timer::after(Duration::from_millis(DEBOUNCE_MS)).await;
        if btn.is_high() {
            continue;
        }

        let released = with_timeout(
            Duration::from_millis(LONG_PRESS_MS - DEBOUNCE_MS),
            btn.wait_for_rising_edge(),
        )
        .await;
        let press = match released {
            Ok(()) => Press::short(button),
            Err(_) => Press::long(button),
        };

        if INPUT_CHANNEL.try_send(press).is_err() {
            warn!("Input queue full, dropped {}", press);
        } else {
            debug!("Button: {}", press);
        }

        if press.long {
            btn.wait_for_high().await;
        }
        Timer::after(Duration::from_millis(DEBOUNCE_MS)).await;
    }
}
