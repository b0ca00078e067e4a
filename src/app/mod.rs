//! Application layer - the color remote.
//!
//! Consumes debounced touch events, runs the color model, and
//! publishes the resulting variable writes through the beacon.

pub mod color;

#[cfg(feature = "embedded")]
use crate::beacon::advertiser::Beacon;
#[cfg(feature = "embedded")]
use crate::input::TouchEvent;
#[cfg(feature = "embedded")]
use color::ColorRemote;
#[cfg(feature = "embedded")]
use embassy_nrf::gpio::Output;
#[cfg(feature = "embedded")]
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
#[cfg(feature = "embedded")]
use embassy_sync::channel::Receiver;

/// Remote task: one touch event in, zero or more variable writes out.
/// The status LED mirrors the confirmed contact state.
#[cfg(feature = "embedded")]
#[embassy_executor::task]
pub async fn remote_task(
    beacon: Beacon,
    events: Receiver<'static, CriticalSectionRawMutex, TouchEvent, 4>,
    mut led: Output<'static>,
) -> ! {
    let mut remote = ColorRemote::new();

    loop {
        let vars = match events.receive().await {
            TouchEvent::Press => {
                led.set_high();
                continue;
            }
            TouchEvent::Hold { hold_ms } => remote.on_hold(hold_ms),
            TouchEvent::Release { hold_ms } => {
                led.set_low();
                remote.on_release(hold_ms)
            }
        };

        for v in vars {
            beacon.set_int_var(v.name, v.value);
        }
    }
}
