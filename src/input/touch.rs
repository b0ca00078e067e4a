//! Touch pad glue: hardware trigger + sampling loop.
//!
//! The contact line gives a digital edge the moment anything touches
//! the pad - noisy, and repeating for as long as contact lasts. That
//! edge only starts a sampling burst; while the burst runs, no new
//! edge wait is armed, which is what suppresses the repeat triggers.
//! Each burst iteration sleeps one debounce interval, reads the
//! analog sense magnitude, and feeds the debounce engine; the burst
//! ends when the engine reports noise or a release.

use crate::config::{DEBOUNCE_MS, TOUCH_THRESHOLD};
use crate::input::debounce::{is_contact, Debouncer, Transition};
use crate::input::TouchEvent;
use defmt::{debug, info};
use embassy_nrf::gpio::Input;
use embassy_nrf::saadc::Saadc;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embassy_time::{Duration, Instant, Timer};

/// Analog view of the touch pad.
pub struct TouchPad<'d> {
    adc: Saadc<'d, 1>,
}

impl<'d> TouchPad<'d> {
    pub fn new(adc: Saadc<'d, 1>) -> Self {
        Self { adc }
    }

    /// One filtered magnitude reading. Contact pulls the level down.
    async fn level(&mut self) -> u16 {
        let mut buf = [0i16; 1];
        self.adc.sample(&mut buf).await;
        buf[0].max(0) as u16
    }
}

/// Touch task: converts raw contact into debounced events.
///
/// `woken_by_touch` seeds a press in progress when the device was
/// powered up by the touch that is still being held.
#[embassy_executor::task]
pub async fn touch_task(
    mut pad: TouchPad<'static>,
    mut wake: Input<'static>,
    events: Sender<'static, CriticalSectionRawMutex, TouchEvent, 4>,
    woken_by_touch: bool,
) -> ! {
    let mut debounce = if woken_by_touch {
        info!("woken by touch - resuming press");
        Debouncer::already_pressed(Instant::now().as_millis())
    } else {
        Debouncer::new()
    };

    loop {
        if !debounce.is_pressed() {
            // Gate open: block until the pad is touched. Further
            // edges are ignored until the burst below finishes.
            wake.wait_for_low().await;
        }

        Timer::after(Duration::from_millis(DEBOUNCE_MS)).await;

        let level = pad.level().await;
        let now = Instant::now().as_millis();
        debug!("touch level: {}", level);

        match debounce.on_sample(is_contact(level, TOUCH_THRESHOLD), now) {
            Transition::Press => {
                info!("touch down");
                events.send(TouchEvent::Press).await;
            }
            Transition::Hold { hold_ms } => {
                events.send(TouchEvent::Hold { hold_ms }).await;
            }
            Transition::Release { hold_ms } => {
                info!("touch up after {} ms", hold_ms);
                events.send(TouchEvent::Release { hold_ms }).await;
            }
            Transition::Noise => {
                debug!("touch blip ignored");
            }
        }
    }
}
