//! Touch input debouncing.
//!
//! The hardware edge only *arms* a sampling burst; all decisions are
//! made here, from samples taken once per debounce interval. Sampling
//! continues at that cadence for as long as the contact lasts, so a
//! long press yields a steady stream of hold transitions the
//! application can use for continuous adjustment.

/// Contact is read as a magnitude that *drops* when touched.
pub fn is_contact(sample: u16, threshold: u16) -> bool {
    sample < threshold
}

/// Outcome of one debounce-interval sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// Rising edge: contact confirmed.
    Press,
    /// Contact sustained; `hold_ms` since the confirming sample.
    Hold { hold_ms: u64 },
    /// Falling edge: contact ended after `hold_ms`.
    Release { hold_ms: u64 },
    /// The edge that armed this burst did not survive the debounce
    /// interval. Ignore it.
    Noise,
}

impl Transition {
    /// Whether the sampling burst continues at the debounce interval.
    pub fn rearms_timer(&self) -> bool {
        matches!(self, Transition::Press | Transition::Hold { .. })
    }

    /// Whether this sample ends the burst and reopens the hardware
    /// edge trigger for the next contact.
    pub fn releases_gate(&self) -> bool {
        !self.rearms_timer()
    }
}

/// Debounced state of the single touch input.
#[derive(Debug, Default)]
pub struct Debouncer {
    pressed: bool,
    /// Start of the current press; valid only while `pressed`.
    hold_start_ms: u64,
}

impl Debouncer {
    pub const fn new() -> Self {
        Self {
            pressed: false,
            hold_start_ms: 0,
        }
    }

    /// Seed the state for a device that powers up with the contact
    /// already made (e.g. woken by the touch that is still held).
    pub const fn already_pressed(now_ms: u64) -> Self {
        Self {
            pressed: true,
            hold_start_ms: now_ms,
        }
    }

    /// Feed one filtered sample, taken `DEBOUNCE_MS` after the last
    /// (or after the arming edge).
    pub fn on_sample(&mut self, pressed_now: bool, now_ms: u64) -> Transition {
        match (self.pressed, pressed_now) {
            (false, true) => {
                self.pressed = true;
                self.hold_start_ms = now_ms;
                Transition::Press
            }
            (true, false) => {
                self.pressed = false;
                Transition::Release {
                    hold_ms: now_ms - self.hold_start_ms,
                }
            }
            (true, true) => Transition::Hold {
                hold_ms: now_ms - self.hold_start_ms,
            },
            (false, false) => Transition::Noise,
        }
    }

    /// Last confirmed contact state.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEBOUNCE_MS, TOUCH_THRESHOLD};

    #[test]
    fn contact_is_below_threshold() {
        assert!(is_contact(0, TOUCH_THRESHOLD));
        assert!(is_contact(TOUCH_THRESHOLD - 1, TOUCH_THRESHOLD));
        assert!(!is_contact(TOUCH_THRESHOLD, TOUCH_THRESHOLD));
        assert!(!is_contact(u16::MAX, TOUCH_THRESHOLD));
    }

    #[test]
    fn short_blip_is_noise() {
        // Contact at 0 ms, gone by 30 ms: the 50 ms sample sees no
        // contact and the burst ends with no events.
        let mut d = Debouncer::new();
        let t = d.on_sample(false, DEBOUNCE_MS);
        assert_eq!(t, Transition::Noise);
        assert!(t.releases_gate());
        assert!(!d.is_pressed());
    }

    #[test]
    fn sustained_contact_presses_then_holds_then_releases() {
        // Contact held from 0 ms to 220 ms, sampled every 50 ms.
        let mut d = Debouncer::new();
        let mut events = Vec::new();
        let mut now = DEBOUNCE_MS;
        loop {
            let pressed_now = now <= 220;
            let t = d.on_sample(pressed_now, now);
            events.push(t);
            if !t.rearms_timer() {
                break;
            }
            now += DEBOUNCE_MS;
        }

        assert_eq!(
            events,
            [
                Transition::Press,
                Transition::Hold { hold_ms: 50 },
                Transition::Hold { hold_ms: 100 },
                Transition::Hold { hold_ms: 150 },
                Transition::Release { hold_ms: 200 },
            ]
        );
        assert!(!d.is_pressed());
    }

    #[test]
    fn press_rearms_and_release_reopens_gate() {
        let mut d = Debouncer::new();
        assert!(d.on_sample(true, 50).rearms_timer());
        assert!(d.on_sample(true, 100).rearms_timer());
        let rel = d.on_sample(false, 150);
        assert_eq!(rel, Transition::Release { hold_ms: 100 });
        assert!(rel.releases_gate());
    }

    #[test]
    fn hold_time_restarts_on_each_new_press() {
        let mut d = Debouncer::new();
        d.on_sample(true, 1000);
        assert_eq!(d.on_sample(false, 1100), Transition::Release { hold_ms: 100 });

        d.on_sample(true, 5000);
        assert_eq!(d.on_sample(true, 5050), Transition::Hold { hold_ms: 50 });
    }

    #[test]
    fn wake_by_touch_seeds_a_running_press() {
        // Woken by the touch itself: the press was never sampled, so
        // the first sample while still held is a hold, not a press.
        let mut d = Debouncer::already_pressed(0);
        assert!(d.is_pressed());
        assert_eq!(d.on_sample(true, 50), Transition::Hold { hold_ms: 50 });
        assert_eq!(d.on_sample(false, 100), Transition::Release { hold_ms: 100 });
    }
}
