//! Touch input subsystem.
//!
//! A single capacitive contact is the only control on the device.
//! The hardware edge trigger wakes a sampling burst; the debounce
//! engine turns raw magnitude samples into the press/hold/release
//! events the application consumes.

pub mod debounce;
#[cfg(feature = "embedded")]
pub mod touch;

/// Debounced touch events delivered to the application layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchEvent {
    /// Contact confirmed.
    Press,
    /// Contact still held; emitted once per debounce interval.
    Hold { hold_ms: u64 },
    /// Contact ended; total confirmed hold time.
    Release { hold_ms: u64 },
}
