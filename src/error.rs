//! Unified error type for touchbeacon.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The configured beacon identity is all zeros (unprovisioned
    /// device). Rejected before any radio call is made.
    InvalidIdentity,

    /// The radio rejected or aborted an advertising start request.
    /// The in-flight variable is dropped, not retried.
    AdvStart,

    /// The radio reported a failure while stopping advertising.
    /// Logged only; the scheduler still advances to the next variable.
    AdvStop,
}
