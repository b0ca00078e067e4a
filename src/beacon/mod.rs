//! Broadcast beacon subsystem.
//!
//! This module turns local variable assignments into repeated,
//! unacknowledged BLE advertisements:
//!
//! 1. **Cache** - a fixed-capacity queue of named integer variables
//!    with dirty tracking; superseded values coalesce.
//! 2. **Payload** - explicit serialization of one assignment into the
//!    manufacturer-specific advertisement frame.
//! 3. **Session** - the scheduler state machine driving start/stop of
//!    the radio and the retransmission window.
//! 4. **Advertiser** (embedded) - maps scheduler commands onto the
//!    SoftDevice advertising API under the single shared lock.
//!
//! Delivery is best-effort: frames are broadcast to any listener in
//! range, with no acknowledgement and no retry beyond the fixed
//! retransmission window.

pub mod cache;
pub mod payload;
pub mod session;

#[cfg(feature = "embedded")]
pub mod advertiser;
