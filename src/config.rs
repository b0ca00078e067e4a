//! Application-wide constants and compile-time configuration.
//!
//! All timing parameters, capacities, and beacon-identity constants
//! live here so they can be tuned in one place.

// Beacon / advertising

/// Advertising interval in 0.625 ms units. 0x20 = 20 ms, the fastest
/// interval the radio allows for nonconnectable advertising.
pub const FAST_ADV_INTERVAL: u32 = 0x20;

/// How long one variable's payload stays on the air before the next
/// dirty variable is considered (ms). At a 20 ms advertising interval
/// this broadcasts each payload roughly 3 times before going silent.
pub const RETRANSMIT_TIME_MS: u64 = 70;

/// Maximum number of distinct variables tracked in the broadcast cache.
pub const MAX_MESSAGES: usize = 5;

/// Maximum variable name length accepted by the set API (bytes).
pub const VAR_NAME_MAX: usize = 19;

/// Manufacturer-specific company identifier carried in every frame.
pub const BEACON_COMPANY_ID: u16 = 0x9001;

/// 16-bit beacon type constant following the company identifier.
pub const BEACON_TYPE: u16 = 0x1502;

/// 128-bit application identity. Receivers filter on this family;
/// an all-zero identity means the device was never provisioned.
pub const BEACON_UUID: [u8; 16] = [
    0xFD, 0xA5, 0x06, 0x93, 0xA4, 0xE2, 0x4F, 0xB1,
    0xAF, 0xCF, 0xC6, 0xEB, 0x07, 0x64, 0x78, 0x25,
];

/// Beacon major / minor identifiers (big-endian on the wire).
pub const BEACON_MAJOR: u16 = 10167;
pub const BEACON_MINOR: u16 = 61958;

/// Calibrated RSSI at 1 m (dBm), carried unchanged in every frame.
pub const MEASURED_POWER: i8 = -59;

// Touch input
//
// Pin assignments (nRF52840-DK defaults):
//   Touch sense (analog)  → P0.02 / AIN0
//   Touch wake (digital)  → P0.11
//   Status LED            → P0.06

/// Touch sense readings below this magnitude count as contact.
pub const TOUCH_THRESHOLD: u16 = 420;

/// Time to debounce the touch input - also the hold event interval (ms).
pub const DEBOUNCE_MS: u64 = 50;

// Application (color remote)

/// A release at or under this hold time is a tap; longer is a hold.
pub const TAP_MAX_MS: u64 = 500;

/// Holding sweeps the full 360 degrees of hue over this long (ms).
pub const HUE_SWEEP_MS: u64 = 12_000;
