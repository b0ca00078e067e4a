//! Broadcast frame serialization.
//!
//! One advertisement frame carries one `name = value` assignment in a
//! manufacturer-specific beacon layout. Byte placement is explicit -
//! nothing here relies on struct memory layout:
//!
//! ```text
//! Byte 0-2:  AD flags (0x02 0x01 0x06)
//! Byte 3:    AD length (0x1A = 26 bytes follow)
//! Byte 4:    AD type (0xFF, manufacturer specific)
//! Byte 5-6:  Company identifier, little-endian
//! Byte 7-8:  Beacon type constant, little-endian
//! Byte 9-12: Variable value, i32 little-endian
//! Byte 13-24: Variable name, NUL-terminated (12-byte field)
//! Byte 25-26: Major identifier, big-endian
//! Byte 27-28: Minor identifier, big-endian
//! Byte 29:   Measured power at 1 m (dBm, signed)
//! ```
//!
//! The name field holds at most [`ADV_NAME_MAX`] bytes before the NUL;
//! longer names are truncated deterministically at that boundary.
//! Frames are unencrypted and unaddressed - any listener in range can
//! decode them.

use crate::config::{BEACON_COMPANY_ID, BEACON_TYPE};
use crate::error::Error;

/// Total frame size in bytes.
pub const ADV_FRAME_LEN: usize = 30;

/// Widest variable name that fits the 12-byte field with its NUL.
pub const ADV_NAME_MAX: usize = 11;

const VALUE_OFFSET: usize = 9;
const NAME_OFFSET: usize = 13;
const NAME_FIELD_LEN: usize = 12;
const MAJOR_OFFSET: usize = 25;
const MINOR_OFFSET: usize = 27;
const POWER_OFFSET: usize = 29;

/// Constant frame prefix: flags, length, type, company id, beacon type.
const FRAME_HEAD: [u8; 9] = [
    0x02,
    0x01,
    0x06,
    0x1A,
    0xFF,
    BEACON_COMPANY_ID.to_le_bytes()[0],
    BEACON_COMPANY_ID.to_le_bytes()[1],
    BEACON_TYPE.to_le_bytes()[0],
    BEACON_TYPE.to_le_bytes()[1],
];

/// Per-device identity carried unchanged in every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VendorIdentity {
    /// 128-bit application identity. All zeros means unprovisioned.
    pub uuid: [u8; 16],
    pub major: u16,
    pub minor: u16,
    /// Calibrated RSSI at 1 m (dBm).
    pub measured_power: i8,
}

impl VendorIdentity {
    /// Reject an unprovisioned identity before any radio call.
    pub fn validate(&self) -> Result<(), Error> {
        if self.uuid == [0u8; 16] {
            return Err(Error::InvalidIdentity);
        }
        Ok(())
    }
}

/// One serialized advertisement frame, ready for the radio.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdvFrame {
    bytes: [u8; ADV_FRAME_LEN],
}

impl AdvFrame {
    /// Build the frame for `name = value`.
    ///
    /// Names longer than [`ADV_NAME_MAX`] bytes are truncated; the
    /// field is always NUL-terminated and zero-padded.
    pub fn compose(identity: &VendorIdentity, name: &str, value: i32) -> Self {
        let mut bytes = [0u8; ADV_FRAME_LEN];
        bytes[..FRAME_HEAD.len()].copy_from_slice(&FRAME_HEAD);

        bytes[VALUE_OFFSET..VALUE_OFFSET + 4].copy_from_slice(&value.to_le_bytes());

        let name_bytes = name.as_bytes();
        let copy_len = name_bytes.len().min(ADV_NAME_MAX);
        bytes[NAME_OFFSET..NAME_OFFSET + copy_len].copy_from_slice(&name_bytes[..copy_len]);
        // Remainder of the 12-byte field stays zero: NUL terminator.

        bytes[MAJOR_OFFSET..MAJOR_OFFSET + 2].copy_from_slice(&identity.major.to_be_bytes());
        bytes[MINOR_OFFSET..MINOR_OFFSET + 2].copy_from_slice(&identity.minor.to_be_bytes());
        bytes[POWER_OFFSET] = identity.measured_power as u8;

        Self { bytes }
    }

    /// Raw frame bytes for the radio.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Read the variable value back out of the frame.
    pub fn value(&self) -> i32 {
        let mut v = [0u8; 4];
        v.copy_from_slice(&self.bytes[VALUE_OFFSET..VALUE_OFFSET + 4]);
        i32::from_le_bytes(v)
    }

    /// Read the variable name back out of the frame.
    pub fn var_name(&self) -> &str {
        let field = &self.bytes[NAME_OFFSET..NAME_OFFSET + NAME_FIELD_LEN];
        let end = field.iter().position(|&b| b == 0).unwrap_or(NAME_FIELD_LEN);
        core::str::from_utf8(&field[..end]).unwrap_or("")
    }
}
