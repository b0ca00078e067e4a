//! touchbeacon - a battery-powered touch remote that broadcasts state
//! changes as nonconnectable BLE advertisements.
//!
//! The core is hardware-free and host-testable:
//!
//! - [`beacon::cache`] - coalescing queue of named integer variables
//! - [`beacon::payload`] - advertisement frame serialization
//! - [`beacon::session`] - the transmit scheduler state machine
//! - [`input::debounce`] - the touch debounce engine
//! - [`app::color`] - the color remote application model
//!
//! The `embedded` feature adds the nRF52840 glue (Embassy tasks and
//! the SoftDevice radio); `src/main.rs` is the firmware entry point.
//!
//! Host tests: `cargo test`

#![cfg_attr(not(test), no_std)]

pub mod app;
pub mod beacon;
pub mod config;
pub mod error;
pub mod input;

// ═══════════════════════════════════════════════════════════════════════════
// Crate-level tests - cross-module behavior on the public API
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use crate::beacon::payload::{AdvFrame, VendorIdentity, ADV_FRAME_LEN};
    use crate::beacon::session::{AdvCommand, AdvState, BeaconSession};
    use crate::config::{
        BEACON_MAJOR, BEACON_MINOR, BEACON_UUID, MAX_MESSAGES, MEASURED_POWER, VAR_NAME_MAX,
    };

    fn identity() -> VendorIdentity {
        VendorIdentity {
            uuid: BEACON_UUID,
            major: BEACON_MAJOR,
            minor: BEACON_MINOR,
            measured_power: MEASURED_POWER,
        }
    }

    /// Drive a full window and hand back what the stop produced.
    fn finish_window<const N: usize>(s: &mut BeaconSession<N>) -> Option<AdvCommand> {
        assert_eq!(s.on_data_configured(), Some(AdvCommand::Start));
        assert_eq!(s.on_start_complete(true), Some(AdvCommand::ArmWindow));
        assert_eq!(s.on_window_expired(), Some(AdvCommand::Stop));
        s.on_stop_complete(true)
    }

    #[test]
    fn frame_fits_a_legacy_advertising_pdu() {
        // Legacy advertising payloads cap at 31 bytes.
        assert!(ADV_FRAME_LEN <= 31);
        let frame = AdvFrame::compose(&identity(), "col", 1);
        assert_eq!(frame.as_bytes().len(), ADV_FRAME_LEN);
    }

    #[test]
    fn device_capacity_round_trip() {
        // All five device slots fill, drain in order, and end idle.
        let mut s: BeaconSession<MAX_MESSAGES> = BeaconSession::new(identity()).unwrap();

        let names = ["col", "solid_mode", "mode", "bright", "preset"];
        let Some(AdvCommand::Configure(mut frame)) = s.set_int_var(names[0], 0) else {
            panic!("expected a transmit cycle");
        };
        for (i, name) in names.iter().enumerate().skip(1) {
            assert!(s.set_int_var(name, i as i32).is_none());
        }

        for (i, name) in names.iter().enumerate() {
            assert_eq!(frame.var_name(), *name);
            assert_eq!(frame.value(), i as i32);
            match finish_window(&mut s) {
                Some(AdvCommand::Configure(next)) => frame = next,
                None => assert_eq!(i, names.len() - 1),
                other => panic!("unexpected command {:?}", other),
            }
        }
        assert_eq!(s.state(), AdvState::Idle);
    }

    #[test]
    fn cache_key_longer_than_payload_field_still_delivers() {
        // 19-char names are legal cache keys but exceed the 12-byte
        // payload field; the frame carries the truncated form.
        let mut s: BeaconSession<MAX_MESSAGES> = BeaconSession::new(identity()).unwrap();
        let name = "a_nineteen_char_key";
        assert_eq!(name.len(), VAR_NAME_MAX);

        match s.set_int_var(name, 77) {
            Some(AdvCommand::Configure(frame)) => {
                assert_eq!(frame.var_name(), "a_nineteen_");
                assert_eq!(frame.value(), 77);
            }
            other => panic!("expected Configure, got {:?}", other),
        }
    }
}
