//! Fuzz target: `Payload::decode`
//!
//! Feeds arbitrary 4-byte frames to the decoder and checks:
//! - No panics under any byte sequence
//! - Accepted frames carry the reserved marker and a known mode
//! - Accessors of an accepted frame stay within their field widths
//! - Re-encoding the decoded fields reproduces the frame
//!
//! cargo fuzz run fuzz_payload_decode

#![no_main]

use libfuzzer_sys::fuzz_target;
use vibration_node::app::state::EventState;
use vibration_node::payload::{Payload, PayloadMode, RESERVED_MARKER};

fuzz_target!(|data: &[u8]| {
    let Ok(bytes) = <[u8; 4]>::try_from(data) else {
        return;
    };

    let Ok(payload) = Payload::decode(bytes) else {
        assert!(
            bytes[0] >> 5 != RESERVED_MARKER || PayloadMode::try_from(bytes[1] & 0x1F).is_err(),
            "valid frame rejected: {bytes:02X?}"
        );
        return;
    };

    assert!(payload.battery_level() <= 31);
    assert!(payload.special_value() <= 3);
    assert_eq!(payload.into_bytes(), bytes);

    // Only the vibration special value is reproducible by the encoder.
    if payload.mode() == PayloadMode::Vibration && payload.special_value() <= 1 {
        let state = EventState {
            battery_mv: payload.battery_mv(),
            vibration: payload.special_value() == 1,
            event_counter: payload.event_counter(),
            button_pressed: payload.button(),
        };
        assert_eq!(Payload::encode(payload.mode(), &state), payload);
    }
});
