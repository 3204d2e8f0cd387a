//! Fuzz target: `EventAccumulator` under arbitrary event sequences
//!
//! Each input byte is one operation (motion, button, send ok, send
//! failed).  A shadow model tracks the expected state and checks:
//! - The counter wraps modulo 2^16 and resets only on a successful send
//! - Transient flags are cleared after every send attempt
//! - Every encoded payload agrees with the snapshot it was built from
//!
//! cargo fuzz run fuzz_event_sequence

#![no_main]

use libfuzzer_sys::fuzz_target;
use vibration_node::app::state::EventAccumulator;
use vibration_node::payload::{Payload, PayloadMode};

fuzz_target!(|data: &[u8]| {
    let mut acc = EventAccumulator::new();
    let mut count: u16 = 0;

    for &op in data {
        acc.set_battery(u16::from(op) * 20);
        match op % 4 {
            0 => {
                acc.record_motion();
                count = count.wrapping_add(1);
            }
            1 => acc.record_button(),
            n => {
                let success = n == 2;
                let snapshot = acc.snapshot();
                let payload = Payload::encode(PayloadMode::Vibration, &snapshot);
                assert_eq!(payload.event_counter(), count);
                assert_eq!(payload.button(), snapshot.button_pressed);

                acc.snapshot_and_clear_transient(success);
                if success {
                    count = 0;
                }
                let after = acc.snapshot();
                assert!(!after.vibration && !after.button_pressed);
            }
        }
        assert_eq!(acc.snapshot().event_counter, count);
    }
});
