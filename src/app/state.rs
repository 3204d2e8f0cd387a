//! Event accumulation between transmissions.
//!
//! [`EventAccumulator`] owns the single [`EventState`] record for the
//! process.  The dispatcher records motion and button activity into it;
//! the coordinator snapshots it for encoding and then clears it.
//!
//! Clearing is asymmetric:
//!
//! | field            | cleared after a failed send | after a successful send |
//! |------------------|-----------------------------|-------------------------|
//! | `vibration`      | yes                         | yes                     |
//! | `button_pressed` | yes                         | yes                     |
//! | `event_counter`  | **no**                      | yes                     |
//!
//! A failed send keeps the cumulative count so the next successful
//! payload reports every event since the last delivered one.

/// What has happened since the last transmission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventState {
    /// Last sampled battery voltage (mV).
    pub battery_mv: u16,
    /// Motion detected since the last transmission attempt.
    pub vibration: bool,
    /// Motion events since the last *successful* transmission.  Wraps at 2^16.
    pub event_counter: u16,
    /// Button interrupt seen since the last transmission attempt.
    /// Tracked and cleared, and packed into the payload's button bit.
    pub button_pressed: bool,
}

/// Single-owner holder of [`EventState`].
#[derive(Debug, Default)]
pub struct EventAccumulator {
    state: EventState,
}

impl EventAccumulator {
    /// All-zero state, as at power-on.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the latest battery reading.
    pub fn set_battery(&mut self, battery_mv: u16) {
        self.state.battery_mv = battery_mv;
    }

    /// A real motion event: set the flag and bump the counter (wrapping).
    pub fn record_motion(&mut self) {
        self.state.vibration = true;
        self.state.event_counter = self.state.event_counter.wrapping_add(1);
    }

    pub fn record_button(&mut self) {
        self.state.button_pressed = true;
    }

    /// Read-only copy for encoding.
    pub fn snapshot(&self) -> EventState {
        self.state
    }

    /// Return the current state, then clear the transient flags
    /// unconditionally and the counter only when `success` is true.
    pub fn snapshot_and_clear_transient(&mut self, success: bool) -> EventState {
        let snapshot = self.state;
        self.state.vibration = false;
        self.state.button_pressed = false;
        if success {
            self.state.event_counter = 0;
        }
        snapshot
    }
}
