//! Interrupt dispatcher.
//!
//! One pass handles **every** pending source before looking at the
//! idle condition:
//!
//! | source | action                                              | bit cleared |
//! |--------|-----------------------------------------------------|-------------|
//! | Timer  | request a transmission                              | always      |
//! | Button | count presses; four presses request a device reset  | always      |
//! | Motion | read the accelerometer latch; real motion is counted| before read |
//!
//! A reset request ends the pass immediately: on target the reset never
//! returns, and on the host nothing else may happen in that pass.

use log::{debug, info};

use crate::events::{InterruptSource, PendingInterrupts};

use super::events::AppEvent;
use super::ports::{
    ButtonPort, ButtonPresses, EventSink, LED_MAGENTA, LED_OFF, MotionPort, SchedulerPort,
    StatusLedPort,
};
use super::state::EventAccumulator;

/// What one dispatcher pass decided.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// The measurement alarm fired: build and send a payload.
    pub transmit_requested: bool,
    /// The four-press gesture was seen and a reset was requested.
    pub reset_requested: bool,
    /// The pending set read empty after processing.
    pub idle: bool,
}

/// Drain `pending` into `accumulator`.
pub fn dispatch<H>(
    pending: &PendingInterrupts,
    accumulator: &mut EventAccumulator,
    hw: &mut H,
    sink: &mut impl EventSink,
) -> DispatchOutcome
where
    H: MotionPort + ButtonPort + SchedulerPort + StatusLedPort,
{
    let mut outcome = DispatchOutcome::default();

    // ── RTC alarm ─────────────────────────────────────────────
    if pending.is_pending(InterruptSource::Timer) {
        debug!("dispatch: measurement alarm");
        outcome.transmit_requested = true;
        pending.clear(InterruptSource::Timer);
    }

    // ── Button ────────────────────────────────────────────────
    if pending.is_pending(InterruptSource::Button) {
        hw.set_led(LED_MAGENTA);
        let presses = hw.classify_presses();
        hw.set_led(LED_OFF);

        pending.clear(InterruptSource::Button);
        sink.emit(&AppEvent::ButtonPressed(presses));

        if presses == ButtonPresses::Four {
            info!("dispatch: four presses, resetting");
            sink.emit(&AppEvent::ResetRequested);
            hw.request_reset();
            outcome.reset_requested = true;
            return outcome;
        }
        if presses != ButtonPresses::None {
            accumulator.record_button();
        }
    }

    // ── Accelerometer ─────────────────────────────────────────
    if pending.is_pending(InterruptSource::Motion) {
        // Clear before reading the latch: an edge raised after the read
        // must survive to the next pass, since INT1 stays low until then.
        pending.clear(InterruptSource::Motion);
        if hw.clear_and_check() {
            accumulator.record_motion();
            let count = accumulator.snapshot().event_counter;
            debug!("dispatch: motion, count={}", count);
            sink.emit(&AppEvent::MotionDetected { count });
        }
    }

    outcome.idle = pending.is_empty();
    outcome
}
