//! Mock board for integration tests.
//!
//! Implements every hardware port, replays scripted sensor and radio
//! results, and records every call so tests can assert on the full
//! history without touching real peripherals.

use std::collections::VecDeque;

use vibration_node::app::events::AppEvent;
use vibration_node::app::ports::{
    BatteryPort, ButtonPort, ButtonPresses, ErrorReporter, EventSink, MotionPort, RadioPort, Rgb,
    SchedulerPort, StatusLedPort,
};
use vibration_node::config::AccelRange;
use vibration_node::error::{Error, HardwareInitError, TransportError};
use vibration_node::events::{InterruptSource, PendingInterrupts};

/// A fresh pending set with the `'static` lifetime the ISRs would see.
pub fn fresh_pending() -> &'static PendingInterrupts {
    Box::leak(Box::new(PendingInterrupts::new()))
}

// ── Call record ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum HwCall {
    ConfigureButton,
    RadioInit,
    MotionInit,
    StartAlarm(u32),
    TransientMode {
        range: AccelRange,
        threshold: u8,
        count: u8,
    },
    ClassifyPresses,
    ClearAndCheck,
    Send { bytes: Vec<u8>, ack: bool },
    Led(Rgb),
    Reset,
    Suspend,
}

// ── MockNode ──────────────────────────────────────────────────

pub struct MockNode {
    pub calls: Vec<HwCall>,
    pub battery_mv: u16,
    pub presses: VecDeque<ButtonPresses>,
    pub motion: VecDeque<bool>,
    pub send_results: VecDeque<Result<(), TransportError>>,
    pub radio_init: Result<(), HardwareInitError>,
    pub motion_init: Result<(), HardwareInitError>,
    pub alarm: Result<(), HardwareInitError>,
    /// Raised on the pending set while a send is in flight.
    pub raise_during_send: Option<(&'static PendingInterrupts, InterruptSource)>,
    /// Raised on the pending set while the next latch read is in flight.
    pub motion_edge_during_read: Option<&'static PendingInterrupts>,
}

#[allow(dead_code)]
impl MockNode {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            battery_mv: 3000,
            presses: VecDeque::new(),
            motion: VecDeque::new(),
            send_results: VecDeque::new(),
            radio_init: Ok(()),
            motion_init: Ok(()),
            alarm: Ok(()),
            raise_during_send: None,
            motion_edge_during_read: None,
        }
    }

    pub fn sends(&self) -> Vec<&[u8]> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::Send { bytes, .. } => Some(bytes.as_slice()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, call: &HwCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub fn leds(&self) -> Vec<Rgb> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::Led(rgb) => Some(*rgb),
                _ => None,
            })
            .collect()
    }
}

impl Default for MockNode {
    fn default() -> Self {
        Self::new()
    }
}

impl BatteryPort for MockNode {
    fn sample_mv(&mut self) -> u16 {
        self.battery_mv
    }
}

impl MotionPort for MockNode {
    fn init(&mut self) -> Result<(), HardwareInitError> {
        self.calls.push(HwCall::MotionInit);
        self.motion_init
    }

    fn set_transient_mode(
        &mut self,
        range: AccelRange,
        threshold: u8,
        count: u8,
    ) -> Result<(), HardwareInitError> {
        self.calls.push(HwCall::TransientMode {
            range,
            threshold,
            count,
        });
        Ok(())
    }

    fn clear_and_check(&mut self) -> bool {
        self.calls.push(HwCall::ClearAndCheck);
        if let Some(pending) = self.motion_edge_during_read.take() {
            pending.raise(InterruptSource::Motion);
        }
        self.motion.pop_front().unwrap_or(false)
    }
}

impl ButtonPort for MockNode {
    fn configure(&mut self) -> Result<(), HardwareInitError> {
        self.calls.push(HwCall::ConfigureButton);
        Ok(())
    }

    fn classify_presses(&mut self) -> ButtonPresses {
        self.calls.push(HwCall::ClassifyPresses);
        self.presses.pop_front().unwrap_or(ButtonPresses::None)
    }
}

impl RadioPort for MockNode {
    fn init(&mut self) -> Result<(), HardwareInitError> {
        self.calls.push(HwCall::RadioInit);
        self.radio_init
    }

    fn send(&mut self, payload: &[u8], ack_required: bool) -> Result<(), TransportError> {
        self.calls.push(HwCall::Send {
            bytes: payload.to_vec(),
            ack: ack_required,
        });
        if let Some((pending, source)) = self.raise_during_send {
            pending.raise(source);
        }
        self.send_results.pop_front().unwrap_or(Ok(()))
    }
}

impl SchedulerPort for MockNode {
    fn start_alarm(&mut self, period_secs: u32) -> Result<(), HardwareInitError> {
        self.calls.push(HwCall::StartAlarm(period_secs));
        self.alarm
    }

    fn request_reset(&mut self) {
        self.calls.push(HwCall::Reset);
    }

    fn suspend(&mut self) {
        self.calls.push(HwCall::Suspend);
    }
}

impl StatusLedPort for MockNode {
    fn set_led(&mut self, colour: Rgb) {
        self.calls.push(HwCall::Led(colour));
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
    pub errors: Vec<Error>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

impl ErrorReporter for RecordingSink {
    fn report(&mut self, error: &Error) {
        self.errors.push(*error);
    }
}
