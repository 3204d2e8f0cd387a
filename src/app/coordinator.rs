//! Transmission coordinator: the node's main loop.
//!
//! ```text
//!  ┌──────┐   ┌───────────────┐   ┌─────────────────────┐
//!  │ IDLE │──▶│ CHECK_BATTERY │──▶│ DISPATCH_INTERRUPTS │
//!  └──────┘   └───────────────┘   └──────────┬──────────┘
//!      ▲                                     │ transmit requested?
//!      │      ┌───────┐   ┌─────────────────┐│
//!      └──────│ CLEAR │◀──│ ENCODE_AND_SEND │◀┘
//!   (suspend  └───────┘   └─────────────────┘
//!    if idle)
//! ```
//!
//! [`TransmissionCoordinator`] owns the [`EventAccumulator`] for the
//! process lifetime and borrows the pending-interrupt set that the ISRs
//! write.  All hardware sits behind the [`NodeHardware`] ports and every
//! error goes to the [`ErrorReporter`].

use log::{error, info, warn};

use crate::config::NodeConfig;
use crate::error::{HardwareInitError, Result, TransportError};
use crate::events::PendingInterrupts;
use crate::payload::Payload;

use super::dispatcher::dispatch;
use super::events::AppEvent;
use super::ports::{
    ButtonPort, ErrorReporter, EventSink, LED_BLUE, LED_OFF, MotionPort, NodeHardware, RadioPort,
};
use super::state::{EventAccumulator, EventState};

/// What one loop pass did, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    /// `Some` when a payload was built this pass, with the send result.
    pub transmitted: Option<core::result::Result<Payload, TransportError>>,
    pub reset_requested: bool,
    /// The pending set was empty and the node asked to sleep.
    pub suspended: bool,
}

pub struct TransmissionCoordinator<'p, H, S> {
    pending: &'p PendingInterrupts,
    hw: H,
    sink: S,
    accumulator: EventAccumulator,
    config: NodeConfig,
    passes: u64,
}

impl<'p, H, S> TransmissionCoordinator<'p, H, S>
where
    H: NodeHardware,
    S: EventSink + ErrorReporter,
{
    /// Build the coordinator with an all-zero event state.
    ///
    /// Does **not** touch hardware. Call [`boot`](Self::boot) next.
    pub fn new(config: NodeConfig, pending: &'p PendingInterrupts, hw: H, sink: S) -> Self {
        Self {
            pending,
            hw,
            sink,
            accumulator: EventAccumulator::new(),
            config,
            passes: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// One-shot peripheral bring-up, in the order the hardware needs it.
    ///
    /// The first failing step is reported and returned; callers treat
    /// it as fatal.
    pub fn boot(&mut self) -> Result<()> {
        info!("Boot: firmware {}", self.config.firmware_version);

        let r = ButtonPort::configure(&mut self.hw);
        self.check_init(r)?;

        let r = RadioPort::init(&mut self.hw);
        self.check_init(r)?;

        let r = MotionPort::init(&mut self.hw);
        self.check_init(r)?;

        let r = self.hw.start_alarm(self.config.measurement_period_secs);
        self.check_init(r)?;

        self.pending.clear_all();

        let r = self.hw.set_transient_mode(
            self.config.accel_range,
            self.config.vibration_threshold,
            self.config.vibration_count,
        );
        self.check_init(r)?;

        info!(
            "Boot: period={}s threshold=0x{:02X} count={}",
            self.config.measurement_period_secs,
            self.config.vibration_threshold,
            self.config.vibration_count
        );
        self.sink.emit(&AppEvent::Booted {
            period_secs: self.config.measurement_period_secs,
        });
        Ok(())
    }

    /// Loop forever.  Ends only through a device reset.
    pub fn run_forever(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    // ── Per-pass orchestration ────────────────────────────────

    /// Run one pass: battery → interrupts → maybe send → maybe sleep.
    pub fn step(&mut self) -> PassReport {
        self.passes = self.passes.wrapping_add(1);
        let mut report = PassReport::default();

        // 1. Battery snapshot
        let battery_mv = self.hw.sample_mv();
        self.accumulator.set_battery(battery_mv);

        // 2. Interrupt dispatch
        let outcome = dispatch(
            self.pending,
            &mut self.accumulator,
            &mut self.hw,
            &mut self.sink,
        );
        if outcome.reset_requested {
            report.reset_requested = true;
            return report;
        }

        // 3. Encode + send
        if outcome.transmit_requested {
            report.transmitted = Some(self.transmit());
        }

        // 4. Sleep if nothing arrived meanwhile
        if self.pending.is_empty() {
            self.hw.suspend();
            report.suspended = true;
        }

        report
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current accumulated state.
    pub fn state(&self) -> EventState {
        self.accumulator.snapshot()
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Loop passes executed since construction.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    pub fn hardware(&self) -> &H {
        &self.hw
    }

    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hw
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    // ── Internal ──────────────────────────────────────────────

    fn transmit(&mut self) -> core::result::Result<Payload, TransportError> {
        let snapshot = self.accumulator.snapshot();
        let payload = Payload::encode(self.config.mode, &snapshot);

        self.hw.set_led(LED_BLUE);
        let result = self.hw.send(payload.as_bytes(), self.config.ack_required);
        self.hw.set_led(LED_OFF);

        match result {
            Ok(()) => {
                info!("TX ok: {} (events={})", payload, snapshot.event_counter);
                self.sink.emit(&AppEvent::Transmitted { payload });
            }
            Err(e) => {
                warn!(
                    "TX failed: {}, keeping event count {}",
                    e, snapshot.event_counter
                );
                self.sink.report(&e.into());
                self.sink.emit(&AppEvent::TransmitFailed {
                    error: e,
                    retained_count: snapshot.event_counter,
                });
            }
        }

        self.accumulator.snapshot_and_clear_transient(result.is_ok());
        result.map(|()| payload)
    }

    fn check_init(&mut self, r: core::result::Result<(), HardwareInitError>) -> Result<()> {
        r.map_err(|e| {
            error!("Boot: {}", e);
            let err = e.into();
            self.sink.report(&err);
            err
        })
    }
}
