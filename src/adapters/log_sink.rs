//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] and [`ErrorReporter`] by writing one line
//! per event to the `log` facade (UART / USB-CDC in production).

use log::{error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::{ErrorReporter, EventSink};
use crate::error::Error;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink {
    reported: u32,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of errors reported since boot.
    pub fn reported(&self) -> u32 {
        self.reported
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Booted { period_secs } => {
                info!("BOOT | measurement period {}s", period_secs);
            }
            AppEvent::MotionDetected { count } => {
                info!("MOTION | event_counter={}", count);
            }
            AppEvent::ButtonPressed(presses) => {
                info!("BUTTON | {:?}", presses);
            }
            AppEvent::Transmitted { payload } => {
                info!(
                    "TX | {} | batt={}mV vib={} btn={} count={}",
                    payload,
                    payload.battery_mv(),
                    payload.special_value(),
                    payload.button(),
                    payload.event_counter(),
                );
            }
            AppEvent::TransmitFailed {
                error,
                retained_count,
            } => {
                warn!("TXERR | {} | keeping count {}", error, retained_count);
            }
            AppEvent::ResetRequested => {
                warn!("RESET | quadruple press");
            }
        }
    }
}

impl ErrorReporter for LogEventSink {
    fn report(&mut self, err: &Error) {
        self.reported = self.reported.wrapping_add(1);
        error!("ERROR | {}", err);
    }
}
