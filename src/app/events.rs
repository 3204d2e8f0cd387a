//! Outbound application events.
//!
//! The [`TransmissionCoordinator`](super::coordinator::TransmissionCoordinator)
//! emits these through the [`EventSink`](super::ports::EventSink) port.
//! Adapters decide what to do with them.

use crate::error::TransportError;
use crate::payload::Payload;

use super::ports::ButtonPresses;

/// Structured events emitted by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Boot sequence completed; carries the measurement period.
    Booted { period_secs: u32 },

    /// A real motion event was recorded.  `count` is the running counter.
    MotionDetected { count: u16 },

    /// A button burst was classified.
    ButtonPressed(ButtonPresses),

    /// A payload was delivered.
    Transmitted { payload: Payload },

    /// A payload was not delivered; `retained_count` carries over.
    TransmitFailed {
        error: TransportError,
        retained_count: u16,
    },

    /// Four-press gesture: device reset requested.
    ResetRequested,
}
