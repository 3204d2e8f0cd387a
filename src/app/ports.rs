//! Port traits: the hexagonal boundary between the core and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ TransmissionCoordinator (core)
//! ```
//!
//! Driven adapters (battery ADC, accelerometer, button, radio modem,
//! power management, status LED, log output) implement these traits.
//! The coordinator consumes them via generics, so the core never
//! touches hardware directly and every path runs on the host against
//! mocks.

use crate::config::AccelRange;
use crate::error::{Error, HardwareInitError, TransportError};

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Sensor ports (driven adapters: hardware → core)
// ───────────────────────────────────────────────────────────────

/// Battery voltage sampler.  Stateless; a hardware fault yields a
/// best-effort value rather than an error.
pub trait BatteryPort {
    fn sample_mv(&mut self) -> u16;
}

/// Accelerometer in transient (vibration) detection mode.
pub trait MotionPort {
    /// Probe the device and bring it out of reset.
    fn init(&mut self) -> Result<(), HardwareInitError>;

    /// Enable transient detection: `threshold` in device counts,
    /// `count` consecutive samples above it to latch an event.
    fn set_transient_mode(
        &mut self,
        range: AccelRange,
        threshold: u8,
        count: u8,
    ) -> Result<(), HardwareInitError>;

    /// Read (and thereby clear) the transient latch.  `true` means real
    /// motion, `false` means the interrupt line fired on noise.
    fn clear_and_check(&mut self) -> bool;
}

/// Classification of a burst of button presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonPresses {
    /// The edge was a bounce; no press completed.
    None,
    One,
    Two,
    Three,
    /// Four quick presses: the device-reset gesture.
    Four,
    /// Five or more quick presses.
    TooMany,
    /// A single press held past the long-press threshold.
    LongPress,
}

/// User button.
pub trait ButtonPort {
    /// Arm the button interrupt on both edges.
    fn configure(&mut self) -> Result<(), HardwareInitError>;

    /// Count presses in the current burst.  Blocks until the burst ends.
    fn classify_presses(&mut self) -> ButtonPresses;
}

// ───────────────────────────────────────────────────────────────
// Radio port (driven adapter: core → network)
// ───────────────────────────────────────────────────────────────

/// Uplink radio.  Retries, if any, belong to the implementation.
pub trait RadioPort {
    fn init(&mut self) -> Result<(), HardwareInitError>;

    /// Send `payload` and wait for the result.
    fn send(&mut self, payload: &[u8], ack_required: bool) -> Result<(), TransportError>;
}

// ───────────────────────────────────────────────────────────────
// Scheduler port (driven adapter: core → RTC / power management)
// ───────────────────────────────────────────────────────────────

pub trait SchedulerPort {
    /// Arm the periodic alarm that raises
    /// [`InterruptSource::Timer`](crate::events::InterruptSource::Timer).
    fn start_alarm(&mut self, period_secs: u32) -> Result<(), HardwareInitError>;

    /// Hard-reset the device.  Does not return on target; host
    /// implementations record the request and return.
    fn request_reset(&mut self);

    /// Sleep until the next interrupt.  May return immediately if one
    /// is already pending.
    fn suspend(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Status LED port
// ───────────────────────────────────────────────────────────────

pub type Rgb = (u8, u8, u8);

pub const LED_OFF: Rgb = (0, 0, 0);
/// Shown while a button burst is being counted.
pub const LED_MAGENTA: Rgb = (255, 0, 255);
/// Shown while the radio is sending.
pub const LED_BLUE: Rgb = (0, 0, 255);

pub trait StatusLedPort {
    fn set_led(&mut self, colour: Rgb);
}

/// Everything the coordinator needs from the board, as one bound.
pub trait NodeHardware:
    BatteryPort + MotionPort + ButtonPort + RadioPort + SchedulerPort + StatusLedPort
{
}

impl<T> NodeHardware for T where
    T: BatteryPort + MotionPort + ButtonPort + RadioPort + SchedulerPort + StatusLedPort
{
}

// ───────────────────────────────────────────────────────────────
// Outbound ports (core → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// Every fallible call the coordinator makes routes its error here.
pub trait ErrorReporter {
    fn report(&mut self, error: &Error);
}

/// The core emits structured [`AppEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
