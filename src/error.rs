//! Unified error types for the vibration node firmware.
//!
//! A single `Error` enum that every subsystem converts into, so the
//! coordinator can hand any failure to the
//! [`ErrorReporter`](crate::app::ports::ErrorReporter) the same way.
//! All variants are `Copy` so they can travel through events and pass
//! reports without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The radio could not deliver a payload.
    Transport(TransportError),
    /// A peripheral failed to initialise at boot.
    Init(HardwareInitError),
    /// Configuration is invalid or could not be parsed.
    Config(ConfigError),
    /// A received payload is malformed.
    Decode(DecodeError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Decode(e) => write!(f, "decode: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

/// Radio send failures.  Never retried by the coordinator: the event
/// counter is kept instead, so the next successful send carries the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// `send` was called before the radio was initialised.
    NotInitialised,
    /// The modem did not answer within its response window.
    Timeout,
    /// A downlink acknowledgement was requested but never arrived.
    Nack,
    /// The modem answered with an error code.
    Modem(u8),
    /// The byte channel to the modem failed.
    Io,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialised => write!(f, "radio not initialised"),
            Self::Timeout => write!(f, "modem response timeout"),
            Self::Nack => write!(f, "no acknowledgement"),
            Self::Modem(code) => write!(f, "modem error {code}"),
            Self::Io => write!(f, "modem I/O error"),
        }
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

// ---------------------------------------------------------------------------
// Hardware init errors
// ---------------------------------------------------------------------------

/// Errors during one-shot peripheral initialisation.  Reported once at
/// boot and treated as fatal by the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareInitError {
    /// Radio modem did not respond to its init sequence.
    Radio,
    /// Accelerometer WHO_AM_I mismatch or bus failure.
    Accelerometer,
    /// Measurement alarm timer could not be created (ESP-IDF rc).
    Timer(i32),
    /// GPIO / ISR configuration failed (ESP-IDF rc).
    Gpio(i32),
    /// ADC unit or channel configuration failed (ESP-IDF rc).
    Adc(i32),
}

impl fmt::Display for HardwareInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Radio => write!(f, "radio init failed"),
            Self::Accelerometer => write!(f, "accelerometer init failed"),
            Self::Timer(rc) => write!(f, "timer init failed (rc={})", rc),
            Self::Gpio(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::Adc(rc) => write!(f, "ADC init failed (rc={})", rc),
        }
    }
}

impl From<HardwareInitError> for Error {
    fn from(e: HardwareInitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The JSON document could not be parsed into a [`NodeConfig`](crate::config::NodeConfig).
    Parse,
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse => write!(f, "config parse failed"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Payload decode errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Byte 0 bits [7:5] are not the `0b110` marker.
    BadReserved(u8),
    /// Byte 1 bits [4:0] name no known payload mode.
    UnknownMode(u8),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadReserved(bits) => write!(f, "reserved bits 0b{:03b}, expected 0b110", bits),
            Self::UnknownMode(mode) => write!(f, "unknown payload mode {}", mode),
        }
    }
}

impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Self {
        Self::Decode(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
