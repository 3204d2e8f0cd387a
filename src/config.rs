//! Node configuration parameters
//!
//! All tunable parameters for the vibration node.  Defaults match the
//! shipped firmware; a JSON document can override them at build time.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::payload::PayloadMode;

/// Accelerometer full-scale range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccelRange {
    G2,
    G4,
    G8,
}

impl AccelRange {
    /// Value of the XYZ_DATA_CFG `fs` field.
    pub const fn fs_bits(self) -> u8 {
        match self {
            Self::G2 => 0b00,
            Self::G4 => 0b01,
            Self::G8 => 0b10,
        }
    }
}

/// Core node configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    // --- Timing ---
    /// Measurement & message period (seconds)
    pub measurement_period_secs: u32,

    // --- Vibration detection ---
    /// Accelerometer range for transient detection
    pub accel_range: AccelRange,
    /// Transient threshold in device counts (0x10 ≈ 1 g step on 2 g range)
    pub vibration_threshold: u8,
    /// Consecutive samples above threshold before an event latches
    pub vibration_count: u8,

    // --- Uplink ---
    /// Payload mode selector
    pub mode: PayloadMode,
    /// Request a downlink acknowledgement for each uplink
    pub ack_required: bool,

    /// Version tag reported in the boot log
    pub firmware_version: heapless::String<16>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        let mut firmware_version = heapless::String::new();
        let _ = firmware_version.push_str("TEMPLATE");

        Self {
            measurement_period_secs: 60,

            accel_range: AccelRange::G2,
            vibration_threshold: 0x10,
            vibration_count: 2,

            mode: PayloadMode::Vibration,
            ack_required: false,

            firmware_version,
        }
    }
}

impl NodeConfig {
    /// Reject values the hardware cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.measurement_period_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "measurement_period_secs must be > 0",
            ));
        }
        if self.vibration_threshold == 0 || self.vibration_threshold > 0x7F {
            return Err(ConfigError::ValidationFailed(
                "vibration_threshold must be in 1..=127",
            ));
        }
        if self.vibration_count == 0 {
            return Err(ConfigError::ValidationFailed("vibration_count must be > 0"));
        }
        Ok(())
    }

    /// Parse a JSON override document.  Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            log::warn!("config JSON rejected: {}", e);
            ConfigError::Parse
        })?;
        config.validate()?;
        Ok(config)
    }
}
