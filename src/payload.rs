//! 4-byte uplink payload codec.
//!
//! Wire format (bit 7 = MSB of each byte):
//! ```text
//!  byte 0            byte 1                  byte 2        byte 3
//! ┌─────┬─────────┐ ┌─────┬───┬──────────┐ ┌───────────┐ ┌───────────┐
//! │ 110 │ battery │ │ spc │ b │   mode   │ │ count MSB │ │ count LSB │
//! │ 7:5 │   4:0   │ │ 7:6 │ 5 │   4:0    │ │           │ │           │
//! └─────┴─────────┘ └─────┴───┴──────────┘ └───────────┘ └───────────┘
//! ```
//!
//! Fields are packed with explicit shifts and masks, never through a
//! native bit-field layout, so the byte order is the same on every
//! target.
//!
//! To convert the battery field back to volts: `(battery × 0.05) + 2.7`.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::app::state::EventState;
use crate::error::DecodeError;

/// Length of every payload on the wire.
pub const PAYLOAD_LEN: usize = 4;

/// Byte 0 bits [7:5] marker.
pub const RESERVED_MARKER: u8 = 0b110;

pub const BATTERY_LVL_MIN: u16 = 2700; // 2.7 V
pub const BATTERY_LVL_MAX: u16 = 4250; // 4.25 V
pub const BATTERY_LVL_OFFSET: u16 = 2700; // 2.7 V
pub const BATTERY_LVL_STEP: u16 = 50; // 50 mV

const FIVE_BITS: u8 = 0b1_1111;

// ───────────────────────────────────────────────────────────────
// Battery quantizer
// ───────────────────────────────────────────────────────────────

/// Clamp `battery_mv` to [2700, 4250] mV and map it onto 50 mV steps.
///
/// Result is always in `0..=31`.
pub const fn quantize_battery(battery_mv: u16) -> u8 {
    let clamped = if battery_mv < BATTERY_LVL_MIN {
        BATTERY_LVL_MIN
    } else if battery_mv > BATTERY_LVL_MAX {
        BATTERY_LVL_MAX
    } else {
        battery_mv
    };
    ((clamped - BATTERY_LVL_OFFSET) / BATTERY_LVL_STEP) as u8
}

/// Lower edge of a quantized battery bucket, in millivolts.
pub const fn battery_level_to_mv(level: u8) -> u16 {
    (level & FIVE_BITS) as u16 * BATTERY_LVL_STEP + BATTERY_LVL_OFFSET
}

// ───────────────────────────────────────────────────────────────
// Payload mode
// ───────────────────────────────────────────────────────────────

/// Payload mode selector carried in byte 1 bits [4:0].
///
/// Only [`PayloadMode::Vibration`] defines the special-value field; the
/// other modes are recognised on decode but encode a zero special value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PayloadMode {
    Vibration = 0x01,
    Door = 0x02,
    Magnet = 0x03,
}

impl PayloadMode {
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for PayloadMode {
    type Error = DecodeError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0x01 => Ok(Self::Vibration),
            0x02 => Ok(Self::Door),
            0x03 => Ok(Self::Magnet),
            other => Err(DecodeError::UnknownMode(other)),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Payload
// ───────────────────────────────────────────────────────────────

/// An encoded, immutable uplink payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Payload([u8; PAYLOAD_LEN]);

impl Payload {
    /// Pack `snapshot` for `mode`.  Total and deterministic.
    ///
    /// Byte1 bit 5 carries `button_pressed`, which is set by any classified
    /// press burst other than a bounce or the reset gesture.  Older node
    /// firmware always sent 0 there, so decoders must not treat a set bit
    /// as a different frame type.
    pub fn encode(mode: PayloadMode, snapshot: &EventState) -> Self {
        let battery = quantize_battery(snapshot.battery_mv);
        let special = match mode {
            PayloadMode::Vibration => u8::from(snapshot.vibration),
            PayloadMode::Door | PayloadMode::Magnet => 0,
        };
        let [counter_msb, counter_lsb] = snapshot.event_counter.to_be_bytes();

        Self([
            (RESERVED_MARKER << 5) | battery,
            (special << 6) | (u8::from(snapshot.button_pressed) << 5) | mode.code(),
            counter_msb,
            counter_lsb,
        ])
    }

    /// Validate raw bytes received from the network side.
    pub fn decode(bytes: [u8; PAYLOAD_LEN]) -> Result<Self, DecodeError> {
        let reserved = bytes[0] >> 5;
        if reserved != RESERVED_MARKER {
            return Err(DecodeError::BadReserved(reserved));
        }
        PayloadMode::try_from(bytes[1] & FIVE_BITS)?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; PAYLOAD_LEN] {
        &self.0
    }

    pub fn into_bytes(self) -> [u8; PAYLOAD_LEN] {
        self.0
    }

    pub fn battery_level(&self) -> u8 {
        self.0[0] & FIVE_BITS
    }

    /// Lower edge of the reported battery bucket, in millivolts.
    pub fn battery_mv(&self) -> u16 {
        battery_level_to_mv(self.battery_level())
    }

    /// Two-bit special value (vibration mode: 1 = vibration detected).
    pub fn special_value(&self) -> u8 {
        self.0[1] >> 6
    }

    pub fn button(&self) -> bool {
        self.0[1] & 0b0010_0000 != 0
    }

    pub fn mode(&self) -> PayloadMode {
        // Both constructors guarantee a known mode code.
        PayloadMode::try_from(self.0[1] & FIVE_BITS).unwrap_or(PayloadMode::Vibration)
    }

    pub fn event_counter(&self) -> u16 {
        u16::from_be_bytes([self.0[2], self.0[3]])
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{:02X}", b)?;
        }
        Ok(())
    }
}
