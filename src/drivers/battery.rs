//! Battery voltage sampler.
//!
//! The cell is measured through a 1:2 divider on ADC1 at 12 dB
//! attenuation (≈ 0–3100 mV full scale), so the pin sees half the cell
//! voltage.  Stateless: every call is a fresh conversion.

use crate::drivers::hw_init;
use crate::pins;

/// Full-scale input at 12 dB attenuation (mV).
const ADC_FULL_SCALE_MV: u32 = 3100;
const ADC_MAX_RAW: u32 = 4095;
/// Cell voltage = pin voltage × this.
const DIVIDER_RATIO: u32 = 2;

/// Reported on the host, where there is no ADC.
#[cfg(not(target_os = "espidf"))]
const SIM_BATTERY_MV: u16 = 3600;

/// Convert a raw 12-bit sample to cell millivolts, saturating at `u16::MAX`.
pub fn raw_to_mv(raw: u16) -> u16 {
    let raw = u32::from(raw).min(ADC_MAX_RAW);
    let mv = raw * ADC_FULL_SCALE_MV * DIVIDER_RATIO / ADC_MAX_RAW;
    u16::try_from(mv).unwrap_or(u16::MAX)
}

pub struct BatterySampler {
    channel: u32,
}

impl Default for BatterySampler {
    fn default() -> Self {
        Self::new()
    }
}

impl BatterySampler {
    pub fn new() -> Self {
        Self {
            channel: pins::BATTERY_ADC_CHANNEL,
        }
    }

    #[cfg(target_os = "espidf")]
    pub fn sample_mv(&mut self) -> u16 {
        raw_to_mv(hw_init::adc1_read(self.channel))
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn sample_mv(&mut self) -> u16 {
        let _ = hw_init::adc1_read(self.channel);
        SIM_BATTERY_MV
    }
}
