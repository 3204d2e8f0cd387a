//! Reset and low-power wait.
//!
//! On ESP-IDF `request_reset` never returns.  `suspend` enters light
//! sleep; GPIO wake sources are armed by
//! [`hw_init::init_isr_service`](crate::drivers::hw_init::init_isr_service)
//! and the alarm keeps running through esp_timer wakeup.

#[cfg(target_os = "espidf")]
use esp_idf_sys::*;

#[derive(Default)]
pub struct PowerManager {
    resets: u32,
    suspends: u32,
}

impl PowerManager {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(target_os = "espidf")]
    pub fn request_reset(&mut self) {
        log::warn!("power: system reset requested");
        self.resets += 1;
        // SAFETY: esp_restart has no preconditions.
        unsafe { esp_restart() };
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn request_reset(&mut self) {
        log::warn!("power(sim): system reset requested");
        self.resets += 1;
    }

    #[cfg(target_os = "espidf")]
    pub fn suspend(&mut self) {
        self.suspends += 1;
        // SAFETY: wake sources were configured during boot.
        let ret = unsafe { esp_sleep_enable_timer_wakeup(MAX_SLEEP_US) };
        if ret != ESP_OK as i32 {
            log::warn!("power: timer wakeup not armed (rc={})", ret);
            return;
        }
        // Rejected sleep (a wake source already pending) returns at once.
        let ret = unsafe { esp_light_sleep_start() };
        if ret != ESP_OK as i32 {
            log::debug!("power: light sleep rejected (rc={})", ret);
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn suspend(&mut self) {
        self.suspends += 1;
        log::debug!("power(sim): suspend #{}", self.suspends);
    }

    pub fn reset_count(&self) -> u32 {
        self.resets
    }

    pub fn suspend_count(&self) -> u32 {
        self.suspends
    }
}

/// Upper bound on a single light-sleep so the alarm is never missed
/// while the esp_timer task is suspended.
#[cfg(target_os = "espidf")]
const MAX_SLEEP_US: u64 = 1_000_000;
