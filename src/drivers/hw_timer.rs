//! Periodic measurement alarm using ESP-IDF's esp_timer API.
//!
//! The callback runs in the esp_timer task context and only raises
//! [`InterruptSource::Timer`] in the pending set, which is a single
//! atomic OR.  On simulation targets no timer is armed.

use crate::error::HardwareInitError;

#[cfg(target_os = "espidf")]
use crate::events::{InterruptSource, raise_from_isr};

#[cfg(target_os = "espidf")]
use esp_idf_sys::*;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init::check_rc;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
static mut ALARM_TIMER: esp_timer_handle_t = core::ptr::null_mut();

/// SAFETY: ALARM_TIMER is written once in `start_alarm()` before any
/// callback fires.  Only called from the single main task.
#[cfg(target_os = "espidf")]
unsafe fn alarm_timer() -> esp_timer_handle_t {
    unsafe { ALARM_TIMER }
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn alarm_cb(_arg: *mut core::ffi::c_void) {
    raise_from_isr(InterruptSource::Timer);
}

/// Arm the periodic measurement alarm.
///
/// A second call restarts the existing timer with the new period.
#[cfg(target_os = "espidf")]
pub fn start_alarm(period_secs: u32) -> Result<(), HardwareInitError> {
    let period_us = u64::from(period_secs) * 1_000_000;
    // SAFETY: ALARM_TIMER is written here from the main task before the
    // callback can fire; the callback only touches an atomic.
    unsafe {
        let existing = alarm_timer();
        if existing.is_null() {
            let args = esp_timer_create_args_t {
                callback: Some(alarm_cb),
                arg: core::ptr::null_mut(),
                dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
                name: b"measure\0".as_ptr() as *const _,
                skip_unhandled_events: true,
            };
            check_rc(
                esp_timer_create(&args, &raw mut ALARM_TIMER),
                HardwareInitError::Timer,
            )?;
        } else {
            // ESP_ERR_INVALID_STATE: the timer was not running.
            let ret = esp_timer_stop(existing);
            if ret != ESP_ERR_INVALID_STATE as i32 {
                check_rc(ret, HardwareInitError::Timer)?;
            }
        }

        check_rc(
            esp_timer_start_periodic(alarm_timer(), period_us),
            HardwareInitError::Timer,
        )?;
    }
    info!("hw_timer: measurement alarm every {}s", period_secs);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn start_alarm(period_secs: u32) -> Result<(), HardwareInitError> {
    log::info!("hw_timer(sim): alarm every {}s not armed", period_secs);
    Ok(())
}
