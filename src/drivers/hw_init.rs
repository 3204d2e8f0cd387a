//! One-shot hardware peripheral initialization.
//!
//! Configures the battery ADC channel, the LED outputs, and the GPIO
//! ISR service using raw ESP-IDF sys calls.  Called once from `main()`
//! before the coordinator boots.  ISR handlers do nothing but raise
//! their bit in [`PENDING`](crate::events::PENDING).

#[cfg(target_os = "espidf")]
use esp_idf_sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::error::HardwareInitError;
#[cfg(target_os = "espidf")]
use crate::pins;

/// ESP-IDF `ESP_OK`.
const RC_OK: i32 = 0;

/// Map an ESP-IDF return code to `Ok` or to the error built by `err`.
#[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
pub(crate) fn check_rc(
    ret: i32,
    err: fn(i32) -> HardwareInitError,
) -> Result<(), HardwareInitError> {
    if ret == RC_OK { Ok(()) } else { Err(err(ret)) }
}

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HardwareInitError> {
    // SAFETY: Called once from main() before the loop; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio_outputs()?;
    }
    info!("hw_init: peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HardwareInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only after `init_adc()` from the main task.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HardwareInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    check_rc(
        unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) },
        HardwareInitError::Adc,
    )?;

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    check_rc(
        unsafe { adc_oneshot_config_channel(adc1_handle(), pins::BATTERY_ADC_CHANNEL, &chan_cfg) },
        HardwareInitError::Adc,
    )?;

    info!("hw_init: ADC1 CH{} = battery", pins::BATTERY_ADC_CHANNEL);
    Ok(())
}

/// Raw 12-bit reading, or 0 on a failed conversion.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract: main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    raw.max(0) as u16
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u32) -> u16 {
    0
}

// ── GPIO ──────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HardwareInitError> {
    for pin in [pins::LED_R_GPIO, pins::LED_G_GPIO, pins::LED_B_GPIO] {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        check_rc(unsafe { gpio_config(&cfg) }, HardwareInitError::Gpio)?;
        check_rc(unsafe { gpio_set_level(pin, 0) }, HardwareInitError::Gpio)?;
    }
    info!("hw_init: LED outputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: read-only register access on a configured input.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    true
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: pin was configured as output in init_gpio_outputs().
    let ret = unsafe { gpio_set_level(pin, u32::from(high)) };
    if ret != ESP_OK as i32 {
        log::warn!("hw_init: gpio_set_level({}) failed (rc={})", pin, ret);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

/// [`InputPin`](embedded_hal::digital::InputPin) over a raw GPIO number,
/// for pins that also carry an ISR registered below.
pub struct RawInputPin(pub i32);

impl embedded_hal::digital::ErrorType for RawInputPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::InputPin for RawInputPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(gpio_read(self.0))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!gpio_read(self.0))
    }
}

// ── GPIO ISR Service ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
use crate::events::{InterruptSource, raise_from_isr};

#[cfg(target_os = "espidf")]
unsafe extern "C" fn button_gpio_isr(_arg: *mut core::ffi::c_void) {
    raise_from_isr(InterruptSource::Button);
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn accel_gpio_isr(_arg: *mut core::ffi::c_void) {
    raise_from_isr(InterruptSource::Motion);
}

/// Configure the button and accelerometer INT pins as inputs and hook
/// their edges to the pending-interrupt set.
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<(), HardwareInitError> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed.  Handlers only do an atomic OR.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK as i32 && ret != ESP_ERR_INVALID_STATE as i32 {
            return Err(HardwareInitError::Gpio(ret));
        }

        // Button: both edges so a press burst keeps the bit raised.
        let btn_cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pins::BUTTON_GPIO,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_ANYEDGE,
        };
        check_rc(gpio_config(&btn_cfg), HardwareInitError::Gpio)?;
        check_rc(
            gpio_isr_handler_add(pins::BUTTON_GPIO, Some(button_gpio_isr), core::ptr::null_mut()),
            HardwareInitError::Gpio,
        )?;

        // Accelerometer INT1: active-low, falling edge.
        let int_cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pins::ACCEL_INT_GPIO,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_NEGEDGE,
        };
        check_rc(gpio_config(&int_cfg), HardwareInitError::Gpio)?;
        check_rc(
            gpio_isr_handler_add(pins::ACCEL_INT_GPIO, Some(accel_gpio_isr), core::ptr::null_mut()),
            HardwareInitError::Gpio,
        )?;

        // Wake from light sleep on either line going low.
        check_rc(
            gpio_wakeup_enable(pins::BUTTON_GPIO, gpio_int_type_t_GPIO_INTR_LOW_LEVEL),
            HardwareInitError::Gpio,
        )?;
        check_rc(
            gpio_wakeup_enable(pins::ACCEL_INT_GPIO, gpio_int_type_t_GPIO_INTR_LOW_LEVEL),
            HardwareInitError::Gpio,
        )?;
        check_rc(esp_sleep_enable_gpio_wakeup(), HardwareInitError::Gpio)?;

        info!("hw_init: ISR service installed (button, accel INT1)");
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> Result<(), HardwareInitError> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}
