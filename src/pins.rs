//! GPIO / peripheral pin assignments for the vibration node board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// User input
// ---------------------------------------------------------------------------

/// Momentary push button, active LOW with internal pull-up.
pub const BUTTON_GPIO: i32 = 0;

// ---------------------------------------------------------------------------
// Accelerometer (FXOS8700, I2C)
// ---------------------------------------------------------------------------

pub const ACCEL_SDA_GPIO: i32 = 8;
pub const ACCEL_SCL_GPIO: i32 = 9;
/// INT1 output, active LOW, routed from the transient detector.
pub const ACCEL_INT_GPIO: i32 = 10;
/// I2C bus clock.
pub const ACCEL_I2C_HZ: u32 = 400_000;

// ---------------------------------------------------------------------------
// Radio modem (UART, AT commands)
// ---------------------------------------------------------------------------

pub const MODEM_TX_GPIO: i32 = 17;
pub const MODEM_RX_GPIO: i32 = 18;
pub const MODEM_BAUD: u32 = 9600;

// ---------------------------------------------------------------------------
// Battery sense (ADC1)
// ---------------------------------------------------------------------------

/// Battery through a 1:2 resistive divider.
/// ADC1 channel 3 (GPIO 4 on ESP32-S3).
pub const BATTERY_ADC_GPIO: i32 = 4;
pub const BATTERY_ADC_CHANNEL: u32 = 3;

// ---------------------------------------------------------------------------
// Status LED (discrete R/G/B, active HIGH)
// ---------------------------------------------------------------------------

pub const LED_R_GPIO: i32 = 38;
pub const LED_G_GPIO: i32 = 39;
pub const LED_B_GPIO: i32 = 40;
