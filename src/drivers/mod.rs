//! Peripheral drivers and hardware initialisation.

pub mod battery;
pub mod button;
pub mod fxos8700;
pub mod hw_init;
pub mod hw_timer;
pub mod power;
pub mod status_led;
