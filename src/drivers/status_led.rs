//! RGB status LED driver.
//!
//! Three plain GPIO outputs drive discrete R/G/B LEDs, so each channel
//! is on for any non-zero level.
//!
//! On ESP-IDF: writes the pins through hw_init.
//! On host/test: tracks state in-memory only.

use crate::app::ports::{LED_OFF, Rgb};
use crate::drivers::hw_init;
use crate::pins;

pub struct StatusLed {
    current: Rgb,
}

impl Default for StatusLed {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusLed {
    pub fn new() -> Self {
        Self { current: LED_OFF }
    }

    pub fn set_colour(&mut self, (r, g, b): Rgb) {
        hw_init::gpio_write(pins::LED_R_GPIO, r != 0);
        hw_init::gpio_write(pins::LED_G_GPIO, g != 0);
        hw_init::gpio_write(pins::LED_B_GPIO, b != 0);
        self.current = (r, g, b);
    }

    pub fn off(&mut self) {
        self.set_colour(LED_OFF);
    }

    pub fn current_colour(&self) -> Rgb {
        self.current
    }
}
