//! UART byte channel to the radio modem.
//!
//! Wraps an ESP-IDF [`UartDriver`] as a [`Transport`].  Reads never
//! block; the AT adapter does its own polling with a delay.

use esp_idf_hal::delay::{BLOCK, NON_BLOCK};
use esp_idf_hal::uart::UartDriver;
use esp_idf_sys::EspError;

use crate::transport::Transport;

pub struct UartTransport {
    uart: UartDriver<'static>,
}

impl UartTransport {
    pub fn new(uart: UartDriver<'static>) -> Self {
        Self { uart }
    }
}

impl Transport for UartTransport {
    type Error = EspError;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, EspError> {
        self.uart.read(buf, NON_BLOCK)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, EspError> {
        self.uart.write(data)
    }

    fn flush(&mut self) -> Result<(), EspError> {
        self.uart.wait_tx_done(BLOCK)
    }

    fn available(&self) -> bool {
        self.uart.remaining_read().map(|n| n > 0).unwrap_or(false)
    }
}
