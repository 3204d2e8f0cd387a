//! Serial byte channel between the MCU and the radio modem.
//!
//! [`AtModemRadio`](crate::adapters::at_modem::AtModemRadio) only needs
//! to push command bytes and poll for reply bytes, so the channel is a
//! small trait.  On target it is backed by the ESP-IDF UART
//! ([`adapters::uart`](crate::adapters::uart)); host tests script it.

/// Non-blocking byte pipe to the modem.
pub trait Transport {
    type Error: core::fmt::Debug;

    /// Copy whatever bytes have arrived into `buf`.  `Ok(0)` means none
    /// yet; callers poll.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Queue `data` for sending; may accept fewer bytes than offered.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Block until queued bytes are on the wire.
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Unread bytes are waiting.
    fn available(&self) -> bool;
}

/// Modem that is powered off or unplugged: accepts every byte, never answers.
#[cfg(test)]
pub(crate) struct SilentLine;

#[cfg(test)]
impl Transport for SilentLine {
    type Error = core::convert::Infallible;

    fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> {
        Ok(0)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn available(&self) -> bool {
        false
    }
}
