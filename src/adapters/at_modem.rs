//! Radio adapter for a Sigfox AT-command modem on a serial link.
//!
//! Implements [`RadioPort`] over any [`Transport`].  The exchange is
//! line oriented, with commands terminated by `\r` and replies by `\r\n`:
//!
//! | Command              | Success reply           | Failure reply |
//! |----------------------|-------------------------|---------------|
//! | `AT`                 | `OK`                    | anything else |
//! | `AT$SF=<hex>`        | `OK`                    | `ERR=<code>`  |
//! | `AT$SF=<hex>,1`      | `OK` then `RX=<bytes>`  | `ERR=<code>`, or no `RX=` |
//!
//! Lines that match none of these (command echo, banners) are skipped.
//! The adapter never retries; a failed send is the caller's to handle.

use core::fmt::Write as _;

use embedded_hal::delay::DelayNs;
use heapless::String;
use log::{debug, info, warn};

use crate::app::ports::RadioPort;
use crate::error::{HardwareInitError, TransportError};
use crate::transport::Transport;

const POLL_MS: u32 = 10;
const PROBE_TIMEOUT_MS: u32 = 1_000;
/// Uplink without downlink: a few seconds on air plus modem overhead.
const UPLINK_TIMEOUT_MS: u32 = 10_000;
/// Downlink window opens ~20 s after the uplink and lasts ~25 s.
const DOWNLINK_TIMEOUT_MS: u32 = 60_000;

/// Longest uplink the modem accepts (12 bytes → 24 hex digits).
const MAX_UPLINK_LEN: usize = 12;

/// Upper bound on reads spent discarding stale input before a command.
const DRAIN_MAX_READS: usize = 64;

const LINE_CAP: usize = 64;
const CMD_CAP: usize = 48;

type Line = String<LINE_CAP>;

/// Parsed reply line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Reply {
    Ok,
    Err(u8),
    Downlink,
    Other,
}

fn parse_reply(line: &str) -> Reply {
    if line == "OK" {
        Reply::Ok
    } else if let Some(code) = line.strip_prefix("ERR") {
        let code = code.trim_start_matches(['=', '_', ' ']);
        Reply::Err(code.parse().unwrap_or(u8::MAX))
    } else if line.starts_with("RX=") {
        Reply::Downlink
    } else {
        Reply::Other
    }
}

pub struct AtModemRadio<T, D> {
    transport: T,
    delay: D,
    initialised: bool,
}

impl<T, D> AtModemRadio<T, D>
where
    T: Transport,
    D: DelayNs,
{
    pub fn new(transport: T, delay: D) -> Self {
        Self {
            transport,
            delay,
            initialised: false,
        }
    }

    pub fn is_initialised(&self) -> bool {
        self.initialised
    }

    /// Hand back the underlying channel.
    pub fn release(self) -> T {
        self.transport
    }

    fn command(&mut self, cmd: &str) -> Result<(), TransportError> {
        self.drain();
        debug!("at_modem: > {}", cmd.trim_end());
        let mut rest = cmd.as_bytes();
        while !rest.is_empty() {
            let n = self
                .transport
                .write(rest)
                .map_err(|_| TransportError::Io)?;
            if n == 0 {
                return Err(TransportError::Io);
            }
            rest = &rest[n..];
        }
        self.transport.flush().map_err(|_| TransportError::Io)
    }

    /// Discard stale bytes so the next reply lines up with the next command.
    /// Bounded so a chattering modem cannot stall the caller.
    fn drain(&mut self) {
        let mut scratch = [0u8; 16];
        for _ in 0..DRAIN_MAX_READS {
            if !self.transport.available() {
                break;
            }
            match self.transport.read(&mut scratch) {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
        }
    }

    /// Read one non-empty line, without its terminator.  Idle polling is
    /// charged against `budget_ms`, which carries over between lines.
    fn read_line(&mut self, budget_ms: &mut u32) -> Result<Line, TransportError> {
        let mut line = Line::new();
        loop {
            let mut byte = [0u8; 1];
            let n = self
                .transport
                .read(&mut byte)
                .map_err(|_| TransportError::Io)?;
            if n == 0 {
                if *budget_ms == 0 {
                    return Err(TransportError::Timeout);
                }
                self.delay.delay_ms(POLL_MS);
                *budget_ms = budget_ms.saturating_sub(POLL_MS);
                continue;
            }
            match byte[0] {
                b'\r' => {}
                b'\n' if line.is_empty() => {}
                b'\n' => {
                    debug!("at_modem: < {}", line);
                    return Ok(line);
                }
                // Overlong lines are truncated; only the prefix is parsed.
                b => {
                    let _ = line.push(char::from(b));
                }
            }
        }
    }

    /// Wait for a reply that is not [`Reply::Other`].  `timeout_ms` bounds
    /// the whole wait, skipped lines included.
    fn expect_reply(&mut self, timeout_ms: u32) -> Result<Reply, TransportError> {
        let mut budget = timeout_ms;
        loop {
            let line = self.read_line(&mut budget)?;
            match parse_reply(&line) {
                Reply::Other => continue,
                reply => return Ok(reply),
            }
        }
    }
}

impl<T, D> RadioPort for AtModemRadio<T, D>
where
    T: Transport,
    D: DelayNs,
{
    fn init(&mut self) -> Result<(), HardwareInitError> {
        let probe = self
            .command("AT\r")
            .and_then(|()| self.expect_reply(PROBE_TIMEOUT_MS));
        match probe {
            Ok(Reply::Ok) => {
                self.initialised = true;
                info!("at_modem: modem ready");
                Ok(())
            }
            other => {
                warn!("at_modem: probe failed: {:?}", other);
                Err(HardwareInitError::Radio)
            }
        }
    }

    fn send(&mut self, payload: &[u8], ack_required: bool) -> Result<(), TransportError> {
        if !self.initialised {
            return Err(TransportError::NotInitialised);
        }
        let payload = &payload[..payload.len().min(MAX_UPLINK_LEN)];

        let mut cmd: String<CMD_CAP> = String::new();
        let _ = cmd.push_str("AT$SF=");
        for b in payload {
            let _ = write!(cmd, "{:02X}", b);
        }
        if ack_required {
            let _ = cmd.push_str(",1");
        }
        let _ = cmd.push('\r');
        self.command(&cmd)?;

        let timeout = if ack_required {
            DOWNLINK_TIMEOUT_MS
        } else {
            UPLINK_TIMEOUT_MS
        };
        match self.expect_reply(timeout)? {
            Reply::Ok if !ack_required => Ok(()),
            Reply::Ok => match self.expect_reply(DOWNLINK_TIMEOUT_MS) {
                Ok(Reply::Downlink) => Ok(()),
                Ok(Reply::Err(code)) => Err(TransportError::Modem(code)),
                Ok(_) | Err(TransportError::Timeout) => Err(TransportError::Nack),
                Err(e) => Err(e),
            },
            Reply::Downlink => Ok(()),
            Reply::Err(code) => Err(TransportError::Modem(code)),
            Reply::Other => Err(TransportError::Io),
        }
    }
}
