//! Pending-interrupt bit-set shared between ISRs and the main loop.
//!
//! Interrupt handlers never do work themselves: they set a bit and
//! return.  The main loop reads and clears the bits in one dispatcher
//! pass, then suspends only when the whole set reads zero.
//!
//! ```text
//! ┌─────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │ RTC alarm   │────▶│                   │     │              │
//! │ Button GPIO │────▶│ PendingInterrupts │────▶│  Dispatcher  │
//! │ Accel INT   │────▶│   (AtomicU8)      │     │  (main loop) │
//! └─────────────┘     └───────────────────┘     └──────────────┘
//! ```
//!
//! Setting is an atomic OR and clearing is an atomic AND with the
//! inverted mask, so a handler raising one source can never lose a
//! concurrent clear of another.  A handler may raise a bit right after
//! the loop observed the set as empty; the node then wakes again
//! immediately, which is harmless.

use core::sync::atomic::{AtomicU8, Ordering};

/// Interrupt sources the core reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum InterruptSource {
    /// Periodic measurement alarm.
    Timer = 0b0000_0001,
    /// User button edge.
    Button = 0b0000_0010,
    /// Accelerometer transient interrupt line.
    Motion = 0b0000_0100,
}

impl InterruptSource {
    /// Every source, in dispatch order.
    pub const ALL: [Self; 3] = [Self::Timer, Self::Button, Self::Motion];

    /// Return the bitmask for this source.
    pub const fn mask(self) -> u8 {
        self as u8
    }
}

/// Lock-free set of pending interrupt sources.
///
/// Construct one per process (see [`PENDING`]) on target; tests build
/// their own and inject it into both the simulated ISRs and the
/// coordinator.
#[derive(Debug, Default)]
pub struct PendingInterrupts {
    bits: AtomicU8,
}

impl PendingInterrupts {
    pub const fn new() -> Self {
        Self {
            bits: AtomicU8::new(0),
        }
    }

    /// Mark `source` pending.  Safe to call from interrupt context.
    pub fn raise(&self, source: InterruptSource) {
        self.bits.fetch_or(source.mask(), Ordering::AcqRel);
    }

    /// Clear `source`, leaving every other bit untouched.
    pub fn clear(&self, source: InterruptSource) {
        self.bits.fetch_and(!source.mask(), Ordering::AcqRel);
    }

    /// Clear every source (boot only).
    pub fn clear_all(&self) {
        self.bits.store(0, Ordering::Release);
    }

    pub fn is_pending(&self, source: InterruptSource) -> bool {
        self.bits.load(Ordering::Acquire) & source.mask() != 0
    }

    /// True when no source is pending.  Advisory: a handler may raise a
    /// bit the instant after this returns.
    pub fn is_empty(&self) -> bool {
        self.bits.load(Ordering::Acquire) == 0
    }

    /// Raw bitmask, for logging.
    pub fn bits(&self) -> u8 {
        self.bits.load(Ordering::Acquire)
    }
}

/// Process-wide pending set written by the ESP-IDF ISR and timer
/// callbacks in [`crate::drivers`].
pub static PENDING: PendingInterrupts = PendingInterrupts::new();

/// ISR entry point: mark `source` pending on the process-wide set.
pub fn raise_from_isr(source: InterruptSource) {
    PENDING.raise(source);
}
