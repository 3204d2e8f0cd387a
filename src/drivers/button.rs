//! Press-count classifier for the user button.
//!
//! ## Hardware
//!
//! Active-low momentary switch with pull-up.  The GPIO ISR only marks
//! [`InterruptSource::Button`](crate::events::InterruptSource::Button)
//! pending; the dispatcher then calls [`ButtonDriver::classify`], which
//! polls the pin until the burst of presses is over.
//!
//! ## Classification
//!
//! | Outcome    | Condition                                         |
//! |------------|---------------------------------------------------|
//! | `None`     | No debounced press within the first window        |
//! | `One`..`Four` | N presses, each gap < `PRESS_GAP_MS`           |
//! | `TooMany`  | Five or more presses                              |
//! | `LongPress`| First press held >= `LONG_PRESS_MS`               |

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

use crate::app::ports::ButtonPresses;

const POLL_MS: u32 = 10;
const DEBOUNCE_MS: u32 = 30;
/// How long to wait for the first press after the edge interrupt.
const FIRST_PRESS_WINDOW_MS: u32 = 200;
/// Maximum release-to-press gap inside one burst.
const PRESS_GAP_MS: u32 = 500;
const LONG_PRESS_MS: u32 = 2000;
/// Upper bound on waiting for release after a long press.
const RELEASE_TIMEOUT_MS: u32 = 10_000;

pub struct ButtonDriver<P, D> {
    pin: P,
    delay: D,
}

impl<P, D> ButtonDriver<P, D>
where
    P: InputPin,
    D: DelayNs,
{
    pub fn new(pin: P, delay: D) -> Self {
        Self { pin, delay }
    }

    /// Count presses until the gap after the last release exceeds
    /// `PRESS_GAP_MS`.  Blocks for the duration of the burst.
    pub fn classify(&mut self) -> ButtonPresses {
        let mut presses: u8 = 0;

        loop {
            let window = if presses == 0 {
                FIRST_PRESS_WINDOW_MS
            } else {
                PRESS_GAP_MS
            };
            if !self.wait_for(true, window) {
                break;
            }

            self.delay.delay_ms(DEBOUNCE_MS);
            if !self.is_pressed() {
                continue;
            }

            if !self.wait_for(false, LONG_PRESS_MS) {
                if presses == 0 {
                    self.wait_for(false, RELEASE_TIMEOUT_MS);
                    return ButtonPresses::LongPress;
                }
                presses = presses.saturating_add(1);
                break;
            }
            presses = presses.saturating_add(1);
        }

        match presses {
            0 => ButtonPresses::None,
            1 => ButtonPresses::One,
            2 => ButtonPresses::Two,
            3 => ButtonPresses::Three,
            4 => ButtonPresses::Four,
            _ => ButtonPresses::TooMany,
        }
    }

    /// Poll until the pin reads `pressed`, or `timeout_ms` elapses.
    fn wait_for(&mut self, pressed: bool, timeout_ms: u32) -> bool {
        let mut waited = 0;
        loop {
            if self.is_pressed() == pressed {
                return true;
            }
            if waited >= timeout_ms {
                return false;
            }
            self.delay.delay_ms(POLL_MS);
            waited += POLL_MS;
        }
    }

    /// Active-low.  A read error counts as released.
    fn is_pressed(&mut self) -> bool {
        self.pin.is_low().unwrap_or(false)
    }
}
