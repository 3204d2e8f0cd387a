//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns every driver and exposes them through the sensor, radio,
//! scheduler, and LED ports.  Generic over the I2C bus, the delay
//! source, and the radio so the same bundle runs on the host with
//! simulation stubs underneath.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::app::ports::{
    BatteryPort, ButtonPort, ButtonPresses, MotionPort, RadioPort, Rgb, SchedulerPort,
    StatusLedPort,
};
use crate::config::AccelRange;
use crate::drivers::battery::BatterySampler;
use crate::drivers::button::ButtonDriver;
use crate::drivers::fxos8700::Fxos8700;
use crate::drivers::hw_init::{self, RawInputPin};
use crate::drivers::hw_timer;
use crate::drivers::power::PowerManager;
use crate::drivers::status_led::StatusLed;
use crate::error::{HardwareInitError, TransportError};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<I, D, R> {
    battery: BatterySampler,
    accel: Fxos8700<I>,
    button: ButtonDriver<RawInputPin, D>,
    radio: R,
    power: PowerManager,
    led: StatusLed,
}

impl<I, D, R> HardwareAdapter<I, D, R>
where
    I: I2c,
    D: DelayNs,
    R: RadioPort,
{
    pub fn new(
        accel: Fxos8700<I>,
        button: ButtonDriver<RawInputPin, D>,
        radio: R,
    ) -> Self {
        Self {
            battery: BatterySampler::new(),
            accel,
            button,
            radio,
            power: PowerManager::new(),
            led: StatusLed::new(),
        }
    }

    pub fn power(&self) -> &PowerManager {
        &self.power
    }

    pub fn led(&self) -> &StatusLed {
        &self.led
    }
}

// ── Sensor ports ──────────────────────────────────────────────

impl<I, D, R> BatteryPort for HardwareAdapter<I, D, R> {
    fn sample_mv(&mut self) -> u16 {
        self.battery.sample_mv()
    }
}

impl<I: I2c, D, R> MotionPort for HardwareAdapter<I, D, R> {
    fn init(&mut self) -> Result<(), HardwareInitError> {
        self.accel.init()
    }

    fn set_transient_mode(
        &mut self,
        range: AccelRange,
        threshold: u8,
        count: u8,
    ) -> Result<(), HardwareInitError> {
        self.accel.set_transient_mode(range, threshold, count)
    }

    fn clear_and_check(&mut self) -> bool {
        self.accel.clear_transient_interrupt()
    }
}

impl<I, D: DelayNs, R> ButtonPort for HardwareAdapter<I, D, R> {
    fn configure(&mut self) -> Result<(), HardwareInitError> {
        hw_init::init_isr_service()
    }

    fn classify_presses(&mut self) -> ButtonPresses {
        self.button.classify()
    }
}

// ── Radio port ────────────────────────────────────────────────

impl<I, D, R: RadioPort> RadioPort for HardwareAdapter<I, D, R> {
    fn init(&mut self) -> Result<(), HardwareInitError> {
        self.radio.init()
    }

    fn send(&mut self, payload: &[u8], ack_required: bool) -> Result<(), TransportError> {
        self.radio.send(payload, ack_required)
    }
}

// ── Scheduler / LED ports ─────────────────────────────────────

impl<I, D, R> SchedulerPort for HardwareAdapter<I, D, R> {
    fn start_alarm(&mut self, period_secs: u32) -> Result<(), HardwareInitError> {
        hw_timer::start_alarm(period_secs)
    }

    fn request_reset(&mut self) {
        self.led.off();
        self.power.request_reset();
    }

    fn suspend(&mut self) {
        self.power.suspend();
    }
}

impl<I, D, R> StatusLedPort for HardwareAdapter<I, D, R> {
    fn set_led(&mut self, colour: Rgb) {
        self.led.set_colour(colour);
    }
}
