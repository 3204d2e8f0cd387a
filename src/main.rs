//! Vibration Node Firmware: Main Entry Point
//!
//! Hexagonal architecture with an interrupt-driven main loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter              AtModemRadio       LogEventSink  │
//! │  (Battery+Motion+Button+      (RadioPort over    (EventSink +  │
//! │   Scheduler+StatusLed)         UartTransport)     ErrorReporter)│
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │        TransmissionCoordinator (pure logic)            │    │
//! │  │  Dispatcher · EventAccumulator · Payload encoder       │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  ISRs / esp_timer ──▶ PENDING (atomic bit-set)                 │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info, warn};

use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::AnyIOPin;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::prelude::*;
use esp_idf_hal::uart::{UartConfig, UartDriver};

use vibration_node::adapters::at_modem::AtModemRadio;
use vibration_node::adapters::hardware::HardwareAdapter;
use vibration_node::adapters::log_sink::LogEventSink;
use vibration_node::adapters::uart::UartTransport;
use vibration_node::app::coordinator::TransmissionCoordinator;
use vibration_node::config::NodeConfig;
use vibration_node::drivers::button::ButtonDriver;
use vibration_node::drivers::fxos8700::{DEFAULT_ADDRESS, Fxos8700};
use vibration_node::drivers::hw_init::{self, RawInputPin};
use vibration_node::events::PENDING;
use vibration_node::pins;

/// Build-time JSON override for [`NodeConfig`].
const CONFIG_OVERRIDE: Option<&str> = option_env!("VIBRATION_NODE_CONFIG");

fn load_config() -> NodeConfig {
    match CONFIG_OVERRIDE {
        Some(json) => match NodeConfig::from_json(json) {
            Ok(cfg) => {
                info!("Config: build-time override applied");
                cfg
            }
            Err(e) => {
                warn!("Config override rejected ({}), using defaults", e);
                NodeConfig::default()
            }
        },
        None => NodeConfig::default(),
    }
}

fn halt() -> ! {
    // The task watchdog resets the chip once this loop starves it.
    loop {
        FreeRtos::delay_ms(1000);
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Vibration node v{}                 ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = load_config();

    // ── 2. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        error!("HAL init failed: {}, halting", e);
        halt();
    }

    let p = Peripherals::take()?;

    let i2c = I2cDriver::new(
        p.i2c0,
        p.pins.gpio8,
        p.pins.gpio9,
        &I2cConfig::new().baudrate(pins::ACCEL_I2C_HZ.Hz()),
    )?;

    let uart = UartDriver::new(
        p.uart1,
        p.pins.gpio17,
        p.pins.gpio18,
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &UartConfig::default().baudrate(Hertz(pins::MODEM_BAUD)),
    )?;

    // ── 3. Adapters ───────────────────────────────────────────
    let hw = HardwareAdapter::new(
        Fxos8700::new(i2c, DEFAULT_ADDRESS),
        ButtonDriver::new(RawInputPin(pins::BUTTON_GPIO), FreeRtos),
        AtModemRadio::new(UartTransport::new(uart), FreeRtos),
    );
    let sink = LogEventSink::new();

    // ── 4. Boot + main loop ───────────────────────────────────
    let mut node = TransmissionCoordinator::new(config, &PENDING, hw, sink);
    if let Err(e) = node.boot() {
        error!("Boot failed: {}, halting", e);
        halt();
    }

    info!("Entering main loop");
    node.run_forever()
}
