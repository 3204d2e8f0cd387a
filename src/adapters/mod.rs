//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements                    | Connects to               |
//! |-------------|-------------------------------|---------------------------|
//! | `hardware`  | Battery/Motion/Button ports   | ESP32 ADC, GPIO, I2C      |
//! |             | SchedulerPort, StatusLedPort  | esp_timer, light sleep    |
//! | `at_modem`  | RadioPort                     | Sigfox modem AT commands  |
//! | `uart`      | Transport                     | ESP-IDF UART driver       |
//! | `log_sink`  | EventSink, ErrorReporter      | Serial log output         |

pub mod at_modem;
pub mod hardware;
pub mod log_sink;
#[cfg(target_os = "espidf")]
pub mod uart;
