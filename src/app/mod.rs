//! Application core: pure domain logic, zero I/O.
//!
//! Event accumulation, interrupt dispatch, and the transmission loop.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod coordinator;
pub mod dispatcher;
pub mod events;
pub mod ports;
pub mod state;
