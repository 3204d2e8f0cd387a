//! FXOS8700 accelerometer driver: transient (vibration) detection only.
//!
//! The transient block high-pass filters the acceleration and latches
//! `TRANSIENT_SRC.EA` when any axis exceeds the threshold for `count`
//! consecutive samples.  The latch drives INT1; reading `TRANSIENT_SRC`
//! clears both.
//!
//! Generic over [`embedded_hal::i2c::I2c`] so the register sequence is
//! tested on the host against a register-file mock.

use embedded_hal::i2c::I2c;
use log::{info, warn};

use crate::config::AccelRange;
use crate::error::HardwareInitError;

/// 7-bit address with SA1 = SA0 = 0.
pub const DEFAULT_ADDRESS: u8 = 0x1E;

const WHO_AM_I_VALUE: u8 = 0xC7;

// Register map (subset)
const REG_WHO_AM_I: u8 = 0x0D;
const REG_XYZ_DATA_CFG: u8 = 0x0E;
const REG_TRANSIENT_CFG: u8 = 0x1D;
const REG_TRANSIENT_SRC: u8 = 0x1E;
const REG_TRANSIENT_THS: u8 = 0x1F;
const REG_TRANSIENT_COUNT: u8 = 0x20;
const REG_CTRL_REG1: u8 = 0x2A;
const REG_CTRL_REG4: u8 = 0x2D;
const REG_CTRL_REG5: u8 = 0x2E;

const CTRL1_ACTIVE: u8 = 0b0000_0001;
/// ODR = 100 Hz in accelerometer-only mode.
const CTRL1_DR_100HZ: u8 = 0b011 << 3;
/// Event latch enable + Z/Y/X transient flags.
const TRANSIENT_CFG_ELE_XYZ: u8 = 0b0001_1110;
const TRANSIENT_SRC_EA: u8 = 0b0100_0000;
const INT_TRANS: u8 = 0b0010_0000;

pub struct Fxos8700<I> {
    i2c: I,
    address: u8,
}

impl<I: I2c> Fxos8700<I> {
    pub fn new(i2c: I, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Verify WHO_AM_I and leave the device in standby.
    pub fn init(&mut self) -> Result<(), HardwareInitError> {
        let id = self.read_reg(REG_WHO_AM_I)?;
        if id != WHO_AM_I_VALUE {
            warn!("fxos8700: WHO_AM_I=0x{:02X}, expected 0x{:02X}", id, WHO_AM_I_VALUE);
            return Err(HardwareInitError::Accelerometer);
        }
        self.write_reg(REG_CTRL_REG1, 0)?;
        info!("fxos8700: detected at 0x{:02X}", self.address);
        Ok(())
    }

    /// Configure transient detection on all axes, route it to INT1, and
    /// go active.  `threshold` is masked to the register's 7 bits.
    pub fn set_transient_mode(
        &mut self,
        range: AccelRange,
        threshold: u8,
        count: u8,
    ) -> Result<(), HardwareInitError> {
        // Config registers are only writable in standby.
        let ctrl1 = self.read_reg(REG_CTRL_REG1)?;
        self.write_reg(REG_CTRL_REG1, ctrl1 & !CTRL1_ACTIVE)?;

        self.write_reg(REG_XYZ_DATA_CFG, range.fs_bits())?;
        self.write_reg(REG_TRANSIENT_CFG, TRANSIENT_CFG_ELE_XYZ)?;
        self.write_reg(REG_TRANSIENT_THS, threshold & 0x7F)?;
        self.write_reg(REG_TRANSIENT_COUNT, count)?;

        let ctrl4 = self.read_reg(REG_CTRL_REG4)?;
        self.write_reg(REG_CTRL_REG4, ctrl4 | INT_TRANS)?;
        let ctrl5 = self.read_reg(REG_CTRL_REG5)?;
        self.write_reg(REG_CTRL_REG5, ctrl5 | INT_TRANS)?;

        self.write_reg(REG_CTRL_REG1, CTRL1_DR_100HZ | CTRL1_ACTIVE)?;
        info!(
            "fxos8700: transient mode {:?} ths=0x{:02X} count={}",
            range, threshold, count
        );
        Ok(())
    }

    /// Read `TRANSIENT_SRC` (clearing the latch) and report whether a
    /// real event was latched.  A bus error reads as "no motion".
    pub fn clear_transient_interrupt(&mut self) -> bool {
        match self.read_reg(REG_TRANSIENT_SRC) {
            Ok(src) => src & TRANSIENT_SRC_EA != 0,
            Err(_) => {
                warn!("fxos8700: TRANSIENT_SRC read failed");
                false
            }
        }
    }

    /// Release the bus.
    pub fn release(self) -> I {
        self.i2c
    }

    fn read_reg(&mut self, reg: u8) -> Result<u8, HardwareInitError> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .map_err(|_| HardwareInitError::Accelerometer)?;
        Ok(buf[0])
    }

    fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), HardwareInitError> {
        self.i2c
            .write(self.address, &[reg, value])
            .map_err(|_| HardwareInitError::Accelerometer)
    }
}
