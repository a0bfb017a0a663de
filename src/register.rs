//! Register map and bit layouts of the LTR-303.

use crate::config::{Config, Gain};

/// 7 bit I²C address of the sensor, it is not configurable
pub const DEVICE_ADDRESS: u8 = 0x29;

/// 8 bit write address (`DEVICE_ADDRESS << 1`, R/W bit clear)
///
/// Older bus drivers expect this form. The `embedded-hal` I²C implementation
/// derives it from [`DEVICE_ADDRESS`] itself, so it is never sent by this driver.
pub const WRITE_ADDRESS: u8 = DEVICE_ADDRESS << 1;

/// 8 bit read address (`DEVICE_ADDRESS << 1`, R/W bit set)
pub const READ_ADDRESS: u8 = (DEVICE_ADDRESS << 1) | 1;

/// Value of the PART_ID register on an LTR-303 (part number 0xA, revision 0)
pub const EXPECTED_PART_ID: u8 = 0xA0;
/// Value of the MANUFAC_ID register (Lite-On)
pub const EXPECTED_MANUFACTURER_ID: u8 = 0x05;

/// Standby to active wake-up time
pub(crate) const WAKEUP_TIME_MS: u32 = 10;

const CONTROL_ACTIVE_MODE: u8 = 0b0000_0001;
const CONTROL_SW_RESET: u8 = 0b0000_0010;
const CONTROL_GAIN_SHIFT: u8 = 2;

const MEAS_RATE_INTEGRATION_SHIFT: u8 = 3;

const STATUS_DATA_INVALID: u8 = 0b1000_0000;
const STATUS_GAIN_SHIFT: u8 = 4;
const STATUS_GAIN_MASK: u8 = 0b111;
const STATUS_INTERRUPT: u8 = 0b0000_1000;
const STATUS_NEW_DATA: u8 = 0b0000_0100;

/// Addresses of the registers used by this driver
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Gain, software reset and mode
    AlsControl = 0x80,
    /// Integration time and measurement rate
    AlsMeasRate = 0x85,
    PartId = 0x86,
    ManufacturerId = 0x87,
    /// Channel 1 (IR) low byte
    AlsDataCh1Low = 0x88,
    /// Channel 1 (IR) high byte
    AlsDataCh1High = 0x89,
    /// Channel 0 (visible + IR) low byte
    AlsDataCh0Low = 0x8A,
    /// Channel 0 (visible + IR) high byte
    AlsDataCh0High = 0x8B,
    AlsStatus = 0x8C,
}

impl Register {
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

/// ALS_CONTR value for the given gain in active mode, without reset
pub(crate) const fn control_active(gain: Gain) -> u8 {
    (gain.code() << CONTROL_GAIN_SHIFT) | CONTROL_ACTIVE_MODE
}

/// ALS_CONTR value for standby mode, gain bits left at 1x
pub(crate) const fn control_standby() -> u8 {
    0
}

pub(crate) const fn control_reset() -> u8 {
    CONTROL_SW_RESET
}

/// ALS_MEAS_RATE value for the integration time and measurement rate of `config`
pub(crate) const fn meas_rate(config: &Config) -> u8 {
    (config.integration_time.code() << MEAS_RATE_INTEGRATION_SHIFT) | config.measurement_rate.code()
}

/// Decoded ALS_STATUS register
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    /// The channel data registers hold a valid measurement
    pub data_valid: bool,
    /// Gain the current channel data was measured with
    pub gain: Gain,
    /// Interrupt signal is active
    pub interrupt: bool,
    /// The channel data has not been read yet
    pub new_data: bool,
}

impl Status {
    /// Decodes the raw register value, returning the reserved gain code on failure
    pub(crate) fn from_raw(raw: u8) -> Result<Self, u8> {
        let gain_code = (raw >> STATUS_GAIN_SHIFT) & STATUS_GAIN_MASK;
        let gain = Gain::from_code(gain_code).ok_or(gain_code)?;

        return Ok(Self {
            data_valid: raw & STATUS_DATA_INVALID == 0,
            gain,
            interrupt: raw & STATUS_INTERRUPT != 0,
            new_data: raw & STATUS_NEW_DATA != 0,
        });
    }
}

/// Combines a channel's two data bytes into the 16 bit count
pub(crate) const fn combine(high: u8, low: u8) -> u16 {
    (high as u16) << 8 | low as u16
}
