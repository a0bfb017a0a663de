//! # LTR-303 driver
//! A platform-agnostic, 'no_std' compatible Rust driver for the LTR-303 ambient light sensor using the `embedded-hal` traits.
//!
//! The register map is based on the following datasheet: [LTR-303ALS-01 datasheet](https://optoelectronics.liteon.com/upload/download/DS86-2013-0004/LTR-303ALS-01_DS_V1.pdf)
//!
//! The sensor has two photodiode channels: channel 0 senses visible and infrared light, channel 1 senses infrared only.
//! The raw counts are converted to lux using the ratio between both channels,
//! taking into account the gain and integration time the sensor was configured with.
//!
//! ## Usage
//! To use this driver, import it and an `embedded_hal` implementation, then create an instance of the driver.
//!
//! Call `initialize` once to put the sensor into active mode and write the measurement settings,
//! then call `get_lux` to convert the latest measurement,
//! or `measure` to wait for a fresh measurement first.
//!
//! Logging is available through the `log` or `defmt` feature.
//!
//! ## Example
//! Any `embedded_hal` I²C bus and delay provider can be used, here they are mocked.
//!
//! ```no_run
//! use ltr303::{Config, Gain, IntegrationTime, LTR303, EXPECTED_PART_ID};
//!
//! # let i2c = embedded_hal_mock::eh1::i2c::Mock::new(&[]);
//! # let delay = embedded_hal_mock::eh1::delay::NoopDelay;
//! let config = Config::default()
//!     .with_gain(Gain::Gain4x)
//!     .with_integration_time(IntegrationTime::Ms100);
//! let mut ltr303 = LTR303::with_config(i2c, delay, config)
//!     .expect("Invalid LTR303 configuration");
//!
//! assert_eq!(ltr303.get_part_id().expect("Failed to read LTR303"), EXPECTED_PART_ID);
//!
//! ltr303.initialize().expect("Failed to configure LTR303");
//!
//! loop {
//!     let lux = ltr303.measure()
//!         .expect("Failed to read LTR303");
//!
//!     assert!(lux >= 0.0);
//! }
//! ```

#![cfg_attr(not(test), no_std)]
extern crate embedded_hal;

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod config;
pub mod lux;
pub mod register;

use embedded_hal::delay;
use embedded_hal::i2c::I2c;

pub use config::{Config, Gain, IntegrationTime, MeasurementRate};
pub use register::{
    Register, Status, DEVICE_ADDRESS, EXPECTED_MANUFACTURER_ID, EXPECTED_PART_ID, READ_ADDRESS,
    WRITE_ADDRESS,
};

/// Enum representing the possible errors that can occur when using the LTR303 driver
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LTR303Error<I2CError> {
    /// Lux was requested before the measurement settings were written to the sensor
    NotConfigured,
    /// The measurement rate is shorter than the integration time
    MeasurementRateTooShort,
    /// The status register reported a reserved gain code
    InvalidGain(u8),
    /// I²C error
    I2C(I2CError),
}

impl<I2CError> From<I2CError> for LTR303Error<I2CError> {
    fn from(err: I2CError) -> Self {
        LTR303Error::I2C(err)
    }
}

pub struct LTR303<I2C, DELAY> {
    com: I2C,
    delay: DELAY,
    config: Config,
    configured: bool,
}

impl<I2C: I2c, DELAY: delay::DelayNs> LTR303<I2C, DELAY> {
    /// Create a new instance of the LTR303 driver with the default configuration
    /// (gain 1x, 200 ms integration time, 200 ms measurement rate)
    ///
    /// No bus traffic happens until `initialize` is called.
    ///
    /// # Arguments
    /// * `i2c` - The I2C bus the sensor is connected to
    /// * `delay` - The delay provider
    pub fn new(i2c: I2C, delay: DELAY) -> Self {
        return Self {
            com: i2c,
            delay,
            config: Config::default(),
            configured: false,
        };
    }

    /// Create a new instance of the LTR303 driver with a custom configuration
    ///
    /// # Arguments
    /// * `i2c` - The I2C bus the sensor is connected to
    /// * `delay` - The delay provider
    /// * `config` - The measurement settings to write during `initialize`
    pub fn with_config(i2c: I2C, delay: DELAY, config: Config) -> Result<Self, LTR303Error<I2C::Error>> {
        if !config.is_valid() {
            return Err(LTR303Error::MeasurementRateTooShort);
        }

        return Ok(Self {
            com: i2c,
            delay,
            config,
            configured: false,
        });
    }

    /// Destroy the driver instance, returning the I2C bus and delay provider
    pub fn destroy(self) -> (I2C, DELAY) {
        return (self.com, self.delay);
    }

    /// The configuration used for writing the measurement settings and for the lux conversion
    pub fn config(&self) -> Config {
        return self.config;
    }

    /// Whether the current configuration has been written to the sensor successfully
    pub fn is_configured(&self) -> bool {
        return self.configured;
    }

    /// Puts the sensor into active mode and writes the measurement settings
    ///
    /// Both steps are always attempted, even if the first one fails.
    /// The first error encountered is returned.
    ///
    /// The sensor needs 100 ms after power-up before it accepts commands,
    /// waiting for that is left to the caller.
    pub fn initialize(&mut self) -> Result<(), LTR303Error<I2C::Error>> {
        self.configured = false;

        let active = self.enable_active_mode();
        match active {
            Ok(()) => info!("ltr303: ALS activated"),
            Err(_) => warn!("ltr303: ALS activation failed"),
        }

        let integration = self.set_integration_time();
        match integration {
            Ok(()) => info!("ltr303: integration time set"),
            Err(_) => warn!("ltr303: setting integration time failed"),
        }

        active?;
        integration?;

        self.configured = true;
        return Ok(());
    }

    /// Writes the configured gain and active mode to the control register
    /// and waits for the sensor to wake up
    ///
    /// This does not mark the session as configured, only `initialize` does.
    pub fn enable_active_mode(&mut self) -> Result<(), LTR303Error<I2C::Error>> {
        self.write_register(Register::AlsControl, register::control_active(self.config.gain))?;
        self.delay.delay_ms(register::WAKEUP_TIME_MS);
        return Ok(());
    }

    /// Writes the configured integration time and measurement rate
    ///
    /// This does not mark the session as configured, only `initialize` does.
    pub fn set_integration_time(&mut self) -> Result<(), LTR303Error<I2C::Error>> {
        return self.write_register(Register::AlsMeasRate, register::meas_rate(&self.config));
    }

    /// Replaces the configuration
    ///
    /// If the sensor was already initialized, the new settings are written right away.
    /// Otherwise they take effect with the next call to `initialize`.
    ///
    /// # Arguments
    /// * `config` - The new measurement settings
    pub fn set_config(&mut self, config: Config) -> Result<(), LTR303Error<I2C::Error>> {
        if !config.is_valid() {
            return Err(LTR303Error::MeasurementRateTooShort);
        }

        self.config = config;

        if self.configured {
            return self.initialize();
        }

        return Ok(());
    }

    /// Puts the sensor into standby mode
    /// Call `initialize` to resume measurements
    pub fn standby(&mut self) -> Result<(), LTR303Error<I2C::Error>> {
        self.configured = false;
        return self.write_register(Register::AlsControl, register::control_standby());
    }

    /// Triggers a software reset, all registers return to their power-on defaults
    /// Call `initialize` to resume measurements
    pub fn reset(&mut self) -> Result<(), LTR303Error<I2C::Error>> {
        self.configured = false;
        return self.write_register(Register::AlsControl, register::control_reset());
    }

    /// Reads the raw count of channel 0 (visible + infrared)
    pub fn read_channel0(&mut self) -> Result<u16, LTR303Error<I2C::Error>> {
        return self.read_channel(Register::AlsDataCh0High, Register::AlsDataCh0Low);
    }

    /// Reads the raw count of channel 1 (infrared)
    pub fn read_channel1(&mut self) -> Result<u16, LTR303Error<I2C::Error>> {
        return self.read_channel(Register::AlsDataCh1High, Register::AlsDataCh1Low);
    }

    /// Gets the latest measurement from the sensor in lux
    /// This function is non-blocking and returns whatever the data registers currently hold
    ///
    /// Returns `NotConfigured` without touching the bus if `initialize` has not succeeded,
    /// since the counts could not be converted with the right gain and integration time.
    /// A failed `initialize` leaves the session unconfigured until a later call succeeds.
    pub fn get_lux(&mut self) -> Result<f32, LTR303Error<I2C::Error>> {
        if !self.configured {
            return Err(LTR303Error::NotConfigured);
        }

        // CH1 must be read before CH0
        let ch1 = self.read_channel1()?;
        let ch0 = self.read_channel0()?;

        return Ok(lux::calculate(ch0, ch1, self.config.gain, self.config.integration_time));
    }

    /// Waits for the sensor to post a new sample and then gets the measurement in lux
    ///
    /// The sensor measures once per measurement rate period, so this waits for
    /// the longer of measurement rate and integration time, plus a 20% margin.
    ///
    /// This function is blocking
    pub fn measure(&mut self) -> Result<f32, LTR303Error<I2C::Error>> {
        if !self.configured {
            return Err(LTR303Error::NotConfigured);
        }

        let safe_delay = self.config.sample_period_ms() * 12 / 10;
        self.delay.delay_ms(safe_delay);
        return self.get_lux();
    }

    /// Reads and decodes the status register
    pub fn get_status(&mut self) -> Result<Status, LTR303Error<I2C::Error>> {
        let raw = self.read_register(Register::AlsStatus)?;
        return Status::from_raw(raw).map_err(LTR303Error::InvalidGain);
    }

    /// Reads the part ID, 0xA0 for an LTR-303 (see `EXPECTED_PART_ID`)
    pub fn get_part_id(&mut self) -> Result<u8, LTR303Error<I2C::Error>> {
        return self.read_register(Register::PartId);
    }

    /// Reads the manufacturer ID, 0x05 for Lite-On (see `EXPECTED_MANUFACTURER_ID`)
    pub fn get_manufacturer_id(&mut self) -> Result<u8, LTR303Error<I2C::Error>> {
        return self.read_register(Register::ManufacturerId);
    }

    /// Reads a single register in one write-read transaction
    pub fn read_register(&mut self, register: Register) -> Result<u8, LTR303Error<I2C::Error>> {
        let mut data: [u8; 1] = [0; 1];
        if let Err(err) = self.com.write_read(DEVICE_ADDRESS, &[register.addr()], &mut data) {
            warn!("ltr303: reading register {:#x} failed", register.addr());
            return Err(err.into());
        }
        return Ok(data[0]);
    }

    /// Writes a single register in one write transaction
    pub fn write_register(&mut self, register: Register, value: u8) -> Result<(), LTR303Error<I2C::Error>> {
        trace!("ltr303: writing {:#x} to register {:#x}", value, register.addr());
        if let Err(err) = self.com.write(DEVICE_ADDRESS, &[register.addr(), value]) {
            warn!("ltr303: writing register {:#x} failed", register.addr());
            return Err(err.into());
        }
        return Ok(());
    }

    fn read_channel(&mut self, high: Register, low: Register) -> Result<u16, LTR303Error<I2C::Error>> {
        let high = self.read_register(high)?;
        let low = self.read_register(low)?;
        return Ok(register::combine(high, low));
    }
}
