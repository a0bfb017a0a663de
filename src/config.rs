//! Measurement mode settings: gain, integration time and measurement rate.

/// Enum representing the possible gain settings of the sensor
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gain {
    Gain1x, // 1 lux to 64k lux
    Gain2x, // 0.5 lux to 32k lux
    Gain4x, // 0.25 lux to 16k lux
    Gain8x, // 0.125 lux to 8k lux
    Gain48x, // 0.02 lux to 1.3k lux
    Gain96x, // 0.01 lux to 600 lux
}

impl Gain {
    /// Value of the 3 bit gain field in ALS_CONTR and ALS_STATUS
    pub const fn code(&self) -> u8 {
        match self {
            Gain::Gain1x => 0b000,
            Gain::Gain2x => 0b001,
            Gain::Gain4x => 0b010,
            Gain::Gain8x => 0b011,
            Gain::Gain48x => 0b110,
            Gain::Gain96x => 0b111,
        }
    }

    /// Decodes a 3 bit gain field, codes 4 and 5 are reserved
    pub const fn from_code(code: u8) -> Option<Gain> {
        match code {
            0b000 => Some(Gain::Gain1x),
            0b001 => Some(Gain::Gain2x),
            0b010 => Some(Gain::Gain4x),
            0b011 => Some(Gain::Gain8x),
            0b110 => Some(Gain::Gain48x),
            0b111 => Some(Gain::Gain96x),
            _ => None,
        }
    }

    /// Amplification factor the raw counts are divided by in the lux formula
    pub const fn factor(&self) -> f32 {
        match self {
            Gain::Gain1x => 1.0,
            Gain::Gain2x => 2.0,
            Gain::Gain4x => 4.0,
            Gain::Gain8x => 8.0,
            Gain::Gain48x => 48.0,
            Gain::Gain96x => 96.0,
        }
    }
}

/// Enum representing the possible integration times of the sensor
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IntegrationTime {
    Ms50,
    Ms100,
    Ms150,
    Ms200,
    Ms250,
    Ms300,
    Ms350,
    Ms400,
}

impl IntegrationTime {
    /// Value of the 3 bit integration time field in ALS_MEAS_RATE
    pub const fn code(&self) -> u8 {
        match self {
            IntegrationTime::Ms100 => 0b000,
            IntegrationTime::Ms50 => 0b001,
            IntegrationTime::Ms200 => 0b010,
            IntegrationTime::Ms400 => 0b011,
            IntegrationTime::Ms150 => 0b100,
            IntegrationTime::Ms250 => 0b101,
            IntegrationTime::Ms300 => 0b110,
            IntegrationTime::Ms350 => 0b111,
        }
    }

    /// Integration time in milliseconds
    pub const fn ms(&self) -> u32 {
        match self {
            IntegrationTime::Ms50 => 50,
            IntegrationTime::Ms100 => 100,
            IntegrationTime::Ms150 => 150,
            IntegrationTime::Ms200 => 200,
            IntegrationTime::Ms250 => 250,
            IntegrationTime::Ms300 => 300,
            IntegrationTime::Ms350 => 350,
            IntegrationTime::Ms400 => 400,
        }
    }

    /// Normalization factor used by the lux formula, 100 ms counts as 1
    pub const fn factor(&self) -> f32 {
        match self {
            IntegrationTime::Ms50 => 0.5,
            IntegrationTime::Ms100 => 1.0,
            IntegrationTime::Ms150 => 1.5,
            IntegrationTime::Ms200 => 2.0,
            IntegrationTime::Ms250 => 2.5,
            IntegrationTime::Ms300 => 3.0,
            IntegrationTime::Ms350 => 3.5,
            IntegrationTime::Ms400 => 4.0,
        }
    }
}

/// Enum representing the possible measurement repeat rates of the sensor
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MeasurementRate {
    Ms50,
    Ms100,
    Ms200,
    Ms500,
    Ms1000,
    Ms2000,
}

impl MeasurementRate {
    /// Value of the 3 bit measurement rate field in ALS_MEAS_RATE
    pub const fn code(&self) -> u8 {
        match self {
            MeasurementRate::Ms50 => 0b000,
            MeasurementRate::Ms100 => 0b001,
            MeasurementRate::Ms200 => 0b010,
            MeasurementRate::Ms500 => 0b011,
            MeasurementRate::Ms1000 => 0b100,
            MeasurementRate::Ms2000 => 0b101,
        }
    }

    /// Time between two measurements in milliseconds
    pub const fn ms(&self) -> u32 {
        match self {
            MeasurementRate::Ms50 => 50,
            MeasurementRate::Ms100 => 100,
            MeasurementRate::Ms200 => 200,
            MeasurementRate::Ms500 => 500,
            MeasurementRate::Ms1000 => 1000,
            MeasurementRate::Ms2000 => 2000,
        }
    }
}

/// Measurement mode written to the sensor during initialization
///
/// The lux conversion uses the gain and integration time stored here,
/// so this must always describe what the device was actually configured with.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub gain: Gain,
    pub integration_time: IntegrationTime,
    pub measurement_rate: MeasurementRate,
}

impl Default for Config {
    /// Gain 1x, 200 ms integration time, 200 ms measurement rate
    fn default() -> Self {
        return Self {
            gain: Gain::Gain1x,
            integration_time: IntegrationTime::Ms200,
            measurement_rate: MeasurementRate::Ms200,
        };
    }
}

impl Config {
    /// Returns the configuration with the gain replaced
    pub fn with_gain(mut self, gain: Gain) -> Self {
        self.gain = gain;
        return self;
    }

    /// Returns the configuration with the integration time replaced
    pub fn with_integration_time(mut self, integration_time: IntegrationTime) -> Self {
        self.integration_time = integration_time;
        return self;
    }

    /// Returns the configuration with the measurement rate replaced
    pub fn with_measurement_rate(mut self, measurement_rate: MeasurementRate) -> Self {
        self.measurement_rate = measurement_rate;
        return self;
    }

    /// The sensor requires the measurement rate to be at least as long as the integration time
    pub fn is_valid(&self) -> bool {
        return self.measurement_rate.ms() >= self.integration_time.ms();
    }

    /// Time in milliseconds until the sensor posts a new sample
    ///
    /// A new sample is ready once per measurement rate period, but never before
    /// the integration has finished.
    pub const fn sample_period_ms(&self) -> u32 {
        let rate = self.measurement_rate.ms();
        let integration = self.integration_time.ms();
        if rate > integration { rate } else { integration }
    }
}
