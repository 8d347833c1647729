//! Capabilities the dashboard consumes from the board's sensor drivers.
//!
//! Each driver is reached through a small trait so the loop can run against
//! real hardware, the signal generators in [`crate::demo`] or test doubles.
//! Every call is blocking. Only a particulate [`SensorError::Timeout`] is
//! handled by the dashboard; anything else propagates out of the tick.

use thiserror::Error;

/// Errors reported by a sensor driver.
#[derive(Error, Debug)]
pub enum SensorError {
    /// The sensor did not answer in time. Recoverable for the particulate
    /// sensor, which is simply skipped until the next cycle.
    #[error("{sensor}: read timed out")]
    Timeout { sensor: &'static str },

    /// The sensor returned something that could not be used.
    #[error("{sensor}: invalid reading: {reason}")]
    InvalidReading { sensor: &'static str, reason: String },

    /// Bus or device failure.
    #[error("{sensor}: {reason}")]
    Device { sensor: &'static str, reason: String },
}

// =============================================================================
// Weather and Light Probes
// =============================================================================

/// Temperature, pressure and humidity probe.
pub trait WeatherSensor {
    /// Raw probe temperature in degrees Celsius (not compensated).
    fn temperature(&mut self) -> Result<f32, SensorError>;
    /// Barometric pressure in hPa.
    fn pressure(&mut self) -> Result<f32, SensorError>;
    /// Relative humidity in percent.
    fn humidity(&mut self) -> Result<f32, SensorError>;
}

/// Combined proximity and ambient light probe.
pub trait LightSensor {
    /// Raw proximity count; larger means closer.
    fn proximity(&mut self) -> Result<u16, SensorError>;
    /// Ambient light in lux.
    fn lux(&mut self) -> Result<f32, SensorError>;
}

// =============================================================================
// Gas Probe
// =============================================================================

/// One reading of the three gas sensing elements, in ohms.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct GasReading {
    pub oxidising: f32,
    pub reducing: f32,
    pub nh3: f32,
}

/// Analog gas probe. One call samples all three elements.
pub trait GasSensor {
    fn read_all(&mut self) -> Result<GasReading, SensorError>;
}

// =============================================================================
// Particulate Sensor
// =============================================================================

/// Particle sizes with a mass concentration (ug/m3).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MassSize {
    Pm1_0,
    Pm2_5,
    Pm10,
}

/// Particle size thresholds with a count per 0.1 litre of air.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CountSize {
    Um0_3,
    Um0_5,
    Um1_0,
    Um2_5,
    Um5_0,
    Um10,
}

impl CountSize {
    /// All sizes in ascending order.
    pub const ALL: [Self; 6] = [Self::Um0_3, Self::Um0_5, Self::Um1_0, Self::Um2_5, Self::Um5_0, Self::Um10];
}

/// One frame from the particulate sensor.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ParticulateReading {
    /// PM1.0, PM2.5, PM10 mass concentration in ug/m3.
    pub mass: [f32; 3],
    /// Particles above 0.3, 0.5, 1.0, 2.5, 5.0 and 10 um per 0.1 litre.
    pub counts: [f32; 6],
}

impl ParticulateReading {
    /// Mass concentration for `size` in ug/m3.
    pub const fn mass_per_m3(
        &self,
        size: MassSize,
    ) -> f32 {
        self.mass[size as usize]
    }

    /// Particles larger than `size` per 0.1 litre of air.
    pub const fn count_per_tenth_litre(
        &self,
        size: CountSize,
    ) -> f32 {
        self.counts[size as usize]
    }
}

/// Serial particulate sensor.
pub trait ParticulateSensor {
    /// Reset the sensor. Called once at startup.
    fn reset(&mut self) -> Result<(), SensorError>;
    /// Read one frame; may fail with [`SensorError::Timeout`].
    fn read(&mut self) -> Result<ParticulateReading, SensorError>;
}

// =============================================================================
// Acoustic Analyzer
// =============================================================================

/// Mean energy of three frequency bands plus the overall amplitude.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct NoiseProfile {
    pub low: f32,
    pub mid: f32,
    pub high: f32,
    pub amplitude: f32,
}

/// A frequency range in Hz.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FrequencyRange {
    pub low_hz: u32,
    pub high_hz: u32,
}

impl FrequencyRange {
    pub const fn new(
        low_hz: u32,
        high_hz: u32,
    ) -> Self {
        Self { low_hz, high_hz }
    }
}

/// The three ranges tracked by the frequency band waveform and gauges.
pub const FREQUENCY_RANGES: [FrequencyRange; 3] = [
    FrequencyRange::new(100, 200),
    FrequencyRange::new(500, 600),
    FrequencyRange::new(1000, 1200),
];

/// Microphone spectrum analyzer.
pub trait AcousticAnalyzer {
    fn noise_profile(&mut self) -> Result<NoiseProfile, SensorError>;
    /// Amplitude per range, in the order of `ranges`.
    fn amplitudes_at_ranges(
        &mut self,
        ranges: &[FrequencyRange],
    ) -> Result<Vec<f32>, SensorError>;
}

// =============================================================================
// Board Thermometer
// =============================================================================

/// SoC temperature, used to compensate the weather probe.
pub trait BoardThermometer {
    /// Current SoC temperature in degrees Celsius.
    fn soc_temperature(&mut self) -> Result<f32, SensorError>;
}

// =============================================================================
// Sensor Bundle
// =============================================================================

/// Every sensor the dashboard samples.
pub struct Sensors {
    pub weather: Box<dyn WeatherSensor>,
    pub light: Box<dyn LightSensor>,
    pub gas: Box<dyn GasSensor>,
    pub particulates: Box<dyn ParticulateSensor>,
    pub acoustic: Box<dyn AcousticAnalyzer>,
    pub thermometer: Box<dyn BoardThermometer>,
}
