//! Signal-generator board for running the dashboard without sensor drivers.
//!
//! Every sensor trait gets a demo implementation whose readings follow slow
//! sine waves over a plausible range, each at its own frequency so the graphs
//! and the grid move independently. The particulate sensor times out now and
//! then so the skip path runs too.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::config::PROXIMITY_TAP_THRESHOLD;
use crate::sensors::{
    AcousticAnalyzer,
    BoardThermometer,
    FrequencyRange,
    GasReading,
    GasSensor,
    LightSensor,
    NoiseProfile,
    ParticulateReading,
    ParticulateSensor,
    SensorError,
    Sensors,
    WeatherSensor,
};

/// Every n-th particulate read times out.
pub const PARTICULATE_TIMEOUT_EVERY: u32 = 7;

/// Generate a sinusoidal signal oscillating between `min` and `max`.
///
/// # Parameters
/// - `t`: Time in seconds
/// - `min`: Minimum output value
/// - `max`: Maximum output value
/// - `freq`: Oscillation frequency in radians per second
pub fn fake_signal(
    t: f32,
    min: f32,
    max: f32,
    freq: f32,
) -> f32 {
    let normalized = (t * freq).sin().mul_add(0.5, 0.5);
    min + normalized * (max - min)
}

/// Seconds since the demo board was created.
#[derive(Clone, Copy, Debug)]
struct Clock(Instant);

impl Clock {
    fn t(self) -> f32 { self.0.elapsed().as_secs_f32() }
}

// =============================================================================
// Proximity Taps
// =============================================================================

/// A pending proximity tap, shared between whatever produces taps (a key in
/// the simulator window) and the demo light sensor.
#[derive(Clone, Debug, Default)]
pub struct TapSignal(Arc<AtomicBool>);

impl TapSignal {
    pub fn new() -> Self { Self::default() }

    /// Queue a tap for the next proximity reading.
    pub fn press(&self) { self.0.store(true, Ordering::Relaxed); }

    /// Consume the pending tap, if any.
    pub fn take(&self) -> bool { self.0.swap(false, Ordering::Relaxed) }
}

// =============================================================================
// Demo Sensors
// =============================================================================

struct DemoWeather(Clock);

impl WeatherSensor for DemoWeather {
    fn temperature(&mut self) -> Result<f32, SensorError> { Ok(fake_signal(self.0.t(), 24.0, 34.0, 0.010)) }

    fn pressure(&mut self) -> Result<f32, SensorError> { Ok(fake_signal(self.0.t(), 985.0, 1035.0, 0.004)) }

    fn humidity(&mut self) -> Result<f32, SensorError> { Ok(fake_signal(self.0.t(), 25.0, 75.0, 0.007)) }
}

struct DemoLight {
    clock: Clock,
    tap: TapSignal,
}

impl LightSensor for DemoLight {
    fn proximity(&mut self) -> Result<u16, SensorError> {
        if self.tap.take() {
            return Ok(PROXIMITY_TAP_THRESHOLD * 2);
        }
        Ok(fake_signal(self.clock.t(), 0.0, 8.0, 0.05) as u16)
    }

    fn lux(&mut self) -> Result<f32, SensorError> { Ok(fake_signal(self.clock.t(), 5.0, 900.0, 0.006)) }
}

struct DemoGas(Clock);

impl GasSensor for DemoGas {
    fn read_all(&mut self) -> Result<GasReading, SensorError> {
        let t = self.0.t();
        Ok(GasReading {
            oxidising: fake_signal(t, 5_000.0, 45_000.0, 0.009),
            reducing: fake_signal(t, 150_000.0, 650_000.0, 0.005),
            nh3: fake_signal(t, 40_000.0, 160_000.0, 0.008),
        })
    }
}

struct DemoParticulates {
    clock: Clock,
    reads: u32,
}

impl ParticulateSensor for DemoParticulates {
    fn reset(&mut self) -> Result<(), SensorError> {
        self.reads = 0;
        Ok(())
    }

    fn read(&mut self) -> Result<ParticulateReading, SensorError> {
        self.reads = self.reads.wrapping_add(1);
        if self.reads % PARTICULATE_TIMEOUT_EVERY == 0 {
            return Err(SensorError::Timeout { sensor: "pms5003" });
        }

        let t = self.clock.t();
        let pm1 = fake_signal(t, 0.0, 40.0, 0.011);
        Ok(ParticulateReading {
            mass: [pm1, pm1 * 1.4, pm1 * 1.9],
            counts: [pm1 * 60.0, pm1 * 18.0, pm1 * 4.0, pm1 * 0.8, pm1 * 0.2, pm1 * 0.05],
        })
    }
}

struct DemoAcoustic(Clock);

impl AcousticAnalyzer for DemoAcoustic {
    fn noise_profile(&mut self) -> Result<NoiseProfile, SensorError> {
        let t = self.0.t();
        Ok(NoiseProfile {
            low: fake_signal(t, 0.0, 1.0, 0.9),
            mid: fake_signal(t, 0.0, 1.0, 1.3),
            high: fake_signal(t, 0.0, 1.0, 2.1),
            amplitude: fake_signal(t, 0.05, 1.0, 0.7),
        })
    }

    fn amplitudes_at_ranges(
        &mut self,
        ranges: &[FrequencyRange],
    ) -> Result<Vec<f32>, SensorError> {
        let t = self.0.t();
        Ok(ranges
            .iter()
            .map(|range| fake_signal(t, 0.0, 2.0, 1000.0 / range.low_hz.max(1) as f32))
            .collect())
    }
}

/// Simulated SoC temperature, a few degrees above the simulated probe.
pub struct DemoThermometer(Clock);

impl DemoThermometer {
    pub fn new() -> Self { Self(Clock(Instant::now())) }
}

impl Default for DemoThermometer {
    fn default() -> Self { Self::new() }
}

impl BoardThermometer for DemoThermometer {
    fn soc_temperature(&mut self) -> Result<f32, SensorError> { Ok(fake_signal(self.0.t(), 42.0, 58.0, 0.02)) }
}

/// Demo sensor bundle.
///
/// `thermometer` is passed in because the board thermometer is real on a Pi
/// even when the environmental sensors are simulated.
pub fn demo_sensors(
    tap: TapSignal,
    thermometer: Box<dyn BoardThermometer>,
) -> Sensors {
    let clock = Clock(Instant::now());
    Sensors {
        weather: Box::new(DemoWeather(clock)),
        light: Box::new(DemoLight { clock, tap }),
        gas: Box::new(DemoGas(clock)),
        particulates: Box::new(DemoParticulates { clock, reads: 0 }),
        acoustic: Box::new(DemoAcoustic(clock)),
        thermometer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::FREQUENCY_RANGES;

    #[test]
    fn test_fake_signal_stays_in_range() {
        for step in 0..500 {
            let value = fake_signal(step as f32 * 0.37, -10.0, 70.0, 0.5);
            assert!((-10.0..=70.0).contains(&value), "{value}");
        }
        assert!((fake_signal(0.0, 10.0, 20.0, 1.0) - 15.0).abs() < 1e-5);
    }

    #[test]
    fn test_tap_is_consumed_once() {
        let tap = TapSignal::new();
        let mut sensors = demo_sensors(tap.clone(), Box::new(DemoThermometer::new()));

        assert!(sensors.light.proximity().unwrap() < PROXIMITY_TAP_THRESHOLD);
        tap.press();
        assert!(sensors.light.proximity().unwrap() > PROXIMITY_TAP_THRESHOLD);
        assert!(sensors.light.proximity().unwrap() < PROXIMITY_TAP_THRESHOLD);
    }

    #[test]
    fn test_particulates_time_out_periodically() {
        let mut sensors = demo_sensors(TapSignal::new(), Box::new(DemoThermometer::new()));
        sensors.particulates.reset().unwrap();

        let timeouts = (0..PARTICULATE_TIMEOUT_EVERY * 2)
            .filter(|_| matches!(sensors.particulates.read(), Err(SensorError::Timeout { .. })))
            .count();
        assert_eq!(timeouts, 2);
    }

    #[test]
    fn test_one_amplitude_per_range() {
        let mut sensors = demo_sensors(TapSignal::new(), Box::new(DemoThermometer::new()));
        let amps = sensors.acoustic.amplitudes_at_ranges(&FREQUENCY_RANGES).unwrap();
        assert_eq!(amps.len(), FREQUENCY_RANGES.len());
        assert!(amps.iter().all(|a| (0.0..=2.0).contains(a)));
    }
}
