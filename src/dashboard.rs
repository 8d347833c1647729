//! The sampling and rendering loop body.
//!
//! One [`Dashboard`] owns everything a tick touches: the mode selector, the
//! histories, the CPU compensator, the canvas, the sensors, the panel and the
//! metrics sink. [`Dashboard::tick`] reads proximity, lets the selector pick
//! the mode and runs that mode's routine:
//!
//! ```text
//! proximity ──► ModeSelector ──► routine(mode)
//!                                  ├─ graph modes:    sample one variable → push → graph frame
//!                                  ├─ waveform modes: analyzer → scroll + segment(s)
//!                                  └─ everything:     sample all → push → grid frames → gauges
//! ```
//!
//! Every routine shows each frame it renders exactly once. Only the
//! everything routine writes gauges.

use std::time::Instant;

use embedded_graphics::prelude::*;
use tracing::{info, warn};

use crate::colors::BLACK;
use crate::compensation::CpuCompensator;
use crate::config::{
    DashboardConfig,
    FREQUENCY_AMPLITUDE_SCALE,
    GAS_OHMS_PER_KOHM,
    LIGHT_SENTINEL_LUX,
    NOISE_AMPLITUDE_SCALE,
    NOISE_BAND_SCALE,
    PROXIMITY_NEAR_FIELD,
};
use crate::display::Display;
use crate::error::DashboardError;
use crate::history::Histories;
use crate::metrics::{Gauge, MetricsSink};
use crate::mode::{Mode, ModeSelector};
use crate::render::{
    Canvas,
    draw_graph_frame,
    draw_grid_frame,
    draw_waveform_column,
    frequency_band_segments,
    noise_profile_segment,
};
use crate::sensors::{CountSize, FREQUENCY_RANGES, GasReading, MassSize, ParticulateReading, SensorError, Sensors};
use crate::variables::TrackedVariable;

/// Mode routine. Receives the proximity reading taken at the start of the tick.
type Routine<D, M> = fn(&mut Dashboard<D, M>, u16) -> Result<(), DashboardError>;

/// Temperatures produced by one compensated temperature sample.
#[derive(Clone, Copy, PartialEq, Debug)]
struct TemperatureSample {
    /// Smoothed board temperature.
    avg_cpu: f32,
    /// Uncompensated probe reading.
    raw: f32,
    /// Probe reading corrected for CPU self-heating.
    compensated: f32,
}

/// Everything a tick needs, owned in one place.
pub struct Dashboard<D, M> {
    config: DashboardConfig,
    selector: ModeSelector,
    histories: Histories,
    compensator: CpuCompensator,
    canvas: Canvas,
    sensors: Sensors,
    display: D,
    metrics: M,
}

impl<D: Display, M: MetricsSink> Dashboard<D, M> {
    /// Reset the particulate sensor and prime the CPU compensator with one
    /// board temperature reading. Either failing is fatal.
    pub fn new(
        config: DashboardConfig,
        mut sensors: Sensors,
        display: D,
        metrics: M,
    ) -> Result<Self, DashboardError> {
        sensors.particulates.reset()?;
        let cpu_temp = sensors.thermometer.soc_temperature()?;
        info!("Starting in {:?} mode, CPU at {cpu_temp:.1} C", config.start_mode);

        Ok(Self {
            selector: ModeSelector::new(config.start_mode, config.debounce),
            histories: Histories::new(),
            compensator: CpuCompensator::primed(config.compensation_factor, cpu_temp),
            canvas: Canvas::new(),
            config,
            sensors,
            display,
            metrics,
        })
    }

    /// Run one iteration: read proximity, update the mode and run the mode's
    /// routine. Returns the mode that ran.
    pub fn tick(
        &mut self,
        now: Instant,
    ) -> Result<Mode, DashboardError> {
        let proximity = self.sensors.light.proximity()?;
        let update = self.selector.update(proximity, now);

        if update.entered {
            info!("Mode: {:?}", update.mode);
            if update.mode.is_waveform() {
                self.canvas.clear(BLACK).ok();
            }
        }

        let routine = Self::routine(update.mode);
        routine(self, proximity)?;
        Ok(update.mode)
    }

    fn routine(mode: Mode) -> Routine<D, M> {
        match mode {
            Mode::Temperature => Self::show_temperature,
            Mode::Pressure => Self::show_pressure,
            Mode::Humidity => Self::show_humidity,
            Mode::Light => Self::show_light,
            Mode::Oxidised => |this, _| this.show_gas_channel(TrackedVariable::Oxidised, |gas| gas.oxidising),
            Mode::Reduced => |this, _| this.show_gas_channel(TrackedVariable::Reduced, |gas| gas.reducing),
            Mode::Nh3 => |this, _| this.show_gas_channel(TrackedVariable::Nh3, |gas| gas.nh3),
            Mode::Pm1 => |this, _| this.show_particulate_mass(TrackedVariable::Pm1, MassSize::Pm1_0),
            Mode::Pm25 => |this, _| this.show_particulate_mass(TrackedVariable::Pm25, MassSize::Pm2_5),
            Mode::Pm10 => |this, _| this.show_particulate_mass(TrackedVariable::Pm10, MassSize::Pm10),
            Mode::NoiseProfile => Self::show_noise_profile,
            Mode::FrequencyBands => Self::show_frequency_bands,
            Mode::Everything => Self::show_everything,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Mode the next tick starts from.
    #[inline]
    pub const fn mode(&self) -> Mode { self.selector.mode() }

    #[inline]
    pub const fn config(&self) -> &DashboardConfig { &self.config }

    #[inline]
    pub const fn histories(&self) -> &Histories { &self.histories }

    /// Frame as last rendered.
    #[inline]
    pub const fn canvas(&self) -> &Canvas { &self.canvas }

    #[inline]
    pub const fn display(&self) -> &D { &self.display }

    #[inline]
    pub const fn metrics(&self) -> &M { &self.metrics }

    // =========================================================================
    // Sampling
    // =========================================================================

    /// Smooth the board temperature, read the probe and compensate it.
    /// Pushes the compensated value.
    fn sample_temperature(&mut self) -> Result<TemperatureSample, SensorError> {
        let cpu = self.sensors.thermometer.soc_temperature()?;
        let avg_cpu = self.compensator.smooth(cpu);
        let raw = self.sensors.weather.temperature()?;
        let compensated = self.compensator.correct(raw, avg_cpu);

        self.record(TrackedVariable::Temperature, compensated);
        Ok(TemperatureSample { avg_cpu, raw, compensated })
    }

    fn sample_pressure(&mut self) -> Result<f32, SensorError> {
        let pressure = self.sensors.weather.pressure()?;
        self.record(TrackedVariable::Pressure, pressure);
        Ok(pressure)
    }

    fn sample_humidity(&mut self) -> Result<f32, SensorError> {
        let humidity = self.sensors.weather.humidity()?;
        self.record(TrackedVariable::Humidity, humidity);
        Ok(humidity)
    }

    /// Lux, unless something near the sensor spoils the reading.
    fn sample_light(
        &mut self,
        proximity: u16,
    ) -> Result<f32, SensorError> {
        let lux = if proximity < PROXIMITY_NEAR_FIELD {
            self.sensors.light.lux()?
        } else {
            LIGHT_SENTINEL_LUX
        };
        self.record(TrackedVariable::Light, lux);
        Ok(lux)
    }

    /// All three gas channels in kilo-ohms. Nothing is pushed.
    fn read_gas(&mut self) -> Result<GasReading, SensorError> {
        let gas = self.sensors.gas.read_all()?;
        Ok(GasReading {
            oxidising: gas.oxidising / GAS_OHMS_PER_KOHM,
            reducing: gas.reducing / GAS_OHMS_PER_KOHM,
            nh3: gas.nh3 / GAS_OHMS_PER_KOHM,
        })
    }

    /// One particulate frame, or `None` after a timeout. Nothing is pushed.
    fn read_particulates(&mut self) -> Result<Option<ParticulateReading>, SensorError> {
        match self.sensors.particulates.read() {
            Ok(reading) => Ok(Some(reading)),
            Err(e @ SensorError::Timeout { .. }) => {
                warn!("Skipping particulates this cycle: {e}");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn record(
        &mut self,
        variable: TrackedVariable,
        value: f32,
    ) {
        info!("{}: {value:.2} {}", variable.name(), variable.unit());
        self.histories.push(variable, value);
    }

    // =========================================================================
    // Presenting
    // =========================================================================

    fn present(&mut self) -> Result<(), DashboardError> {
        self.display.show(&self.canvas)?;
        Ok(())
    }

    fn present_graph(
        &mut self,
        variable: TrackedVariable,
        value: f32,
    ) -> Result<(), DashboardError> {
        draw_graph_frame(&mut self.canvas, variable, value, self.histories.get(variable));
        self.present()
    }

    fn present_grid(&mut self) -> Result<(), DashboardError> {
        draw_grid_frame(&mut self.canvas, &self.histories);
        self.present()
    }

    // =========================================================================
    // Single-Variable Modes
    // =========================================================================

    fn show_temperature(
        &mut self,
        _proximity: u16,
    ) -> Result<(), DashboardError> {
        let temperature = self.sample_temperature()?;
        self.present_graph(TrackedVariable::Temperature, temperature.compensated)
    }

    fn show_pressure(
        &mut self,
        _proximity: u16,
    ) -> Result<(), DashboardError> {
        let pressure = self.sample_pressure()?;
        self.present_graph(TrackedVariable::Pressure, pressure)
    }

    fn show_humidity(
        &mut self,
        _proximity: u16,
    ) -> Result<(), DashboardError> {
        let humidity = self.sample_humidity()?;
        self.present_graph(TrackedVariable::Humidity, humidity)
    }

    fn show_light(
        &mut self,
        proximity: u16,
    ) -> Result<(), DashboardError> {
        let lux = self.sample_light(proximity)?;
        self.present_graph(TrackedVariable::Light, lux)
    }

    fn show_gas_channel(
        &mut self,
        variable: TrackedVariable,
        channel: fn(&GasReading) -> f32,
    ) -> Result<(), DashboardError> {
        let value = channel(&self.read_gas()?);
        self.record(variable, value);
        self.present_graph(variable, value)
    }

    fn show_particulate_mass(
        &mut self,
        variable: TrackedVariable,
        size: MassSize,
    ) -> Result<(), DashboardError> {
        let Some(reading) = self.read_particulates()? else {
            return Ok(());
        };
        let value = reading.mass_per_m3(size);
        self.record(variable, value);
        self.present_graph(variable, value)
    }

    // =========================================================================
    // Waveform Modes
    // =========================================================================

    fn show_noise_profile(
        &mut self,
        _proximity: u16,
    ) -> Result<(), DashboardError> {
        let profile = self.sensors.acoustic.noise_profile()?;
        let segment = noise_profile_segment(
            profile.low * NOISE_BAND_SCALE,
            profile.mid * NOISE_BAND_SCALE,
            profile.high * NOISE_BAND_SCALE,
            profile.amplitude * NOISE_AMPLITUDE_SCALE,
        );
        draw_waveform_column(&mut self.canvas, [segment]);
        self.present()
    }

    fn show_frequency_bands(
        &mut self,
        _proximity: u16,
    ) -> Result<(), DashboardError> {
        let amps = self.scaled_band_amplitudes()?;
        draw_waveform_column(&mut self.canvas, frequency_band_segments(&amps));
        self.present()
    }

    fn scaled_band_amplitudes(&mut self) -> Result<Vec<f32>, SensorError> {
        let mut amps = self.sensors.acoustic.amplitudes_at_ranges(&FREQUENCY_RANGES)?;
        for amp in &mut amps {
            *amp *= FREQUENCY_AMPLITUDE_SCALE;
        }
        Ok(amps)
    }

    // =========================================================================
    // Everything Mode
    // =========================================================================

    fn gauge(
        &mut self,
        gauge: Gauge,
        value: f32,
    ) {
        self.metrics.set(gauge, f64::from(value));
    }

    fn gauge_variable(
        &mut self,
        variable: TrackedVariable,
        value: f32,
    ) {
        self.gauge(Gauge::for_variable(variable), value);
    }

    /// Sample every sensor in a fixed order, redraw the grid after each
    /// group and publish every reading as a gauge.
    fn show_everything(
        &mut self,
        proximity: u16,
    ) -> Result<(), DashboardError> {
        let temperature = self.sample_temperature()?;
        self.gauge(Gauge::CpuTemp, temperature.avg_cpu);
        self.gauge(Gauge::RawTemp, temperature.raw);
        self.gauge(Gauge::AvgTemp, temperature.compensated);
        self.present_grid()?;

        let pressure = self.sample_pressure()?;
        self.gauge_variable(TrackedVariable::Pressure, pressure);
        self.present_grid()?;

        let humidity = self.sample_humidity()?;
        self.gauge_variable(TrackedVariable::Humidity, humidity);
        self.present_grid()?;

        let lux = self.sample_light(proximity)?;
        self.gauge_variable(TrackedVariable::Light, lux);
        self.present_grid()?;

        let gas = self.read_gas()?;
        for (variable, value) in [
            (TrackedVariable::Oxidised, gas.oxidising),
            (TrackedVariable::Reduced, gas.reducing),
            (TrackedVariable::Nh3, gas.nh3),
        ] {
            self.record(variable, value);
            self.gauge_variable(variable, value);
        }
        self.present_grid()?;

        if let Some(reading) = self.read_particulates()? {
            for (variable, size) in [
                (TrackedVariable::Pm1, MassSize::Pm1_0),
                (TrackedVariable::Pm25, MassSize::Pm2_5),
                (TrackedVariable::Pm10, MassSize::Pm10),
            ] {
                let value = reading.mass_per_m3(size);
                self.record(variable, value);
                self.gauge_variable(variable, value);
            }
            self.present_grid()?;

            for size in CountSize::ALL {
                self.gauge(Gauge::for_count(size), reading.count_per_tenth_litre(size));
            }
        }

        let profile = self.sensors.acoustic.noise_profile()?;
        let bands = [
            (Gauge::NoiseProfileLow, profile.low),
            (Gauge::NoiseProfileMid, profile.mid),
            (Gauge::NoiseProfileHigh, profile.high),
        ];
        for (gauge, energy) in bands {
            self.gauge(gauge, (energy * NOISE_BAND_SCALE).trunc());
        }
        info!(
            "Noise: low {:.0}, mid {:.0}, high {:.0}, amplitude {:.0}",
            profile.low * NOISE_BAND_SCALE,
            profile.mid * NOISE_BAND_SCALE,
            profile.high * NOISE_BAND_SCALE,
            profile.amplitude * NOISE_AMPLITUDE_SCALE,
        );

        let amps = self.scaled_band_amplitudes()?;
        for (gauge, amp) in Gauge::FREQUENCY_BANDS.into_iter().zip(amps) {
            self.gauge(gauge, amp);
        }

        Ok(())
    }
}
