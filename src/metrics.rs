//! Named gauges and the Prometheus text exporter.
//!
//! Only the "everything" cycle publishes gauges. The control loop writes
//! through [`MetricsSink`]; [`GaugeRegistry`] is the shipped sink and can be
//! served over HTTP from a background thread.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt::Write as _;
use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, mpsc};
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;
use tokio::runtime;
use tracing::{debug, info, warn};
use warp::{Filter, Reply};

use crate::sensors::CountSize;
use crate::variables::TrackedVariable;

/// Content type of the Prometheus text format.
pub const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Receiver of gauge updates.
pub trait MetricsSink {
    fn set(
        &mut self,
        gauge: Gauge,
        value: f64,
    );
}

// =============================================================================
// Gauges
// =============================================================================

/// Every gauge the dashboard publishes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Gauge {
    CpuTemp,
    RawTemp,
    AvgTemp,
    Pressure,
    Humidity,
    Light,
    Oxidised,
    Reduced,
    Nh3,
    Pm1,
    Pm25,
    Pm10,
    NoiseProfileLow,
    NoiseProfileMid,
    NoiseProfileHigh,
    AmpFreq100To200,
    AmpFreq500To600,
    AmpFreq1000To1200,
    Pm03Litre,
    Pm05Litre,
    Pm1Litre,
    Pm25Litre,
    Pm5Litre,
    Pm10Litre,
}

impl Gauge {
    pub const COUNT: usize = 24;

    /// Every gauge in exposition order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::CpuTemp,
        Self::RawTemp,
        Self::AvgTemp,
        Self::Pressure,
        Self::Humidity,
        Self::Light,
        Self::Oxidised,
        Self::Reduced,
        Self::Nh3,
        Self::Pm1,
        Self::Pm25,
        Self::Pm10,
        Self::NoiseProfileLow,
        Self::NoiseProfileMid,
        Self::NoiseProfileHigh,
        Self::AmpFreq100To200,
        Self::AmpFreq500To600,
        Self::AmpFreq1000To1200,
        Self::Pm03Litre,
        Self::Pm05Litre,
        Self::Pm1Litre,
        Self::Pm25Litre,
        Self::Pm5Litre,
        Self::Pm10Litre,
    ];

    /// Gauges of the three frequency ranges, in range order.
    pub const FREQUENCY_BANDS: [Self; 3] = [Self::AmpFreq100To200, Self::AmpFreq500To600, Self::AmpFreq1000To1200];

    /// Exported metric name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::CpuTemp => "env_sensor_cpu_temp",
            Self::RawTemp => "env_sensor_raw_temp",
            Self::AvgTemp => "env_sensor_avg_temp",
            Self::Pressure => "env_sensor_pressure",
            Self::Humidity => "env_sensor_humidity",
            Self::Light => "env_sensor_light",
            Self::Oxidised => "env_sensor_oxidised",
            Self::Reduced => "env_sensor_reduced",
            Self::Nh3 => "env_sensor_nh3",
            Self::Pm1 => "env_sensor_pm1",
            Self::Pm25 => "env_sensor_pm25",
            Self::Pm10 => "env_sensor_pm10",
            Self::NoiseProfileLow => "env_sensor_noise_profile_low",
            Self::NoiseProfileMid => "env_sensor_noise_profile_mid",
            Self::NoiseProfileHigh => "env_sensor_noise_profile_high",
            Self::AmpFreq100To200 => "env_sensor_amp_freq_100_200",
            Self::AmpFreq500To600 => "env_sensor_amp_freq_500_600",
            Self::AmpFreq1000To1200 => "env_sensor_amp_freq_1000_1200",
            Self::Pm03Litre => "env_sensor_pm03_litre",
            Self::Pm05Litre => "env_sensor_pm05_litre",
            Self::Pm1Litre => "env_sensor_pm1_litre",
            Self::Pm25Litre => "env_sensor_pm25_litre",
            Self::Pm5Litre => "env_sensor_pm5_litre",
            Self::Pm10Litre => "env_sensor_pm10_litre",
        }
    }

    /// One-line description for the `# HELP` line.
    pub const fn help(self) -> &'static str {
        match self {
            Self::CpuTemp => "Smoothed CPU temperature in degrees Celsius",
            Self::RawTemp => "Uncompensated probe temperature in degrees Celsius",
            Self::AvgTemp => "Compensated ambient temperature in degrees Celsius",
            Self::Pressure => "Barometric pressure in hPa",
            Self::Humidity => "Relative humidity in percent",
            Self::Light => "Ambient light in lux",
            Self::Oxidised => "Oxidising gas sensor resistance in kOhm",
            Self::Reduced => "Reducing gas sensor resistance in kOhm",
            Self::Nh3 => "NH3 gas sensor resistance in kOhm",
            Self::Pm1 => "PM1.0 mass concentration in ug/m3",
            Self::Pm25 => "PM2.5 mass concentration in ug/m3",
            Self::Pm10 => "PM10 mass concentration in ug/m3",
            Self::NoiseProfileLow => "Scaled low frequency noise energy",
            Self::NoiseProfileMid => "Scaled mid frequency noise energy",
            Self::NoiseProfileHigh => "Scaled high frequency noise energy",
            Self::AmpFreq100To200 => "Scaled amplitude between 100 and 200 Hz",
            Self::AmpFreq500To600 => "Scaled amplitude between 500 and 600 Hz",
            Self::AmpFreq1000To1200 => "Scaled amplitude between 1000 and 1200 Hz",
            Self::Pm03Litre => "Particles over 0.3um per 0.1 litre of air",
            Self::Pm05Litre => "Particles over 0.5um per 0.1 litre of air",
            Self::Pm1Litre => "Particles over 1.0um per 0.1 litre of air",
            Self::Pm25Litre => "Particles over 2.5um per 0.1 litre of air",
            Self::Pm5Litre => "Particles over 5.0um per 0.1 litre of air",
            Self::Pm10Litre => "Particles over 10um per 0.1 litre of air",
        }
    }

    /// Gauge holding the latest value of `variable` (the compensated
    /// temperature for [`TrackedVariable::Temperature`]).
    pub const fn for_variable(variable: TrackedVariable) -> Self {
        match variable {
            TrackedVariable::Temperature => Self::AvgTemp,
            TrackedVariable::Pressure => Self::Pressure,
            TrackedVariable::Humidity => Self::Humidity,
            TrackedVariable::Light => Self::Light,
            TrackedVariable::Oxidised => Self::Oxidised,
            TrackedVariable::Reduced => Self::Reduced,
            TrackedVariable::Nh3 => Self::Nh3,
            TrackedVariable::Pm1 => Self::Pm1,
            TrackedVariable::Pm25 => Self::Pm25,
            TrackedVariable::Pm10 => Self::Pm10,
        }
    }

    /// Gauge of the per-0.1-litre particle count for `size`.
    pub const fn for_count(size: CountSize) -> Self {
        match size {
            CountSize::Um0_3 => Self::Pm03Litre,
            CountSize::Um0_5 => Self::Pm05Litre,
            CountSize::Um1_0 => Self::Pm1Litre,
            CountSize::Um2_5 => Self::Pm25Litre,
            CountSize::Um5_0 => Self::Pm5Litre,
            CountSize::Um10 => Self::Pm10Litre,
        }
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Latest value of every gauge that has been set.
///
/// Clones share the same values, so one clone can sit in the dashboard while
/// another is served by the exporter thread.
#[derive(Clone, Debug, Default)]
pub struct GaugeRegistry {
    values: Arc<Mutex<BTreeMap<Gauge, f64>>>,
}

impl GaugeRegistry {
    pub fn new() -> Self { Self::default() }

    /// Current value of `gauge`, or `None` if it was never set.
    pub fn get(
        &self,
        gauge: Gauge,
    ) -> Option<f64> {
        self.values.lock().get(&gauge).copied()
    }

    /// Render every set gauge in the Prometheus text format.
    pub fn render_exposition(&self) -> String {
        let values = self.values.lock();
        let mut out = String::new();
        for (gauge, value) in values.iter() {
            let name = gauge.name();
            let _ = writeln!(out, "# HELP {name} {}", gauge.help());
            let _ = writeln!(out, "# TYPE {name} gauge");
            let _ = writeln!(out, "{name} {value}");
        }
        out
    }

    /// Bind `addr` and answer every HTTP request with the exposition from a
    /// background thread.
    ///
    /// The server runs on its own single-threaded runtime; connections are
    /// multiplexed there, so a client that never sends a request cannot hold
    /// up other scrapes.
    pub fn serve(
        &self,
        addr: SocketAddr,
    ) -> io::Result<Exporter> {
        let registry = self.clone();
        let (bound_tx, bound_rx) = mpsc::channel();

        let handle = thread::Builder::new().name("metrics-exporter".into()).spawn(move || {
            let runtime = match runtime::Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(e) => {
                    bound_tx.send(Err(e)).ok();
                    return;
                }
            };

            runtime.block_on(async move {
                match warp::serve(exposition_route(registry)).try_bind_ephemeral(addr) {
                    Ok((local_addr, server)) => {
                        bound_tx.send(Ok(local_addr)).ok();
                        server.await;
                    }
                    Err(e) => {
                        bound_tx.send(Err(io::Error::other(e))).ok();
                    }
                }
            });
            warn!("Metrics exporter stopped");
        })?;

        let local_addr = bound_rx.recv().map_err(io::Error::other)??;
        info!("Serving metrics on http://{local_addr}/metrics");
        Ok(Exporter { local_addr, handle })
    }
}

/// Every path and method gets the exposition.
fn exposition_route(registry: GaugeRegistry) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    warp::any().map(move || {
        debug!("Metrics scrape");
        warp::reply::with_header(registry.render_exposition(), "content-type", EXPOSITION_CONTENT_TYPE)
    })
}

impl MetricsSink for GaugeRegistry {
    fn set(
        &mut self,
        gauge: Gauge,
        value: f64,
    ) {
        self.values.lock().insert(gauge, value);
    }
}

/// Running exporter thread.
#[derive(Debug)]
pub struct Exporter {
    local_addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl Exporter {
    /// Address the exporter actually bound (useful after binding port 0).
    #[inline]
    pub const fn local_addr(&self) -> SocketAddr { self.local_addr }

    /// Whether the server thread is still running.
    pub fn is_running(&self) -> bool { !self.handle.is_finished() }
}
