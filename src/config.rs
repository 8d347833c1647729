//! Application configuration constants.
//!
//! Everything the loop needs is a compile-time constant. Layout values are
//! pre-computed here so the render code never repeats the arithmetic, and the
//! timing/calibration values that tests want to shorten are collected into
//! [`DashboardConfig`], whose [`Default`] is built from these constants.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

use crate::mode::Mode;

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (ST7735 0.96" LCD, rotated 270 degrees: 160x80).
pub const SCREEN_WIDTH: u32 = 160;

/// Display height in pixels.
pub const SCREEN_HEIGHT: u32 = 80;

/// Samples kept per tracked variable: one per pixel column of the graph.
pub const HISTORY_LEN: usize = SCREEN_WIDTH as usize;

/// Neutral value every history slot holds before the first reading arrives.
pub const HISTORY_FILL_VALUE: f32 = 1.0;

/// Height of the header band that holds the value label above the graph.
pub const GRAPH_TOP: u32 = 25;

/// Columns in the "everything" grid.
pub const GRID_COLUMNS: u32 = 2;

/// Inset of grid text from each cell's top-left corner.
pub const GRID_TEXT_OFFSET: i32 = 2;

// =============================================================================
// Timing Configuration
// =============================================================================

/// Pause between two iterations of the control loop.
pub const SAMPLE_INTERVAL: Duration = Duration::from_secs(30);

/// Pause between iterations in the simulator window, which only handles
/// events while a frame is shown.
#[cfg(feature = "simulator")]
pub const SIMULATOR_SAMPLE_INTERVAL: Duration = Duration::from_millis(250);

/// Minimum time between two accepted proximity taps.
pub const MODE_DEBOUNCE: Duration = Duration::from_millis(500);

/// Mode shown after startup (the everything grid, for at-a-glance use).
pub const START_MODE: Mode = Mode::Everything;

// =============================================================================
// Sensor Calibration
// =============================================================================

/// Tuning factor for the CPU self-heating compensation.
/// Decrease to pull the temperature down further, increase to correct less.
pub const COMPENSATION_FACTOR: f32 = 2.25;

/// Number of board temperature readings averaged by the smoothing window.
pub const CPU_SMOOTHING_SAMPLES: usize = 5;

/// Proximity reading above which a hand wave counts as a tap.
pub const PROXIMITY_TAP_THRESHOLD: u16 = 1500;

/// Proximity reading below which the light sensor can be trusted.
/// Anything closer disturbs the lux reading.
pub const PROXIMITY_NEAR_FIELD: u16 = 10;

/// Lux value reported while something covers the light sensor.
pub const LIGHT_SENTINEL_LUX: f32 = 1.0;

/// Gas sensor resistances arrive in ohms and are shown in kilo-ohms.
pub const GAS_OHMS_PER_KOHM: f32 = 1000.0;

/// Multiplier applied to the low/mid/high noise band energies.
pub const NOISE_BAND_SCALE: f32 = 128.0;

/// Multiplier applied to the overall noise amplitude.
pub const NOISE_AMPLITUDE_SCALE: f32 = 64.0;

/// Multiplier applied to the amplitudes of the frequency ranges.
pub const FREQUENCY_AMPLITUDE_SCALE: f32 = 32.0;

const _: () = assert!(PROXIMITY_NEAR_FIELD < PROXIMITY_TAP_THRESHOLD);
const _: () = assert!(GRAPH_TOP < SCREEN_HEIGHT);
const _: () = assert!(CPU_SMOOTHING_SAMPLES > 0);

// =============================================================================
// Metrics Exporter
// =============================================================================

/// Port the Prometheus text exporter listens on.
pub const METRICS_PORT: u16 = 8000;

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Values consumed by the control loop.
///
/// The binary always uses [`DashboardConfig::default`]; tests build their own
/// to start in a given mode or to use a shorter debounce.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DashboardConfig {
    /// Mode selected before the first tap.
    pub start_mode: Mode,
    /// Minimum time between accepted proximity taps.
    pub debounce: Duration,
    /// Pause between loop iterations.
    pub sample_interval: Duration,
    /// CPU self-heating compensation factor.
    pub compensation_factor: f32,
    /// Where the metrics exporter binds.
    pub metrics_addr: SocketAddr,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            start_mode: START_MODE,
            debounce: MODE_DEBOUNCE,
            sample_interval: SAMPLE_INTERVAL,
            compensation_factor: COMPENSATION_FACTOR,
            metrics_addr: SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, METRICS_PORT)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_matches_screen_width() {
        assert_eq!(HISTORY_LEN, 160);
    }

    #[test]
    fn test_default_config_uses_constants() {
        let config = DashboardConfig::default();
        assert_eq!(config.start_mode, Mode::Everything);
        assert_eq!(config.debounce, Duration::from_millis(500));
        assert_eq!(config.sample_interval, Duration::from_secs(30));
        assert!((config.compensation_factor - 2.25).abs() < f32::EPSILON);
        assert_eq!(config.metrics_addr.port(), 8000);
    }
}
