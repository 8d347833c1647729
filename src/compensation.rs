//! CPU self-heating compensation for the board's temperature probe.
//!
//! The probe sits next to the SoC, so it reads warm. The board temperature is
//! smoothed over the last few readings and the probe value is pulled down by a
//! fraction of the gap between the two.

use crate::config::CPU_SMOOTHING_SAMPLES;
use crate::history::HistoryBuffer;

/// Last few raw board temperature readings.
pub type SmoothingWindow = HistoryBuffer<CPU_SMOOTHING_SAMPLES>;

/// Smooths board temperature and corrects probe readings with it.
#[derive(Clone, Debug)]
pub struct CpuCompensator {
    window: Option<SmoothingWindow>,
    factor: f32,
}

impl CpuCompensator {
    /// Create an empty compensator. The first [`smooth`](Self::smooth) call
    /// fills the whole window with its reading.
    pub const fn new(factor: f32) -> Self { Self { window: None, factor } }

    /// Create a compensator whose window is already filled with `reading`.
    pub fn primed(
        factor: f32,
        reading: f32,
    ) -> Self {
        let mut compensator = Self::new(factor);
        compensator.smooth(reading);
        compensator
    }

    /// Record a raw board temperature and return the window average.
    ///
    /// A cold window is filled with `raw`, so the first average equals the
    /// first reading instead of ramping up from zero.
    pub fn smooth(
        &mut self,
        raw: f32,
    ) -> f32 {
        let window = self.window.get_or_insert_with(|| SmoothingWindow::filled(raw));
        window.push(raw);
        window.mean().unwrap_or(raw)
    }

    /// Correct a probe reading with the current smoothed board temperature.
    pub fn correct(
        &self,
        raw_probe: f32,
        avg_cpu: f32,
    ) -> f32 {
        compensate(raw_probe, avg_cpu, self.factor)
    }

    /// Compensation factor in use.
    #[inline]
    pub const fn factor(&self) -> f32 { self.factor }
}

/// Pull `raw_probe` down by `(avg_cpu - raw_probe) / factor`.
///
/// A larger factor gives a weaker correction. The result is not bounded; an
/// implausible input gives an implausible output.
#[inline]
pub fn compensate(
    raw_probe: f32,
    avg_cpu: f32,
    factor: f32,
) -> f32 {
    raw_probe - ((avg_cpu - raw_probe) / factor)
}

// =============================================================================
// Unit Tests
// =============================================================================
