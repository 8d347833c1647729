//! Display modes and the proximity-tap mode selector.
//!
//! A tap on the proximity sensor cycles through the modes:
//!
//! ```text
//! 0..=9  single-variable graph (temperature .. pm10)
//! 10     noise profile waveform
//! 11     frequency band waveform
//! 12     everything (grid + metrics)  -> wraps to 0
//! ```
//!
//! Taps are debounced against the time of the last accepted advance, so a hand
//! held over the sensor advances once per debounce interval at most.

use std::time::{Duration, Instant};

use crate::config::PROXIMITY_TAP_THRESHOLD;
use crate::variables::TrackedVariable;

/// What the dashboard samples and shows on each tick.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Mode {
    Temperature = 0,
    Pressure = 1,
    Humidity = 2,
    Light = 3,
    Oxidised = 4,
    Reduced = 5,
    Nh3 = 6,
    Pm1 = 7,
    Pm25 = 8,
    Pm10 = 9,
    /// Scrolling waveform of the low/mid/high noise profile.
    NoiseProfile = 10,
    /// Scrolling waveform of three frequency range amplitudes.
    FrequencyBands = 11,
    /// Sample every sensor, show the grid and publish metrics.
    Everything = 12,
}

impl Mode {
    /// Number of modes.
    pub const COUNT: usize = 13;

    /// Every mode in cycling order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Temperature,
        Self::Pressure,
        Self::Humidity,
        Self::Light,
        Self::Oxidised,
        Self::Reduced,
        Self::Nh3,
        Self::Pm1,
        Self::Pm25,
        Self::Pm10,
        Self::NoiseProfile,
        Self::FrequencyBands,
        Self::Everything,
    ];

    /// Position in the cycle.
    pub const fn index(self) -> usize { self as usize }

    /// Mode at `index`, wrapping past the last one.
    pub const fn from_index(index: usize) -> Self { Self::ALL[index % Self::COUNT] }

    /// Next mode in the cycle (`Everything` wraps to `Temperature`).
    #[inline]
    pub const fn next(self) -> Self { Self::from_index(self.index() + 1) }

    /// Tracked variable graphed by this mode, if it is a single-variable mode.
    pub const fn variable(self) -> Option<TrackedVariable> {
        match self {
            Self::Temperature => Some(TrackedVariable::Temperature),
            Self::Pressure => Some(TrackedVariable::Pressure),
            Self::Humidity => Some(TrackedVariable::Humidity),
            Self::Light => Some(TrackedVariable::Light),
            Self::Oxidised => Some(TrackedVariable::Oxidised),
            Self::Reduced => Some(TrackedVariable::Reduced),
            Self::Nh3 => Some(TrackedVariable::Nh3),
            Self::Pm1 => Some(TrackedVariable::Pm1),
            Self::Pm25 => Some(TrackedVariable::Pm25),
            Self::Pm10 => Some(TrackedVariable::Pm10),
            Self::NoiseProfile | Self::FrequencyBands | Self::Everything => None,
        }
    }

    /// Whether this mode draws a scrolling waveform.
    #[inline]
    pub const fn is_waveform(self) -> bool { matches!(self, Self::NoiseProfile | Self::FrequencyBands) }
}

/// Outcome of feeding one proximity reading to the selector.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ModeUpdate {
    /// Mode to run this tick.
    pub mode: Mode,
    /// True when this tick is the first one in `mode` (startup or advance).
    pub entered: bool,
}

/// Current mode plus the debounce state for proximity taps.
#[derive(Clone, Debug)]
pub struct ModeSelector {
    mode: Mode,
    debounce: Duration,
    last_advance: Option<Instant>,
    started: bool,
}

impl ModeSelector {
    /// Create a selector starting in `mode`.
    pub const fn new(
        mode: Mode,
        debounce: Duration,
    ) -> Self {
        Self {
            mode,
            debounce,
            last_advance: None,
            started: false,
        }
    }

    /// Current mode.
    #[inline]
    pub const fn mode(&self) -> Mode { self.mode }

    /// Feed this tick's proximity reading.
    ///
    /// Advances when the reading is above the tap threshold and more than the
    /// debounce interval has passed since the last advance.
    pub fn update(
        &mut self,
        proximity: u16,
        now: Instant,
    ) -> ModeUpdate {
        let mut entered = !self.started;
        self.started = true;

        if proximity > PROXIMITY_TAP_THRESHOLD {
            let debounced = self
                .last_advance
                .is_some_and(|last| now.saturating_duration_since(last) <= self.debounce);
            if !debounced {
                self.mode = self.mode.next();
                self.last_advance = Some(now);
                entered = true;
            }
        }

        ModeUpdate { mode: self.mode, entered }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TAP: u16 = PROXIMITY_TAP_THRESHOLD + 1;
    const DEBOUNCE: Duration = Duration::from_millis(500);

    #[test]
    fn test_mode_indices() {
        for (i, mode) in Mode::ALL.iter().enumerate() {
            assert_eq!(*mode as usize, i);
            assert_eq!(mode.index(), i);
            assert_eq!(Mode::from_index(i), *mode);
        }
    }

    #[test]
    fn test_variable_modes_match_variable_indices() {
        for variable in TrackedVariable::ALL {
            let mode = Mode::from_index(variable.index());
            assert_eq!(mode.variable(), Some(variable));
        }
        assert_eq!(Mode::NoiseProfile.variable(), None);
        assert_eq!(Mode::Everything.variable(), None);
    }

    #[test]
    fn test_wraps_from_everything() {
        assert_eq!(Mode::Everything.next(), Mode::Temperature);
        assert_eq!(Mode::Pm10.next(), Mode::NoiseProfile);
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let mut mode = Mode::Everything;
        for _ in 0..Mode::COUNT {
            mode = mode.next();
        }
        assert_eq!(mode, Mode::Everything);
    }

    #[test]
    fn test_first_update_enters_start_mode() {
        let mut selector = ModeSelector::new(Mode::Everything, DEBOUNCE);
        let now = Instant::now();
        assert_eq!(
            selector.update(0, now),
            ModeUpdate {
                mode: Mode::Everything,
                entered: true
            }
        );
        assert!(!selector.update(0, now).entered);
    }

    #[test]
    fn test_tap_advances_and_wraps() {
        let mut selector = ModeSelector::new(Mode::Everything, DEBOUNCE);
        let update = selector.update(TAP, Instant::now());
        assert_eq!(update.mode, Mode::Temperature);
        assert!(update.entered);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut selector = ModeSelector::new(Mode::Pressure, DEBOUNCE);
        assert_eq!(selector.update(PROXIMITY_TAP_THRESHOLD, Instant::now()).mode, Mode::Pressure);
    }

    #[test]
    fn test_debounce_allows_one_advance() {
        let mut selector = ModeSelector::new(Mode::Temperature, DEBOUNCE);
        let t0 = Instant::now();
        selector.update(TAP, t0);
        let update = selector.update(TAP, t0 + Duration::from_millis(200));
        assert_eq!(update.mode, Mode::Pressure, "second tap inside debounce ignored");
        assert!(!update.entered);

        let update = selector.update(TAP, t0 + Duration::from_millis(501));
        assert_eq!(update.mode, Mode::Humidity);
    }

    #[test]
    fn test_debounce_boundary_is_exclusive() {
        let mut selector = ModeSelector::new(Mode::Temperature, DEBOUNCE);
        let t0 = Instant::now();
        selector.update(TAP, t0);
        assert_eq!(selector.update(TAP, t0 + DEBOUNCE).mode, Mode::Pressure);
    }
}
