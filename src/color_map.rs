//! Value-to-color policies.
//!
//! Two independent mappings:
//!
//! - **Gradient** (graph frames): each sample is normalized against the
//!   min/max of its history and mapped to a hue between red (newest highs)
//!   and blue (lows). The hue stops at 0.6 so the scale never wraps round to
//!   magenta.
//! - **Threshold buckets** (grid frame): the value is classified against its
//!   variable's four limits and colored from a fixed five-entry palette.

use embedded_graphics::pixelcolor::Rgb888;

use crate::colors::BUCKET_PALETTE;
use crate::thresholds::Limits;

/// Hue of the lowest sample in a history (blue end of the gradient).
pub const MAX_HUE: f32 = 0.6;

// =============================================================================
// Gradient Mapping
// =============================================================================

/// Normalization range of one history snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normalizer {
    min: f32,
    max: f32,
}

impl Normalizer {
    /// Build from the extrema of `samples`. Returns `None` for an empty slice.
    pub fn from_samples<I>(samples: I) -> Option<Self>
    where
        I: IntoIterator<Item = f32>,
    {
        samples.into_iter().fold(None, |acc, v| match acc {
            None => Some(Self { min: v, max: v }),
            Some(Self { min, max }) => Some(Self {
                min: min.min(v),
                max: max.max(v),
            }),
        })
    }

    /// Map a sample into `(0, 1]`.
    ///
    /// The `+ 1` on both sides keeps a flat history (`min == max`) finite.
    #[inline]
    pub fn normalize(
        &self,
        sample: f32,
    ) -> f32 {
        (sample - self.min + 1.0) / (self.max - self.min + 1.0)
    }
}

/// Hue for a normalized sample: `1.0` is red (0.0), `0.0` would be blue (0.6).
#[inline]
pub fn gradient_hue(normalized: f32) -> f32 { (1.0 - normalized) * MAX_HUE }

/// Full-saturation, full-value color for a normalized sample.
pub fn gradient_color(normalized: f32) -> Rgb888 {
    let (r, g, b) = hsv_to_rgb(gradient_hue(normalized), 1.0, 1.0);
    Rgb888::new(r, g, b)
}

/// Convert HSV to 8-bit RGB.
///
/// `h`, `s` and `v` are all in `0..=1` (hue is a fraction of the full
/// circle). Channels are truncated, not rounded.
pub fn hsv_to_rgb(
    h: f32,
    s: f32,
    v: f32,
) -> (u8, u8, u8) {
    let to_byte = |x: f32| (x * 255.0) as u8;

    if s == 0.0 {
        let c = to_byte(v);
        return (c, c, c);
    }

    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match (sector as i32).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    (to_byte(r), to_byte(g), to_byte(b))
}

// =============================================================================
// Threshold Bucketing
// =============================================================================

/// Severity class of a reading against its limits.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Bucket {
    DangerouslyLow = 0,
    Low = 1,
    Normal = 2,
    High = 3,
    DangerouslyHigh = 4,
}

impl Bucket {
    const ALL: [Self; 5] = [
        Self::DangerouslyLow,
        Self::Low,
        Self::Normal,
        Self::High,
        Self::DangerouslyHigh,
    ];

    /// Classify `value`: one past the highest limit it strictly exceeds.
    pub fn classify(
        value: f32,
        limits: &Limits,
    ) -> Self {
        let exceeded = limits
            .iter()
            .rposition(|&limit| value > limit)
            .map_or(0, |idx| idx + 1);
        Self::ALL[exceeded]
    }

    /// Palette color used for grid text in this bucket.
    #[inline]
    pub const fn color(self) -> Rgb888 { BUCKET_PALETTE[self as usize] }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::pixelcolor::RgbColor;

    use super::*;
    use crate::colors::{BLUE, CYAN, GREEN, RED, YELLOW};
    use crate::thresholds::{LIGHT, TEMPERATURE};

    // -------------------------------------------------------------------------
    // HSV conversion
    // -------------------------------------------------------------------------

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), (255, 0, 0));
        assert_eq!(hsv_to_rgb(1.0 / 3.0, 1.0, 1.0).1, 255);
        assert_eq!(hsv_to_rgb(0.0, 0.0, 1.0), (255, 255, 255));
        assert_eq!(hsv_to_rgb(0.5, 1.0, 0.0), (0, 0, 0));
    }

    #[test]
    fn test_hsv_blue_end() {
        let (r, g, b) = hsv_to_rgb(MAX_HUE, 1.0, 1.0);
        assert_eq!(r, 0);
        assert_eq!(b, 255);
        assert!((101..=102).contains(&g), "green channel {g}");
    }

    // -------------------------------------------------------------------------
    // Gradient mapping
    // -------------------------------------------------------------------------

    #[test]
    fn test_flat_history_is_finite_and_uniform() {
        let samples = [7.5f32; 16];
        let normalizer = Normalizer::from_samples(samples).unwrap();
        let hues: Vec<f32> = samples.iter().map(|&s| gradient_hue(normalizer.normalize(s))).collect();
        assert!(hues.iter().all(|h| h.is_finite()));
        assert!(hues.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(normalizer.normalize(7.5), 1.0);
    }

    #[test]
    fn test_hue_decreases_with_value() {
        let samples = [3.0f32, -1.0, 10.0, 4.5, 0.0];
        let normalizer = Normalizer::from_samples(samples).unwrap();
        let mut sorted = samples;
        sorted.sort_by(f32::total_cmp);
        let hues: Vec<f32> = sorted.iter().map(|&s| gradient_hue(normalizer.normalize(s))).collect();
        assert!(hues.windows(2).all(|w| w[0] > w[1]), "hues {hues:?} should fall as values rise");
    }

    #[test]
    fn test_extremes_map_to_gradient_ends() {
        let samples = [2.0f32, 12.0, 7.0];
        let normalizer = Normalizer::from_samples(samples).unwrap();

        // vmax is the reddest
        assert_eq!(gradient_hue(normalizer.normalize(12.0)), 0.0);
        assert_eq!(gradient_color(normalizer.normalize(12.0)), RED);

        // vmin is the bluest in range, never beyond 0.6
        let low_hue = gradient_hue(normalizer.normalize(2.0));
        assert!(low_hue > gradient_hue(normalizer.normalize(7.0)));
        assert!(low_hue <= MAX_HUE);
    }

    #[test]
    fn test_gradient_color_stays_out_of_magenta() {
        for step in 0..=100 {
            let color = gradient_color(step as f32 / 100.0);
            assert!(
                !(color.r() > 0 && color.b() > 0),
                "step {step} mixes red and blue: {color:?}"
            );
        }
    }

    #[test]
    fn test_normalizer_empty() {
        assert!(Normalizer::from_samples(core::iter::empty()).is_none());
    }

    // -------------------------------------------------------------------------
    // Threshold bucketing
    // -------------------------------------------------------------------------

    #[test]
    fn test_temperature_buckets() {
        assert_eq!(Bucket::classify(3.9, &TEMPERATURE), Bucket::DangerouslyLow);
        assert_eq!(Bucket::classify(4.0, &TEMPERATURE), Bucket::DangerouslyLow, "boundary is exclusive");
        assert_eq!(Bucket::classify(4.1, &TEMPERATURE), Bucket::Low);
        assert_eq!(Bucket::classify(20.0, &TEMPERATURE), Bucket::Normal);
        assert_eq!(Bucket::classify(30.0, &TEMPERATURE), Bucket::High);
        assert_eq!(Bucket::classify(35.1, &TEMPERATURE), Bucket::DangerouslyHigh);
        assert_eq!(Bucket::classify(-100.0, &TEMPERATURE), Bucket::DangerouslyLow);
    }

    #[test]
    fn test_disabled_low_buckets() {
        assert_eq!(Bucket::classify(0.0, &LIGHT), Bucket::Normal);
        assert_eq!(Bucket::classify(1.0, &LIGHT), Bucket::Normal);
        assert_eq!(Bucket::classify(50_000.0, &LIGHT), Bucket::High);
        assert_eq!(Bucket::classify(200_000.0, &LIGHT), Bucket::DangerouslyHigh);
    }

    #[test]
    fn test_bucket_colors() {
        assert_eq!(Bucket::DangerouslyLow.color(), BLUE);
        assert_eq!(Bucket::Low.color(), CYAN);
        assert_eq!(Bucket::Normal.color(), GREEN);
        assert_eq!(Bucket::High.color(), YELLOW);
        assert_eq!(Bucket::DangerouslyHigh.color(), RED);
    }
}
