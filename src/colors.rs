//! Color constants for the dashboard.
//!
//! The canvas is kept in `Rgb888` so the gradient keeps its full 8-bit
//! channel resolution until the panel converts it. Standard colors come from
//! the `RgbColor` trait constants.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

// =============================================================================
// Standard Colors
// =============================================================================

/// Pure black. Grid and waveform backgrounds, graph line marker, label text.
pub const BLACK: Rgb888 = Rgb888::BLACK;

/// Pure white. Background of the single-variable graph frame.
pub const WHITE: Rgb888 = Rgb888::WHITE;

/// Pure red (255, 0, 0). Dangerously high readings, high frequency band.
pub const RED: Rgb888 = Rgb888::RED;

/// Pure green (0, 255, 0). Normal readings, mid frequency band.
pub const GREEN: Rgb888 = Rgb888::GREEN;

/// Pure blue (0, 0, 255). Dangerously low readings, low frequency band.
pub const BLUE: Rgb888 = Rgb888::BLUE;

/// Pure yellow (255, 255, 0). High readings.
pub const YELLOW: Rgb888 = Rgb888::YELLOW;

/// Pure cyan (0, 255, 255). Low readings.
pub const CYAN: Rgb888 = Rgb888::CYAN;

// =============================================================================
// Threshold Palette
// =============================================================================

/// Grid text colors indexed by bucket, from dangerously low to dangerously high.
pub const BUCKET_PALETTE: [Rgb888; 5] = [BLUE, CYAN, GREEN, YELLOW, RED];
