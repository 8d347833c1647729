//! Scrolling oscillogram for the acoustic modes.
//!
//! Each tick the frame moves one pixel left and the newest amplitudes are
//! drawn as vertical segments hanging from the top of the rightmost column.
//! The canvas keeps its content between ticks, which is what makes it scroll;
//! the dashboard clears it when a waveform mode is entered.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};

use super::Canvas;
use crate::colors::{BLACK, BLUE, GREEN, RED};

/// Segment colors of the frequency ranges, lowest range first.
pub const BAND_COLORS: [Rgb888; 3] = [BLUE, GREEN, RED];

/// One vertical line in the newest column.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct WaveformSegment {
    /// Length in pixels, measured down from the top edge.
    pub length: f32,
    pub color: Rgb888,
}

/// Segment for the noise profile: length from the scaled overall amplitude,
/// color mixed from the scaled low/mid/high energies (red/green/blue).
pub fn noise_profile_segment(
    low: f32,
    mid: f32,
    high: f32,
    amplitude: f32,
) -> WaveformSegment {
    // Float-to-int casts saturate, so loud bands clip at full intensity
    WaveformSegment {
        length: amplitude,
        color: Rgb888::new(low as u8, mid as u8, high as u8),
    }
}

/// Segments for the scaled frequency range amplitudes, colored blue, green
/// and red in range order.
pub fn frequency_band_segments(
    amplitudes: &[f32],
) -> impl Iterator<Item = WaveformSegment> + '_ {
    amplitudes
        .iter()
        .zip(BAND_COLORS)
        .map(|(&length, color)| WaveformSegment { length, color })
}

/// Scroll the frame left and draw `segments` in the vacated column.
///
/// Segments are drawn in order, so a later segment covers an earlier one
/// where they overlap.
pub fn draw_waveform_column<I>(
    canvas: &mut Canvas,
    segments: I,
) where
    I: IntoIterator<Item = WaveformSegment>,
{
    canvas.scroll_left(BLACK);

    let x = Canvas::WIDTH as i32 - 1;
    let max_y = Canvas::HEIGHT as i32 - 1;
    for segment in segments {
        let end = (segment.length.max(0.0) as i32).min(max_y);
        Line::new(Point::new(x, 0), Point::new(x, end))
            .into_styled(PrimitiveStyle::with_stroke(segment.color, 1))
            .draw(canvas)
            .ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: [WaveformSegment; 0] = [];

    fn column(
        canvas: &Canvas,
        x: i32,
    ) -> Vec<Rgb888> {
        (0..Canvas::HEIGHT as i32).filter_map(|y| canvas.pixel(Point::new(x, y))).collect()
    }

    #[test]
    fn test_noise_segment_color_saturates() {
        let segment = noise_profile_segment(64.0, 300.0, -5.0, 12.0);
        assert_eq!(segment.color, Rgb888::new(64, 255, 0));
        assert_eq!(segment.length, 12.0);
    }

    #[test]
    fn test_band_segments_follow_range_order() {
        let segments: Vec<_> = frequency_band_segments(&[3.0, 2.0, 1.0]).collect();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].color, BLUE);
        assert_eq!(segments[1].color, GREEN);
        assert_eq!(segments[2].color, RED);
        assert_eq!(segments[0].length, 3.0);
    }

    #[test]
    fn test_segment_drawn_in_last_column() {
        let mut canvas = Canvas::new();
        draw_waveform_column(&mut canvas, [WaveformSegment { length: 10.0, color: RED }]);

        let last = column(&canvas, Canvas::WIDTH as i32 - 1);
        assert!(last[..=10].iter().all(|&c| c == RED));
        assert!(last[11..].iter().all(|&c| c == BLACK));
    }

    #[test]
    fn test_scrolls_left_each_tick() {
        let mut canvas = Canvas::new();
        draw_waveform_column(&mut canvas, [WaveformSegment { length: 5.0, color: GREEN }]);
        draw_waveform_column(&mut canvas, QUIET);
        draw_waveform_column(&mut canvas, QUIET);

        let older = column(&canvas, Canvas::WIDTH as i32 - 3);
        assert_eq!(older[5], GREEN);
        // Empty ticks still draw nothing and leave a black column
        assert!(column(&canvas, Canvas::WIDTH as i32 - 1).iter().all(|&c| c == BLACK));
    }

    #[test]
    fn test_later_segments_cover_earlier() {
        let mut canvas = Canvas::new();
        draw_waveform_column(&mut canvas, frequency_band_segments(&[20.0, 10.0, 4.0]));

        let last = column(&canvas, Canvas::WIDTH as i32 - 1);
        assert_eq!(last[0], RED);
        assert_eq!(last[8], GREEN);
        assert_eq!(last[15], BLUE);
        assert_eq!(last[21], BLACK);
    }

    #[test]
    fn test_length_clamped_to_frame() {
        let mut canvas = Canvas::new();
        draw_waveform_column(&mut canvas, [WaveformSegment { length: 1.0e6, color: BLUE }]);
        assert!(column(&canvas, Canvas::WIDTH as i32 - 1).iter().all(|&c| c == BLUE));
    }
}
