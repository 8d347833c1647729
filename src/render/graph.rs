//! Single-variable graph frame.
//!
//! Every history sample gets one pixel column below the header band. The
//! column is filled with the sample's gradient color and a black pixel marks
//! the sample's height, so the markers trace a line graph over the color
//! strip. The newest sample is the rightmost column.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;

use super::{Canvas, format_reading};
use crate::color_map::{Normalizer, gradient_color};
use crate::colors::{BLACK, WHITE};
use crate::config::GRAPH_TOP;
use crate::history::VariableHistory;
use crate::styles::{HEADER_STYLE, TOP_LEFT};
use crate::variables::TrackedVariable;

/// Height of the plotting area below the header band.
const PLOT_HEIGHT: u32 = Canvas::HEIGHT - GRAPH_TOP;

/// Row of the line marker for a normalized sample.
///
/// `1.0` (the maximum) sits on the first plot row; small values sink to the
/// bottom row.
pub fn marker_row(normalized: f32) -> i32 {
    let y = Canvas::HEIGHT as f32 - normalized * PLOT_HEIGHT as f32;
    (y as i32).clamp(GRAPH_TOP as i32, Canvas::HEIGHT as i32 - 1)
}

/// Draw `variable`'s history and its current `value` onto `canvas`.
pub fn draw_graph_frame(
    canvas: &mut Canvas,
    variable: TrackedVariable,
    value: f32,
    history: &VariableHistory,
) {
    canvas.clear(WHITE).ok();

    if let Some(normalizer) = Normalizer::from_samples(history.iter()) {
        let strip_size = Size::new(1, PLOT_HEIGHT);
        for (column, sample) in history.iter().enumerate() {
            let x = column as i32;
            let normalized = normalizer.normalize(sample);

            Rectangle::new(Point::new(x, GRAPH_TOP as i32), strip_size)
                .into_styled(PrimitiveStyle::with_fill(gradient_color(normalized)))
                .draw(canvas)
                .ok();

            Pixel(Point::new(x, marker_row(normalized)), BLACK).draw(canvas).ok();
        }
    }

    let label = format_reading(variable, value);
    Text::with_text_style(&label, Point::zero(), HEADER_STYLE, TOP_LEFT)
        .draw(canvas)
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::RED;
    use crate::history::HistoryBuffer;

    #[test]
    fn test_marker_row_range() {
        assert_eq!(marker_row(1.0), GRAPH_TOP as i32);
        assert_eq!(marker_row(0.0), Canvas::HEIGHT as i32 - 1);
        assert!(marker_row(0.5) > GRAPH_TOP as i32);
    }

    #[test]
    fn test_newest_maximum_is_red_column() {
        let mut history: VariableHistory = HistoryBuffer::filled(1.0);
        history.push(50.0);
        let mut canvas = Canvas::new();
        draw_graph_frame(&mut canvas, TrackedVariable::Humidity, 50.0, &history);

        let last = Canvas::WIDTH as i32 - 1;
        // Marker sits on the first plot row, the strip below it is red
        assert_eq!(canvas.pixel(Point::new(last, GRAPH_TOP as i32)), Some(BLACK));
        assert_eq!(canvas.pixel(Point::new(last, Canvas::HEIGHT as i32 - 1)), Some(RED));
    }

    #[test]
    fn test_every_column_has_one_marker() {
        let mut history: VariableHistory = HistoryBuffer::filled(1.0);
        for i in 0..40 {
            history.push(i as f32 * 0.5);
        }
        let mut canvas = Canvas::new();
        draw_graph_frame(&mut canvas, TrackedVariable::Pressure, 19.5, &history);

        for x in 0..Canvas::WIDTH as i32 {
            let markers = (GRAPH_TOP as i32..Canvas::HEIGHT as i32)
                .filter(|&y| canvas.pixel(Point::new(x, y)) == Some(BLACK))
                .count();
            assert_eq!(markers, 1, "column {x}");
        }
    }

    #[test]
    fn test_header_background_white_with_label() {
        let history: VariableHistory = HistoryBuffer::filled(1.0);
        let mut canvas = Canvas::new();
        draw_graph_frame(&mut canvas, TrackedVariable::Temperature, 21.0, &history);

        let header: Vec<_> = (0..GRAPH_TOP as i32)
            .flat_map(|y| (0..Canvas::WIDTH as i32).map(move |x| Point::new(x, y)))
            .filter_map(|p| canvas.pixel(p))
            .collect();
        assert!(header.contains(&BLACK), "label text drawn");
        assert!(header.iter().all(|&c| c == BLACK || c == WHITE));
    }
}
