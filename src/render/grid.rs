//! "Everything" grid frame: every variable's latest value on one screen.
//!
//! Cells are filled column-major: the first half of the variables run down
//! the left column, the rest down the right column. Text color comes from the
//! value's threshold bucket.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Text;

use super::{Canvas, format_reading};
use crate::color_map::Bucket;
use crate::colors::BLACK;
use crate::config::{GRID_COLUMNS, GRID_TEXT_OFFSET};
use crate::history::Histories;
use crate::styles::{GRID_FONT, TOP_LEFT};
use crate::variables::TrackedVariable;

/// Rows needed to fit every variable in [`GRID_COLUMNS`] columns.
pub const GRID_ROWS: u32 = (TrackedVariable::COUNT as u32).div_ceil(GRID_COLUMNS);

/// Width of one grid column.
pub const CELL_WIDTH: u32 = Canvas::WIDTH / GRID_COLUMNS;

/// Height of one grid row.
pub const CELL_HEIGHT: u32 = Canvas::HEIGHT / GRID_ROWS;

/// Top-left corner of the text for the variable at grid position `index`.
pub const fn cell_origin(index: usize) -> Point {
    let index = index as u32;
    let column = index / GRID_ROWS;
    let row = index % GRID_ROWS;
    Point::new(
        GRID_TEXT_OFFSET + (column * CELL_WIDTH) as i32,
        GRID_TEXT_OFFSET + (row * CELL_HEIGHT) as i32,
    )
}

/// Area owned by the variable at grid position `index`.
pub const fn cell_bounds(index: usize) -> Rectangle {
    let index = index as u32;
    let column = index / GRID_ROWS;
    let row = index % GRID_ROWS;
    Rectangle::new(
        Point::new((column * CELL_WIDTH) as i32, (row * CELL_HEIGHT) as i32),
        Size::new(CELL_WIDTH, CELL_HEIGHT),
    )
}

/// Draw the latest value of every variable, colored by bucket.
///
/// Each label is clipped to its own cell so an oversized value cannot spill
/// into the neighbouring column.
pub fn draw_grid_frame(
    canvas: &mut Canvas,
    histories: &Histories,
) {
    canvas.clear(BLACK).ok();

    for (index, variable) in TrackedVariable::ALL.iter().enumerate() {
        let value = histories.latest(*variable);
        let color = Bucket::classify(value, variable.limits()).color();
        let style = MonoTextStyle::new(GRID_FONT, color);
        let label = format_reading(*variable, value);

        Text::with_text_style(&label, cell_origin(index), style, TOP_LEFT)
            .draw(&mut canvas.clipped(&cell_bounds(index)))
            .ok();
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::pixelcolor::Rgb888;

    use super::*;
    use crate::colors::{BLUE, GREEN, RED, YELLOW};

    fn colors_in(
        canvas: &Canvas,
        area: Rectangle,
    ) -> Vec<Rgb888> {
        area.points().filter_map(|p| canvas.pixel(p)).filter(|&c| c != BLACK).collect()
    }

    fn cell_area(index: usize) -> Rectangle {
        Rectangle::new(cell_origin(index), Size::new(CELL_WIDTH - 2, CELL_HEIGHT - 2))
    }

    #[test]
    fn test_layout_is_two_columns_of_five() {
        assert_eq!(GRID_ROWS, 5);
        assert_eq!(cell_origin(0), Point::new(2, 2));
        assert_eq!(cell_origin(4), Point::new(2, 2 + 4 * 16));
        assert_eq!(cell_origin(5), Point::new(82, 2));
        assert_eq!(cell_origin(9), Point::new(82, 2 + 4 * 16));
    }

    #[test]
    fn test_cell_bounds_tile_the_panel() {
        assert_eq!(cell_bounds(0), Rectangle::new(Point::zero(), Size::new(80, 16)));
        assert_eq!(cell_bounds(9), Rectangle::new(Point::new(80, 64), Size::new(80, 16)));
        for index in 0..TrackedVariable::COUNT {
            assert!(cell_bounds(index).contains(cell_origin(index)));
        }
    }

    #[test]
    fn test_long_label_stays_in_its_cell() {
        let mut histories = Histories::new();
        histories.push(TrackedVariable::Light, 123_456_789.0);
        let mut canvas = Canvas::new();
        draw_grid_frame(&mut canvas, &histories);

        let light = cell_bounds(TrackedVariable::Light.index());
        assert!(!colors_in(&canvas, light).is_empty());

        // Leftmost columns of the right-hand cell on the same row
        let spill = Rectangle::new(
            Point::new(CELL_WIDTH as i32, light.top_left.y),
            Size::new(2, CELL_HEIGHT),
        );
        assert!(colors_in(&canvas, spill).is_empty(), "light label spilled into the next column");
    }

    #[test]
    fn test_typical_label_fits_cell() {
        let label = format_reading(TrackedVariable::Light, 30_000.0);
        let width = GRID_TEXT_OFFSET as u32 + label.len() as u32 * GRID_FONT.character_size.width;
        assert!(width <= CELL_WIDTH, "{label} is {width} px wide");
    }

    #[test]
    fn test_text_colored_by_bucket() {
        let mut histories = Histories::new();
        histories.push(TrackedVariable::Temperature, 40.0);
        histories.push(TrackedVariable::Humidity, 65.0);
        histories.push(TrackedVariable::Pressure, 100.0);
        let mut canvas = Canvas::new();
        draw_grid_frame(&mut canvas, &histories);

        let temp = colors_in(&canvas, cell_area(TrackedVariable::Temperature.index()));
        assert!(!temp.is_empty());
        assert!(temp.iter().all(|&c| c == RED));

        let humidity = colors_in(&canvas, cell_area(TrackedVariable::Humidity.index()));
        assert!(humidity.iter().all(|&c| c == YELLOW));

        let pressure = colors_in(&canvas, cell_area(TrackedVariable::Pressure.index()));
        assert!(pressure.iter().all(|&c| c == BLUE));

        // Untouched gas history still holds 1.0, normal for a low-disabled variable
        let nh3 = colors_in(&canvas, cell_area(TrackedVariable::Nh3.index()));
        assert!(!nh3.is_empty());
        assert!(nh3.iter().all(|&c| c == GREEN));
    }
}
