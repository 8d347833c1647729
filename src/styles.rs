//! Pre-computed static text styles.
//!
//! `MonoTextStyle` and `TextStyle` are `const`-constructible, so the fixed
//! styles live here instead of being rebuilt on every frame. Grid text needs a
//! per-bucket color, so [`GRID_FONT`] is exposed for
//! `MonoTextStyle::new(GRID_FONT, color)`.

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle, ascii::FONT_4X6},
    pixelcolor::Rgb888,
    text::{Baseline, TextStyle, TextStyleBuilder},
};
use profont::PROFONT_14_POINT;

use crate::colors::BLACK;

/// Text anchored at its top-left corner, matching how the layout is measured.
pub const TOP_LEFT: TextStyle = TextStyleBuilder::new().baseline(Baseline::Top).build();

/// Small grid font (4x6). A grid cell holds 19 characters after the text inset.
pub const GRID_FONT: &MonoFont = &FONT_4X6;

/// Large black header label over the graph (`ProFont` 14pt).
pub const HEADER_STYLE: MonoTextStyle<'static, Rgb888> = MonoTextStyle::new(&PROFONT_14_POINT, BLACK);
