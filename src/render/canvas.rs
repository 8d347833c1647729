//! In-memory frame the renderer draws on before handing it to the panel.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;

use crate::colors::BLACK;
use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Full-screen RGB888 framebuffer.
///
/// Implements [`DrawTarget`], so every embedded-graphics primitive and text
/// style draws straight into it. Pixels outside the frame are dropped.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Canvas {
    pixels: Vec<Rgb888>,
}

impl Canvas {
    pub const WIDTH: u32 = SCREEN_WIDTH;
    pub const HEIGHT: u32 = SCREEN_HEIGHT;

    /// Create a black canvas.
    pub fn new() -> Self {
        Self {
            pixels: vec![BLACK; (Self::WIDTH * Self::HEIGHT) as usize],
        }
    }

    #[inline]
    fn index(point: Point) -> Option<usize> {
        let (x, y) = (u32::try_from(point.x).ok()?, u32::try_from(point.y).ok()?);
        (x < Self::WIDTH && y < Self::HEIGHT).then(|| (y * Self::WIDTH + x) as usize)
    }

    /// Color at `point`, or `None` outside the frame.
    pub fn pixel(
        &self,
        point: Point,
    ) -> Option<Rgb888> {
        Self::index(point).map(|idx| self.pixels[idx])
    }

    /// Every pixel with its position, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel<Rgb888>> + '_ {
        self.pixels.iter().enumerate().map(|(idx, &color)| {
            let idx = idx as u32;
            Pixel(Point::new((idx % Self::WIDTH) as i32, (idx / Self::WIDTH) as i32), color)
        })
    }

    /// Raw row-major pixel data.
    #[inline]
    pub fn as_slice(&self) -> &[Rgb888] { &self.pixels }

    /// Shift the whole frame one pixel to the left and fill the vacated
    /// right-hand column with `fill`.
    pub fn scroll_left(
        &mut self,
        fill: Rgb888,
    ) {
        for row in self.pixels.chunks_exact_mut(Self::WIDTH as usize) {
            row.rotate_left(1);
            if let Some(last) = row.last_mut() {
                *last = fill;
            }
        }
    }
}

impl Default for Canvas {
    fn default() -> Self { Self::new() }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size { Size::new(Self::WIDTH, Self::HEIGHT) }
}

impl DrawTarget for Canvas {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(idx) = Self::index(point) {
                self.pixels[idx] = color;
            }
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.pixels.fill(color);
        Ok(())
    }
}
