//! Panels that present a finished [`Canvas`].
//!
//! The LCD driver itself lives outside this crate; anything that can push a
//! 160x80 RGB888 frame implements [`Display`]. Two panels ship here:
//!
//! - [`HeadlessPanel`]: keeps the last frame in memory and logs each frame
//! - `SimulatorPanel` (feature `simulator`): an SDL2 window, scaled up

use thiserror::Error;
use tracing::debug;

use crate::render::Canvas;

/// Errors reported by a panel.
#[derive(Error, Debug)]
pub enum DisplayError {
    /// The user closed the simulator window.
    #[error("display window closed")]
    Closed,

    /// The panel failed to accept the frame.
    #[error("display: {0}")]
    Device(String),
}

/// Something that can show a full frame.
pub trait Display {
    /// Present `canvas`. Called exactly once per rendered frame.
    fn show(
        &mut self,
        canvas: &Canvas,
    ) -> Result<(), DisplayError>;
}

// =============================================================================
// Headless Panel
// =============================================================================

/// Panel without any output device.
///
/// Stores a copy of the last frame so it can be inspected, and counts frames.
#[derive(Clone, Debug, Default)]
pub struct HeadlessPanel {
    last_frame: Option<Canvas>,
    frames: u64,
}

impl HeadlessPanel {
    pub fn new() -> Self { Self::default() }

    /// The most recently shown frame.
    #[inline]
    pub fn last_frame(&self) -> Option<&Canvas> { self.last_frame.as_ref() }

    /// Number of frames shown so far.
    #[inline]
    pub const fn frames(&self) -> u64 { self.frames }
}

impl Display for HeadlessPanel {
    fn show(
        &mut self,
        canvas: &Canvas,
    ) -> Result<(), DisplayError> {
        match &mut self.last_frame {
            Some(frame) => frame.clone_from(canvas),
            None => self.last_frame = Some(canvas.clone()),
        }
        self.frames += 1;
        debug!("frame {} presented", self.frames);
        Ok(())
    }
}

// =============================================================================
// Simulator Panel
// =============================================================================

#[cfg(feature = "simulator")]
pub use simulator::SimulatorPanel;

#[cfg(feature = "simulator")]
mod simulator {
    use embedded_graphics::pixelcolor::Rgb888;
    use embedded_graphics::prelude::*;
    use embedded_graphics_simulator::sdl2::Keycode;
    use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};

    use super::{Display, DisplayError};
    use crate::demo::TapSignal;
    use crate::render::Canvas;

    /// Window scale factor: the 160x80 panel is tiny on a desktop screen.
    const WINDOW_SCALE: u32 = 4;

    /// SDL2 window standing in for the LCD.
    ///
    /// Pressing space stands in for a hand over the proximity sensor; the tap
    /// is handed to the demo light sensor through a [`TapSignal`].
    pub struct SimulatorPanel {
        display: SimulatorDisplay<Rgb888>,
        window: Window,
        tap: TapSignal,
    }

    impl SimulatorPanel {
        pub fn new(tap: TapSignal) -> Self {
            let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
            Self {
                display: SimulatorDisplay::new(Size::new(Canvas::WIDTH, Canvas::HEIGHT)),
                window: Window::new("Enviro Dashboard", &output_settings),
                tap,
            }
        }
    }

    impl Display for SimulatorPanel {
        fn show(
            &mut self,
            canvas: &Canvas,
        ) -> Result<(), DisplayError> {
            self.display.draw_iter(canvas.pixels()).ok();
            self.window.update(&self.display);

            for ev in self.window.events() {
                match ev {
                    SimulatorEvent::Quit => return Err(DisplayError::Closed),
                    // Ignore OS key repeat so holding space taps once
                    SimulatorEvent::KeyDown {
                        keycode: Keycode::Space,
                        repeat: false,
                        ..
                    } => self.tap.press(),
                    _ => {}
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::prelude::*;

    use super::*;
    use crate::colors::RED;

    #[test]
    fn test_headless_keeps_last_frame() {
        let mut panel = HeadlessPanel::new();
        assert!(panel.last_frame().is_none());

        let mut canvas = Canvas::new();
        panel.show(&canvas).unwrap();
        canvas.clear(RED).unwrap();
        panel.show(&canvas).unwrap();

        assert_eq!(panel.frames(), 2);
        assert_eq!(panel.last_frame(), Some(&canvas));
    }

    #[test]
    fn test_closed_message() {
        assert_eq!(DisplayError::Closed.to_string(), "display window closed");
    }
}
