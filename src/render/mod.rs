//! Frame rendering for the 160x80 panel.
//!
//! All routines draw into the shared [`Canvas`]; the caller hands the canvas
//! to the display afterwards. Three frame kinds exist:
//!
//! - [`graph`]: one variable's history as a red-to-blue gradient with a line
//!   marker, plus its current value in the header band
//! - [`grid`]: the latest value of every variable, colored by threshold bucket
//! - [`waveform`]: a scrolling oscillogram of acoustic band energies
//!
//! ```text
//! graph                         grid                      waveform
//! ┌────────────────────┐        ┌─────────┬─────────┐     ┌────────────────┐
//! │ temp: 21.4 C       │ 25px   │ temp    │ redu    │     │ ||| |  ||  | | │
//! ├────────────────────┤        │ pres    │ nh3     │     │ ||  |   |    | │
//! │▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒│        │ humi    │ pm1     │     │  |           | │
//! │▒▒▒▒▒▒▒~~~~▒▒▒▒▒▒▒▒▒│        │ ligh    │ pm25    │     │                │
//! │~~~~~~~▒▒▒▒~~~~~~~~~│        │ oxid    │ pm10    │     │    newest  --> │
//! └────────────────────┘        └─────────┴─────────┘     └────────────────┘
//! ```

use core::fmt::Write;

use heapless::String;

use crate::variables::TrackedVariable;

pub mod canvas;
pub mod graph;
pub mod grid;
pub mod waveform;

pub use canvas::Canvas;
pub use graph::draw_graph_frame;
pub use grid::draw_grid_frame;
pub use waveform::{WaveformSegment, draw_waveform_column, frequency_band_segments, noise_profile_segment};

/// Capacity of a formatted reading label.
pub const LABEL_LEN: usize = 32;

/// Format `"{abbr}: {value:.1} {unit}"`, the label used by graph and grid.
///
/// Values too long for the buffer are cut short rather than failing.
pub fn format_reading(
    variable: TrackedVariable,
    value: f32,
) -> String<LABEL_LEN> {
    let mut label: String<LABEL_LEN> = String::new();
    let _ = write!(label, "{}: {value:.1} {}", variable.abbreviation(), variable.unit());
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_reading() {
        assert_eq!(format_reading(TrackedVariable::Temperature, 21.44).as_str(), "temp: 21.4 C");
        assert_eq!(format_reading(TrackedVariable::Pressure, 1013.4).as_str(), "pres: 1013.4 hPa");
        assert_eq!(format_reading(TrackedVariable::Pm25, 3.0).as_str(), "pm25: 3.0 ug/m3");
    }

    #[test]
    fn test_format_reading_truncates() {
        let label = format_reading(TrackedVariable::Light, 1.0e30);
        assert!(label.len() <= LABEL_LEN);
        assert!(label.starts_with("ligh: "));
    }
}
