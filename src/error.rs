//! Errors that end a dashboard tick.

use thiserror::Error;

use crate::display::DisplayError;
use crate::sensors::SensorError;

/// Anything the control loop cannot recover from by itself.
///
/// Particulate timeouts never show up here: the dashboard skips that sensor
/// for the cycle instead.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Sensor(#[from] SensorError),

    #[error(transparent)]
    Display(#[from] DisplayError),
}

impl DashboardError {
    /// True when the user closed the simulator window, a clean way to stop.
    pub const fn is_closed(&self) -> bool { matches!(self, Self::Display(DisplayError::Closed)) }
}
