// Crate-level lints: Allow common graphics patterns that pedantic lints flag
#![allow(clippy::cast_possible_truncation)] // Intentional f32->i32, u32->i32 casts for pixel math
#![allow(clippy::cast_precision_loss)] // u32/i32->f32 in graphics calculations
#![allow(clippy::cast_possible_wrap)] // u32->i32 wrapping is acceptable for our value ranges
#![allow(clippy::cast_sign_loss)] // f32->u8/u16 saturating casts for colors and demo readings

//! Environmental dashboard for a multi-sensor board with a 160x80 LCD.
//!
//! Samples temperature, pressure, humidity, light, three gas channels,
//! particulates and microphone noise; keeps a pixel-wide history per variable
//! and renders one of thirteen modes chosen by tapping the proximity sensor.
//! The "everything" mode also publishes every reading as a Prometheus gauge.
//!
//! # Architecture
//!
//! ```text
//!   sensors (traits) ──► Dashboard::tick ──► Canvas ──► Display
//!                           │    │
//!             ModeSelector ─┘    └─► MetricsSink (GaugeRegistry ──► HTTP exporter)
//! ```
//!
//! Sensor drivers are external; [`demo`] provides signal generators for every
//! sensor so the loop runs anywhere. The board thermometer is read through
//! `vcgencmd` on the Pi ([`thermometer`]).

pub mod color_map;
pub mod colors;
pub mod compensation;
pub mod config;
pub mod dashboard;
pub mod demo;
pub mod display;
pub mod error;
pub mod history;
pub mod metrics;
pub mod mode;
pub mod render;
pub mod sensors;
pub mod styles;
pub mod thermometer;
pub mod thresholds;
pub mod variables;

pub use dashboard::Dashboard;
pub use error::DashboardError;
