//! Centralized warning limits for every tracked variable.
//!
//! Each variable has four ascending boundaries that split its range into five
//! buckets. Temperature `[4, 18, 28, 35]` for example means:
//!
//! ```text
//! [-273.15 .. 4]  -> Dangerously Low
//! (4 .. 18]       -> Low
//! (18 .. 28]      -> Normal
//! (28 .. 35]      -> High
//! (35 .. MAX]     -> Dangerously High
//! ```
//!
//! Variables without a meaningful low-end danger (light, gas, particulates)
//! use `-1` for the two lower boundaries: every physical reading exceeds them,
//! so those readings start in the normal bucket.
//!
//! The limits are examples and come with no warranty.
//!
//! # Compile-Time Validation
//!
//! Every group carries `const` assertions on its ordering; a misordered
//! table fails the build.

/// Four ascending boundaries between the five buckets.
pub type Limits = [f32; 4];

/// Lower boundaries for variables that have no low-end danger.
pub const LOW_DISABLED: f32 = -1.0;

// =============================================================================
// Weather Probe
// =============================================================================

/// Compensated temperature in degrees Celsius.
pub const TEMPERATURE: Limits = [4.0, 18.0, 28.0, 35.0];

/// Barometric pressure in hPa.
pub const PRESSURE: Limits = [250.0, 650.0, 1013.25, 1015.0];

/// Relative humidity in percent.
pub const HUMIDITY: Limits = [20.0, 30.0, 60.0, 70.0];

// =============================================================================
// Light Probe
// =============================================================================

/// Ambient light in lux.
pub const LIGHT: Limits = [LOW_DISABLED, LOW_DISABLED, 30_000.0, 100_000.0];

// =============================================================================
// Gas Probe (kilo-ohms)
// =============================================================================

/// Oxidising gas sensor resistance.
pub const OXIDISED: Limits = [LOW_DISABLED, LOW_DISABLED, 40.0, 50.0];

/// Reducing gas sensor resistance.
pub const REDUCED: Limits = [LOW_DISABLED, LOW_DISABLED, 450.0, 550.0];

/// Ammonia sensor resistance.
pub const NH3: Limits = [LOW_DISABLED, LOW_DISABLED, 200.0, 300.0];

// =============================================================================
// Particulate Sensor (ug/m3)
// =============================================================================

/// Shared by PM1.0, PM2.5 and PM10 mass concentrations.
pub const PARTICULATES: Limits = [LOW_DISABLED, LOW_DISABLED, 50.0, 100.0];

const fn is_ascending(limits: &Limits) -> bool {
    limits[0] <= limits[1] && limits[1] <= limits[2] && limits[2] <= limits[3]
}

const _: () = assert!(is_ascending(&TEMPERATURE));
const _: () = assert!(is_ascending(&PRESSURE));
const _: () = assert!(is_ascending(&HUMIDITY));
const _: () = assert!(is_ascending(&LIGHT));
const _: () = assert!(is_ascending(&OXIDISED));
const _: () = assert!(is_ascending(&REDUCED));
const _: () = assert!(is_ascending(&NH3));
const _: () = assert!(is_ascending(&PARTICULATES));

// =============================================================================
// Unit Tests
// =============================================================================
