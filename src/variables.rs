//! The scalar quantities that keep a history and appear in the grid.

use crate::thresholds::{self, Limits};

/// One environmental quantity with its own history, unit and limits.
///
/// The discriminant is both the history slot and the mode index of the
/// variable's single-graph screen.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TrackedVariable {
    Temperature = 0,
    Pressure = 1,
    Humidity = 2,
    Light = 3,
    Oxidised = 4,
    Reduced = 5,
    Nh3 = 6,
    Pm1 = 7,
    Pm25 = 8,
    Pm10 = 9,
}

impl TrackedVariable {
    /// Number of tracked variables.
    pub const COUNT: usize = 10;

    /// Every variable in grid order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Temperature,
        Self::Pressure,
        Self::Humidity,
        Self::Light,
        Self::Oxidised,
        Self::Reduced,
        Self::Nh3,
        Self::Pm1,
        Self::Pm25,
        Self::Pm10,
    ];

    /// Slot of this variable in per-variable arrays.
    #[inline]
    pub const fn index(self) -> usize { self as usize }

    /// Full name, as used in log lines.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Pressure => "pressure",
            Self::Humidity => "humidity",
            Self::Light => "light",
            Self::Oxidised => "oxidised",
            Self::Reduced => "reduced",
            Self::Nh3 => "nh3",
            Self::Pm1 => "pm1",
            Self::Pm25 => "pm25",
            Self::Pm10 => "pm10",
        }
    }

    /// Short label drawn on screen (at most four characters).
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Temperature => "temp",
            Self::Pressure => "pres",
            Self::Humidity => "humi",
            Self::Light => "ligh",
            Self::Oxidised => "oxid",
            Self::Reduced => "redu",
            Self::Nh3 => "nh3",
            Self::Pm1 => "pm1",
            Self::Pm25 => "pm25",
            Self::Pm10 => "pm10",
        }
    }

    /// Display unit (ASCII only, the fonts have no degree sign or omega).
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Temperature => "C",
            Self::Pressure => "hPa",
            Self::Humidity => "%",
            Self::Light => "Lux",
            Self::Oxidised | Self::Reduced | Self::Nh3 => "kO",
            Self::Pm1 | Self::Pm25 | Self::Pm10 => "ug/m3",
        }
    }

    /// Bucket boundaries used by the grid view.
    pub const fn limits(self) -> &'static Limits {
        match self {
            Self::Temperature => &thresholds::TEMPERATURE,
            Self::Pressure => &thresholds::PRESSURE,
            Self::Humidity => &thresholds::HUMIDITY,
            Self::Light => &thresholds::LIGHT,
            Self::Oxidised => &thresholds::OXIDISED,
            Self::Reduced => &thresholds::REDUCED,
            Self::Nh3 => &thresholds::NH3,
            Self::Pm1 | Self::Pm25 | Self::Pm10 => &thresholds::PARTICULATES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_match_order() {
        for (i, variable) in TrackedVariable::ALL.iter().enumerate() {
            assert_eq!(variable.index(), i, "{} out of order", variable.name());
        }
    }

    #[test]
    fn test_abbreviation_is_name_prefix() {
        for variable in TrackedVariable::ALL {
            assert!(variable.abbreviation().len() <= 4);
            assert!(variable.name().starts_with(variable.abbreviation()));
        }
    }

    #[test]
    fn test_units() {
        assert_eq!(TrackedVariable::Pressure.unit(), "hPa");
        assert_eq!(TrackedVariable::Nh3.unit(), "kO");
        assert_eq!(TrackedVariable::Pm10.unit(), "ug/m3");
    }
}
