//! SoC temperature from the Raspberry Pi firmware.

use std::process::Command;

use crate::sensors::{BoardThermometer, SensorError};

const SENSOR: &str = "vcgencmd";

/// Reads the SoC temperature by running `vcgencmd measure_temp`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Vcgencmd;

impl BoardThermometer for Vcgencmd {
    fn soc_temperature(&mut self) -> Result<f32, SensorError> {
        let out = Command::new(SENSOR)
            .arg("measure_temp")
            .output()
            .map_err(|e| SensorError::Device {
                sensor: SENSOR,
                reason: e.to_string(),
            })?;

        if !out.status.success() {
            return Err(SensorError::Device {
                sensor: SENSOR,
                reason: format!("exited with {}", out.status),
            });
        }

        parse_measure_temp(&String::from_utf8_lossy(&out.stdout))
    }
}

/// Parse `temp=48.3'C`: the value sits between the `=` and the last `'`.
pub fn parse_measure_temp(output: &str) -> Result<f32, SensorError> {
    let invalid = |reason: &str| SensorError::InvalidReading {
        sensor: SENSOR,
        reason: format!("{reason} in {:?}", output.trim()),
    };

    let start = output.find('=').ok_or_else(|| invalid("missing '='"))? + 1;
    let end = output.rfind('\'').ok_or_else(|| invalid("missing unit"))?;
    let value = output.get(start..end).ok_or_else(|| invalid("unit before '='"))?;

    value.trim().parse().map_err(|_| invalid("not a number"))
}
