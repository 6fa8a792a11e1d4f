use std::{fmt, str::FromStr};

use crate::error::OwmError;

/// Measurement system used for temperatures and wind speeds in responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Unit {
    /// Kelvin, meters/sec.
    Standard,
    /// Celsius, meters/sec.
    #[default]
    Metric,
    /// Fahrenheit, miles/hour.
    Imperial,
}

impl Unit {
    /// Value sent as the `units` query parameter.
    pub fn as_api_str(&self) -> &'static str {
        match self {
            Unit::Standard => "standard",
            Unit::Metric => "metric",
            Unit::Imperial => "imperial",
        }
    }

    /// Single-letter legacy code.
    pub fn code(&self) -> &'static str {
        match self {
            Unit::Standard => "K",
            Unit::Metric => "C",
            Unit::Imperial => "F",
        }
    }

    pub const fn all() -> &'static [Unit] {
        &[Unit::Standard, Unit::Metric, Unit::Imperial]
    }

    /// True iff `code` names a supported unit, ignoring case.
    pub fn validate(code: &str) -> bool {
        Unit::try_from(code).is_ok()
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Unit::Standard => "K",
            Unit::Metric => "°C",
            Unit::Imperial => "°F",
        }
    }

    pub fn speed_suffix(&self) -> &'static str {
        match self {
            Unit::Standard | Unit::Metric => "m/s",
            Unit::Imperial => "mph",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_str())
    }
}

impl TryFrom<&str> for Unit {
    type Error = OwmError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "k" | "standard" | "internal" => Ok(Unit::Standard),
            "c" | "metric" => Ok(Unit::Metric),
            "f" | "imperial" => Ok(Unit::Imperial),
            _ => Err(OwmError::InvalidUnit(value.to_string())),
        }
    }
}

impl FromStr for Unit {
    type Err = OwmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::try_from(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_str_and_code_roundtrip() {
        for unit in Unit::all() {
            assert_eq!(Unit::try_from(unit.as_api_str()).unwrap(), *unit);
            assert_eq!(Unit::try_from(unit.code()).unwrap(), *unit);
        }
    }

    #[test]
    fn parsing_ignores_case() {
        for code in ["metric", "METRIC", "Metric", "c", "C"] {
            assert_eq!(Unit::try_from(code).unwrap(), Unit::Metric);
        }
        assert_eq!(Unit::try_from("Imperial").unwrap(), Unit::Imperial);
        assert_eq!(Unit::try_from("k").unwrap(), Unit::Standard);
        assert_eq!(Unit::try_from("INTERNAL").unwrap(), Unit::Standard);
    }

    #[test]
    fn unknown_unit_is_rejected() {
        for code in ["", "kelvin", "celsius", "X", "metrics", "im perial", " metric\t", "C "] {
            assert!(!Unit::validate(code), "{code:?} should be invalid");
            let err = Unit::try_from(code).unwrap_err();
            assert!(matches!(err, OwmError::InvalidUnit(_)));
        }
    }

    #[test]
    fn display_uses_api_representation() {
        assert_eq!(Unit::Standard.to_string(), "standard");
        assert_eq!("f".parse::<Unit>().unwrap().to_string(), "imperial");
    }
}
