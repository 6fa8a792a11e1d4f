use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographic position of the observed location.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(rename = "lon", default)]
    pub longitude: f64,
    #[serde(rename = "lat", default)]
    pub latitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { longitude, latitude }
    }
}

/// Provider system metadata: country and sun times.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Sys {
    #[serde(rename = "type")]
    pub kind: i64,
    pub id: i64,
    pub message: f64,
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}

/// One weather condition descriptor, e.g. `Rain / light rain / 10d`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherCondition {
    pub id: i64,
    pub main: String,
    pub description: String,
    pub icon: String,
}

/// Main atmospheric metrics. Temperatures are in the requested unit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Main {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: f64,
    pub sea_level: f64,
    pub grnd_level: f64,
    pub humidity: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Wind {
    pub speed: f64,
    pub deg: f64,
    pub gust: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Clouds {
    /// Cloudiness in percent.
    pub all: i64,
}

/// A single current weather observation as returned by the provider.
///
/// Every field falls back to its default when missing from the body, so
/// sparse responses decode without error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentWeatherData {
    #[serde(rename = "coord")]
    pub coordinates: Coordinates,
    pub sys: Sys,
    pub base: String,
    pub weather: Vec<WeatherCondition>,
    pub main: Main,
    pub wind: Wind,
    pub clouds: Clouds,
    /// Precipitation volume keyed by time window (`1h`, `3h`).
    pub rain: BTreeMap<String, f64>,
    /// Snow volume keyed by time window (`1h`, `3h`).
    pub snow: BTreeMap<String, f64>,
    pub visibility: i64,
    /// Shift in seconds from UTC.
    pub timezone: i64,
    /// Observation time, unix seconds.
    pub dt: i64,
    /// Location identifier.
    pub id: u64,
    pub name: String,
    pub cod: i64,
}

impl CurrentWeatherData {
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.dt)
    }

    pub fn sunrise(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.sys.sunrise)
    }

    pub fn sunset(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.sys.sunset)
    }

    pub fn primary_condition(&self) -> Option<&WeatherCondition> {
        self.weather.first()
    }
}

/// Zero is how the provider (and our defaults) spell "absent".
fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    if ts == 0 {
        return None;
    }
    DateTime::from_timestamp(ts, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAIRNS: &str = r#"{
        "coord": {"lon": 145.77, "lat": -16.92},
        "weather": [{"id": 802, "main": "Clouds", "description": "scattered clouds", "icon": "03n"}],
        "base": "stations",
        "main": {"temp": 23.5, "feels_like": 24.1, "temp_min": 22.0, "temp_max": 25.0,
                 "pressure": 1014, "humidity": 83},
        "visibility": 10000,
        "wind": {"speed": 3.6, "deg": 150},
        "clouds": {"all": 40},
        "rain": {"1h": 0.25},
        "dt": 1485790200,
        "sys": {"type": 1, "id": 8166, "message": 0.0123, "country": "AU",
                "sunrise": 1485720272, "sunset": 1485766550},
        "timezone": 36000,
        "id": 2172797,
        "name": "Cairns",
        "cod": 200
    }"#;

    #[test]
    fn decodes_full_observation() {
        let data: CurrentWeatherData = serde_json::from_str(CAIRNS).unwrap();

        assert_eq!(data.name, "Cairns");
        assert_eq!(data.id, 2172797);
        assert_eq!(data.cod, 200);
        assert_eq!(data.coordinates, Coordinates::new(-16.92, 145.77));
        assert_eq!(data.sys.kind, 1);
        assert_eq!(data.sys.country, "AU");
        assert_eq!(data.main.temp, 23.5);
        assert_eq!(data.main.pressure, 1014.0);
        assert_eq!(data.main.humidity, 83);
        assert_eq!(data.wind.deg, 150.0);
        assert_eq!(data.clouds.all, 40);
        assert_eq!(data.rain.get("1h"), Some(&0.25));
        assert!(data.snow.is_empty());
        assert_eq!(data.primary_condition().unwrap().description, "scattered clouds");
    }

    #[test]
    fn sparse_body_falls_back_to_defaults() {
        let data: CurrentWeatherData =
            serde_json::from_str(r#"{"id":2172797,"name":"Cairns","main":{"temp":23.5},"cod":200}"#)
                .unwrap();

        assert_eq!(data.main.temp, 23.5);
        assert_eq!(data.main.humidity, 0);
        assert!(data.weather.is_empty());
        assert!(data.rain.is_empty());
        assert_eq!(data.observed_at(), None);
    }

    #[test]
    fn reencoding_preserves_observation() {
        let data: CurrentWeatherData = serde_json::from_str(CAIRNS).unwrap();
        let json = serde_json::to_string(&data).unwrap();
        let again: CurrentWeatherData = serde_json::from_str(&json).unwrap();

        assert_eq!(data, again);
        assert!(json.contains("\"coord\""));
        assert!(json.contains("\"type\":1"));
    }

    #[test]
    fn timestamps_convert_to_utc() {
        let data: CurrentWeatherData = serde_json::from_str(CAIRNS).unwrap();

        assert_eq!(data.observed_at().unwrap().timestamp(), 1485790200);
        assert!(data.sunrise().unwrap() < data.sunset().unwrap());
    }

    #[test]
    fn wrong_shape_is_an_error() {
        let err = serde_json::from_str::<CurrentWeatherData>(r#"{"main":{"temp":"hot"}}"#);
        assert!(err.is_err());
    }
}
