use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, Utc};
use current_weather_core::{CurrentWeatherData, Unit};

/// Human-readable summary of an observation.
pub fn render(weather: &CurrentWeatherData, unit: Unit) -> String {
    let temp = unit.temperature_suffix();
    let speed = unit.speed_suffix();

    let condition = weather
        .primary_condition()
        .map(|w| w.description.clone())
        .unwrap_or_else(|| "Unknown".to_string());

    let mut lines = vec![
        format!("{}: {condition}", location(weather)),
        format!(
            "  Temperature: {:.1}{temp} (feels like {:.1}{temp}, min {:.1}{temp}, max {:.1}{temp})",
            weather.main.temp, weather.main.feels_like, weather.main.temp_min, weather.main.temp_max
        ),
        format!("  Humidity:    {}%", weather.main.humidity),
        format!("  Pressure:    {} hPa", weather.main.pressure),
        format!("  Wind:        {:.1} {speed} from {}°", weather.wind.speed, weather.wind.deg),
        format!("  Clouds:      {}%", weather.clouds.all),
    ];

    if let Some(rain) = volumes(&weather.rain) {
        lines.push(format!("  Rain:        {rain}"));
    }
    if let Some(snow) = volumes(&weather.snow) {
        lines.push(format!("  Snow:        {snow}"));
    }
    if let Some(observed) = weather.observed_at() {
        lines.push(format!("  Observed:    {}", local_time(observed, weather.timezone)));
    }

    lines.join("\n")
}

/// Name and country, or the coordinates when the provider sent no name.
fn location(weather: &CurrentWeatherData) -> String {
    match (weather.name.is_empty(), weather.sys.country.is_empty()) {
        (false, false) => format!("{}, {}", weather.name, weather.sys.country),
        (false, true) => weather.name.clone(),
        (true, false) => weather.sys.country.clone(),
        (true, true) => format!(
            "{:.2}, {:.2}",
            weather.coordinates.latitude, weather.coordinates.longitude
        ),
    }
}

fn volumes(map: &BTreeMap<String, f64>) -> Option<String> {
    if map.is_empty() {
        return None;
    }
    let parts: Vec<String> = map.iter().map(|(window, mm)| format!("{mm} mm/{window}")).collect();
    Some(parts.join(", "))
}

/// Observation time in the location's own offset, falling back to UTC.
fn local_time(at: DateTime<Utc>, offset_secs: i64) -> String {
    match i32::try_from(offset_secs).ok().and_then(FixedOffset::east_opt) {
        Some(offset) => at.with_timezone(&offset).format("%Y-%m-%d %H:%M %:z").to_string(),
        None => at.format("%Y-%m-%d %H:%M UTC").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use current_weather_core::WeatherCondition;

    fn sample() -> CurrentWeatherData {
        let mut data = CurrentWeatherData {
            name: "Cairns".into(),
            dt: 1485790200,
            timezone: 36000,
            ..Default::default()
        };
        data.sys.country = "AU".into();
        data.main.temp = 23.5;
        data.main.humidity = 83;
        data.weather.push(WeatherCondition {
            description: "light rain".into(),
            ..Default::default()
        });
        data.rain.insert("1h".into(), 0.25);
        data
    }

    #[test]
    fn renders_core_fields() {
        let text = render(&sample(), Unit::Metric);

        assert!(text.starts_with("Cairns, AU: light rain"));
        assert!(text.contains("23.5°C"));
        assert!(text.contains("Humidity:    83%"));
        assert!(text.contains("0.25 mm/1h"));
        assert!(!text.contains("Snow"));
        assert!(text.contains("2017-01-31 01:30 +10:00"));
    }

    #[test]
    fn uses_unit_suffixes() {
        let text = render(&sample(), Unit::Imperial);
        assert!(text.contains("23.5°F"));
        assert!(text.contains("mph"));
    }

    #[test]
    fn falls_back_to_coordinates_and_unknown() {
        let text = render(&CurrentWeatherData::default(), Unit::Standard);
        assert!(text.starts_with("0.00, 0.00: Unknown"));
        assert!(!text.contains("Observed"));
    }

    #[test]
    fn every_section_is_on_its_own_line() {
        let mut data = sample();
        data.snow.insert("3h".into(), 1.5);
        let text = render(&data, Unit::Metric);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "Cairns, AU: light rain");
        assert_eq!(lines[7], "  Snow:        1.5 mm/3h");
        assert!(lines[8].starts_with("  Observed:"));
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn name_without_country() {
        let mut data = sample();
        data.sys.country.clear();
        assert!(render(&data, Unit::Metric).starts_with("Cairns: light rain"));
    }
}
