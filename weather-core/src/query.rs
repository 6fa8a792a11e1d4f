use crate::model::Coordinates;

/// How the location of a current weather request is specified.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Free-text location name, e.g. `"London,uk"`.
    ByName(String),
    ByCoordinates(Coordinates),
    /// Provider location identifier.
    ById(u64),
    ByZip { zip: String, country: String },
}

impl Query {
    pub fn name(location: impl Into<String>) -> Self {
        Query::ByName(location.into())
    }

    pub fn zip(zip: impl Into<String>, country: impl Into<String>) -> Self {
        Query::ByZip {
            zip: zip.into(),
            country: country.into(),
        }
    }

    /// Short label for logs.
    pub fn mode(&self) -> &'static str {
        match self {
            Query::ByName(_) => "name",
            Query::ByCoordinates(_) => "coordinates",
            Query::ById(_) => "id",
            Query::ByZip { .. } => "zip",
        }
    }

    /// Mode-specific query parameters, unencoded.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Query::ByName(location) => vec![("q", location.clone())],
            Query::ByCoordinates(coords) => vec![
                ("lat", format!("{:.6}", coords.latitude)),
                ("lon", format!("{:.6}", coords.longitude)),
            ],
            Query::ById(id) => vec![("id", id.to_string())],
            Query::ByZip { zip, country } => vec![("zip", format!("{zip},{country}"))],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_passed_as_q() {
        assert_eq!(Query::name("Órgiva").params(), vec![("q", "Órgiva".to_string())]);
    }

    #[test]
    fn coordinates_use_six_digits() {
        let q = Query::ByCoordinates(Coordinates::new(-16.92, 145.77));
        assert_eq!(
            q.params(),
            vec![("lat", "-16.920000".to_string()), ("lon", "145.770000".to_string())]
        );
    }

    #[test]
    fn zip_joins_country_with_comma() {
        let q = Query::zip("94040", "us");
        assert_eq!(q.params(), vec![("zip", "94040,us".to_string())]);
        assert_eq!(q.mode(), "zip");
    }

    #[test]
    fn id_is_decimal() {
        assert_eq!(Query::ById(2172797).params(), vec![("id", "2172797".to_string())]);
    }
}
