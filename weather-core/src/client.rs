use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::{fmt::Debug, path::Path};
use tracing::{debug, instrument};

use crate::{
    config::{resolve_api_key, resolve_api_key_at},
    error::{OwmError, Result},
    language::Language,
    model::{Coordinates, CurrentWeatherData},
    query::Query,
    unit::Unit,
};

/// Current weather endpoint of the provider.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Validated settings a client sends with every request.
#[derive(Clone, PartialEq)]
pub struct ClientConfig {
    pub unit: Unit,
    pub language: Language,
    pub api_key: String,
    pub base_url: String,
}

impl ClientConfig {
    /// Validate `unit` and `language`, then resolve the API key.
    pub fn new(unit: &str, language: &str) -> Result<Self> {
        let (unit, language) = validate(unit, language)?;
        let api_key = resolve_api_key()?;

        Ok(Self::from_parts(unit, language, api_key))
    }

    /// Like [`ClientConfig::new`], with the key taken from `env_key` or the
    /// config file at `config_path`.
    pub fn resolving_key_at(
        unit: &str,
        language: &str,
        env_key: Option<&str>,
        config_path: &Path,
    ) -> Result<Self> {
        let (unit, language) = validate(unit, language)?;
        let api_key = resolve_api_key_at(env_key, config_path)?;

        Ok(Self::from_parts(unit, language, api_key))
    }

    /// Like [`ClientConfig::new`] but with an explicit key.
    pub fn with_api_key(unit: &str, language: &str, api_key: impl Into<String>) -> Result<Self> {
        let (unit, language) = validate(unit, language)?;

        Ok(Self::from_parts(unit, language, api_key.into()))
    }

    pub fn from_parts(unit: Unit, language: Language, api_key: String) -> Self {
        Self {
            unit,
            language,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

fn validate(unit: &str, language: &str) -> Result<(Unit, Language)> {
    Ok((Unit::try_from(unit)?, Language::try_from(language)?))
}

impl Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("unit", &self.unit)
            .field("language", &self.language)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Source of current weather observations.
#[async_trait]
pub trait CurrentWeatherApi: Send + Sync + Debug {
    /// Unit the returned temperatures and speeds are expressed in.
    fn unit(&self) -> Unit;

    async fn current(&self, query: &Query) -> Result<CurrentWeatherData>;
}

/// Client for the provider's current weather endpoint.
///
/// Queries take `&self` and return a fresh observation, so one client can
/// serve independent requests concurrently.
#[derive(Debug, Clone)]
pub struct CurrentWeatherClient {
    config: ClientConfig,
    http: Client,
}

impl CurrentWeatherClient {
    /// Validate `unit` and `language` and resolve the API key. No network activity.
    pub fn new(unit: &str, language: &str) -> Result<Self> {
        Ok(Self::from_config(ClientConfig::new(unit, language)?))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Use a preconfigured HTTP client, e.g. one with a timeout.
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn unit(&self) -> Unit {
        self.config.unit
    }

    pub fn language(&self) -> Language {
        self.config.language
    }

    /// Replace the response language. Nothing changes when `language` is unknown.
    pub fn set_language(&mut self, language: &str) -> Result<()> {
        self.config.language = Language::try_from(language)?;
        Ok(())
    }

    pub fn set_unit(&mut self, unit: &str) -> Result<()> {
        self.config.unit = Unit::try_from(unit)?;
        Ok(())
    }

    pub async fn by_name(&self, location: &str) -> Result<CurrentWeatherData> {
        self.fetch(&Query::name(location)).await
    }

    pub async fn by_coordinates(&self, coordinates: Coordinates) -> Result<CurrentWeatherData> {
        self.fetch(&Query::ByCoordinates(coordinates)).await
    }

    pub async fn by_id(&self, id: u64) -> Result<CurrentWeatherData> {
        self.fetch(&Query::ById(id)).await
    }

    pub async fn by_zip(&self, zip: &str, country: &str) -> Result<CurrentWeatherData> {
        self.fetch(&Query::zip(zip, country)).await
    }

    /// Area (bounding box) lookups are not supported by this client.
    pub async fn by_area(&self) -> Result<CurrentWeatherData> {
        Err(OwmError::Unimplemented("current weather by area"))
    }

    /// Full request URL for `query`, including the API key.
    pub fn request_url(&self, query: &Query) -> Result<Url> {
        let mut params = vec![("appid", self.config.api_key.clone())];
        params.extend(query.params());
        params.push(("units", self.config.unit.as_api_str().to_string()));
        params.push(("lang", self.config.language.as_api_str()));

        Ok(Url::parse_with_params(&self.config.base_url, &params)?)
    }

    #[instrument(skip(self), fields(mode = query.mode()))]
    pub async fn fetch(&self, query: &Query) -> Result<CurrentWeatherData> {
        let url = self.request_url(query)?;
        debug!(url = %redact_key(&url), "Fetching current weather");

        let res = self.http.get(url).send().await?;

        let status = res.status();
        // the body is fully read (and the connection released) before any decision
        let body = res.text().await?;

        if !status.is_success() {
            return Err(OwmError::Api {
                status,
                message: error_message(&body),
            });
        }

        let parsed: CurrentWeatherData = serde_json::from_str(&body)?;
        debug!(id = parsed.id, name = %parsed.name, "Decoded current weather");

        Ok(parsed)
    }
}

#[async_trait]
impl CurrentWeatherApi for CurrentWeatherClient {
    fn unit(&self) -> Unit {
        self.config.unit
    }

    async fn current(&self, query: &Query) -> Result<CurrentWeatherData> {
        self.fetch(query).await
    }
}

/// Error envelope the provider returns alongside non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    message: String,
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.message,
        Err(_) => truncate_body(body),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

fn redact_key(url: &Url) -> Url {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "appid" { "***".into() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted
}
