use thiserror::Error;

/// Errors surfaced by the current weather client.
#[derive(Debug, Error)]
pub enum OwmError {
    /// The unit code is not one of the supported measurement systems.
    #[error("Unknown unit '{0}'. Supported units: standard (K), metric (C), imperial (F).")]
    InvalidUnit(String),

    /// The language code is not in the provider's language table.
    #[error("Unknown language code '{0}'")]
    InvalidLanguage(String),

    /// No API key could be resolved from the environment or the config file.
    #[error(
        "No API key configured.\n\
         Hint: export OWM_API_KEY or run `weather configure` and enter your API key."
    )]
    MissingCredential,

    /// The config file exists but could not be read or parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The request could not be completed at the transport level.
    #[error("Request to OpenWeatherMap failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("OpenWeatherMap request failed with status {status}: {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },

    /// The response body did not match the observation shape.
    #[error("Failed to parse OpenWeatherMap response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("{0} is not implemented")]
    Unimplemented(&'static str),
}

pub type Result<T, E = OwmError> = std::result::Result<T, E>;
