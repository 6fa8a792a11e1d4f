use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use current_weather_core::{
    API_KEY_ENV, Config, Coordinates, CurrentWeatherApi, CurrentWeatherClient, Language, Query,
    Unit, client::ClientConfig, resolve_api_key_from,
};
use inquire::{Password, Select, Text};
use tracing::debug;

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather from OpenWeatherMap")]
pub struct Cli {
    #[command(flatten)]
    pub options: Options,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct Options {
    /// Unit system: standard (K), metric (C) or imperial (F). Defaults to the configured one.
    #[arg(long, global = true)]
    pub unit: Option<String>,

    /// Response language code, e.g. EN, DE, PT_BR. Defaults to the configured one.
    #[arg(long, global = true)]
    pub lang: Option<String>,

    /// Print the raw observation as JSON.
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store API key, default unit and language.
    Configure,

    /// Current weather for a location name, e.g. "London,uk".
    Name { location: String },

    /// Current weather at a latitude/longitude.
    Coords {
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        lon: f64,
    },

    /// Current weather for a provider location id.
    Id { id: u64 },

    /// Current weather for a postal code in a country.
    Zip { zip: String, country: String },
}

impl Command {
    fn query(&self) -> Option<Query> {
        match self {
            Command::Configure => None,
            Command::Name { location } => Some(Query::name(location.as_str())),
            Command::Coords { lat, lon } => Some(Query::ByCoordinates(Coordinates::new(*lat, *lon))),
            Command::Id { id } => Some(Query::ById(*id)),
            Command::Zip { zip, country } => Some(Query::zip(zip.as_str(), country.as_str())),
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        let Some(query) = self.command.query() else {
            return configure(config);
        };

        let env_key = std::env::var(API_KEY_ENV).ok();
        let client = build_client(&self.options, &config, env_key.as_deref())?;
        let text = show(&client, &query, self.options.json).await?;
        println!("{text}");

        Ok(())
    }
}

/// Unit and language from flags, then config, then built-in defaults.
fn settings(options: &Options, config: &Config) -> anyhow::Result<(Unit, Language)> {
    let unit = match &options.unit {
        Some(code) => Unit::try_from(code.as_str())?,
        None => config.unit()?.unwrap_or_default(),
    };
    let language = match &options.lang {
        Some(code) => Language::try_from(code.as_str())?,
        None => config.language()?.unwrap_or_default(),
    };
    Ok((unit, language))
}

fn build_client(
    options: &Options,
    config: &Config,
    env_key: Option<&str>,
) -> anyhow::Result<CurrentWeatherClient> {
    let (unit, language) = settings(options, config)?;
    let api_key = resolve_api_key_from(env_key, config)?;
    debug!(%unit, %language, "Building client");

    Ok(CurrentWeatherClient::from_config(ClientConfig::from_parts(unit, language, api_key)))
}

pub async fn show(api: &dyn CurrentWeatherApi, query: &Query, json: bool) -> anyhow::Result<String> {
    let weather = api
        .current(query)
        .await
        .with_context(|| format!("Failed to fetch current weather by {}", query.mode()))?;

    if json {
        return serde_json::to_string_pretty(&weather).context("Failed to serialize observation");
    }
    Ok(output::render(&weather, api.unit()))
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let api_key = Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let unit = Select::new("Default unit:", Unit::all().to_vec())
        .prompt()
        .context("Failed to read unit")?;

    let default_lang = config.language()?.unwrap_or_default();
    let language = Text::new("Default language code:")
        .with_default(default_lang.code())
        .with_validator(|input: &str| {
            Ok(if Language::validate(input) {
                inquire::validator::Validation::Valid
            } else {
                inquire::validator::Validation::Invalid("Unknown language code".into())
            })
        })
        .prompt()
        .context("Failed to read language")?;

    config.set_api_key(api_key);
    config.set_defaults(unit, Language::try_from(language.as_str())?);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
