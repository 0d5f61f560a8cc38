use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use tracing::{debug, warn};
use weather_core::{Config, StoreStatus, WeatherStore, gateway_from_config};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather and 5-day forecast")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key and an optional default city.
    Configure,

    /// Show current weather and the 5-day forecast for a city.
    Show {
        /// City name; falls back to the configured default city.
        city: Option<String>,

        /// Display temperatures in Fahrenheit.
        #[arg(long)]
        fahrenheit: bool,

        /// Print the view as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Search repeatedly; `:unit` toggles units, `:clear` clears an error, `:quit` exits.
    Interactive {
        /// City searched on start; falls back to the configured default city.
        city: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, fahrenheit, json } => show(city, fahrenheit, json).await,
            Command::Interactive { city } => interactive(city).await,
        }
    }
}

fn build_store() -> anyhow::Result<(Config, WeatherStore)> {
    let mut config = Config::load()?;
    config.apply_env_overrides();

    let gateway = gateway_from_config(&config)?;
    Ok((config, WeatherStore::new(gateway)))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    if api_key.trim().is_empty() {
        bail!("API key must not be empty");
    }
    config.set_api_key(api_key.trim().to_string());

    let current_city = config.default_city.clone().unwrap_or_default();
    let city = Text::new("Default city (leave empty for none):")
        .with_default(&current_city)
        .prompt()
        .context("Failed to read default city")?;
    config.set_default_city(&city);

    config.save()?;
    println!("Configuration saved to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn show(city: Option<String>, fahrenheit: bool, json: bool) -> anyhow::Result<()> {
    let (config, store) = build_store()?;
    let city = city.or(config.default_city).unwrap_or_default();

    if fahrenheit {
        store.toggle_temperature_unit();
    }

    let result = store.search(&city).await;
    let view = store.current_view();

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else if view.status() == StoreStatus::Ready {
        print!("{}", render::view(&view));
    }

    result.with_context(|| format!("Weather lookup for '{}' failed", city.trim()))?;
    Ok(())
}

async fn interactive(city: Option<String>) -> anyhow::Result<()> {
    let (config, store) = build_store()?;

    if let Some(city) = city.or(config.default_city) {
        if let Err(e) = store.search(&city).await {
            warn!(city = %city, error = %e, "initial city search failed");
        }
        print!("{}", render::view(&store.current_view()));
    }

    loop {
        let input = match Text::new("City:").with_help_message(":unit  :clear  :quit").prompt() {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        match input.trim() {
            ":quit" | ":q" => break,
            ":unit" | ":u" => {
                let unit = store.toggle_temperature_unit();
                println!("Temperatures now in {unit}");
            }
            ":clear" | ":c" => store.clear_error(),
            city => {
                // the failure is part of the rendered view below
                if let Err(e) = store.search(city).await {
                    debug!(city, error = %e, code = ?e.code, "search failed");
                }
            }
        }

        print!("{}", render::view(&store.current_view()));
    }

    Ok(())
}
