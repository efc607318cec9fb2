use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Password, Text};

use weather_search_core::Config;
use weather_search_web::{Page, SubmitEvent, UiState, WeatherSearchController};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-search", version, about = "Weather search CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the backend URL, WeatherAPI key and server address.
    Configure,

    /// Search weather for a location and print the rendered HTML fragment.
    Search {
        /// City or location name.
        location: String,

        /// Backend to query instead of the configured one.
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Run the weather backend.
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;

        match self.command {
            Command::Configure => configure(config),
            Command::Search { location, base_url } => {
                if let Some(url) = base_url {
                    config.set_api_base_url(&url)?;
                }
                search(&config, &location).await
            }
            Command::Serve { host, port } => {
                if let Some(host) = host {
                    config.server.host = host;
                }
                if let Some(port) = port {
                    config.server.port = port;
                }
                weather_search_server::serve(&config).await
            }
        }
    }
}

async fn search(config: &Config, location: &str) -> anyhow::Result<()> {
    let controller = WeatherSearchController::from_config(config);
    let mut page = Page::new();
    page.fill_location(location);

    let outcome = controller.on_submit(&mut page, &mut SubmitEvent::new()).await;
    tracing::debug!(?outcome, "search finished");

    if let Some(alert) = page.alerts().first() {
        anyhow::bail!("{alert}");
    }
    println!("{}", page.content());

    anyhow::ensure!(outcome != UiState::Error, "weather search for '{}' failed", location.trim());
    Ok(())
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let base_url = Text::new("Weather API base URL:").with_default(&config.api_base_url).prompt()?;
    config.set_api_base_url(&base_url)?;

    let api_key = Password::new("WeatherAPI.com API key (empty keeps the current one):")
        .without_confirmation()
        .prompt()?;
    if !api_key.trim().is_empty() {
        config.set_weatherapi_api_key(api_key.trim().to_string());
    }

    let host = Text::new("Backend host:").with_default(&config.server.host).prompt()?;
    let port = CustomType::<u16>::new("Backend port:")
        .with_default(config.server.port)
        .with_error_message("Please enter a port number (0-65535)")
        .prompt()?;
    config.server.host = host;
    config.server.port = port;

    config.save().context("Failed to save configuration")?;
    println!("Configuration saved to {}", Config::config_file_path()?.display());

    Ok(())
}
