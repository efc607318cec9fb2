use crate::{Config, WeatherReport, provider::weatherapi::WeatherApiProvider};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod weatherapi;

/// Failure while asking the upstream service for a report.
///
/// The `Display` text is what the backend sends back as `detail`.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Upstream rejected the query (HTTP 400).
    #[error("Location not found")]
    LocationNotFound,
    /// Upstream answered with any other non-success status.
    #[error("Internal weather server error")]
    Upstream { status: u16 },
    #[error("Request error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Upstream body did not have the expected shape.
    #[error("Unexpected error: {0}")]
    Malformed(String),
}

impl ProviderError {
    /// HTTP status the backend answers with for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            ProviderError::LocationNotFound => 400,
            _ => 500,
        }
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_weather(&self, location: &str) -> Result<WeatherReport, ProviderError>;
}

/// Construct the upstream provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let wa = config.weatherapi()?;
    Ok(Box::new(WeatherApiProvider::new(wa.api_key.clone(), wa.base_url.clone())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(ProviderError::LocationNotFound.status_code(), 400);
        assert_eq!(ProviderError::Upstream { status: 503 }.status_code(), 500);
        assert_eq!(ProviderError::Malformed("x".into()).status_code(), 500);
    }

    #[test]
    fn detail_messages() {
        assert_eq!(ProviderError::LocationNotFound.to_string(), "Location not found");
        assert_eq!(
            ProviderError::Malformed("no forecast day".into()).to_string(),
            "Unexpected error: no forecast day"
        );
    }

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured for WeatherAPI"));
    }

    #[test]
    fn provider_from_config_works_when_configured() {
        let mut cfg = Config::default();
        cfg.set_weatherapi_api_key("KEY".to_string());

        assert!(provider_from_config(&cfg).is_ok());
    }
}
