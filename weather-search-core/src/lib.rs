//! Core library shared by the weather search crates.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The wire model of the `/weather` endpoint (request, report, error body)
//! - The upstream provider the backend queries
//!
//! It is used by `weather-search-web`, `weather-search-server` and
//! `weather-search-cli`.

pub mod config;
pub mod model;
pub mod provider;

pub use config::{Config, ServerConfig, WeatherApiConfig};
pub use model::{ErrorBody, WeatherReport, WeatherRequest};
pub use provider::{ProviderError, WeatherProvider};
