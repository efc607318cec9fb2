use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::fmt::Debug;

use weather_search_core::{ErrorBody, WeatherRequest};

use crate::{
    error::{GENERIC_API_ERROR, SearchError},
    model::SearchQuery,
};

/// Sends one location query to the weather backend.
#[async_trait]
pub trait WeatherClient: Send + Sync + Debug {
    /// Returns the parsed success body, whatever its shape.
    async fn fetch_weather(&self, query: &SearchQuery) -> Result<Value, SearchError>;
}

/// `POST {base_url}/weather` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpWeatherClient {
    base_url: String,
    http: Client,
}

impl HttpWeatherClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self { base_url: base_url.trim_end_matches('/').to_string(), http: Client::new() }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/weather", self.base_url)
    }
}

#[async_trait]
impl WeatherClient for HttpWeatherClient {
    async fn fetch_weather(&self, query: &SearchQuery) -> Result<Value, SearchError> {
        let url = self.endpoint();
        tracing::debug!(%url, location = %query, "sending weather request");

        let res = self
            .http
            .post(&url)
            .json(&WeatherRequest { location: query.as_str().to_string() })
            .send()
            .await?;

        let status = res.status();
        tracing::debug!(%status, "weather response received");
        let body = res.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.detail)
                .filter(|detail| !detail.is_empty())
                .unwrap_or_else(|| GENERIC_API_ERROR.to_string());
            return Err(SearchError::Request { status: status.as_u16(), message });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}
