use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::model::{
    CurrentConditions, DailyForecast, HourlyForecast, ReportLocation, WeatherReport,
};

use super::{ProviderError, WeatherProvider};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self { api_key, base_url: base_url.trim_end_matches('/').to_string(), http: Client::new() }
    }

    /// Current conditions plus today's forecast, air quality and alerts.
    async fn fetch_forecast(&self, location: &str) -> Result<WeatherReport, ProviderError> {
        let url = format!("{}/forecast.json", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", location),
                ("days", "1"),
                ("aqi", "yes"),
                ("alerts", "yes"),
            ])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if status == StatusCode::BAD_REQUEST {
            tracing::info!(%location, "WeatherAPI did not recognise location");
            return Err(ProviderError::LocationNotFound);
        }
        if !status.is_success() {
            tracing::warn!(%status, body = %truncate_body(&body), "WeatherAPI forecast request failed");
            return Err(ProviderError::Upstream { status: status.as_u16() });
        }

        let parsed: WaForecastResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Malformed(format!("invalid WeatherAPI JSON: {e}")))?;

        parsed.into_report()
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    region: String,
    country: String,
    lat: f64,
    lon: f64,
    localtime: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    temp_f: f64,
    condition: WaCondition,
    humidity: u8,
    wind_kph: f64,
    wind_dir: String,
    pressure_mb: f64,
    feelslike_c: f64,
    uv: f64,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    maxtemp_c: f64,
    mintemp_c: f64,
    condition: WaCondition,
    daily_chance_of_rain: u32,
    maxwind_kph: f64,
    avghumidity: f64,
}

#[derive(Debug, Deserialize)]
struct WaForecastHour {
    time: String,
    temp_c: f64,
    condition: WaCondition,
    chance_of_rain: u32,
    wind_kph: f64,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: String,
    day: WaDay,
    hour: Vec<WaForecastHour>,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Default, Deserialize)]
struct WaAlerts {
    #[serde(default)]
    alert: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    location: WaLocation,
    current: WaCurrent,
    forecast: WaForecast,
    #[serde(default)]
    alerts: Option<WaAlerts>,
}

impl WaForecastResponse {
    fn into_report(self) -> Result<WeatherReport, ProviderError> {
        let today = self
            .forecast
            .forecastday
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Malformed("response contained no forecastday data".into()))?;

        let hourly = today
            .hour
            .into_iter()
            .map(|h| HourlyForecast {
                time: h.time,
                temp_c: h.temp_c,
                condition: h.condition.text,
                condition_icon: h.condition.icon,
                chance_of_rain: h.chance_of_rain,
                wind_kph: h.wind_kph,
            })
            .collect();

        Ok(WeatherReport {
            location: ReportLocation {
                name: self.location.name,
                region: self.location.region,
                country: self.location.country,
                lat: self.location.lat,
                lon: self.location.lon,
                localtime: self.location.localtime,
            },
            current: CurrentConditions {
                temperature_c: self.current.temp_c,
                temperature_f: self.current.temp_f,
                condition: self.current.condition.text,
                condition_icon: self.current.condition.icon,
                humidity: self.current.humidity,
                wind_kph: self.current.wind_kph,
                wind_dir: self.current.wind_dir,
                pressure_mb: self.current.pressure_mb,
                feels_like_c: self.current.feelslike_c,
                uv: self.current.uv,
            },
            forecast: DailyForecast {
                date: today.date,
                max_temp_c: today.day.maxtemp_c,
                min_temp_c: today.day.mintemp_c,
                condition: today.day.condition.text,
                condition_icon: today.day.condition.icon,
                chance_of_rain: today.day.daily_chance_of_rain,
                max_wind_kph: today.day.maxwind_kph,
                avg_humidity: today.day.avghumidity,
                hourly,
            },
            alerts: self.alerts.unwrap_or_default().alert,
        })
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn get_weather(&self, location: &str) -> Result<WeatherReport, ProviderError> {
        self.fetch_forecast(location).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn forecast_body() -> serde_json::Value {
        json!({
            "location": {
                "name": "Paris", "region": "Ile-de-France", "country": "France",
                "lat": 48.87, "lon": 2.33, "localtime": "2026-10-19 14:05"
            },
            "current": {
                "temp_c": 21.6, "temp_f": 70.9,
                "condition": { "text": "Clear", "icon": "//cdn.weatherapi.com/day/113.png", "code": 1000 },
                "humidity": 55, "wind_kph": 12.4, "wind_dir": "SW",
                "pressure_mb": 1012.0, "feelslike_c": 20.2, "uv": 4.0
            },
            "forecast": {
                "forecastday": [{
                    "date": "2026-10-19",
                    "day": {
                        "maxtemp_c": 23.1, "mintemp_c": 12.0,
                        "condition": { "text": "Sunny", "icon": "//cdn.weatherapi.com/day/113.png" },
                        "daily_chance_of_rain": 10, "maxwind_kph": 15.1, "avghumidity": 60
                    },
                    "hour": [{
                        "time": "2026-10-19 00:00", "temp_c": 13.2,
                        "condition": { "text": "Clear", "icon": "//cdn.weatherapi.com/night/113.png" },
                        "chance_of_rain": 0, "wind_kph": 6.5
                    }]
                }]
            }
        })
    }

    #[tokio::test]
    async fn maps_forecast_into_report() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast.json"))
            .and(query_param("key", "KEY"))
            .and(query_param("q", "Paris"))
            .and(query_param("days", "1"))
            .and(query_param("alerts", "yes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
            .expect(1)
            .mount(&server)
            .await;

        let provider = WeatherApiProvider::new("KEY".into(), server.uri());
        let report = provider.get_weather("Paris").await.expect("report");

        assert_eq!(report.location.name, "Paris");
        assert_eq!(report.location.region, "Ile-de-France");
        assert_eq!(report.current.condition, "Clear");
        assert_eq!(report.current.humidity, 55);
        assert_eq!(report.current.feels_like_c, 20.2);
        assert_eq!(report.forecast.date, "2026-10-19");
        assert_eq!(report.forecast.chance_of_rain, 10);
        assert_eq!(report.forecast.avg_humidity, 60.0);
        assert_eq!(report.forecast.hourly.len(), 1);
        assert_eq!(report.forecast.hourly[0].condition, "Clear");
        assert!(report.alerts.is_empty());
    }

    #[tokio::test]
    async fn passes_alerts_through() {
        let server = MockServer::start().await;
        let mut body = forecast_body();
        body["alerts"] = json!({ "alert": [{ "headline": "Wind warning" }] });
        Mock::given(method("GET"))
            .and(path("/forecast.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let provider = WeatherApiProvider::new("KEY".into(), server.uri());
        let report = provider.get_weather("Paris").await.expect("report");

        assert_eq!(report.alerts, vec![json!({ "headline": "Wind warning" })]);
    }

    #[tokio::test]
    async fn bad_request_means_location_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast.json"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({ "error": { "code": 1006, "message": "No matching location found." } })),
            )
            .mount(&server)
            .await;

        let provider = WeatherApiProvider::new("KEY".into(), server.uri());
        let err = provider.get_weather("Nowhere").await.unwrap_err();

        assert!(matches!(err, ProviderError::LocationNotFound));
    }

    #[tokio::test]
    async fn other_status_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast.json"))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key disabled"))
            .mount(&server)
            .await;

        let provider = WeatherApiProvider::new("KEY".into(), server.uri());
        let err = provider.get_weather("Paris").await.unwrap_err();

        assert!(matches!(err, ProviderError::Upstream { status: 403 }));
        assert_eq!(err.to_string(), "Internal weather server error");
    }

    #[tokio::test]
    async fn empty_forecastday_is_malformed() {
        let server = MockServer::start().await;
        let mut body = forecast_body();
        body["forecast"]["forecastday"] = json!([]);
        Mock::given(method("GET"))
            .and(path("/forecast.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let provider = WeatherApiProvider::new("KEY".into(), server.uri());
        let err = provider.get_weather("Paris").await.unwrap_err();

        assert!(matches!(err, ProviderError::Malformed(_)));
        assert!(err.to_string().contains("no forecastday"));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let out = truncate_body(&long);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
