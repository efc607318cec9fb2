use serde::{Deserialize, Serialize};

/// Body of `POST /weather`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherRequest {
    pub location: String,
}

/// Body returned with any non-2xx status from the weather backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self { detail: Some(detail.into()) }
    }
}

/// Structured report served by the backend on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: ReportLocation,
    pub current: CurrentConditions,
    pub forecast: DailyForecast,
    #[serde(default)]
    pub alerts: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportLocation {
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub localtime: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub temperature_f: f64,
    pub condition: String,
    /// Protocol-relative icon path, e.g. `//cdn.weatherapi.com/...png`.
    pub condition_icon: String,
    pub humidity: u8,
    pub wind_kph: f64,
    pub wind_dir: String,
    pub pressure_mb: f64,
    pub feels_like_c: f64,
    pub uv: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: String,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub condition: String,
    pub condition_icon: String,
    pub chance_of_rain: u32,
    pub max_wind_kph: f64,
    pub avg_humidity: f64,
    pub hourly: Vec<HourlyForecast>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    pub time: String,
    pub temp_c: f64,
    pub condition: String,
    pub condition_icon: String,
    pub chance_of_rain: u32,
    pub wind_kph: f64,
}
