use serde_json::{Map, Value};

use crate::error::{DataShapeError, SearchError};

/// A trimmed, non-empty location name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn parse(raw: &str) -> Result<Self, SearchError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SearchError::EmptyLocation);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Success body of `/weather` with every display default already applied.
///
/// Temperatures and wind are rounded half-up to whole numbers; humidity,
/// pressure and chance of rain are shown as received.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherView {
    pub icon_url: String,
    pub icon_alt: String,
    pub location_name: String,
    pub region: String,
    pub condition: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity: f64,
    pub wind_kph: f64,
    pub pressure_mb: f64,
    pub chance_of_rain: f64,
}

impl WeatherView {
    /// Reads a response body of unknown shape.
    ///
    /// Fails only when the body is not an object or lacks the `location` or
    /// `current` section. Any other missing or mistyped field falls back to
    /// its default.
    pub fn from_json(body: &Value) -> Result<Self, DataShapeError> {
        let root = body.as_object().ok_or(DataShapeError { reason: "body is not an object" })?;
        let location = section(root, "location")
            .ok_or(DataShapeError { reason: "missing location section" })?;
        let current =
            section(root, "current").ok_or(DataShapeError { reason: "missing current section" })?;
        let empty = Map::new();
        let forecast = section(root, "forecast").unwrap_or(&empty);

        let condition = text(current, "condition");
        let icon_path = text(current, "condition_icon").unwrap_or_default();

        Ok(Self {
            icon_url: format!("https:{icon_path}"),
            icon_alt: condition.clone().unwrap_or_else(|| "Weather".to_string()),
            location_name: text(location, "name").unwrap_or_else(|| "N/A".to_string()),
            region: text(location, "region").unwrap_or_default(),
            condition: condition.unwrap_or_else(|| "N/A".to_string()),
            temperature_c: round_half_up(number(current, "temperature_c")),
            feels_like_c: round_half_up(number(current, "feels_like_c")),
            humidity: number(current, "humidity"),
            wind_kph: round_half_up(number(current, "wind_kph")),
            pressure_mb: number(current, "pressure_mb"),
            chance_of_rain: number(forecast, "chance_of_rain"),
        })
    }
}

fn section<'a>(root: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    root.get(key).and_then(Value::as_object)
}

/// Non-empty string (numbers are accepted and stringified).
fn text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Finite number, or a string that parses as one; `0` otherwise.
fn number(obj: &Map<String, Value>, key: &str) -> f64 {
    let value = match obj.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Rounds ties towards positive infinity, so `-2.5` becomes `-2`.
///
/// Stays `f64` so magnitudes beyond `i64` print as themselves.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
