use askama::Template;
use serde_json::Value;

use crate::model::WeatherView;

/// Container content while a request is in flight.
pub const LOADING_HTML: &str =
    r#"<div class="weather-loading" style="padding: 20px; text-align: center;">🔍 Searching...</div>"#;

/// Container content for a success body that cannot be rendered.
pub const INVALID_DATA_HTML: &str =
    r#"<div class="weather-invalid" style="color: red;">Invalid data received from the API</div>"#;

#[derive(Template)]
#[template(path = "weather.html")]
struct WeatherCard<'a> {
    view: &'a WeatherView,
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorFragment<'a> {
    message: &'a str,
}

/// Turns a `/weather` success body into the weather card.
///
/// Never fails: a body without `location` or `current` yields
/// [`INVALID_DATA_HTML`] instead of a partial card.
pub fn render(body: &Value) -> String {
    let view = match WeatherView::from_json(body) {
        Ok(view) => view,
        Err(err) => {
            tracing::error!(reason = err.reason, "{err}");
            return INVALID_DATA_HTML.to_string();
        }
    };

    WeatherCard { view: &view }.render().unwrap_or_else(|e| {
        tracing::error!(error = %e, "weather card template failed");
        INVALID_DATA_HTML.to_string()
    })
}

/// Styled error box showing `message`.
pub fn render_error(message: &str) -> String {
    ErrorFragment { message }.render().unwrap_or_else(|e| {
        tracing::error!(error = %e, "error fragment template failed");
        format!(r#"<div class="weather-error">{}</div>"#, crate::error::GENERIC_API_ERROR)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paris() -> Value {
        json!({
            "location": { "name": "Paris", "region": "Ile-de-France" },
            "current": {
                "condition": "Clear", "condition_icon": "//x/y.png",
                "temperature_c": 21.6, "feels_like_c": 20.2, "humidity": 55,
                "wind_kph": 12.4, "pressure_mb": 1012
            },
            "forecast": { "chance_of_rain": 10 }
        })
    }

    #[test]
    fn renders_full_report() {
        let html = render(&paris());

        for expected in [
            "Paris, Ile-de-France",
            "Clear",
            "22°C",
            "Feels like: 20°C",
            "55%",
            "12 km/h",
            "1012 mb",
            "10%",
            "y.png",
        ] {
            assert!(html.contains(expected), "missing {expected:?} in {html}");
        }
        assert!(html.contains("class=\"weather-card\""));
    }

    #[test]
    fn float_pressure_prints_like_an_integer() {
        let mut body = paris();
        body["current"]["pressure_mb"] = json!(1012.0);
        assert!(render(&body).contains("1012 mb"));
    }

    #[test]
    fn out_of_range_temperature_is_not_saturated() {
        let mut body = paris();
        body["current"]["feels_like_c"] = json!(1e300);

        let html = render(&body);
        assert!(!html.contains(&i64::MAX.to_string()));
        assert!(html.contains(&format!("Feels like: {}°C", 1e300_f64)));
    }

    #[test]
    fn missing_current_renders_invalid_data_only() {
        let mut body = paris();
        body.as_object_mut().expect("object").remove("current");

        let html = render(&body);
        assert_eq!(html, INVALID_DATA_HTML);
        assert!(!html.contains("Paris"));
    }

    #[test]
    fn missing_forecast_defaults_rain_to_zero() {
        let mut body = paris();
        body.as_object_mut().expect("object").remove("forecast");

        let html = render(&body);
        assert!(html.contains("Paris, Ile-de-France"));
        assert!(html.contains("0%"));
    }

    #[test]
    fn text_fields_are_escaped() {
        let mut body = paris();
        body["location"]["name"] = json!("<script>alert(1)</script>");

        let html = render(&body);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn error_fragment_contains_message() {
        let html = render_error("city not found");
        assert!(html.contains("city not found"));
        assert!(html.contains("class=\"weather-error\""));
    }

    #[test]
    fn error_fragment_escapes_message() {
        let html = render_error("<b>boom</b>");
        assert!(html.contains("&lt;b&gt;boom&lt;/b&gt;"));
    }
}
