use std::ops::{Deref, DerefMut};

use weather_search_core::Config;

use crate::{
    client::{HttpWeatherClient, WeatherClient},
    model::SearchQuery,
    page::{BUSY_BUTTON_LABEL, DEFAULT_BUTTON_LABEL, ElementId, SearchSurface, SubmitEvent},
    render::{LOADING_HTML, render, render_error},
};

/// Visible state of the search form.
///
/// `Idle → Loading → Success | Error → Idle`; a blank submission stays in
/// `Idle` without recording anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiState {
    Idle,
    Loading,
    Success,
    Error,
}

/// Runs one submit → request → render cycle per form submission.
///
/// Overlapping submissions are not coordinated: each cycle writes the
/// container when its own response arrives.
#[derive(Debug, Clone)]
pub struct WeatherSearchController<C> {
    client: C,
}

impl WeatherSearchController<HttpWeatherClient> {
    /// Controller talking to `config.api_base_url`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(HttpWeatherClient::new(config.api_base_url.clone()))
    }
}

impl<C: WeatherClient> WeatherSearchController<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Handles a submission of the search form.
    ///
    /// Returns the outcome of the cycle: `Success` or `Error` once a request
    /// was made, `Idle` when the page was incomplete or the input blank. The
    /// button is back to enabled with its default label whenever a request
    /// was made, even if the returned future is dropped before it completes.
    pub async fn on_submit<S: SearchSurface>(
        &self,
        surface: &mut S,
        event: &mut SubmitEvent,
    ) -> UiState {
        event.prevent_default();

        if let Some(missing) = ElementId::all().iter().find(|id| !surface.has_element(**id)) {
            tracing::error!(element = %missing, "search page element not found");
            return UiState::Idle;
        }

        let query = match SearchQuery::parse(&surface.location_value()) {
            Ok(query) => query,
            Err(err) => {
                surface.alert(&err.to_string());
                return UiState::Idle;
            }
        };

        tracing::info!(location = %query, "searching");
        let mut surface = IdleOnDrop(surface);
        transition(&mut *surface, UiState::Loading);

        let outcome = match self.client.fetch_weather(&query).await {
            Ok(body) => {
                surface.set_content(render(&body));
                UiState::Success
            }
            Err(err) => {
                tracing::warn!(location = %query, error = %err, "weather search failed");
                surface.set_content(render_error(&err.to_string()));
                UiState::Error
            }
        };
        transition(&mut *surface, outcome);

        outcome
    }
}

/// Returns the surface to `Idle` when dropped, including when the submit
/// future is dropped mid-request or the client panics.
struct IdleOnDrop<'a, S: SearchSurface>(&'a mut S);

impl<S: SearchSurface> Deref for IdleOnDrop<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        &*self.0
    }
}

impl<S: SearchSurface> DerefMut for IdleOnDrop<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut *self.0
    }
}

impl<S: SearchSurface> Drop for IdleOnDrop<'_, S> {
    fn drop(&mut self) {
        transition(&mut *self.0, UiState::Idle);
    }
}

fn transition<S: SearchSurface>(surface: &mut S, state: UiState) {
    match state {
        UiState::Loading => {
            surface.set_button(false, BUSY_BUTTON_LABEL);
            surface.set_content(LOADING_HTML.to_string());
        }
        UiState::Idle => surface.set_button(true, DEFAULT_BUTTON_LABEL),
        UiState::Success | UiState::Error => {}
    }
    tracing::debug!(?state, "ui state");
    surface.record_state(state);
}
