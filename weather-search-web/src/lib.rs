//! Weather search form controller.
//!
//! A submission of the search form reads the location input, posts it to
//! `{base_url}/weather` and replaces the results container with either the
//! rendered weather card or an error box. The host page is reached through
//! [`SearchSurface`]; [`Page`] is an in-memory implementation.

pub mod client;
pub mod controller;
pub mod error;
pub mod model;
pub mod page;
pub mod render;

pub use client::{HttpWeatherClient, WeatherClient};
pub use controller::{UiState, WeatherSearchController};
pub use error::{DataShapeError, SearchError};
pub use model::{SearchQuery, WeatherView};
pub use page::{ElementId, Page, SearchSurface, SubmitEvent};
pub use render::{render, render_error};
