use std::collections::HashSet;

use crate::controller::UiState;

/// Submit button label while idle.
pub const DEFAULT_BUTTON_LABEL: &str = "Search";

/// Submit button label while a request is in flight.
pub const BUSY_BUTTON_LABEL: &str = "Searching...";

/// Elements the controller needs on the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    SearchForm,
    LocationInput,
    SearchButton,
    WeatherContent,
}

impl ElementId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementId::SearchForm => "searchForm",
            ElementId::LocationInput => "locationInput",
            ElementId::SearchButton => "searchBtn",
            ElementId::WeatherContent => "weatherContent",
        }
    }

    pub const fn all() -> &'static [ElementId] {
        &[
            ElementId::SearchForm,
            ElementId::LocationInput,
            ElementId::SearchButton,
            ElementId::WeatherContent,
        ]
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Submission of the search form.
#[derive(Debug, Clone, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops the host from navigating or reloading.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// What the controller can see and change on the host page.
pub trait SearchSurface: Send {
    fn has_element(&self, id: ElementId) -> bool;

    /// Raw value of the location input.
    fn location_value(&self) -> String;

    /// Blocking notice to the user.
    fn alert(&mut self, message: &str);

    fn set_button(&mut self, enabled: bool, label: &str);

    /// Replaces the results container content.
    fn set_content(&mut self, html: String);

    /// Called on every UI state transition.
    fn record_state(&mut self, _state: UiState) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    pub enabled: bool,
    pub label: String,
}

impl Default for ButtonState {
    fn default() -> Self {
        Self { enabled: true, label: DEFAULT_BUTTON_LABEL.to_string() }
    }
}

/// In-memory search page.
///
/// Used by the command-line host and by tests to drive
/// [`WeatherSearchController::on_submit`](crate::WeatherSearchController::on_submit)
/// directly.
#[derive(Debug, Clone, Default)]
pub struct Page {
    missing: HashSet<ElementId>,
    location: String,
    button: ButtonState,
    content: String,
    alerts: Vec<String>,
    states: Vec<UiState>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same page with `id` removed.
    pub fn without(mut self, id: ElementId) -> Self {
        self.missing.insert(id);
        self
    }

    /// Types `location` into the input, replacing what was there.
    pub fn fill_location(&mut self, location: &str) {
        self.location = location.to_string();
    }

    pub fn button(&self) -> &ButtonState {
        &self.button
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Every transition recorded so far, oldest first.
    pub fn states(&self) -> &[UiState] {
        &self.states
    }

    pub fn clear_states(&mut self) {
        self.states.clear();
    }
}

impl SearchSurface for Page {
    fn has_element(&self, id: ElementId) -> bool {
        !self.missing.contains(&id)
    }

    fn location_value(&self) -> String {
        self.location.clone()
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn set_button(&mut self, enabled: bool, label: &str) {
        self.button = ButtonState { enabled, label: label.to_string() };
    }

    fn set_content(&mut self, html: String) {
        self.content = html;
    }

    fn record_state(&mut self, state: UiState) {
        self.states.push(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_ids_use_page_names() {
        let names: Vec<_> = ElementId::all().iter().map(ElementId::as_str).collect();
        assert_eq!(names, ["searchForm", "locationInput", "searchBtn", "weatherContent"]);
    }

    #[test]
    fn new_page_is_idle() {
        let page = Page::new();
        assert_eq!(page.button(), &ButtonState::default());
        assert!(page.button().enabled);
        assert_eq!(page.button().label, DEFAULT_BUTTON_LABEL);
        assert!(page.content().is_empty());
        assert!(ElementId::all().iter().all(|id| page.has_element(*id)));
    }

    #[test]
    fn without_removes_one_element() {
        let page = Page::new().without(ElementId::SearchButton);
        assert!(!page.has_element(ElementId::SearchButton));
        assert!(page.has_element(ElementId::WeatherContent));
    }

    #[test]
    fn prevent_default_sticks() {
        let mut event = SubmitEvent::new();
        assert!(!event.default_prevented());
        event.prevent_default();
        assert!(event.default_prevented());
    }
}
