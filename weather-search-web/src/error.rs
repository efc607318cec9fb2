use thiserror::Error;

/// Message shown when a failed response carries no usable `detail`.
pub const GENERIC_API_ERROR: &str = "API error";

/// Everything that can end a search cycle early.
///
/// The `Display` text is shown to the user verbatim, either as an alert
/// ([`SearchError::EmptyLocation`]) or inside the error fragment.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Please enter a city!")]
    EmptyLocation,
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Request { status: u16, message: String },
    /// The request never produced a response, or the body could not be read.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A success body that lacks the sections needed to render anything.
#[derive(Debug, Error)]
#[error("Invalid data received from the API")]
pub struct DataShapeError {
    pub reason: &'static str,
}
