//! Catalogue client error types.

/// Errors from the catalogue HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("catalogue API error {status}: {message}")]
    Status { status: u16, message: String },

    /// JSON deserialization failed
    #[error("catalogue JSON parse error: {message}")]
    Decode {
        message: String,
        /// A prefix of the offending body, when available.
        body: Option<String>,
    },

    /// Payload parsed but cannot become a usable pricelist
    #[error("invalid catalogue payload: {0}")]
    Invalid(String),
}
