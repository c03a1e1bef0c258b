//! Transit client error types.

use super::convert::ConversionError;

/// Errors from the transit HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the API
    #[error("rate limited by transit API")]
    RateLimited,

    /// Invalid API key or unauthorized
    #[error("unauthorized: check TRANSIT_API_KEY")]
    Unauthorized,

    /// Response parsed but could not be turned into domain types
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),
}
