// src/utils/errors.rs

use std::{error::Error, fmt};

use reqwest;
use tungstenite::Error as WsError;

/// Errors coming from external API calls (HTTP, WS, etc).
#[derive(Debug)]
pub enum ApiError {
    Http(reqwest::Error),
    WebSocket(WsError),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Http(e)      => write!(f, "HTTP error: {}", e),
            ApiError::WebSocket(e) => write!(f, "WebSocket error: {}", e),
            ApiError::Other(msg)   => write!(f, "{}", msg),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiError::Http(e)      => Some(e),
            ApiError::WebSocket(e) => Some(e),
            ApiError::Other(_)     => None,
        }
    }
}

// Conversions from underlying errors into ApiError
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self { ApiError::Http(err) }
}
impl From<WsError> for ApiError {
    fn from(err: WsError) -> Self { ApiError::WebSocket(err) }
}

/// Violations of a store's own invariants (bad snapshot input, mainly).
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("candle times not strictly increasing: {prev} then {next}")]
    NonMonotonic { prev: i64, next: i64 },
}
