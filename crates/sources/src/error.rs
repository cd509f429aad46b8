//! Errors raised while talking to the weather provider.
//!
//! These never leave the crate's `WeatherSource` implementations: every
//! failure is turned into a degraded report at the boundary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Weather API returned status {0}")]
    Status(u16),

    #[error("Weather API response had no usable reading: {0}")]
    InvalidResponse(String),
}
