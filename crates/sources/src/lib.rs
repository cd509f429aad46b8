//! # Sources Crate
//!
//! The I/O collaborators that feed the recommender.
//!
//! ## Components
//!
//! ### Weather sources
//! - `OpenWeatherSource`: live readings from the OpenWeather current-weather
//!   endpoint for configured coordinates
//! - `FixedWeatherSource`: a constant reading (manual override, tests)
//!
//! Weather sources never fail. Missing coordinates, a missing API key or a
//! provider error each produce a degraded default report.
//!
//! ### Corpus sources
//! - `CsvCorpusSource`: loads the recipe CSV on the blocking thread pool
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{CorpusSource, CsvCorpusSource, OpenWeatherSource, WeatherSource};
//!
//! let corpus = CsvCorpusSource::new("assets/recipe.csv").load().await?;
//! let report = OpenWeatherSource::new(coordinates, api_key).current().await;
//! println!("{}: {}", report.place, report.summary);
//! ```

pub mod corpus_source;
pub mod error;
pub mod weather;

// Re-export commonly used types
pub use corpus_source::{CorpusSource, CsvCorpusSource};
pub use error::WeatherError;
pub use weather::{
    Coordinates, DEFAULT_OPENWEATHER_URL, FixedWeatherSource, OpenWeatherSource, WeatherReport,
    WeatherSource,
};
