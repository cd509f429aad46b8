//! Weather sources.
//!
//! A `WeatherSource` always produces a report. Missing location, missing API
//! key and provider failures each map to a fixed default reading so the
//! recommender always has something to classify.

use crate::error::WeatherError;
use async_trait::async_trait;
use recommender::{WeatherCondition, WeatherReading};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

pub const DEFAULT_OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

const FALLBACK_PLACE: &str = "Houston, USA";
const FALLBACK_TEMPERATURE_C: i32 = 32;
const PLACEHOLDER_TEMPERATURE_C: i32 = 30;

/// Weather shown to the user plus the reading handed to the classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherReport {
    pub reading: WeatherReading,
    /// "City, Country" label
    pub place: String,
    /// Human summary such as "12°C, light rain"
    pub summary: String,
    /// True when the reading is a default rather than a live observation
    pub degraded: bool,
}

impl WeatherReport {
    /// No location available: a warm, sunny default
    pub fn location_unavailable() -> Self {
        Self {
            reading: WeatherReading::new(FALLBACK_TEMPERATURE_C, WeatherCondition::Clear),
            place: FALLBACK_PLACE.to_string(),
            summary: format!("{FALLBACK_TEMPERATURE_C}°C, sunny"),
            degraded: true,
        }
    }

    /// Location known but no API key configured
    pub fn placeholder(place: impl Into<String>) -> Self {
        Self {
            reading: WeatherReading::new(PLACEHOLDER_TEMPERATURE_C, WeatherCondition::Clear),
            place: place.into(),
            summary: format!("{PLACEHOLDER_TEMPERATURE_C}°C, clear (placeholder)"),
            degraded: true,
        }
    }

    /// The provider call failed
    pub fn unavailable(place: impl Into<String>) -> Self {
        Self {
            reading: WeatherReading::new(FALLBACK_TEMPERATURE_C, WeatherCondition::Clear),
            place: place.into(),
            summary: "Weather unavailable".to_string(),
            degraded: true,
        }
    }
}

/// Something that can report the current weather.
///
/// Implementations never fail; they degrade to a default report instead.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current(&self) -> WeatherReport;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Returns the same report every time. Used for manual overrides and tests.
#[derive(Debug, Clone)]
pub struct FixedWeatherSource {
    report: WeatherReport,
}

impl FixedWeatherSource {
    pub fn new(report: WeatherReport) -> Self {
        Self { report }
    }

    /// A fixed reading labelled as a manual override
    pub fn from_reading(reading: WeatherReading) -> Self {
        let summary = format!("{}°C, {}", reading.temperature_c, reading.condition);
        Self::new(WeatherReport {
            reading,
            place: "Manual override".to_string(),
            summary,
            degraded: false,
        })
    }
}

#[async_trait]
impl WeatherSource for FixedWeatherSource {
    async fn current(&self) -> WeatherReport {
        self.report.clone()
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// Latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    fn label(&self) -> String {
        format!("{:.2}, {:.2}", self.latitude, self.longitude)
    }
}

/// OpenWeather "current weather" client
#[derive(Debug, Clone)]
pub struct OpenWeatherSource {
    http_client: HttpClient,
    api_url: String,
    api_key: Option<String>,
    coordinates: Option<Coordinates>,
}

impl OpenWeatherSource {
    pub fn new(coordinates: Option<Coordinates>, api_key: Option<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url: DEFAULT_OPENWEATHER_URL.to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            coordinates,
        }
    }

    /// Point the client at another endpoint (proxies, test servers)
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    #[instrument(skip(self, api_key))]
    async fn fetch(
        &self,
        coordinates: Coordinates,
        api_key: &str,
    ) -> Result<WeatherReport, WeatherError> {
        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[
                ("lat", coordinates.latitude.to_string()),
                ("lon", coordinates.longitude.to_string()),
                ("units", "metric".to_string()),
                ("appid", api_key.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status.as_u16()));
        }

        let body: OpenWeatherResponse = response.json().await?;
        body.into_report()
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherSource {
    async fn current(&self) -> WeatherReport {
        let Some(coordinates) = self.coordinates else {
            debug!("No coordinates configured, using the default location");
            return WeatherReport::location_unavailable();
        };

        let Some(api_key) = self.api_key.as_deref() else {
            debug!("No OpenWeather API key configured, using placeholder weather");
            return WeatherReport::placeholder(coordinates.label());
        };

        match self.fetch(coordinates, api_key).await {
            Ok(report) => report,
            Err(e) => {
                warn!(error = %e, "Weather lookup failed, using default reading");
                WeatherReport::unavailable(coordinates.label())
            }
        }
    }

    fn name(&self) -> &'static str {
        "openweather"
    }
}

#[derive(Debug, Deserialize)]
struct OpenWeatherResponse {
    main: MainBlock,
    #[serde(default)]
    weather: Vec<ConditionBlock>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    sys: Option<SysBlock>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    main: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct SysBlock {
    #[serde(default)]
    country: Option<String>,
}

impl OpenWeatherResponse {
    fn into_report(self) -> Result<WeatherReport, WeatherError> {
        if !self.main.temp.is_finite() {
            return Err(WeatherError::InvalidResponse(format!(
                "temperature {}",
                self.main.temp
            )));
        }
        let temperature_c = round_half_up(self.main.temp);

        let (label, description) = match self.weather.into_iter().next() {
            Some(block) => (block.main, block.description),
            None => ("Clear".to_string(), String::new()),
        };

        let city = self
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "Unknown".to_string());
        let place = match self.sys.and_then(|sys| sys.country) {
            Some(country) if !country.is_empty() => format!("{city}, {country}"),
            _ => city,
        };

        Ok(WeatherReport {
            reading: WeatherReading::new(temperature_c, label.as_str()),
            place,
            summary: format!("{temperature_c}°C, {description}"),
            degraded: false,
        })
    }
}

/// Round to the nearest degree, halves rounding up (-2.5 becomes -2)
fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}
