use serde::Deserialize;
use sources::{Coordinates, DEFAULT_OPENWEATHER_URL};
use std::path::PathBuf;

const ENV_PREFIX: &str = "WEATHER_DISH_";

/// Settings read from `WEATHER_DISH_*` environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Recipe CSV file
    #[serde(default = "default_corpus_path")]
    pub corpus_path: PathBuf,

    /// JSON file holding saved recipes, the session and offline accounts
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// OpenWeather API key; placeholder weather without it
    #[serde(default)]
    pub openweather_api_key: Option<String>,

    #[serde(default = "default_openweather_url")]
    pub openweather_url: String,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,

    /// Supabase project URL; accounts stay local without it
    #[serde(default)]
    pub supabase_url: Option<String>,

    #[serde(default)]
    pub supabase_anon_key: Option<String>,
}

fn default_corpus_path() -> PathBuf {
    PathBuf::from("assets/recipe.csv")
}

fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("weather-dish")
        .join("store.json")
}

fn default_openweather_url() -> String {
    DEFAULT_OPENWEATHER_URL.to_string()
}

impl Config {
    /// Load configuration from the environment, after an optional `.env`
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::prefixed(ENV_PREFIX)
            .from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Location for the weather lookup, when both halves are set
    pub fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates {
            latitude: self.latitude?,
            longitude: self.longitude?,
        })
    }

    /// Supabase URL and anon key, when both are set and non-blank
    pub fn supabase(&self) -> Option<(&str, &str)> {
        let url = self.supabase_url.as_deref().filter(|v| !v.trim().is_empty())?;
        let key = self.supabase_anon_key.as_deref().filter(|v| !v.trim().is_empty())?;
        Some((url, key))
    }
}
