//! Weather classification.
//!
//! Maps a reading to the ordered keyword buckets used to search the corpus.
//! The thresholds and bucket contents are fixed policy.

use serde::{Deserialize, Serialize};
use std::fmt;

const COLD: &[&str] = &["soup", "stew", "haleem", "baked", "roast"];
const MILD_RAIN: &[&str] = &["curry", "noodle", "ramen", "stir fry"];
const MILD: &[&str] = &["pasta", "mac and cheese", "risotto"];
const WARM_RAIN: &[&str] = &["noodle", "pho", "soup"];
const WARM_CLEAR: &[&str] = &["salad", "ceviche", "cold", "dip"];
const WARM: &[&str] = &["stir fry", "grill", "roast"];

/// Weather condition, as reported by the provider's main label
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCondition {
    Clear,
    Rain,
    /// Any label the classifier has no special case for (e.g. "Clouds")
    Other(String),
}

impl WeatherCondition {
    /// Labels are matched exactly: "Rain" and "Clear", nothing else.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Clear" => WeatherCondition::Clear,
            "Rain" => WeatherCondition::Rain,
            other => WeatherCondition::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Other(label) => label,
        }
    }
}

impl From<&str> for WeatherCondition {
    fn from(label: &str) -> Self {
        WeatherCondition::from_label(label)
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A temperature/condition pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// Whole degrees Celsius
    pub temperature_c: i32,
    pub condition: WeatherCondition,
}

impl WeatherReading {
    pub fn new(temperature_c: i32, condition: impl Into<WeatherCondition>) -> Self {
        Self {
            temperature_c,
            condition: condition.into(),
        }
    }

    /// Keyword buckets for this reading, highest priority first
    pub fn keyword_buckets(&self) -> &'static [&'static str] {
        keyword_buckets(self.temperature_c, &self.condition)
    }
}

/// Classify a reading into keyword buckets, highest priority first.
///
/// Total over every temperature and condition; never returns an empty list.
pub fn keyword_buckets(temperature_c: i32, condition: &WeatherCondition) -> &'static [&'static str] {
    if temperature_c <= 10 {
        return COLD;
    }
    if temperature_c <= 20 {
        return match condition {
            WeatherCondition::Rain => MILD_RAIN,
            _ => MILD,
        };
    }
    match condition {
        WeatherCondition::Rain => WARM_RAIN,
        WeatherCondition::Clear => WARM_CLEAR,
        WeatherCondition::Other(_) => WARM,
    }
}
