//! # Engine Crate
//!
//! Wires the recipe corpus, the weather source, the selector and the stores
//! into the flows the front end drives:
//!
//! - `RecommendationOrchestrator`: one recommendation session (weather,
//!   initial pick, "show another")
//! - `ProfileService`: register, login, logout and saved recipes

pub mod orchestrator;
pub mod profile;

pub use orchestrator::{Recommendation, RecommendationOrchestrator};
pub use profile::ProfileService;
