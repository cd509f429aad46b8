//! Weather-driven recipe recommendation core.
//!
//! This crate provides:
//! - the weather classifier that turns a reading into keyword buckets
//! - the `Filter` trait with keyword and exclusion filters
//! - `CandidatePool` construction
//! - `SelectionSession`, which serves non-repeating picks from a pool
//!
//! ## Architecture
//! A recommendation runs in stages:
//! 1. The reading is classified into ordered keyword buckets
//! 2. The first bucket with matches becomes the pool (the whole corpus if none match)
//! 3. The session serves picks from the pool, restarting the cycle when it
//!    is used up and falling back to the whole corpus when it cannot offer
//!    anything new
//!
//! Nothing here performs I/O or fails: absence is reported as `None`.
//!
//! ## Example Usage
//! ```ignore
//! use recommender::{SelectionSession, WeatherReading};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let mut session = SelectionSession::start(&corpus, &WeatherReading::new(8, "Rain"));
//! let first = session.pick_initial(&corpus, &mut rng);
//! let next = session.pick_next(&corpus, first.as_ref().map(|p| p.recipe.id.as_str()), &mut rng);
//! ```

pub mod filters;
pub mod pool;
pub mod selector;
pub mod traits;
pub mod weather;

// Re-export main types
pub use filters::{ExcludeIdsFilter, KeywordFilter, filter_by_keyword};
pub use pool::{CandidatePool, build_pool};
pub use selector::{Pick, PickOrigin, SelectionSession};
pub use traits::Filter;
pub use weather::{WeatherCondition, WeatherReading, keyword_buckets};
