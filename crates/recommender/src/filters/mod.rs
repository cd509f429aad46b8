//! Filter implementations used to build pools and pick candidates.

pub mod exclude;
pub mod keyword;

// Re-export for convenience
pub use exclude::ExcludeIdsFilter;
pub use keyword::{KeywordFilter, filter_by_keyword};
