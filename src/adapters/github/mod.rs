//! Repository Source Adapters.
//!
//! ## Available Adapters
//!
//! - `GitHubSource` - GitHub REST API (search and repository lookup)
//! - `InMemorySource` - Fixed snapshot list for tests and offline runs

mod github_source;
mod in_memory_source;

pub use github_source::{GitHubSource, GitHubSourceConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
pub use in_memory_source::InMemorySource;
