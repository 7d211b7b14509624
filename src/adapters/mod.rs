//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `github` - Repository sources (GitHub REST API, in-memory)

pub mod github;

pub use github::{GitHubSource, GitHubSourceConfig, InMemorySource};
