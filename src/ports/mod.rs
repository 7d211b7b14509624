//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `RepositorySource` - Repository search and lookup on a hosting platform

mod repository_source;

pub use repository_source::{RateLimitInfo, RepositorySource, SourceError};
