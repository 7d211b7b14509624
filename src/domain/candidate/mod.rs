//! Candidate module - repositories under evaluation.
//!
//! - `RepositorySnapshot` - raw metadata as returned by the hosting platform
//! - `CandidateMetrics` - identity fields plus the four criterion attributes

mod metrics;
mod snapshot;

pub use metrics::{
    CandidateMetrics, COMMUNITY_SATURATION, MAINTENANCE_HORIZON_DAYS, MATURITY_HORIZON_DAYS,
    POPULARITY_SATURATION_STARS,
};
pub use snapshot::RepositorySnapshot;
