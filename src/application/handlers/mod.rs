//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod analysis;

pub use analysis::{
    prepare_candidates, AnalysisConfig, AnalysisReport, CompareRepositoriesCommand,
    CompareRepositoriesHandler, RunAnalysisCommand, RunAnalysisHandler, DEFAULT_MAX_CANDIDATES,
    DEFAULT_MIN_STARS, MAX_PER_PAGE,
};
