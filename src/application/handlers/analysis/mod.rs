//! Analysis command handlers.

mod compare_repositories;
mod run_analysis;

pub use compare_repositories::{CompareRepositoriesCommand, CompareRepositoriesHandler};
pub use run_analysis::{
    prepare_candidates, AnalysisConfig, AnalysisReport, RunAnalysisCommand, RunAnalysisHandler,
    DEFAULT_MAX_CANDIDATES, DEFAULT_MIN_STARS, MAX_PER_PAGE,
};
