//! Command-line entry point.
//!
//! With no arguments, searches the configured queries and prints the ranked
//! report as JSON. With `owner/repo` arguments, ranks those repositories
//! against each other instead.

use std::error::Error;
use std::sync::Arc;

use framework_scout::adapters::GitHubSource;
use framework_scout::application::{
    CompareRepositoriesCommand, CompareRepositoriesHandler, RunAnalysisCommand,
    RunAnalysisHandler,
};
use framework_scout::config::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    if !config.github.has_api_key() {
        tracing::warn!("No GitHub token configured; anonymous requests are heavily rate limited");
    }

    let source = Arc::new(GitHubSource::new(config.github.to_source_config())?);
    let repositories: Vec<String> = std::env::args().skip(1).collect();

    let report = if repositories.is_empty() {
        RunAnalysisHandler::new(source)
            .handle(RunAnalysisCommand {
                queries: config.analysis.queries.clone(),
                per_page: config.analysis.per_page,
                config: config.analysis.to_analysis_config(),
            })
            .await?
    } else {
        CompareRepositoriesHandler::new(source)
            .handle(CompareRepositoriesCommand {
                repositories,
                weights: config.analysis.weights,
            })
            .await?
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
