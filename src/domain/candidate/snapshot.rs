//! Repository snapshot as reported by the hosting platform.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Raw repository metadata from a search or lookup.
///
/// Field names follow the platform's JSON payload so the record can be
/// deserialized directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorySnapshot {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub open_issues_count: u64,
    pub watchers_count: u64,
    pub updated_at: Timestamp,
    pub created_at: Timestamp,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub default_branch: String,
    pub html_url: String,
}
