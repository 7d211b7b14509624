//! Framework Scout - Fuzzy MADM ranking of open-source repositories
//!
//! This crate ranks candidate repositories (typically web frameworks) with a
//! fuzzy multi-attribute decision-making model over four criteria:
//! popularity, community, maintenance and maturity.
//!
//! - `domain` - fuzzy number algebra, normalization, fuzzification, aggregation
//! - `ports` - the repository source contract
//! - `adapters` - GitHub REST API and in-memory sources
//! - `application` - analysis and comparison handlers
//! - `config` - environment-driven configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
