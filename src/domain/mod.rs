//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (timestamps, errors)
//! - `candidate` - Repository snapshots and the metrics derived from them
//! - `analysis` - Pure Fuzzy MADM scoring and ranking

pub mod analysis;
pub mod candidate;
pub mod foundation;
