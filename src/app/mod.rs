//! Application layer - orchestration, aggregation and configuration.

pub mod aggregator;
pub mod config;
mod orchestrator;
pub mod tie_resolver;
pub mod voting;

pub use aggregator::{AggregatorKind, ResultAggregator};
pub use config::{Config, LoggingConfig, Parameter, RorParameters};
pub use orchestrator::{Orchestrator, Progress};
pub use tie_resolver::{TieResolver, TieResolverKind};
