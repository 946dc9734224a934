//! Application layer for concord
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{OrchestrationConfig, RetrievalConfig};
pub use ports::{
    progress::{NoProgress, ProgressNotifier},
    provider::{Completion, GatewayError, ProviderAdapter, complete_within},
    search::{SearchCapability, SearchError, SearchHit},
};
pub use use_cases::dispatch::Dispatcher;
pub use use_cases::orchestrate::{OrchestrateInput, OrchestrateUseCase};
pub use use_cases::retrieve_sources::SourceRetriever;
