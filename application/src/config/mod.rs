//! Application-level configuration.
//!
//! - [`OrchestrationConfig`]: everything one orchestrated request needs
//!   beyond the adapters themselves (retrieval, scoring, voting, deadline)
//! - [`RetrievalConfig`]: source retrieval switches and caps

pub mod orchestration_config;

pub use orchestration_config::{OrchestrationConfig, RetrievalConfig};
