//! Infrastructure layer for concord
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod providers;
pub mod search;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig, FileOutputConfig, FileProvidersConfig};
pub use providers::{
    AdapterSettings, AnthropicAdapter, GeminiAdapter, OpenAiAdapter, ProviderRegistry,
    build_client,
};
pub use search::DuckDuckGoSearch;
