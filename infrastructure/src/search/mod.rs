//! Search capabilities for source retrieval

pub mod duckduckgo;

pub use duckduckgo::{DDG_API_URL, DuckDuckGoSearch};
