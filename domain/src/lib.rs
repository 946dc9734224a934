//! Domain layer for concord
//!
//! This crate contains the entities, value objects and pure policies of
//! multi-provider answer orchestration. It performs no I/O and has no
//! dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Candidate**: one provider's answer to one request ([`CandidateResponse`])
//! - **Source**: an authoritative snippet retrieved for the request ([`SourceReference`])
//! - **Quality score**: post-hoc usefulness estimate ([`QualityWeights`])
//! - **Vote**: weighted choice of a single winner ([`VoteWeights`])
//! - **Fallback**: degraded answer when no provider succeeded ([`FallbackPolicy`])

pub mod candidate;
pub mod config;
pub mod core;
pub mod orchestration;
pub mod prompt;
pub mod quorum;
pub mod scoring;
pub mod source;
pub mod util;

// Re-export commonly used types
pub use candidate::{CandidateFailure, CandidateResponse, retain_usable};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use crate::core::{
    error::DomainError,
    jurisdiction::{DEFAULT_JURISDICTION, Jurisdiction},
    question::Question,
};
pub use orchestration::{
    FALLBACK_PROVIDER, FallbackPolicy, MAX_FALLBACK_CONFIDENCE, OrchestrationResult,
    SOURCES_HEADING, Stage, format_with_citations,
};
pub use prompt::PromptTemplate;
pub use quorum::{Ballot, VoteWeights};
pub use scoring::QualityWeights;
pub use source::{OFFICIAL_RELEVANCE, RetrievalLimits, SourceCategory, SourceReference, TrustedDomains};
