//! Candidate responses produced by provider adapters.

pub mod failure;
pub mod response;

pub use failure::CandidateFailure;
pub use response::{CandidateResponse, retain_usable};
