//! Candidate quality scoring.

pub mod quality;

pub use quality::QualityWeights;
