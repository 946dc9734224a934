//! Use cases (application services)

pub mod dispatch;
pub mod orchestrate;
pub mod retrieve_sources;
