//! Core value objects shared by every stage of an orchestration.

pub mod error;
pub mod jurisdiction;
pub mod question;
