//! Authoritative sources: references, the jurisdiction domain table and
//! retrieval caps.

pub mod limits;
pub mod reference;
pub mod trusted_domains;

pub use limits::RetrievalLimits;
pub use reference::{OFFICIAL_RELEVANCE, SourceCategory, SourceReference};
pub use trusted_domains::TrustedDomains;
