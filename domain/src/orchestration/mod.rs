//! Final assembly of an orchestrated answer: citation legend, fallback
//! candidate and the caller-facing result.

pub mod citation;
pub mod fallback;
pub mod result;
pub mod stage;

pub use citation::{SOURCES_HEADING, format_with_citations};
pub use fallback::{FALLBACK_PROVIDER, FallbackPolicy, MAX_FALLBACK_CONFIDENCE};
pub use result::OrchestrationResult;
pub use stage::Stage;
