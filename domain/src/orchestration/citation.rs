//! Citation formatting

use crate::source::SourceReference;

/// Heading that introduces the numbered source legend.
pub const SOURCES_HEADING: &str = "**Sources:**";

/// Append a numbered source legend to the winning content.
///
/// The content is returned unchanged when there are no sources. No
/// citation markers are inserted into the body; backends are prompted to
/// reference `[1]`, `[2]`, ... themselves.
pub fn format_with_citations(content: &str, sources: &[SourceReference]) -> String {
    if sources.is_empty() {
        return content.to_string();
    }

    let mut output = String::with_capacity(content.len() + sources.len() * 64);
    output.push_str(content);
    output.push_str("\n\n");
    output.push_str(SOURCES_HEADING);
    output.push('\n');
    for (i, source) in sources.iter().enumerate() {
        output.push_str(&format!("[{}] {} - {}\n", i + 1, source.title, source.url));
    }
    output
}
