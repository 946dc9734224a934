//! Prompt templates for provider calls

use crate::source::SourceReference;

/// Templates for the prompt and system context sent to every provider
pub struct PromptTemplate;

impl PromptTemplate {
    /// Instruction appended to every system context
    pub fn citation_instruction() -> &'static str {
        "IMPORTANT: Provide specific, actionable advice and cite relevant sources with [1], [2] notation."
    }

    /// Caller context augmented with the retrieved sources.
    ///
    /// Sources are numbered in retrieval order so the `[n]` markers a
    /// backend writes line up with the legend appended to the answer.
    pub fn augmented_system_context(context: &str, sources: &[SourceReference]) -> String {
        let mut prompt = context.to_string();

        if !sources.is_empty() {
            prompt.push_str("\n\nOfficial Sources to Reference:\n");
            for (i, source) in sources.iter().enumerate() {
                prompt.push_str(&format!("{}. {} - {}\n", i + 1, source.title, source.snippet));
            }
        }

        prompt.push_str("\n\n");
        prompt.push_str(Self::citation_instruction());
        prompt
    }

    /// Domain-restricted search query
    pub fn site_query(domain: &str, query: &str) -> String {
        format!("site:{} {}", domain, query)
    }

    /// Default system context when the caller supplies none
    pub fn default_system_context(jurisdiction: &str) -> String {
        format!(
            r#"You are an expert advisor on the laws, regulations and official guidance of {}.
Answer accurately and concisely, flag anything that depends on local rules,
and recommend consulting the relevant authority when the answer is uncertain."#,
            jurisdiction
        )
    }
}
