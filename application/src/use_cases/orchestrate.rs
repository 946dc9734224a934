//! Orchestrate use case
//!
//! The single entry point: retrieve sources, fan out to every provider,
//! score and vote, and return one cited answer. Always produces a result;
//! when no provider succeeds the fallback answers instead.

use crate::config::OrchestrationConfig;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::provider::ProviderAdapter;
use crate::ports::search::SearchCapability;
use crate::use_cases::dispatch::Dispatcher;
use crate::use_cases::retrieve_sources::SourceRetriever;
use chrono::Utc;
use concord_domain::{
    CandidateResponse, Jurisdiction, OrchestrationResult, PromptTemplate, SourceReference, Stage,
    format_with_citations, retain_usable,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Input for the Orchestrate use case
#[derive(Debug, Clone)]
pub struct OrchestrateInput {
    /// The question, passed verbatim to search and providers
    pub question: String,
    pub jurisdiction: Jurisdiction,
    /// Caller-supplied system context; empty selects the default
    pub system_context: String,
}

impl OrchestrateInput {
    pub fn new(question: impl Into<String>, jurisdiction: Jurisdiction) -> Self {
        Self {
            question: question.into(),
            jurisdiction,
            system_context: String::new(),
        }
    }

    pub fn with_system_context(mut self, context: impl Into<String>) -> Self {
        self.system_context = context.into();
        self
    }
}

/// Use case for answering one question through the provider quorum
pub struct OrchestrateUseCase {
    retriever: SourceRetriever,
    dispatcher: Dispatcher,
    config: OrchestrationConfig,
}

impl OrchestrateUseCase {
    pub fn new(
        adapters: Vec<Arc<dyn ProviderAdapter>>,
        search: Option<Arc<dyn SearchCapability>>,
        config: OrchestrationConfig,
    ) -> Self {
        Self {
            retriever: SourceRetriever::new(search, config.retrieval.clone()),
            dispatcher: Dispatcher::new(adapters).with_deadline(config.request_deadline),
            config,
        }
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.dispatcher = self.dispatcher.with_cancellation(token);
        self
    }

    pub fn provider_count(&self) -> usize {
        self.dispatcher.adapter_count()
    }

    /// Convenience entry point taking the raw request fields.
    ///
    /// An empty or unparsable jurisdiction tag falls back to the
    /// configured default jurisdiction.
    pub async fn orchestrate(
        &self,
        query: &str,
        jurisdiction: &str,
        system_context: &str,
    ) -> OrchestrationResult {
        let jurisdiction = Jurisdiction::parse_or(jurisdiction, &self.config.default_jurisdiction);
        let input = OrchestrateInput::new(query, jurisdiction).with_system_context(system_context);
        self.execute(input).await
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: OrchestrateInput) -> OrchestrationResult {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: OrchestrateInput,
        progress: &dyn ProgressNotifier,
    ) -> OrchestrationResult {
        info!(
            jurisdiction = %input.jurisdiction,
            providers = self.dispatcher.adapter_count(),
            "Starting orchestration"
        );

        // Stage 1: Retrieval
        progress.on_stage_start(Stage::Retrieval, self.retriever.planned_queries(&input.jurisdiction));
        let sources = self
            .retriever
            .retrieve(&input.question, &input.jurisdiction)
            .await;
        progress.on_stage_complete(Stage::Retrieval);

        // Stage 2: Dispatch
        let system_context = self.system_context(&input, &sources);
        progress.on_stage_start(Stage::Dispatch, self.dispatcher.adapter_count());
        let candidates = retain_usable(
            self.dispatcher
                .dispatch_all(&input.question, &system_context, progress)
                .await,
        );
        progress.on_stage_complete(Stage::Dispatch);

        // Stage 3: Selection
        progress.on_stage_start(Stage::Selection, candidates.len());
        let result = self.select(&input, candidates, sources);
        progress.on_stage_complete(Stage::Selection);

        info!(
            provider = %result.provider_used,
            confidence = result.confidence_score,
            candidates = result.candidate_count,
            "Orchestration complete"
        );
        result
    }

    fn system_context(&self, input: &OrchestrateInput, sources: &[SourceReference]) -> String {
        let base = if input.system_context.trim().is_empty() {
            PromptTemplate::default_system_context(input.jurisdiction.code())
        } else {
            input.system_context.clone()
        };
        PromptTemplate::augmented_system_context(&base, sources)
    }

    /// Score every usable candidate, pick the winner and format the answer.
    fn select(
        &self,
        input: &OrchestrateInput,
        mut candidates: Vec<CandidateResponse>,
        sources: Vec<SourceReference>,
    ) -> OrchestrationResult {
        let candidate_count = candidates.len();
        let total_tokens: u64 = candidates.iter().map(|c| c.token_count).sum();

        for candidate in &mut candidates {
            let score = self.config.quality.score(candidate, &sources);
            candidate.record_quality_score(score);
            debug!(provider = %candidate.provider_id, quality = score, "Scored candidate");
        }

        let winner = match self.config.vote.select(&candidates) {
            Some(index) => candidates.swap_remove(index),
            None => {
                info!("No usable candidates, using fallback");
                self.config
                    .fallback
                    .candidate(&input.question, &input.jurisdiction)
            }
        };

        OrchestrationResult {
            final_text: format_with_citations(&winner.content, &sources),
            provider_used: winner.provider_id.clone(),
            confidence_score: winner.quality(),
            latency: winner.latency,
            sources,
            candidate_count,
            total_tokens,
            jurisdiction: input.jurisdiction.clone(),
            generated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetrievalConfig;
    use crate::ports::search::{SearchError, SearchHit};
    use crate::use_cases::dispatch::tests::{Behavior, ScriptedAdapter};
    use async_trait::async_trait;
    use concord_domain::{CandidateFailure, FALLBACK_PROVIDER, SOURCES_HEADING};
    use std::sync::Mutex;
    use std::time::Duration;

    struct StaticSearch {
        result: Result<Vec<SearchHit>, SearchError>,
    }

    #[async_trait]
    impl SearchCapability for StaticSearch {
        async fn search(&self, _query: &str, limit: usize) -> Result<Vec<SearchHit>, SearchError> {
            self.result
                .clone()
                .map(|hits| hits.into_iter().take(limit).collect())
        }
    }

    fn search_with(hits: usize) -> Option<Arc<dyn SearchCapability>> {
        let hits = (0..hits)
            .map(|i| SearchHit::new(format!("Guide {}", i + 1), format!("https://gov/{}", i + 1), "s"))
            .collect();
        Some(Arc::new(StaticSearch { result: Ok(hits) }))
    }

    fn unavailable_search() -> Option<Arc<dyn SearchCapability>> {
        Some(Arc::new(StaticSearch {
            result: Err(SearchError::Unavailable("offline".into())),
        }))
    }

    fn words(n: usize) -> &'static str {
        Box::leak(vec!["word"; n].join(" ").into_boxed_str())
    }

    #[tokio::test]
    async fn test_single_provider_with_sources() {
        let use_case = OrchestrateUseCase::new(
            vec![ScriptedAdapter::new("openai/gpt-4", Behavior::Reply(words(120), 0.85)).shared()],
            search_with(1),
            OrchestrationConfig::default(),
        );

        let result = use_case.orchestrate("annual leave", "SG", "").await;

        assert_eq!(result.provider_used, "openai/gpt-4");
        assert_eq!(result.candidate_count, 1);
        // 3 domains x 1 hit
        assert_eq!(result.sources.len(), 3);
        assert!(result.final_text.contains(SOURCES_HEADING));
        assert!(result.final_text.contains("[1] Guide 1 - https://gov/1"));
        assert!(result.confidence_score > 0.0 && result.confidence_score <= 1.0);
        assert!(!result.is_fallback());
    }

    #[tokio::test]
    async fn test_all_providers_fail_uses_fallback() {
        let use_case = OrchestrateUseCase::new(
            vec![
                ScriptedAdapter::new("a", Behavior::Fail(CandidateFailure::Request("500".into())))
                    .shared(),
                ScriptedAdapter::new("b", Behavior::Panic).shared(),
            ],
            search_with(0),
            OrchestrationConfig::default(),
        );

        let result = use_case.orchestrate("Is overtime paid?", "UK", "").await;

        assert_eq!(result.provider_used, FALLBACK_PROVIDER);
        assert_eq!(result.confidence_score, 0.3);
        assert_eq!(result.candidate_count, 0);
        assert_eq!(result.total_tokens, 0);
        assert!(result.final_text.starts_with("Guidance for UK: Is overtime paid."));
        assert!(result.sources.is_empty());
        assert!(!result.final_text.contains(SOURCES_HEADING));
    }

    #[tokio::test]
    async fn test_no_providers_uses_fallback_with_placeholder_source() {
        let use_case =
            OrchestrateUseCase::new(vec![], unavailable_search(), OrchestrationConfig::default());

        let result = use_case.orchestrate("sick leave", "AU", "").await;

        assert!(result.is_fallback());
        assert_eq!(result.sources.len(), 1);
        assert!(
            result
                .final_text
                .contains("[1] Official guidelines for sick leave - https://example-gov.com/guidelines")
        );
    }

    #[tokio::test]
    async fn test_token_total_covers_every_usable_candidate() {
        let use_case = OrchestrateUseCase::new(
            vec![
                ScriptedAdapter::new("a", Behavior::Reply(words(10), 0.8)).shared(),
                ScriptedAdapter::new("b", Behavior::Reply(words(20), 0.8)).shared(),
                ScriptedAdapter::new("c", Behavior::Fail(CandidateFailure::Cancelled)).shared(),
            ],
            None,
            OrchestrationConfig::default().with_retrieval(RetrievalConfig::disabled()),
        );

        let result = use_case.orchestrate("q", "US", "").await;

        assert_eq!(result.candidate_count, 2);
        // 10 * 1.3 + 20 * 1.3
        assert_eq!(result.total_tokens, 13 + 26);
    }

    #[tokio::test]
    async fn test_higher_vote_wins() {
        // Same latency; "b" has an ideal length and higher confidence
        let use_case = OrchestrateUseCase::new(
            vec![
                ScriptedAdapter::new("a", Behavior::Reply(words(30), 0.80)).shared(),
                ScriptedAdapter::new("b", Behavior::Reply(words(150), 0.88)).shared(),
            ],
            None,
            OrchestrationConfig::default().with_retrieval(RetrievalConfig::disabled()),
        );

        let result = use_case.orchestrate("q", "US", "").await;
        assert_eq!(result.provider_used, "b");
    }

    #[tokio::test]
    async fn test_equal_votes_keep_first_registered() {
        let use_case = OrchestrateUseCase::new(
            vec![
                ScriptedAdapter::new("first", Behavior::Reply(words(150), 0.85)).shared(),
                ScriptedAdapter::new("second", Behavior::Reply(words(150), 0.85)).shared(),
            ],
            None,
            OrchestrationConfig::default().with_retrieval(RetrievalConfig::disabled()),
        );

        let result = use_case.orchestrate("q", "US", "").await;
        assert_eq!(result.provider_used, "first");
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_drops_hung_provider() {
        let use_case = OrchestrateUseCase::new(
            vec![
                ScriptedAdapter::new("hung", Behavior::Hang).shared(),
                ScriptedAdapter::new("ok", Behavior::Reply(words(100), 0.85))
                    .after(Duration::from_secs(2))
                    .shared(),
            ],
            None,
            OrchestrationConfig::default()
                .with_retrieval(RetrievalConfig::disabled())
                .with_request_deadline(Some(Duration::from_secs(10))),
        );

        let result = use_case.orchestrate("q", "US", "").await;
        assert_eq!(result.provider_used, "ok");
        assert_eq!(result.candidate_count, 1);
        assert_eq!(result.latency, Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_cancelled_request_falls_back() {
        let token = CancellationToken::new();
        let use_case = OrchestrateUseCase::new(
            vec![ScriptedAdapter::new("hung", Behavior::Hang).shared()],
            None,
            OrchestrationConfig::default().with_retrieval(RetrievalConfig::disabled()),
        )
        .with_cancellation(token.clone());

        token.cancel();
        let result = use_case.orchestrate("q", "US", "").await;
        assert!(result.is_fallback());
    }

    #[tokio::test]
    async fn test_invalid_jurisdiction_uses_default() {
        let use_case = OrchestrateUseCase::new(
            vec![],
            None,
            OrchestrationConfig::default().with_retrieval(RetrievalConfig::disabled()),
        );

        let result = use_case.orchestrate("q", "!!", "").await;
        assert_eq!(result.jurisdiction.code(), "US");
    }

    #[tokio::test]
    async fn test_missing_jurisdiction_uses_configured_default() {
        let sg = Jurisdiction::new("SG").unwrap();
        let use_case = OrchestrateUseCase::new(
            vec![],
            None,
            OrchestrationConfig::default()
                .with_retrieval(RetrievalConfig::disabled())
                .with_default_jurisdiction(sg),
        );

        let result = use_case.orchestrate("annual leave", "", "").await;
        assert_eq!(result.jurisdiction.code(), "SG");
        assert!(result.final_text.starts_with("Guidance for SG: annual leave."));

        let result = use_case.orchestrate("annual leave", "jp", "").await;
        assert_eq!(result.jurisdiction.code(), "JP");
    }

    #[tokio::test]
    async fn test_ideal_length_candidate_wins_over_long_one() {
        // 120 words earns the full length bonus, 600 words only the partial one
        let adapters = || {
            vec![
                ScriptedAdapter::new("long", Behavior::Reply(words(600), 0.85)).shared(),
                ScriptedAdapter::new("down", Behavior::Fail(CandidateFailure::Request("502".into())))
                    .shared(),
                ScriptedAdapter::new("ideal", Behavior::Reply(words(120), 0.85)).shared(),
            ]
        };
        let config = || OrchestrationConfig::default().with_retrieval(RetrievalConfig::disabled());

        let result = OrchestrateUseCase::new(adapters(), None, config())
            .orchestrate("q", "US", "")
            .await;
        assert_eq!(result.candidate_count, 2);
        assert_eq!(result.provider_used, "ideal");
        // 0.4 * 0.85 + 0.2 (length) + 0.05 (sub-second latency)
        assert!((result.confidence_score - 0.59).abs() < 1e-9);

        let long_only: Vec<_> = adapters().into_iter().take(2).collect();
        let result = OrchestrateUseCase::new(long_only, None, config())
            .orchestrate("q", "US", "")
            .await;
        assert_eq!(result.candidate_count, 1);
        assert_eq!(result.provider_used, "long");
        // 0.4 * 0.85 + 0.1 (length) + 0.05 (sub-second latency)
        assert!((result.confidence_score - 0.49).abs() < 1e-9);
    }

    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl ProgressNotifier for RecordingProgress {
        fn on_stage_start(&self, stage: Stage, total: usize) {
            self.events.lock().unwrap().push(format!("start {} {}", stage, total));
        }

        fn on_provider_complete(&self, provider_id: &str, failure: Option<&CandidateFailure>) {
            self.events
                .lock()
                .unwrap()
                .push(format!("provider {} {}", provider_id, failure.is_none()));
        }

        fn on_stage_complete(&self, stage: Stage) {
            self.events.lock().unwrap().push(format!("end {}", stage));
        }
    }

    #[tokio::test]
    async fn test_progress_events_in_stage_order() {
        let use_case = OrchestrateUseCase::new(
            vec![ScriptedAdapter::new("a", Behavior::Reply(words(50), 0.8)).shared()],
            search_with(1),
            OrchestrationConfig::default(),
        );
        let progress = RecordingProgress {
            events: Mutex::new(Vec::new()),
        };

        use_case
            .execute_with_progress(OrchestrateInput::new("q", Jurisdiction::default()), &progress)
            .await;

        let events = progress.events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                "start retrieval 3",
                "end retrieval",
                "start dispatch 1",
                "provider a true",
                "end dispatch",
                "start selection 1",
                "end selection",
            ]
        );
    }

    #[tokio::test]
    async fn test_custom_system_context_is_augmented() {
        struct EchoContext;

        #[async_trait]
        impl ProviderAdapter for EchoContext {
            fn provider_id(&self) -> &str {
                "echo"
            }

            async fn generate(&self, _prompt: &str, system_context: &str) -> CandidateResponse {
                CandidateResponse::success("echo", system_context, 0.8, Duration::from_millis(5))
            }
        }

        let use_case = OrchestrateUseCase::new(
            vec![Arc::new(EchoContext)],
            search_with(1),
            OrchestrationConfig::default(),
        );

        let result = use_case
            .orchestrate("q", "SG", "You are a payroll specialist.")
            .await;

        assert!(result.final_text.starts_with("You are a payroll specialist."));
        assert!(result.final_text.contains("Official Sources to Reference:\n1. Guide 1 - s\n"));
        assert!(result.final_text.contains(PromptTemplate::citation_instruction()));
    }
}
