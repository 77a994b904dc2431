//! Analysis pipeline and the session a front-end drives.
//!
//! The pipeline is Rule Evaluator -> Tier Analyzer -> Forecast Templater ->
//! aggregation, strictly sequential. The session holds the current record and
//! its advisory transcript, and publishes which action is in flight.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, instrument};

use crate::domain::errors::{DomainError, DomainResult, IntegrationResult};
use crate::domain::models::{AnalysisRecord, ForecastTemplates, Transcript};
use crate::domain::ports::{AnalysisRepository, ReasoningService, SavedAnalysis};
use crate::services::advisor::AdvisoryResponder;
use crate::services::aggregator;
use crate::services::competitor_research::{CompetitorResearch, CompetitorResearcher};
use crate::services::forecast::ForecastTemplater;
use crate::services::rule_evaluator::RuleEvaluator;
use crate::services::tier_analyzer::TierAnalyzer;

/// The three-stage analysis pipeline.
pub struct AnalysisPipeline {
    rules: RuleEvaluator,
    analyzer: TierAnalyzer,
    templater: ForecastTemplater,
}

impl AnalysisPipeline {
    /// Pipeline sharing one reasoning backend across its stages.
    pub fn new(reasoning: Arc<dyn ReasoningService>, templates: ForecastTemplates) -> Self {
        Self {
            rules: RuleEvaluator::new(reasoning.clone()),
            analyzer: TierAnalyzer::new(reasoning),
            templater: ForecastTemplater::new(templates),
        }
    }

    /// Produce a complete record, or fail without producing anything.
    ///
    /// `idea` must already be trimmed and non-empty.
    #[instrument(skip_all)]
    pub async fn run<R: Rng + Send + ?Sized>(
        &self,
        idea: &str,
        rng: &mut R,
    ) -> IntegrationResult<AnalysisRecord> {
        let evaluation = self.rules.evaluate(idea).await?;
        let detailed = self.analyzer.request(idea, &evaluation).await?;

        let analysis = TierAnalyzer::finalize(detailed, evaluation.score_range, rng);
        let forecast = self.templater.forecast(evaluation.tier, rng);

        Ok(aggregator::assemble(idea, evaluation, analysis, forecast))
    }
}

/// Action currently outstanding on a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// Running the analysis pipeline
    Analyzing,
    /// Persisting the record
    Saving,
    /// Waiting for an advisor reply
    Chatting,
    /// Refreshing competitors
    Researching,
}

impl PendingAction {
    /// Lowercase name, for logs and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Analyzing => "analyzing",
            Self::Saving => "saving",
            Self::Chatting => "chatting",
            Self::Researching => "researching",
        }
    }
}

/// Clears the published pending action when the operation ends, including
/// when its future is dropped.
struct PendingGuard(Arc<watch::Sender<Option<PendingAction>>>);

impl PendingGuard {
    fn begin(sender: &Arc<watch::Sender<Option<PendingAction>>>, action: PendingAction) -> Self {
        sender.send_replace(Some(action));
        Self(sender.clone())
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.send_replace(None);
    }
}

/// One founder's working session.
///
/// Every operation that reaches an external service takes `&mut self`, so
/// at most one call is in flight per session. `subscribe` lets another task
/// (a spinner, a UI) watch which one.
pub struct AnalyzerSession {
    pipeline: AnalysisPipeline,
    advisor: AdvisoryResponder,
    researcher: CompetitorResearcher,
    repository: Arc<dyn AnalysisRepository>,
    rng: StdRng,
    record: Option<AnalysisRecord>,
    transcript: Transcript,
    pending: Arc<watch::Sender<Option<PendingAction>>>,
}

impl AnalyzerSession {
    /// Session seeded from OS entropy.
    pub fn new(
        reasoning: Arc<dyn ReasoningService>,
        repository: Arc<dyn AnalysisRepository>,
        templates: ForecastTemplates,
    ) -> Self {
        Self::with_rng(reasoning, repository, templates, StdRng::from_entropy())
    }

    /// Session with a caller-supplied random source.
    pub fn with_rng(
        reasoning: Arc<dyn ReasoningService>,
        repository: Arc<dyn AnalysisRepository>,
        templates: ForecastTemplates,
        rng: StdRng,
    ) -> Self {
        let (pending, _) = watch::channel(None);
        Self {
            pipeline: AnalysisPipeline::new(reasoning.clone(), templates),
            advisor: AdvisoryResponder::new(reasoning.clone()),
            researcher: CompetitorResearcher::new(reasoning),
            repository,
            rng,
            record: None,
            transcript: Transcript::new(),
            pending: Arc::new(pending),
        }
    }

    /// Resume a session on an existing record with a fresh transcript.
    pub fn resume(&mut self, record: AnalysisRecord) {
        self.record = Some(record);
        self.transcript = Transcript::with_greeting();
    }

    /// Current record, if an analysis has completed.
    pub fn record(&self) -> Option<&AnalysisRecord> {
        self.record.as_ref()
    }

    /// Advisory chat on the current record.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Action in flight, if any.
    pub fn pending(&self) -> Option<PendingAction> {
        *self.pending.borrow()
    }

    /// Receiver that sees every pending-action change.
    pub fn subscribe(&self) -> watch::Receiver<Option<PendingAction>> {
        self.pending.subscribe()
    }

    /// Run the full pipeline on `text`.
    ///
    /// On success the new record replaces the current one and the chat starts
    /// over. On failure the session is left exactly as it was.
    pub async fn analyze_idea(&mut self, text: &str) -> DomainResult<&AnalysisRecord> {
        let idea = text.trim();
        if idea.is_empty() {
            return Err(DomainError::InvalidInput(
                "idea description must not be empty".to_string(),
            ));
        }

        let record = {
            let _pending = PendingGuard::begin(&self.pending, PendingAction::Analyzing);
            self.pipeline.run(idea, &mut self.rng).await?
        };

        info!(
            tier = %record.tier_classification,
            score = record.success_score,
            "analysis complete"
        );

        self.transcript = Transcript::with_greeting();
        Ok(self.record.insert(record))
    }

    /// Ask the advisor about the current record.
    ///
    /// `None` when there is no record or the message is blank.
    pub async fn send_chat_message(&mut self, text: &str) -> Option<String> {
        let record = self.record.as_ref()?;
        if text.trim().is_empty() {
            return None;
        }
        let _pending = PendingGuard::begin(&self.pending, PendingAction::Chatting);
        self.advisor.respond(record, &mut self.transcript, text).await
    }

    /// Persist the current record. `Ok(None)` when there is nothing to save.
    pub async fn save_analysis(&mut self) -> DomainResult<Option<SavedAnalysis>> {
        let Some(record) = self.record.as_ref() else {
            return Ok(None);
        };
        let _pending = PendingGuard::begin(&self.pending, PendingAction::Saving);
        let saved = self.repository.save(record).await?;
        info!(id = %saved.id, "analysis saved");
        Ok(Some(saved))
    }

    /// Re-run competitor research and swap the record for a copy carrying the
    /// new list. `Ok(None)` when there is no record.
    pub async fn refresh_competitors(&mut self) -> DomainResult<Option<CompetitorResearch>> {
        let Some(record) = self.record.as_ref() else {
            return Ok(None);
        };

        let research = {
            let _pending = PendingGuard::begin(&self.pending, PendingAction::Researching);
            self.researcher.research(&record.idea_description).await?
        };

        self.record = Some(record.with_competitors(research.competitors.clone()));
        Ok(Some(research))
    }

    /// Discard the current record and transcript.
    pub fn reset_analysis(&mut self) {
        self.record = None;
        self.transcript = Transcript::new();
    }
}
