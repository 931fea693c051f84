//! Context-Aware Responder - turns one line of user text into one reply.
//!
//! Per call, in order:
//! 1. Record the user turn in bounded history
//! 2. Update exam flag and topic memory from the lowercased text
//! 3. Consult the sentiment collaborator (mood only, neutral on failure)
//! 4. Classify the intent
//! 5. Flag plan requests
//! 6. Draw a template from the intent's bucket with the injected RNG
//! 7. Update usage stats and emit a progress report on schedule

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::debug;

use super::catalog::ResponseCatalog;
use super::context::SessionContext;
use super::stats::{ProgressReport, SessionSummary, UsageStats};
use crate::brain::intent::{Intent, IntentClassifier};
use crate::brain::sentiment::{score_or_neutral, DisabledSentiment, SentimentScorer};
use crate::config::CoachConfig;
use crate::error::AppError;

const PROGRESS_CHANNEL_CAPACITY: usize = 16;

/// Stateful responder for a single session.
///
/// `handle` takes `&mut self`: one call at a time. Share it across tasks
/// through [`crate::actors::coach::CoachHandle`].
pub struct Responder<R: Rng = StdRng> {
    classifier: IntentClassifier,
    catalog: ResponseCatalog,
    context: SessionContext,
    stats: UsageStats,
    sentiment: Arc<dyn SentimentScorer>,
    sentiment_timeout: Duration,
    progress_interval: u64,
    progress_tx: broadcast::Sender<ProgressReport>,
    rng: R,
}

impl Responder<StdRng> {
    /// Builds a responder from configuration: catalog file, sentiment backend, seed.
    pub fn from_config(config: &CoachConfig) -> Result<Self, AppError> {
        let catalog = match &config.catalog_path {
            Some(path) => ResponseCatalog::from_json_file(path)?,
            None => ResponseCatalog::builtin(),
        };
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self::with_rng(catalog, config.build_sentiment()?, rng)
            .with_context(SessionContext::new(
                config.history_capacity,
                config.topic_capacity,
            ))
            .with_sentiment_timeout(config.sentiment_timeout)
            .with_progress_interval(config.progress_interval))
    }
}

impl Default for Responder<StdRng> {
    fn default() -> Self {
        Self::with_rng(
            ResponseCatalog::builtin(),
            Arc::new(DisabledSentiment),
            StdRng::from_entropy(),
        )
    }
}

impl<R: Rng> Responder<R> {
    pub fn with_rng(catalog: ResponseCatalog, sentiment: Arc<dyn SentimentScorer>, rng: R) -> Self {
        let (progress_tx, _) = broadcast::channel(PROGRESS_CHANNEL_CAPACITY);
        Self {
            classifier: IntentClassifier::new(),
            catalog,
            context: SessionContext::default(),
            stats: UsageStats::default(),
            sentiment,
            sentiment_timeout: Duration::from_millis(crate::config::DEFAULT_SENTIMENT_TIMEOUT_MS),
            progress_interval: crate::config::DEFAULT_PROGRESS_INTERVAL,
            progress_tx,
            rng,
        }
    }

    pub fn with_context(mut self, context: SessionContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_sentiment_timeout(mut self, limit: Duration) -> Self {
        self.sentiment_timeout = limit;
        self
    }

    /// Zero is raised to one.
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    pub fn sentiment_timeout(&self) -> Duration {
        self.sentiment_timeout
    }

    /// Receives a [`ProgressReport`] every `progress_interval` responses.
    pub fn subscribe_progress(&self) -> broadcast::Receiver<ProgressReport> {
        self.progress_tx.subscribe()
    }

    pub(crate) fn progress_sender(&self) -> broadcast::Sender<ProgressReport> {
        self.progress_tx.clone()
    }

    /// Produces a reply for `text`. Never fails and never returns an empty string.
    pub async fn handle(&mut self, text: &str) -> String {
        self.context.record_user_turn(text);

        let text_lower = text.to_lowercase();
        self.context.observe(&text_lower);

        let sentiment = score_or_neutral(self.sentiment.as_ref(), text, self.sentiment_timeout).await;
        self.context.set_mood(&sentiment);

        let result = self.classifier.classify_detailed(text);
        debug!(
            intent = %result.intent,
            matched = result.matched_term.as_deref().unwrap_or("-"),
            "intent classified"
        );
        if result.intent == Intent::NeedPlan {
            self.context.mark_needs_study_plan();
        }

        let template = self.catalog.choose(result.intent, &mut self.rng).clone();

        self.stats.record(&template);
        if let Some(report) = self.stats.progress_due(self.progress_interval) {
            debug!(
                total = report.total,
                motivational_pct = report.motivational_pct,
                actionable_pct = report.actionable_pct,
                "{}",
                report
            );
            // No subscribers is fine.
            let _ = self.progress_tx.send(report);
        }

        template.text
    }

    /// Appends the responder's own turn to history.
    pub fn record_reply(&mut self, reply: &str) {
        self.context.record_bot_turn(reply);
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary::new(&self.stats, &self.context)
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn stats(&self) -> &UsageStats {
        &self.stats
    }

    pub fn catalog(&self) -> &ResponseCatalog {
        &self.catalog
    }
}
