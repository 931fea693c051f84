//! Sentiment scoring through an optional external collaborator.
//!
//! The score is advisory telemetry. It feeds the session mood and the logs,
//! never the intent or the response choice. Any failure, including a timeout,
//! degrades to [`SentimentScore::neutral`].

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::error::AppError;

/// Polarity reported by the scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    fn parse(label: &str) -> Self {
        match label.to_ascii_uppercase().as_str() {
            "POSITIVE" | "POS" | "LABEL_2" => SentimentLabel::Positive,
            "NEGATIVE" | "NEG" | "LABEL_0" => SentimentLabel::Negative,
            _ => SentimentLabel::Neutral,
        }
    }
}

/// A label with its confidence in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub label: SentimentLabel,
    pub score: f32,
}

impl SentimentScore {
    /// Fallback used whenever the collaborator is unavailable.
    pub fn neutral() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            score: 0.5,
        }
    }
}

/// Capability interface for a sentiment backend.
#[async_trait]
pub trait SentimentScorer: Send + Sync + 'static {
    async fn score(&self, text: &str) -> Result<SentimentScore, AppError>;

    /// `false` for a backend that was never set up; it is then not consulted at all.
    fn is_configured(&self) -> bool {
        true
    }
}

/// Scorer used when no backend is configured. Always fails, so callers get the neutral fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledSentiment;

#[async_trait]
impl SentimentScorer for DisabledSentiment {
    async fn score(&self, _text: &str) -> Result<SentimentScore, AppError> {
        Err(AppError::Sentiment("sentiment scoring is disabled".to_string()))
    }

    fn is_configured(&self) -> bool {
        false
    }
}

/// One `{label, score}` entry of a text-classification response.
#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

/// Inference endpoints return either `[{..}]` or `[[{..}]]`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassificationPayload {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl ClassificationPayload {
    fn into_best(self) -> Option<LabelScore> {
        let candidates = match self {
            ClassificationPayload::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
            ClassificationPayload::Flat(items) => items,
        };
        candidates
            .into_iter()
            .filter(|c| c.score.is_finite())
            .max_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal))
    }
}

/// Scorer backed by a text-classification HTTP endpoint.
///
/// Sends `{"inputs": "<text>"}` and keeps the highest-scoring label.
pub struct HttpSentimentScorer {
    client: Client,
    endpoint: String,
}

impl HttpSentimentScorer {
    /// Creates a scorer for `endpoint`, optionally authenticated with a bearer token.
    ///
    /// The HTTP client carries its own `request_timeout`; callers should still wrap
    /// calls in [`score_or_neutral`].
    pub fn new(
        endpoint: impl Into<String>,
        auth_token: Option<&str>,
        request_timeout: Duration,
    ) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = auth_token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| AppError::Config(format!("Invalid sentiment token: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(request_timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build sentiment client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl SentimentScorer for HttpSentimentScorer {
    async fn score(&self, text: &str) -> Result<SentimentScore, AppError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "inputs": text }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Sentiment(format!(
                "endpoint responded with status {}",
                status
            )));
        }

        let payload: ClassificationPayload = response.json().await?;
        let best = payload
            .into_best()
            .ok_or_else(|| AppError::Sentiment("empty classification payload".to_string()))?;

        Ok(SentimentScore {
            label: SentimentLabel::parse(&best.label),
            score: best.score.clamp(0.0, 1.0),
        })
    }
}

/// Asks `scorer` for a score within `limit`, returning the neutral fallback on any failure.
pub async fn score_or_neutral(
    scorer: &dyn SentimentScorer,
    text: &str,
    limit: Duration,
) -> SentimentScore {
    if !scorer.is_configured() {
        return SentimentScore::neutral();
    }
    match timeout(limit, scorer.score(text)).await {
        Ok(Ok(score)) => {
            debug!(label = ?score.label, score = score.score, "sentiment scored");
            score
        }
        Ok(Err(e)) => {
            warn!("Sentiment unavailable, using neutral score: {}", e);
            SentimentScore::neutral()
        }
        Err(_) => {
            warn!("Sentiment timed out after {:?}, using neutral score", limit);
            SentimentScore::neutral()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SlowScorer;

    #[async_trait]
    impl SentimentScorer for SlowScorer {
        async fn score(&self, _text: &str) -> Result<SentimentScore, AppError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(SentimentScore {
                label: SentimentLabel::Negative,
                score: 0.9,
            })
        }
    }

    #[test]
    fn test_label_parsing() {
        assert_eq!(SentimentLabel::parse("POSITIVE"), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::parse("negative"), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::parse("LABEL_1"), SentimentLabel::Neutral);
    }

    #[test]
    fn test_payload_shapes() {
        let flat: ClassificationPayload =
            serde_json::from_str(r#"[{"label":"NEGATIVE","score":0.2},{"label":"POSITIVE","score":0.8}]"#)
                .unwrap();
        assert_eq!(flat.into_best().unwrap().label, "POSITIVE");

        let nested: ClassificationPayload =
            serde_json::from_str(r#"[[{"label":"NEGATIVE","score":0.97},{"label":"POSITIVE","score":0.03}]]"#)
                .unwrap();
        assert_eq!(nested.into_best().unwrap().label, "NEGATIVE");

        let empty: ClassificationPayload = serde_json::from_str("[]").unwrap();
        assert!(empty.into_best().is_none());
    }

    #[tokio::test]
    async fn test_disabled_scorer_falls_back() {
        let score = score_or_neutral(&DisabledSentiment, "anything", Duration::from_millis(50)).await;
        assert_eq!(score, SentimentScore::neutral());
    }

    #[tokio::test]
    async fn test_unconfigured_scorer_is_not_called() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        struct Unconfigured(AtomicUsize);

        #[async_trait]
        impl SentimentScorer for Unconfigured {
            async fn score(&self, _text: &str) -> Result<SentimentScore, AppError> {
                self.0.fetch_add(1, Ordering::SeqCst);
                Err(AppError::Sentiment("not set up".to_string()))
            }

            fn is_configured(&self) -> bool {
                false
            }
        }

        let scorer = Unconfigured(AtomicUsize::new(0));
        let score = score_or_neutral(&scorer, "anything", Duration::from_millis(50)).await;
        assert_eq!(score, SentimentScore::neutral());
        assert_eq!(scorer.0.load(Ordering::SeqCst), 0);
        assert!(!DisabledSentiment.is_configured());
    }

    #[tokio::test]
    async fn test_timeout_falls_back() {
        let score = score_or_neutral(&SlowScorer, "anything", Duration::from_millis(100)).await;
        assert_eq!(score, SentimentScore::neutral());
    }
}
