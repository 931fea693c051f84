//! Actor System Tests
//!
//! Tests for the coach actor: request/reply, serialization of concurrent
//! callers, progress fan-out and shutdown.

use crate::actors::messages::AppError;
use crate::actors::CoachHandle;
use crate::brain::intent::Intent;
use crate::brain::sentiment::{DisabledSentiment, SentimentScore, SentimentScorer};
use crate::coach::catalog::ResponseCatalog;
use crate::coach::responder::Responder;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::time::{timeout, Duration};

fn spawn_coach(seed: u64) -> CoachHandle {
    let responder = Responder::with_rng(
        ResponseCatalog::builtin(),
        Arc::new(DisabledSentiment),
        StdRng::seed_from_u64(seed),
    );
    CoachHandle::spawn(responder)
}

fn in_bucket(intent: Intent, reply: &str) -> bool {
    ResponseCatalog::builtin()
        .bucket(intent)
        .iter()
        .any(|t| t.text == reply)
}

#[tokio::test]
async fn test_respond_returns_reply_from_bucket() {
    let coach = spawn_coach(1);

    let reply = coach.respond("I'm panicking".to_string()).await.unwrap();
    assert!(in_bucket(Intent::Stressed, &reply), "unexpected reply: {}", reply);

    let reply = coach.respond("what's the plan".to_string()).await.unwrap();
    assert!(in_bucket(Intent::NeedPlan, &reply), "unexpected reply: {}", reply);
}

#[tokio::test]
async fn test_respond_records_both_turns() {
    let coach = spawn_coach(2);

    let reply = coach.respond("exam tomorrow".to_string()).await.unwrap();
    let summary = coach.summary().await.unwrap();

    assert_eq!(summary.total_responses, 1);
    assert_eq!(summary.history_length, 2);
    assert!(summary.exam_tomorrow);
    assert!(!reply.is_empty());
}

#[tokio::test]
async fn test_concurrent_callers_are_serialized() {
    let coach = spawn_coach(3);
    let mut tasks = Vec::new();

    for i in 0..8 {
        let handle = coach.clone();
        tasks.push(tokio::spawn(async move {
            handle.respond(format!("topic {}", i)).await
        }));
    }

    for task in tasks {
        let reply = task.await.unwrap().unwrap();
        assert!(in_bucket(Intent::General, &reply));
    }

    let summary = coach.summary().await.unwrap();
    assert_eq!(summary.total_responses, 8);
    // 8 user turns + 8 bot turns, capped at 15
    assert_eq!(summary.history_length, 15);
    assert_eq!(summary.recent_topics.len(), 3);
}

#[tokio::test]
async fn test_progress_reports_reach_subscribers() {
    let coach = spawn_coach(4);
    let mut progress = coach.subscribe_progress();

    for _ in 0..3 {
        coach.respond("ok".to_string()).await.unwrap();
    }

    let report = timeout(Duration::from_secs(1), progress.recv())
        .await
        .expect("no progress report")
        .unwrap();
    assert_eq!(report.total, 3);
    assert!(report.to_string().starts_with("📊 STATS:"));
}

#[tokio::test]
async fn test_respond_after_shutdown_fails() {
    let coach = spawn_coach(5);
    coach.respond("hello".to_string()).await.unwrap();

    coach.shutdown().await.unwrap();

    let result = coach.respond("still there?".to_string()).await;
    assert!(matches!(result, Err(AppError::Actor(_))));
}

#[tokio::test]
async fn test_summary_serializes() {
    let coach = spawn_coach(6);
    coach.respond("great".to_string()).await.unwrap();

    let summary = coach.summary().await.unwrap();
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["total_responses"], 1);
    assert!(json["session_id"].is_string());
    assert!(summary.to_string().contains("RESEARCH METRICS"));
}

/// Scorer whose endpoint never answers
struct StalledSentiment;

#[async_trait]
impl SentimentScorer for StalledSentiment {
    async fn score(&self, _text: &str) -> Result<SentimentScore, AppError> {
        std::future::pending().await
    }
}

#[tokio::test(start_paused = true)]
async fn test_long_sentiment_timeout_still_replies() {
    let responder = Responder::with_rng(
        ResponseCatalog::builtin(),
        Arc::new(StalledSentiment),
        StdRng::seed_from_u64(7),
    )
    .with_sentiment_timeout(Duration::from_secs(40));
    let coach = CoachHandle::spawn(responder);

    let reply = coach.respond("hello".to_string()).await.unwrap();
    assert!(in_bucket(Intent::General, &reply), "unexpected reply: {}", reply);

    let summary = coach.summary().await.unwrap();
    assert_eq!(summary.total_responses, 1);
}
