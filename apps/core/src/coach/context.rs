//! Session Context - conversation-scoped memory of one coaching session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use uuid::Uuid;

use super::bounded::BoundedLog;
use crate::brain::lexicon::{contains_any, EXAM_TERMS, TOPIC_TERMS};
use crate::brain::sentiment::{SentimentLabel, SentimentScore};

pub const DEFAULT_HISTORY_CAPACITY: usize = 15;
pub const DEFAULT_TOPIC_CAPACITY: usize = 3;

/// Mood derived from the last sentiment score. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    #[default]
    Neutral,
    Positive,
    Negative,
}

impl From<SentimentLabel> for Mood {
    fn from(label: SentimentLabel) -> Self {
        match label {
            SentimentLabel::Positive => Mood::Positive,
            SentimentLabel::Negative => Mood::Negative,
            SentimentLabel::Neutral => Mood::Neutral,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionContext {
    session_id: Uuid,
    started_at: DateTime<Utc>,
    started: Instant,
    /// Set once text mentions an exam, a test or tomorrow. Never cleared.
    exam_tomorrow: bool,
    /// Set once a plan was asked for. Never cleared.
    needs_study_plan: bool,
    current_mood: Mood,
    recent_topics: BoundedLog<String>,
    history: BoundedLog<String>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY, DEFAULT_TOPIC_CAPACITY)
    }
}

impl SessionContext {
    pub fn new(history_capacity: usize, topic_capacity: usize) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
            started: Instant::now(),
            exam_tomorrow: false,
            needs_study_plan: false,
            current_mood: Mood::Neutral,
            recent_topics: BoundedLog::new(topic_capacity),
            history: BoundedLog::new(history_capacity),
        }
    }

    pub fn record_user_turn(&mut self, text: &str) {
        self.history.push(format!("You: {}", text));
    }

    pub fn record_bot_turn(&mut self, reply: &str) {
        self.history.push(format!("Bot: {}", reply));
    }

    /// Updates the exam flag and topic memory from already-lowercased text.
    pub fn observe(&mut self, text_lower: &str) {
        if contains_any(text_lower, EXAM_TERMS) {
            self.exam_tomorrow = true;
        }
        if contains_any(text_lower, TOPIC_TERMS) {
            self.recent_topics.push(text_lower.to_string());
        }
    }

    pub fn mark_needs_study_plan(&mut self) {
        self.needs_study_plan = true;
    }

    pub fn set_mood(&mut self, score: &SentimentScore) {
        self.current_mood = Mood::from(score.label);
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn exam_tomorrow(&self) -> bool {
        self.exam_tomorrow
    }

    pub fn needs_study_plan(&self) -> bool {
        self.needs_study_plan
    }

    pub fn current_mood(&self) -> Mood {
        self.current_mood
    }

    pub fn recent_topics(&self) -> &BoundedLog<String> {
        &self.recent_topics
    }

    pub fn history(&self) -> &BoundedLog<String> {
        &self.history
    }
}
