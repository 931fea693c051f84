//! # Brain Module
//!
//! Fast, rule-based analysis of user input for the exam coach.
//!
//! ## Components
//! - `lexicon`: Fixed word lists and substring matching helpers
//! - `intent`: Ordered, short-circuiting intent classification
//! - `sentiment`: Optional external sentiment signal (advisory only)

pub mod intent;
pub mod lexicon;
pub mod sentiment;

// Re-export main types for convenience
pub use intent::{Intent, IntentClassifier, IntentResult};
pub use sentiment::{
    score_or_neutral, DisabledSentiment, HttpSentimentScorer, SentimentLabel, SentimentScore,
    SentimentScorer,
};
