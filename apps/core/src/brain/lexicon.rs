//! Fixed word lists used by the classifier, the context tracker and the
//! response signals.
//!
//! Every entry is matched as a plain substring of lowercased text. There is no
//! tokenization and no word-boundary check, so "excited" also matches
//! "unexcitedly" and "die" matches "diet".

/// Distress signals. Highest priority in the intent cascade.
pub const STRESS_TERMS: &[&str] = &[
    "stress", "anxious", "nervous", "worried", "scared", "afraid", "panic", "killing", "die",
    "tired", "hate",
];

/// Requests for a plan or guidance.
pub const PLAN_TERMS: &[&str] = &["plan", "guide", "strategy", "schedule", "what next", "how to"];

/// Exam readiness.
pub const READINESS_TERMS: &[&str] = &["ready", "prepared", "confident", "excited"];

/// Short affirmations.
pub const AFFIRMATION_TERMS: &[&str] = &["yeah", "yes", "ok", "cool", "great"];

/// Text that suggests an imminent exam.
pub const EXAM_TERMS: &[&str] = &["exam", "tomorrow", "test"];

/// Text that names something to study.
pub const TOPIC_TERMS: &[&str] = &["topic", "subject", "chapter"];

/// Words that make a response count as motivational.
pub const MOTIVATION_TERMS: &[&str] = &[
    "now", "start", "go", "crush", "attack", "execute", "plan", "timer", "step", "action", "win",
    "champion", "dominate",
];

/// Numbered-step glyphs, sequencing words and arrows that make a response actionable.
pub const ACTIONABLE_TERMS: &[&str] = &["1️⃣", "2️⃣", "3️⃣", "first", "then", "next", "→"];

/// Returns the first term of `terms` found in `haystack`.
///
/// `haystack` must already be lowercased.
pub fn first_match(haystack: &str, terms: &[&'static str]) -> Option<&'static str> {
    terms.iter().copied().find(|term| haystack.contains(term))
}

/// Returns `true` if any term of `terms` occurs in `haystack` (already lowercased).
pub fn contains_any(haystack: &str, terms: &[&'static str]) -> bool {
    first_match(haystack, terms).is_some()
}
