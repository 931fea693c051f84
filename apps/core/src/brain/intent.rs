//! Intent Classification using ordered keyword rules.
//!
//! Rules are evaluated in priority order and the first one that fires wins.
//! Distress outranks everything else, so "scared but ready" is `Stressed`.
//! No ML model required - pure substring matching, total over all input.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::lexicon::{
    first_match, AFFIRMATION_TERMS, PLAN_TERMS, READINESS_TERMS, STRESS_TERMS,
};

/// Detected intent type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Distress (stress, panic, tired, etc.)
    Stressed,
    /// Asking for a plan (plan, schedule, how to, etc.)
    NeedPlan,
    /// Feeling ready (ready, prepared, confident, etc.)
    ExamReady,
    /// Short affirmation (yes, ok, cool, etc.)
    Encouragement,
    /// Fallback when no rule fires
    General,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Intent {
    /// Every intent, in classification priority order.
    pub const ALL: [Intent; 5] = [
        Intent::Stressed,
        Intent::NeedPlan,
        Intent::ExamReady,
        Intent::Encouragement,
        Intent::General,
    ];

    /// Returns the snake_case label for the intent
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Stressed => "stressed",
            Intent::NeedPlan => "need_plan",
            Intent::ExamReady => "exam_ready",
            Intent::Encouragement => "encouragement",
            Intent::General => "general",
        }
    }
}

/// Result of intent classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentResult {
    /// Detected intent
    pub intent: Intent,
    /// Lexicon entry that fired (None for `General`)
    pub matched_term: Option<String>,
}

/// Rule definition for intent matching
struct IntentRule {
    intent: Intent,
    terms: &'static [&'static str],
}

/// Ordered cascade. `General` has no rule, it is what falls out the bottom.
const RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::Stressed,
        terms: STRESS_TERMS,
    },
    IntentRule {
        intent: Intent::NeedPlan,
        terms: PLAN_TERMS,
    },
    IntentRule {
        intent: Intent::ExamReady,
        terms: READINESS_TERMS,
    },
    IntentRule {
        intent: Intent::Encouragement,
        terms: AFFIRMATION_TERMS,
    },
];

/// Intent classifier using ordered keyword rules
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify the intent of a text
    pub fn classify(&self, text: &str) -> Intent {
        self.classify_detailed(text).intent
    }

    /// Classify and report which lexicon entry decided it
    pub fn classify_detailed(&self, text: &str) -> IntentResult {
        let text_lower = text.to_lowercase();

        for rule in RULES {
            if let Some(term) = first_match(&text_lower, rule.terms) {
                return IntentResult {
                    intent: rule.intent,
                    matched_term: Some(term.to_string()),
                };
            }
        }

        IntentResult {
            intent: Intent::General,
            matched_term: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stress_detection() {
        let classifier = IntentClassifier::new();

        assert_eq!(classifier.classify("I'm so stressed"), Intent::Stressed);
        assert_eq!(classifier.classify("PANIC mode"), Intent::Stressed);
        assert_eq!(classifier.classify("this exam is killing me"), Intent::Stressed);
    }

    #[test]
    fn test_stress_outranks_readiness() {
        let classifier = IntentClassifier::new();

        assert_eq!(classifier.classify("I'm scared but ready"), Intent::Stressed);
        assert_eq!(
            classifier.classify("exam tomorrow, confident but nervous"),
            Intent::Stressed
        );
    }

    #[test]
    fn test_plan_detection() {
        let classifier = IntentClassifier::new();

        assert_eq!(classifier.classify("what's the best strategy"), Intent::NeedPlan);
        assert_eq!(classifier.classify("How to revise calculus?"), Intent::NeedPlan);
        // plan outranks readiness and affirmation
        assert_eq!(classifier.classify("ok, ready, give me a plan"), Intent::NeedPlan);
    }

    #[test]
    fn test_readiness_and_affirmation() {
        let classifier = IntentClassifier::new();

        assert_eq!(classifier.classify("I feel prepared"), Intent::ExamReady);
        assert_eq!(classifier.classify("yes!"), Intent::Encouragement);
        assert_eq!(classifier.classify("Cool"), Intent::Encouragement);
    }

    #[test]
    fn test_general_fallback() {
        let classifier = IntentClassifier::new();

        assert_eq!(classifier.classify("purple elephant"), Intent::General);
        assert_eq!(classifier.classify(""), Intent::General);
        assert_eq!(classifier.classify("   "), Intent::General);
        assert_eq!(classifier.classify("日本語のテキスト"), Intent::General);
    }

    #[test]
    fn test_matched_term_reported() {
        let classifier = IntentClassifier::new();

        let result = classifier.classify_detailed("Worried about chemistry");
        assert_eq!(result.intent, Intent::Stressed);
        assert_eq!(result.matched_term.as_deref(), Some("worried"));

        let result = classifier.classify_detailed("purple elephant");
        assert_eq!(result.matched_term, None);
    }

    #[test]
    fn test_labels_match_serde() {
        for intent in Intent::ALL {
            let json = serde_json::to_string(&intent).unwrap();
            assert_eq!(json, format!("\"{}\"", intent.label()));
        }
    }
}
