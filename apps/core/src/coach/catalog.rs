//! Response Catalog - the fixed reply templates, grouped by intent.
//!
//! A catalog can only be built complete: every [`Intent`] has at least one
//! non-blank template. Selection from it therefore never fails.

use rand::Rng;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::brain::intent::Intent;
use crate::brain::lexicon::{contains_any, ACTIONABLE_TERMS, MOTIVATION_TERMS};
use crate::error::AppError;

/// A reply template with its reporting signals computed once
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseTemplate {
    pub text: String,
    /// Contains a call-to-action word (now, start, crush, ...)
    pub motivational: bool,
    /// Contains a numbered step, a sequencing word or an arrow
    pub actionable: bool,
}

impl ResponseTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let lower = text.to_lowercase();
        Self {
            motivational: contains_any(&lower, MOTIVATION_TERMS),
            actionable: contains_any(&lower, ACTIONABLE_TERMS),
            text,
        }
    }
}

const STRESSED: &[&str] = &[
    "🧘 **EMERGENCY RESET:**\n1️⃣ Breathe 4sec in → 4sec out (5x)\n2️⃣ 1 easy question\n3️⃣ You're MORE prepared than you think!\n\nYou've GOT this! 💪",
    "😰 NORMAL pre-exam nerves = FUEL! Channel it:\n• Water break → 1 easy win → Momentum builds! 🔥",
    "🚨 **STRESS PROTOCOL:**\n✅ 4-7-8 breathing → Easiest topic first → Small wins = BIG confidence!\n\nStart with 1 question?",
    "💙 Feeling this = you're close to breakthrough! 2min walk → 1 page notes → CRUSH! ⏳",
];

const NEED_PLAN: &[&str] = &[
    "🚀 **PERFECT NIGHT PLAN:**\n1️⃣ Weakest topic → 25min summary\n2️⃣ 3 past questions\n3️⃣ Bed by 10PM!\n\nSTART NOW? ⏰",
    "⚡ **EXECUTE THIS:**\n• 30min: Key formulas/concepts\n• 20min: 5 practice problems\n• SLEEP - brain locks memory!\n\nWhich first?",
    "💥 **FINAL LAP STRATEGY:**\n✅ Active recall → 3 hardest questions → Early bedtime\n\nReady? GO! 🔥",
    "🎓 **SMART PLAN:** 45min weak area → flashcards → bed. Tomorrow you SHINE! ✨",
];

const EXAM_READY: &[&str] = &[
    "🎯 CHAMPION MINDSET! You're walking into that exam like a BOSS tomorrow! 💪",
    "🚀 PERFECT PREP! Tonight: review formulas → 5 practice Qs → sleep like winner! 🔥",
    "💥 EXAM READY! That confidence = guaranteed top performance tomorrow! DOMINATE! ⏰",
    "⚡ UNSTOPPABLE VIBES! Quick review tonight → early sleep → CRUSH tomorrow! 🏆",
];

const ENCOURAGEMENT: &[&str] = &[
    "YES ⚡ MOMENTUM BUILDING! 25min timer starts NOW → pick 1 topic → CRUSH IT! 💥",
    "🔥 LOCKED IN! Which subject first? Attack mode ACTIVATED! ⏰",
    "PERFECT! 🚀 Name your target topic → 25min sprints → VICTORY! What's step 1?",
    "MOMENTUM = POWER! 💪 Pick battle → Execute → Win! Which topic NOW?",
];

const GENERAL: &[&str] = &[
    "⚡ **25MIN ATTACK MODE!** Pick 1 topic → Execute → Celebrate! Ready? START NOW! 🚀",
    "🎯 MOMENTUM CHAIN ACTIVE! 25min focused work → break → repeat = UNSTOPPABLE! 💥",
    "🔥 You're building WINNER habits! Quick: what's your next 25min target? GO TIME! ⏰",
    "💪 CHAMPIONS TRAIN NOW! Pomodoro ready → pick topic → DOMINATE 25min! Execute!",
];

/// Intent → non-empty list of templates
#[derive(Debug, Clone)]
pub struct ResponseCatalog {
    buckets: HashMap<Intent, Vec<ResponseTemplate>>,
}

impl Default for ResponseCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ResponseCatalog {
    /// Builds a catalog, rejecting missing or empty buckets and blank templates.
    pub fn new(buckets: HashMap<Intent, Vec<String>>) -> Result<Self, AppError> {
        let mut validated = HashMap::with_capacity(Intent::ALL.len());

        for intent in Intent::ALL {
            let texts = buckets.get(&intent).map(Vec::as_slice).unwrap_or_default();
            if texts.is_empty() {
                return Err(AppError::Config(format!(
                    "empty response bucket for intent '{}'",
                    intent
                )));
            }
            if let Some(pos) = texts.iter().position(|t| t.trim().is_empty()) {
                return Err(AppError::Validation(format!(
                    "blank response template #{} for intent '{}'",
                    pos, intent
                )));
            }
            validated.insert(
                intent,
                texts.iter().map(ResponseTemplate::new).collect::<Vec<_>>(),
            );
        }

        Ok(Self { buckets: validated })
    }

    /// The stock exam-coach replies, four per intent.
    pub fn builtin() -> Self {
        let buckets: HashMap<Intent, Vec<ResponseTemplate>> = [
            (Intent::Stressed, STRESSED),
            (Intent::NeedPlan, NEED_PLAN),
            (Intent::ExamReady, EXAM_READY),
            (Intent::Encouragement, ENCOURAGEMENT),
            (Intent::General, GENERAL),
        ]
        .into_iter()
        .map(|(intent, texts)| {
            (
                intent,
                texts.iter().map(|t| ResponseTemplate::new(*t)).collect(),
            )
        })
        .collect();

        Self { buckets }
    }

    /// Parses a catalog from JSON of the form `{"stressed": ["..."], "need_plan": [...], ...}`.
    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        let buckets: HashMap<Intent, Vec<String>> = serde_json::from_str(json)?;
        Self::new(buckets)
    }

    /// Loads a JSON catalog file.
    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let json = fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        info!(
            "Loaded response catalog from {:?} ({} templates)",
            path,
            catalog.template_count()
        );
        Ok(catalog)
    }

    /// Templates for `intent`. Never empty.
    pub fn bucket(&self, intent: Intent) -> &[ResponseTemplate] {
        self.buckets.get(&intent).map(Vec::as_slice).unwrap_or_default()
    }

    /// Draws one template of `intent`'s bucket uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, intent: Intent, rng: &mut R) -> &ResponseTemplate {
        // Construction guarantees a non-empty bucket for every intent.
        let bucket = &self.buckets[&intent];
        &bucket[rng.gen_range(0..bucket.len())]
    }

    pub fn template_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}
