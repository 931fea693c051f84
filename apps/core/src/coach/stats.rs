//! Usage statistics and the read-only session summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::catalog::ResponseTemplate;
use super::context::{Mood, SessionContext};

/// Counters over every response produced in the session.
///
/// `motivational <= total` and `actionable <= total` hold after every `record`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    pub total: u64,
    pub motivational: u64,
    pub actionable: u64,
}

impl UsageStats {
    pub fn record(&mut self, template: &ResponseTemplate) {
        self.total += 1;
        if template.motivational {
            self.motivational += 1;
        }
        if template.actionable {
            self.actionable += 1;
        }
    }

    /// Percentage of motivational responses, 0 before the first response.
    pub fn motivational_pct(&self) -> f64 {
        percentage(self.motivational, self.total)
    }

    /// Percentage of actionable responses, 0 before the first response.
    pub fn actionable_pct(&self) -> f64 {
        percentage(self.actionable, self.total)
    }

    /// A progress report when `total` has just reached a multiple of `interval`.
    pub fn progress_due(&self, interval: u64) -> Option<ProgressReport> {
        if self.total > 0 && interval > 0 && self.total % interval == 0 {
            Some(ProgressReport {
                total: self.total,
                motivational_pct: self.motivational_pct(),
                actionable_pct: self.actionable_pct(),
            })
        } else {
            None
        }
    }
}

fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Periodic side-channel report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub total: u64,
    pub motivational_pct: f64,
    pub actionable_pct: f64,
}

impl fmt::Display for ProgressReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "📊 STATS: {:.0}% Motivation | {:.0}% Actionable",
            self.motivational_pct, self.actionable_pct
        )
    }
}

/// Snapshot of the session for callers and front-ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub total_responses: u64,
    pub motivational_responses: u64,
    pub actionable_responses: u64,
    /// Percentage in `[0, 100]`
    pub motivational_rate: f64,
    /// Percentage in `[0, 100]`
    pub actionable_rate: f64,
    pub history_length: usize,
    pub elapsed_seconds: u64,
    pub exam_tomorrow: bool,
    pub needs_study_plan: bool,
    pub current_mood: Mood,
    pub recent_topics: Vec<String>,
}

impl SessionSummary {
    pub fn new(stats: &UsageStats, context: &SessionContext) -> Self {
        Self {
            session_id: context.session_id(),
            started_at: context.started_at(),
            total_responses: stats.total,
            motivational_responses: stats.motivational,
            actionable_responses: stats.actionable,
            motivational_rate: stats.motivational_pct(),
            actionable_rate: stats.actionable_pct(),
            history_length: context.history().len(),
            elapsed_seconds: context.elapsed().as_secs(),
            exam_tomorrow: context.exam_tomorrow(),
            needs_study_plan: context.needs_study_plan(),
            current_mood: context.current_mood(),
            recent_topics: context.recent_topics().to_vec(),
        }
    }
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🎓 RESEARCH METRICS:")?;
        writeln!(
            f,
            "💪 Motivation Rate: {:.1}% ({}/{})",
            self.motivational_rate, self.motivational_responses, self.total_responses
        )?;
        writeln!(
            f,
            "⚡ Actionable Rate: {:.1}% ({}/{})",
            self.actionable_rate, self.actionable_responses, self.total_responses
        )?;
        writeln!(f, "🧠 Context Memory: {} exchanges", self.history_length)?;
        write!(
            f,
            "⏱️  Session: {}m {}s",
            self.elapsed_seconds / 60,
            self.elapsed_seconds % 60
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_signals() {
        let mut stats = UsageStats::default();
        stats.record(&ResponseTemplate::new("Start now → first step"));
        stats.record(&ResponseTemplate::new("Crush it"));
        stats.record(&ResponseTemplate::new("Take care."));

        assert_eq!(stats.total, 3);
        assert_eq!(stats.motivational, 2);
        assert_eq!(stats.actionable, 1);
    }

    #[test]
    fn test_rates_before_first_response() {
        let stats = UsageStats::default();
        assert_eq!(stats.motivational_pct(), 0.0);
        assert_eq!(stats.actionable_pct(), 0.0);
        assert!(stats.progress_due(3).is_none());
    }

    #[test]
    fn test_progress_every_third_response() {
        let mut stats = UsageStats::default();
        let template = ResponseTemplate::new("Go → win");
        let mut due = Vec::new();
        for _ in 0..9 {
            stats.record(&template);
            due.push(stats.progress_due(3).is_some());
        }
        assert_eq!(
            due,
            vec![false, false, true, false, false, true, false, false, true]
        );
    }

    #[test]
    fn test_progress_report_format() {
        let report = ProgressReport {
            total: 3,
            motivational_pct: 200.0 / 3.0,
            actionable_pct: 100.0 / 3.0,
        };
        assert_eq!(report.to_string(), "📊 STATS: 67% Motivation | 33% Actionable");
    }

    #[test]
    fn test_summary_display() {
        let mut stats = UsageStats::default();
        stats.record(&ResponseTemplate::new("Start now"));
        let summary = SessionSummary::new(&stats, &SessionContext::default());
        let text = summary.to_string();

        assert!(text.contains("Motivation Rate: 100.0% (1/1)"));
        assert!(text.contains("Actionable Rate: 0.0% (0/1)"));
        assert!(text.contains("Context Memory: 0 exchanges"));
    }
}
