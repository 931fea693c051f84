//! Runtime configuration read from the environment (and `.env`, if present).

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::brain::sentiment::{DisabledSentiment, HttpSentimentScorer, SentimentScorer};
use crate::coach::context::{DEFAULT_HISTORY_CAPACITY, DEFAULT_TOPIC_CAPACITY};
use crate::error::AppError;

pub const DEFAULT_PROGRESS_INTERVAL: u64 = 3;
pub const DEFAULT_SENTIMENT_TIMEOUT_MS: u64 = 2000;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    /// Bunyan-style JSON lines
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" | "bunyan" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!(
                "COACH_LOG_FORMAT must be 'pretty' or 'json', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoachConfig {
    pub history_capacity: usize,
    pub topic_capacity: usize,
    pub progress_interval: u64,
    pub sentiment_url: Option<String>,
    pub sentiment_token: Option<String>,
    pub sentiment_timeout: Duration,
    pub catalog_path: Option<PathBuf>,
    pub rng_seed: Option<u64>,
    pub log_format: LogFormat,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            topic_capacity: DEFAULT_TOPIC_CAPACITY,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            sentiment_url: None,
            sentiment_token: None,
            sentiment_timeout: Duration::from_millis(DEFAULT_SENTIMENT_TIMEOUT_MS),
            catalog_path: None,
            rng_seed: None,
            log_format: LogFormat::Pretty,
        }
    }
}

impl CoachConfig {
    /// Loads `.env` (if any), then reads the `COACH_*` variables.
    pub fn from_env() -> Result<Self, AppError> {
        // A missing .env file is the normal case.
        let _ = dotenv::dotenv();
        Self::from_vars()
    }

    /// Reads the `COACH_*` variables from the current process environment only.
    pub fn from_vars() -> Result<Self, AppError> {
        let defaults = Self::default();

        Ok(Self {
            history_capacity: positive_var("COACH_HISTORY_CAPACITY")?
                .unwrap_or(defaults.history_capacity),
            topic_capacity: positive_var("COACH_TOPIC_CAPACITY")?
                .unwrap_or(defaults.topic_capacity),
            progress_interval: positive_var("COACH_PROGRESS_INTERVAL")?
                .unwrap_or(defaults.progress_interval),
            sentiment_url: string_var("COACH_SENTIMENT_URL"),
            sentiment_token: string_var("COACH_SENTIMENT_TOKEN"),
            sentiment_timeout: positive_var::<u64>("COACH_SENTIMENT_TIMEOUT_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.sentiment_timeout),
            catalog_path: string_var("COACH_CATALOG_PATH").map(PathBuf::from),
            rng_seed: parsed_var("COACH_RNG_SEED")?,
            log_format: string_var("COACH_LOG_FORMAT")
                .map(|v| v.parse::<LogFormat>())
                .transpose()?
                .unwrap_or_default(),
        })
    }

    /// The configured sentiment backend, or [`DisabledSentiment`] when no URL is set.
    pub fn build_sentiment(&self) -> Result<Arc<dyn SentimentScorer>, AppError> {
        match &self.sentiment_url {
            Some(url) => {
                info!("Sentiment scoring enabled: {}", url);
                let scorer = HttpSentimentScorer::new(
                    url.clone(),
                    self.sentiment_token.as_deref(),
                    self.sentiment_timeout,
                )?;
                Ok(Arc::new(scorer))
            }
            None => Ok(Arc::new(DisabledSentiment)),
        }
    }
}

/// Non-empty, trimmed value of `name`.
fn string_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parsed_var<T>(name: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    string_var(name)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| AppError::Config(format!("{} has invalid value '{}': {}", name, raw, e)))
        })
        .transpose()
}

fn positive_var<T>(name: &str) -> Result<Option<T>, AppError>
where
    T: FromStr + PartialOrd + Default,
    T::Err: std::fmt::Display,
{
    match parsed_var::<T>(name)? {
        Some(value) if value <= T::default() => Err(AppError::Config(format!(
            "{} must be greater than zero",
            name
        ))),
        other => Ok(other),
    }
}
