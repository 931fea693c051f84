//! # Coach Module
//!
//! Session state, the response catalog and the context-aware responder.
//!
//! ## Components
//! - `bounded`: Fixed-capacity drop-oldest log
//! - `catalog`: Intent → reply templates, validated complete at construction
//! - `context`: Per-session flags, topic memory and history
//! - `stats`: Usage counters, progress reports and the session summary
//! - `responder`: The `handle(text) -> reply` state machine

pub mod bounded;
pub mod catalog;
pub mod context;
pub mod responder;
pub mod stats;

pub use bounded::BoundedLog;
pub use catalog::{ResponseCatalog, ResponseTemplate};
pub use context::{Mood, SessionContext};
pub use responder::Responder;
pub use stats::{ProgressReport, SessionSummary, UsageStats};
