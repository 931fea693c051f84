//! Exam Coach core: rule-based intent classification and context-aware replies.
//!
//! ```rust,ignore
//! let mut responder = Responder::default();
//! let reply = responder.handle("my exam is tomorrow and I'm nervous").await;
//! responder.record_reply(&reply);
//! println!("{}", responder.summary());
//! ```

pub mod actors;
pub mod brain;
pub mod coach;
pub mod config;
pub mod error;
pub mod logging;

#[cfg(test)]
mod tests;

pub use actors::CoachHandle;
pub use brain::{Intent, IntentClassifier};
pub use coach::{Responder, SessionSummary};
pub use config::CoachConfig;
pub use error::AppError;
