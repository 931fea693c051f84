use tokio::sync::oneshot;

use crate::coach::stats::SessionSummary;

// Re-export AppError for convenience
pub use crate::error::AppError;

/// Messages that can be sent to the coach actor.
#[derive(Debug)]
pub enum CoachMessage {
    /// A line of user text. The reply is also recorded as the bot's turn in history.
    Respond {
        text: String,
        /// A channel to send the chosen reply back.
        responder: oneshot::Sender<Result<String, AppError>>,
    },
    /// A request for the current session summary.
    Summary {
        responder: oneshot::Sender<SessionSummary>,
    },
    /// A command to stop the actor before all handles are dropped.
    Shutdown,
}
