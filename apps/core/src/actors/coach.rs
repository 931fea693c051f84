use rand::Rng;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::{timeout, Duration};
use tracing::{info, instrument};

use crate::actors::messages::{AppError, CoachMessage};
use crate::coach::responder::Responder;
use crate::coach::stats::{ProgressReport, SessionSummary};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Headroom on top of the sentiment timeout for the rest of `handle`.
const SENTIMENT_MARGIN: Duration = Duration::from_secs(5);

/// How long `respond` waits: never shorter than the sentiment budget plus margin.
fn request_timeout_for(sentiment_timeout: Duration) -> Duration {
    REQUEST_TIMEOUT.max(sentiment_timeout.saturating_add(SENTIMENT_MARGIN))
}

/// A handle to the coach actor.
///
/// This is the entry point for front-ends that cannot hold `&mut Responder`
/// themselves (several tasks, a UI callback, an HTTP handler). The actor owns
/// the single responder and processes one message at a time, so calls through
/// any number of cloned handles are serialized.
#[derive(Clone)]
pub struct CoachHandle {
    sender: mpsc::Sender<CoachMessage>,
    progress: broadcast::Sender<ProgressReport>,
    request_timeout: Duration,
}

impl CoachHandle {
    /// Spawns the actor on the current Tokio runtime and returns a handle to it.
    pub fn spawn<R>(responder: Responder<R>) -> Self
    where
        R: Rng + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel(32);
        let progress = responder.progress_sender();
        let request_timeout = request_timeout_for(responder.sentiment_timeout());
        let actor = CoachRunner {
            receiver,
            responder,
        };
        tokio::spawn(async move { actor.run().await });
        Self {
            sender,
            progress,
            request_timeout,
        }
    }

    /// Sends user text to the coach and waits for the reply.
    #[instrument(skip(self))]
    pub async fn respond(&self, text: String) -> Result<String, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = CoachMessage::Respond {
            text,
            responder: send,
        };
        self.sender
            .send(msg)
            .await
            .map_err(|e| AppError::Actor(e.to_string()))?;
        timeout(self.request_timeout, recv)
            .await?
            .map_err(|e| AppError::Actor(e.to_string()))?
    }

    /// Returns a snapshot of the session.
    pub async fn summary(&self) -> Result<SessionSummary, AppError> {
        let (send, recv) = oneshot::channel();
        self.sender
            .send(CoachMessage::Summary { responder: send })
            .await
            .map_err(|e| AppError::Actor(e.to_string()))?;
        timeout(self.request_timeout, recv)
            .await?
            .map_err(|e| AppError::Actor(e.to_string()))
    }

    /// Receives a report every few responses, as configured on the responder.
    pub fn subscribe_progress(&self) -> broadcast::Receiver<ProgressReport> {
        self.progress.subscribe()
    }

    /// Asks the actor to stop. Pending messages queued before this one are still answered.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.sender
            .send(CoachMessage::Shutdown)
            .await
            .map_err(|e| AppError::Actor(e.to_string()))
    }
}

// --- Actor Runner ---
struct CoachRunner<R: Rng> {
    receiver: mpsc::Receiver<CoachMessage>,
    responder: Responder<R>,
}

impl<R: Rng> CoachRunner<R> {
    async fn run(mut self) {
        info!(
            session_id = %self.responder.context().session_id(),
            "Coach started"
        );
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CoachMessage::Respond { text, responder } => {
                    let reply = self.responder.handle(&text).await;
                    self.responder.record_reply(&reply);
                    let _ = responder.send(Ok(reply));
                }
                CoachMessage::Summary { responder } => {
                    let _ = responder.send(self.responder.summary());
                }
                CoachMessage::Shutdown => {
                    info!("Coach shutting down...");
                    break;
                }
            }
        }
        info!("Coach stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_timeout_covers_sentiment_budget() {
        assert_eq!(request_timeout_for(Duration::from_secs(2)), REQUEST_TIMEOUT);
        assert_eq!(
            request_timeout_for(Duration::from_secs(40)),
            Duration::from_secs(45)
        );
        assert_eq!(request_timeout_for(Duration::MAX), Duration::MAX);
    }
}
