//! Round actor.
//!
//! One task owns the [`Round`] and applies requests in arrival order, so a
//! round never sees two commands at once.

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::core::{RandomSource, Round, RoundSnapshot};
use crate::engine::{apply_command, CommandError, CommandOutcome};
use crate::types::RoundCommand;

/// Request delivered to the actor.
#[derive(Debug)]
pub enum RoundRequest {
    Command {
        seq: u64,
        command: RoundCommand,
        reply: oneshot::Sender<Result<CommandOutcome, CommandError>>,
    },
    Observe {
        reply: oneshot::Sender<RoundSnapshot>,
    },
}

/// Why a request never reached the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    /// Inbox is full.
    Backpressure,
    /// Actor has stopped.
    Closed,
}

/// Cloneable handle to a running actor.
#[derive(Debug, Clone)]
pub struct RoundHandle {
    tx: mpsc::Sender<RoundRequest>,
}

impl RoundHandle {
    /// Spawn an actor owning `round`
    ///
    /// The join handle yields the round back once every handle is dropped.
    pub fn spawn<R>(round: Round<R>, max_pending: usize) -> (Self, JoinHandle<Round<R>>)
    where
        R: RandomSource + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<RoundRequest>(max_pending.max(1));
        let task = tokio::spawn(run_actor(round, rx));
        (Self { tx }, task)
    }

    pub async fn apply(
        &self,
        seq: u64,
        command: RoundCommand,
    ) -> Result<Result<CommandOutcome, CommandError>, SubmitError> {
        let (reply, rx) = oneshot::channel();
        self.submit(RoundRequest::Command {
            seq,
            command,
            reply,
        })?;
        rx.await.map_err(|_| SubmitError::Closed)
    }

    pub async fn observe(&self) -> Result<RoundSnapshot, SubmitError> {
        let (reply, rx) = oneshot::channel();
        self.submit(RoundRequest::Observe { reply })?;
        rx.await.map_err(|_| SubmitError::Closed)
    }

    fn submit(&self, request: RoundRequest) -> Result<(), SubmitError> {
        self.tx.try_send(request).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => SubmitError::Backpressure,
            mpsc::error::TrySendError::Closed(_) => SubmitError::Closed,
        })
    }
}

async fn run_actor<R: RandomSource>(
    mut round: Round<R>,
    mut rx: mpsc::Receiver<RoundRequest>,
) -> Round<R> {
    while let Some(request) = rx.recv().await {
        match request {
            RoundRequest::Command {
                seq,
                command,
                reply,
            } => {
                let result = apply_command(&mut round, command);
                debug!(seq, op = command.as_str(), ok = result.is_ok(), "command handled");
                let _ = reply.send(result);
            }
            RoundRequest::Observe { reply } => {
                let _ = reply.send(round.snapshot());
            }
        }
    }
    round
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RoundPhase;

    #[tokio::test]
    async fn test_actor_applies_commands_in_order() {
        let (handle, task) = RoundHandle::spawn(Round::new(5), 4);

        let out = handle
            .apply(1, RoundCommand::StartLevel { level: 2 })
            .await
            .unwrap()
            .unwrap();
        assert!(!out.ignored);

        let snap = handle.observe().await.unwrap();
        assert_eq!(snap.phase, RoundPhase::AwaitingPlacement);
        assert_eq!(snap.target, Some(2000));

        let out = handle.apply(2, RoundCommand::Undo).await.unwrap().unwrap();
        assert!(out.ignored);

        drop(handle);
        let round = task.await.unwrap();
        assert_eq!(round.phase(), RoundPhase::AwaitingPlacement);
    }

    #[tokio::test]
    async fn test_engine_errors_pass_through() {
        let (handle, _task) = RoundHandle::spawn(Round::new(5), 1);
        let result = handle.apply(1, RoundCommand::Skip).await.unwrap();
        assert_eq!(result, Err(CommandError::RoundOver));
    }
}
