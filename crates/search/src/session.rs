//! Resolution session: an actor owning the latest input and its outcome.
//!
//! Every [`set_input`](ResolutionSession::set_input) starts a new generation.
//! The previous generation's cancellation token is signalled first, so only
//! the latest input can ever publish an outcome. State is published on a
//! `watch` channel and replaced wholesale on every transition.
//!
//! ```text
//!            non-empty input
//!   Idle ───────────────────────▶ Resolving ──┐ new input: cancel, restart
//!    ▲                               │  ▲     │
//!    │  outcome published / empty    │  └─────┘
//!    └───────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::{debug, info};
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::engine::SearchEngine;
use crate::errors::SearchError;
use crate::models::ResolutionOutcome;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Idle,
    Resolving,
}

/// Snapshot of a session.
///
/// `outcome` always belongs to `input`: it is reset when a resolution
/// starts and filled when that same generation completes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub input: String,
    pub phase: Phase,
    /// Number of inputs accepted so far.
    pub generation: u64,
    pub outcome: ResolutionOutcome,
}

impl SessionState {
    fn initial() -> Self {
        Self {
            input: String::new(),
            phase: Phase::Idle,
            generation: 0,
            outcome: ResolutionOutcome::empty(),
        }
    }
}

enum Command {
    SetInput(String),
    Shutdown,
}

/// Handle to a running session actor.
///
/// Dropping the handle stops the actor and cancels in-flight work.
pub struct ResolutionSession {
    commands: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<SessionState>,
    submitted: AtomicU64,
    task: JoinHandle<()>,
}

impl ResolutionSession {
    /// Starts the actor on the current tokio runtime.
    pub fn spawn(engine: Arc<SearchEngine>) -> Self {
        let (commands, receiver) = mpsc::unbounded_channel();
        let (state_tx, state) = watch::channel(SessionState::initial());
        let task = tokio::spawn(run(engine, receiver, state_tx));

        Self {
            commands,
            state,
            submitted: AtomicU64::new(0),
            task,
        }
    }

    /// Replaces the input, superseding any resolution in flight.
    pub fn set_input(&self, input: impl Into<String>) -> Result<(), SearchError> {
        self.commands
            .send(Command::SetInput(input.into()))
            .map_err(|_| SearchError::SessionClosed)?;
        self.submitted.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    /// Receiver of every state transition.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.clone()
    }

    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Waits until every input submitted so far has been handled and the
    /// session is idle, and returns that state.
    pub async fn wait_idle(&self) -> Result<SessionState, SearchError> {
        let target = self.submitted.load(Ordering::SeqCst);
        let mut state = self.state.clone();
        let idle = state
            .wait_for(|s| s.generation >= target && s.phase == Phase::Idle)
            .await
            .map_err(|_| SearchError::SessionClosed)?;
        Ok(idle.clone())
    }

    /// Stops the actor, cancelling any resolution in flight.
    pub async fn shutdown(self) {
        let _ = self.commands.send(Command::Shutdown);
        let _ = self.task.await;
    }
}

async fn run(
    engine: Arc<SearchEngine>,
    mut commands: mpsc::UnboundedReceiver<Command>,
    state: watch::Sender<SessionState>,
) {
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<(u64, ResolutionOutcome)>();
    let mut generation = 0u64;
    let mut input = String::new();
    let mut in_flight: Option<CancellationToken> = None;

    loop {
        tokio::select! {
            command = commands.recv() => {
                let raw = match command {
                    Some(Command::SetInput(raw)) => raw,
                    Some(Command::Shutdown) | None => break,
                };

                if let Some(token) = in_flight.take() {
                    debug!("Cancelling resolution of generation {}", generation);
                    token.cancel();
                }
                generation += 1;
                input = raw;

                if input.trim().is_empty() {
                    state.send_replace(SessionState {
                        input: input.clone(),
                        phase: Phase::Idle,
                        generation,
                        outcome: ResolutionOutcome::empty(),
                    });
                    continue;
                }

                state.send_replace(SessionState {
                    input: input.clone(),
                    phase: Phase::Resolving,
                    generation,
                    outcome: ResolutionOutcome::empty(),
                });

                let token = CancellationToken::new();
                in_flight = Some(token.clone());
                let engine = engine.clone();
                let done = done_tx.clone();
                let raw = input.clone();
                let this_generation = generation;
                tokio::spawn(async move {
                    if let Some(outcome) = engine.search_cancellable(&raw, &token).await {
                        let _ = done.send((this_generation, outcome));
                    }
                });
            }
            Some((finished, outcome)) = done_rx.recv() => {
                if finished != generation {
                    debug!(
                        "Discarding outcome of generation {} (current {})",
                        finished, generation
                    );
                    continue;
                }
                in_flight = None;
                info!(
                    "Publishing outcome of generation {}: {} candidates",
                    generation,
                    outcome.candidates.len()
                );
                state.send_replace(SessionState {
                    input: input.clone(),
                    phase: Phase::Idle,
                    generation,
                    outcome,
                });
            }
        }
    }

    if let Some(token) = in_flight.take() {
        token.cancel();
    }
    debug!("Resolution session stopped after {} inputs", generation);
}
