//! Debounced, latest-wins search pipeline.
//!
//! Each pipeline owns a [`SearchMachine`] that decides when a search intent is
//! released to the backend and whether a settled call may still be reported.
//! Every intent bumps the machine's generation; a call result is only emitted
//! while its generation is the current one, so a newer intent always
//! supersedes older calls. Superseded call tasks are aborted on a best-effort
//! basis and their results are dropped if they still arrive.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

use crate::domain::account::AccountPage;
use crate::domain::search::SearchResult;
use crate::dto::actions::AccountAction;
use crate::services::{ServiceError, ServiceResult};

/// Quiescence window applied when no configuration overrides it.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// How the debounce deadline is placed within a burst of intents.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DebounceMode {
    /// The deadline restarts with every intent.
    #[default]
    Quiescence,
    /// The deadline is fixed by the first intent of a burst.
    Window,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebounceOptions {
    pub window: Duration,
    pub mode: DebounceMode,
}

impl Default for DebounceOptions {
    fn default() -> Self {
        Self {
            window: DEFAULT_DEBOUNCE,
            mode: DebounceMode::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchState<P> {
    Idle,
    Debouncing { payload: P, deadline: Instant },
    InFlight { generation: u64 },
}

/// Per-pipeline debounce and supersede bookkeeping.
#[derive(Debug)]
pub struct SearchMachine<P> {
    options: DebounceOptions,
    generation: u64,
    state: SearchState<P>,
}

impl<P> SearchMachine<P> {
    pub fn new(options: DebounceOptions) -> Self {
        Self {
            options,
            generation: 0,
            state: SearchState::Idle,
        }
    }

    pub fn state(&self) -> &SearchState<P> {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Records a new intent, replacing any payload still waiting in the burst.
    pub fn on_intent(&mut self, payload: P, now: Instant) {
        self.generation += 1;

        let deadline = match (&self.state, self.options.mode) {
            (SearchState::Debouncing { deadline, .. }, DebounceMode::Window) => *deadline,
            _ => now + self.options.window,
        };

        self.state = SearchState::Debouncing { payload, deadline };
    }

    /// Instant at which the pending payload is due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        match &self.state {
            SearchState::Debouncing { deadline, .. } => Some(*deadline),
            _ => None,
        }
    }

    /// Releases the pending payload once its deadline has passed.
    ///
    /// Returns the generation the resulting call is tagged with.
    pub fn on_deadline(&mut self, now: Instant) -> Option<(u64, P)> {
        match std::mem::replace(&mut self.state, SearchState::Idle) {
            SearchState::Debouncing { payload, deadline } if now >= deadline => {
                self.state = SearchState::InFlight {
                    generation: self.generation,
                };
                Some((self.generation, payload))
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Returns `true` when the call tagged `generation` is still current.
    pub fn on_settled(&mut self, generation: u64) -> bool {
        match self.state {
            SearchState::InFlight { generation: current } if current == generation => {
                self.state = SearchState::Idle;
                true
            }
            _ => false,
        }
    }
}

/// Collapses a backend outcome into the result reported downstream.
pub fn into_search_result(outcome: ServiceResult<AccountPage>) -> SearchResult {
    match outcome {
        Ok(page) => SearchResult::from(page),
        Err(err) => {
            log::warn!("Account search failed: {err}");
            SearchResult::empty()
        }
    }
}

type FetchFn<P> = Arc<dyn Fn(P) -> BoxFuture<'static, ServiceResult<AccountPage>> + Send + Sync>;

/// Drives a [`SearchMachine`] against a stream of intents.
pub struct SearchPipeline<P> {
    name: &'static str,
    machine: SearchMachine<P>,
    fetch: FetchFn<P>,
}

impl<P> SearchPipeline<P>
where
    P: Send + 'static,
{
    pub fn new<F>(name: &'static str, options: DebounceOptions, fetch: F) -> Self
    where
        F: Fn(P) -> BoxFuture<'static, ServiceResult<AccountPage>> + Send + Sync + 'static,
    {
        Self {
            name,
            machine: SearchMachine::new(options),
            fetch: Arc::new(fetch),
        }
    }

    pub fn spawn(
        self,
        intents: mpsc::UnboundedReceiver<P>,
        completions: mpsc::UnboundedSender<AccountAction>,
    ) -> JoinHandle<()> {
        tokio::spawn(self.run(intents, completions))
    }

    /// Runs until the intent stream closes and no call is outstanding, or
    /// until nobody listens for completions anymore.
    pub async fn run(
        mut self,
        mut intents: mpsc::UnboundedReceiver<P>,
        completions: mpsc::UnboundedSender<AccountAction>,
    ) {
        let (settled_tx, mut settled_rx) = mpsc::unbounded_channel();
        let mut in_flight: Option<JoinHandle<()>> = None;
        let mut intents_open = true;

        loop {
            let deadline = self.machine.deadline();

            tokio::select! {
                intent = intents.recv(), if intents_open => match intent {
                    Some(payload) => {
                        self.machine.on_intent(payload, Instant::now());
                        if let Some(call) = in_flight.take() {
                            log::debug!("{}: superseding in-flight search", self.name);
                            call.abort();
                        }
                    }
                    None => intents_open = false,
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some((generation, payload)) = self.machine.on_deadline(Instant::now()) {
                        log::debug!("{}: issuing search #{generation}", self.name);
                        let call = (self.fetch)(payload);
                        let settled_tx = settled_tx.clone();
                        in_flight = Some(tokio::spawn(async move {
                            let outcome = AssertUnwindSafe(call)
                                .catch_unwind()
                                .await
                                .unwrap_or_else(|_| {
                                    Err(ServiceError::Unavailable(
                                        "search call panicked".to_string(),
                                    ))
                                });
                            let _ = settled_tx.send((generation, outcome));
                        }));
                    }
                },
                Some((generation, outcome)) = settled_rx.recv() => {
                    if self.machine.on_settled(generation) {
                        in_flight = None;
                        let result = into_search_result(outcome);
                        if completions.send(AccountAction::SearchComplete(result)).is_err() {
                            log::debug!("{}: completion listener dropped", self.name);
                            break;
                        }
                    } else {
                        log::debug!("{}: discarding superseded search #{generation}", self.name);
                    }
                },
            }

            let idle = !matches!(self.machine.state(), SearchState::InFlight { .. });
            if !intents_open && idle {
                break;
            }
        }
    }
}
