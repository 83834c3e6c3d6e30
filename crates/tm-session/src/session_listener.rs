//! Single writer of the session state.
//!
//! The listener loop owns the state channel. Resolutions run as spawned
//! tasks and report back over a channel tagged with their cancellation
//! token; every new notification cancels the previous token, so a stale
//! result is recognised and dropped when it arrives.

use crate::{
    ArmOutcome, ConnectivityObserver, Metrics, ProfileResolver, ReconciliationOutcome,
    ReconciliationScheduler, Result as SessionErrorResult,
};

use std::sync::Arc;

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use log::{debug, error, info, warn};
use tm_auth::{AuthEvent, AuthSubscription};
use tm_core::{Environment, Identity, ProfileSource, ResolvedProfile, SessionState};
use tokio::sync::{mpsc, watch};
use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;

struct Resolution {
    token: CancellationToken,
    identity: Identity,
    environment: Environment,
    outcome: SessionErrorResult<ResolvedProfile>,
}

pub(crate) struct SessionListener {
    pub(crate) state: Arc<watch::Sender<SessionState>>,
    pub(crate) resolver: Arc<ProfileResolver>,
    pub(crate) scheduler: Arc<ReconciliationScheduler>,
    pub(crate) connectivity: Arc<dyn ConnectivityObserver>,
    pub(crate) reconcile_on_reconnect: bool,
    pub(crate) metrics: Metrics,
}

impl SessionListener {
    pub(crate) async fn run(self, mut subscription: AuthSubscription, shutdown: CancellationToken) {
        let (results_tx, mut results_rx) = mpsc::unbounded_channel::<Resolution>();
        let mut reconciliations: FuturesUnordered<JoinHandle<ReconciliationOutcome>> =
            FuturesUnordered::new();
        let mut current: Option<CancellationToken> = None;

        info!("Session listener running");

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                event = subscription.next() => match event {
                    Some(event) => {
                        current = self.handle_event(event, &shutdown, current.take(), &results_tx);
                    }
                    None => {
                        warn!("Authentication provider closed the subscription");
                        break;
                    }
                },
                Some(resolution) = results_rx.recv() => {
                    if let Some(handle) = self.apply_resolution(resolution) {
                        reconciliations.push(handle);
                    }
                }
                Some(joined) = reconciliations.next(), if !reconciliations.is_empty() => {
                    self.apply_reconciliation(joined);
                }
            }
        }

        if let Some(token) = current {
            token.cancel();
        }
        self.scheduler.abandon_all();
        subscription.unsubscribe();
        info!("Session listener stopped");
    }

    /// Returns the token of the resolution now in flight, if any.
    fn handle_event(
        &self,
        event: AuthEvent,
        shutdown: &CancellationToken,
        previous: Option<CancellationToken>,
        results: &mpsc::UnboundedSender<Resolution>,
    ) -> Option<CancellationToken> {
        if let Some(previous) = previous {
            previous.cancel();
        }

        match event {
            AuthEvent::SignedOut => {
                self.scheduler.abandon_all();
                self.publish(SessionState::SignedOut);
                None
            }
            AuthEvent::SignedIn(identity) => {
                self.scheduler.retain_only(&identity.id);
                self.publish(SessionState::Resolving {
                    identity: identity.clone(),
                });

                let token = shutdown.child_token();
                let environment = self.connectivity.environment();
                let resolver = Arc::clone(&self.resolver);
                let results = results.clone();
                let resolution_token = token.clone();

                tokio::spawn(async move {
                    let outcome = resolver.resolve(&identity, environment).await;
                    // The listener may already have exited.
                    let _ = results.send(Resolution {
                        token: resolution_token,
                        identity,
                        environment,
                        outcome,
                    });
                });

                Some(token)
            }
        }
    }

    fn apply_resolution(&self, resolution: Resolution) -> Option<JoinHandle<ReconciliationOutcome>> {
        let Resolution {
            token,
            identity,
            environment,
            outcome,
        } = resolution;

        if token.is_cancelled() {
            debug!("Discarding stale resolution for {}", identity.id);
            self.metrics.resolution_discarded();
            return None;
        }

        match outcome {
            Ok(resolved) => {
                let handle = if resolved.is_local() {
                    self.arm_reconciliation(&resolved, environment)
                } else {
                    // A durable profile ends the life of any earlier local one.
                    if self.scheduler.abandon(&identity.id) {
                        debug!("Dropped pending local profile for {}", identity.id);
                    }
                    None
                };

                self.metrics.resolution_completed(resolved.source);
                self.publish(SessionState::Resolved {
                    identity,
                    profile: resolved.profile,
                    source: resolved.source,
                });
                handle
            }
            Err(e) => {
                error!("Profile resolution failed for '{}': {}", identity.id, e);
                self.metrics.resolution_failed();
                self.publish(SessionState::SignedOut);
                None
            }
        }
    }

    fn arm_reconciliation(
        &self,
        resolved: &ResolvedProfile,
        environment: Environment,
    ) -> Option<JoinHandle<ReconciliationOutcome>> {
        if !self.reconcile_on_reconnect {
            return None;
        }

        match self.scheduler.arm_from(resolved.profile.clone(), environment) {
            ArmOutcome::Armed(handle) => Some(handle),
            ArmOutcome::AlreadyPending => None,
        }
    }

    /// A durable profile for the local profile currently shown replaces it.
    fn apply_reconciliation(&self, joined: Result<ReconciliationOutcome, JoinError>) {
        let written = match joined {
            Ok(outcome) => match outcome.durable_profile() {
                Some(profile) => profile.clone(),
                None => {
                    debug!("Reconciliation for {} ended: {}", outcome.id(), outcome.name());
                    return;
                }
            },
            Err(e) => {
                warn!("Reconciliation task failed: {}", e);
                return;
            }
        };

        let upgraded = self.state.send_if_modified(|state| match state {
            SessionState::Resolved {
                identity,
                profile,
                source,
            } if identity.id == written.id && source.is_local() => {
                *profile = written.clone();
                *source = ProfileSource::Stored;
                true
            }
            _ => false,
        });

        if upgraded {
            info!("Session profile for {} is now durable", written.id);
            self.metrics.state_published("resolved");
        }
    }

    fn publish(&self, state: SessionState) {
        debug!("Session state -> {}", state.name());
        self.metrics.state_published(state.name());
        self.state.send_replace(state);
    }
}
