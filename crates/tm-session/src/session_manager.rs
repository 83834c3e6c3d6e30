//! Explicitly owned session lifecycle.
//!
//! A `SessionManager` owns the published session state and at most one
//! listener task. Dependencies are injected through [`SessionDeps`].

use crate::analytics::DEFAULT_AUTH_METHOD;
use crate::{
    Analytics, Metrics, ProfileResolver, ReconciliationScheduler, Result as SessionErrorResult,
    SessionDeps, SessionError, SessionListener, SessionOptions,
};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{info, warn};
use tm_auth::AuthError;
use tm_core::{Identity, SessionState};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

struct RunningListener {
    shutdown: CancellationToken,
    handle: JoinHandle<()>,
}

pub struct SessionManager {
    deps: SessionDeps,
    resolver: Arc<ProfileResolver>,
    scheduler: Arc<ReconciliationScheduler>,
    options: SessionOptions,
    state: Arc<watch::Sender<SessionState>>,
    listener: Mutex<Option<RunningListener>>,
    metrics: Metrics,
}

impl SessionManager {
    pub fn new(deps: SessionDeps, options: SessionOptions) -> Self {
        let resolver = ProfileResolver::new(
            Arc::clone(&deps.auth),
            Arc::clone(&deps.store),
            options.resolver,
        );
        let scheduler =
            ReconciliationScheduler::new(Arc::clone(&deps.store), Arc::clone(&deps.connectivity));

        Self {
            deps,
            resolver: Arc::new(resolver),
            scheduler: Arc::new(scheduler),
            options,
            state: Arc::new(watch::Sender::new(SessionState::Idle)),
            listener: Mutex::new(None),
            metrics: Metrics::new(),
        }
    }

    fn lock_listener(&self) -> MutexGuard<'_, Option<RunningListener>> {
        self.listener.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Subscribe to authentication changes and start resolving them.
    /// Must be called within a Tokio runtime.
    pub fn start(&self) -> SessionErrorResult<()> {
        let mut listener = self.lock_listener();
        if listener
            .as_ref()
            .is_some_and(|running| !running.handle.is_finished())
        {
            return Err(SessionError::already_started());
        }

        let shutdown = CancellationToken::new();
        let subscription = self.deps.auth.subscribe();
        let session_listener = SessionListener {
            state: Arc::clone(&self.state),
            resolver: Arc::clone(&self.resolver),
            scheduler: Arc::clone(&self.scheduler),
            connectivity: Arc::clone(&self.deps.connectivity),
            reconcile_on_reconnect: self.options.reconcile_on_reconnect,
            metrics: self.metrics.clone(),
        };

        let handle = tokio::spawn(session_listener.run(subscription, shutdown.clone()));
        *listener = Some(RunningListener { shutdown, handle });

        info!("Session manager started");
        Ok(())
    }

    /// Cancel the listener and wait for it to exit. Resolutions still in
    /// flight complete without touching the session state.
    pub async fn stop(&self) -> SessionErrorResult<()> {
        let running = self
            .lock_listener()
            .take()
            .ok_or_else(SessionError::not_started)?;

        running.shutdown.cancel();
        if let Err(e) = running.handle.await {
            warn!("Session listener exited abnormally: {}", e);
        }

        info!("Session manager stopped");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.lock_listener()
            .as_ref()
            .is_some_and(|running| !running.handle.is_finished())
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    pub fn pending_reconciliations(&self) -> usize {
        self.scheduler.pending_count()
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> SessionErrorResult<Identity> {
        let result = self.deps.auth.sign_in_with_email(email, password).await;
        self.track_auth_result(result, |analytics, identity| {
            analytics.track_login(&identity.id, DEFAULT_AUTH_METHOD);
        })
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> SessionErrorResult<Identity> {
        let result = self.deps.auth.sign_up_with_email(email, password).await;
        self.track_auth_result(result, |analytics, identity| {
            analytics.track_sign_up(&identity.id, DEFAULT_AUTH_METHOD);
        })
    }

    /// End the session. The logout event is tracked before the provider call.
    pub async fn logout(&self) -> SessionErrorResult<()> {
        let state = self.state();
        if let Some(identity) = state.identity() {
            self.deps.analytics.track_logout(&identity.id);
        }

        self.deps.auth.sign_out().await?;
        Ok(())
    }

    fn track_auth_result(
        &self,
        result: Result<Identity, AuthError>,
        on_success: impl FnOnce(&Analytics, &Identity),
    ) -> SessionErrorResult<Identity> {
        match result {
            Ok(identity) => {
                on_success(&self.deps.analytics, &identity);
                Ok(identity)
            }
            Err(e) => {
                warn!("Authentication failed: {}", e);
                self.deps
                    .analytics
                    .track_error(e.user_message(), Some(e.code()));
                Err(SessionError::from(e))
            }
        }
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        if let Some(running) = self.lock_listener().take() {
            running.shutdown.cancel();
        }
    }
}
