//! One-shot deferred writes for locally synthesized profiles.
//!
//! Each armed identity gets a single task that waits for the next
//! connectivity-restored event, writes the pending profile if durable storage
//! still has no record for it, and exits. An existing record always wins over
//! the local profile. Arming an identity that already has a pending write
//! replaces the pending profile instead of starting a second task.
//! Reconciliation is best-effort: a write that fails is logged and dropped.

use crate::{ArmOutcome, ConnectivityObserver, Metrics, ReconciliationOutcome};

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};
use tm_core::{Environment, Profile};
use tm_store::ProfileStore;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, info_span};

type PendingWrites = Arc<Mutex<HashMap<String, PendingWrite>>>;

struct PendingWrite {
    profile: Profile,
    cancel: CancellationToken,
}

pub struct ReconciliationScheduler {
    store: Arc<dyn ProfileStore>,
    connectivity: Arc<dyn ConnectivityObserver>,
    pending: PendingWrites,
    metrics: Metrics,
}

impl ReconciliationScheduler {
    pub fn new(store: Arc<dyn ProfileStore>, connectivity: Arc<dyn ConnectivityObserver>) -> Self {
        Self {
            store,
            connectivity,
            pending: Arc::new(Mutex::new(HashMap::new())),
            metrics: Metrics::new(),
        }
    }

    fn lock(pending: &PendingWrites) -> MutexGuard<'_, HashMap<String, PendingWrite>> {
        pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a deferred write of `profile` that fires on the next
    /// connectivity-restored event. Must be called within a Tokio runtime.
    pub fn arm(&self, profile: Profile) -> ArmOutcome {
        self.arm_from(profile, Environment::Online)
    }

    /// Like [`arm`](Self::arm) for a profile resolved under `resolved_in`.
    /// When that resolution skipped durable storage and connectivity has
    /// come back since, the write goes out immediately.
    pub fn arm_from(&self, profile: Profile, resolved_in: Environment) -> ArmOutcome {
        let id = profile.id.clone();
        let mut pending = Self::lock(&self.pending);

        if let Some(existing) = pending.get_mut(&id) {
            debug!("Reconciliation already pending for {}", id);
            existing.profile = profile;
            return ArmOutcome::AlreadyPending;
        }

        // Subscribe before the entry becomes visible so no restoration is missed.
        let restored = self.connectivity.on_restored();
        let restored_since = !resolved_in.reads_durably()
            && self.connectivity.environment() == Environment::Online;
        let cancel = CancellationToken::new();
        pending.insert(
            id.clone(),
            PendingWrite {
                profile,
                cancel: cancel.clone(),
            },
        );
        self.metrics.reconciliation_armed(pending.len());
        drop(pending);

        if restored_since {
            info!("Reconciliation armed for {}, connectivity already restored", id);
        } else {
            info!("Reconciliation armed for {}", id);
        }

        let span = info_span!("reconcile_profile", identity = %id);
        let task = Self::run(
            id,
            restored,
            restored_since,
            cancel,
            Arc::clone(&self.store),
            Arc::clone(&self.pending),
            self.metrics.clone(),
        );

        ArmOutcome::Armed(tokio::spawn(task.instrument(span)))
    }

    /// Drop the pending write for `id`. Returns whether one existed.
    pub fn abandon(&self, id: &str) -> bool {
        let mut pending = Self::lock(&self.pending);
        let removed = pending.remove(id);
        self.metrics.reconciliation_pending(pending.len());
        drop(pending);

        match removed {
            Some(write) => {
                write.cancel.cancel();
                info!("Reconciliation abandoned for {}", id);
                true
            }
            None => false,
        }
    }

    /// Drop every pending write. Returns how many were dropped.
    pub fn abandon_all(&self) -> usize {
        self.abandon_where(|_| true)
    }

    /// Drop pending writes for every identity except `id`.
    pub fn retain_only(&self, id: &str) -> usize {
        self.abandon_where(|pending_id| pending_id != id)
    }

    pub fn pending_count(&self) -> usize {
        Self::lock(&self.pending).len()
    }

    pub fn is_pending(&self, id: &str) -> bool {
        Self::lock(&self.pending).contains_key(id)
    }

    fn abandon_where(&self, predicate: impl Fn(&str) -> bool) -> usize {
        let mut pending = Self::lock(&self.pending);
        let ids: Vec<String> = pending
            .keys()
            .filter(|id| predicate(id.as_str()))
            .cloned()
            .collect();

        for id in &ids {
            if let Some(write) = pending.remove(id) {
                write.cancel.cancel();
            }
        }
        self.metrics.reconciliation_pending(pending.len());
        drop(pending);

        if !ids.is_empty() {
            info!("Reconciliation abandoned for {} identities", ids.len());
        }
        ids.len()
    }

    async fn run(
        id: String,
        mut restored: broadcast::Receiver<()>,
        restored_since: bool,
        cancel: CancellationToken,
        store: Arc<dyn ProfileStore>,
        pending: PendingWrites,
        metrics: Metrics,
    ) -> ReconciliationOutcome {
        let fired = if restored_since {
            true
        } else {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => false,
                result = restored.recv() => match result {
                    Ok(()) | Err(RecvError::Lagged(_)) => true,
                    Err(RecvError::Closed) => {
                        warn!("Connectivity observer closed before {} was reconciled", id);
                        false
                    }
                },
            }
        };

        // An abandoned entry may already have been replaced by a newer arm.
        let profile = {
            let mut pending = Self::lock(&pending);
            if cancel.is_cancelled() {
                None
            } else {
                let write = pending.remove(&id);
                metrics.reconciliation_pending(pending.len());
                write.map(|write| write.profile)
            }
        };

        let outcome = match (fired, profile) {
            (true, Some(profile)) => Self::write(id, profile, &*store).await,
            _ => ReconciliationOutcome::Abandoned { id },
        };

        metrics.reconciliation_finished(&outcome);
        outcome
    }

    async fn write(
        id: String,
        profile: Profile,
        store: &dyn ProfileStore,
    ) -> ReconciliationOutcome {
        match store.read(&id).await {
            Ok(Some(stored)) => {
                info!("Durable profile for {} already exists, dropping local profile", id);
                return ReconciliationOutcome::Superseded { stored };
            }
            Ok(None) => {}
            Err(e) => {
                warn!("Reconciliation read failed for {}: {}", id, e);
                return ReconciliationOutcome::Failed {
                    id,
                    message: e.to_string(),
                };
            }
        }

        match store.create(&id, &profile).await {
            Ok(()) => {
                info!("Reconciled local profile for {}", id);
                ReconciliationOutcome::Written { profile }
            }
            Err(e) => {
                warn!("Reconciliation write failed for {}: {}", id, e);
                ReconciliationOutcome::Failed {
                    id,
                    message: e.to_string(),
                }
            }
        }
    }
}

impl Drop for ReconciliationScheduler {
    fn drop(&mut self) {
        self.abandon_all();
    }
}
