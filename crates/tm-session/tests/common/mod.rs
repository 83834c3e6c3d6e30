#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tm_auth::MemoryAuthProvider;
use tm_core::{Environment, Identity, SessionState};
use tm_session::{
    Analytics, AnalyticsError, AnalyticsSink, EventParams, SessionDeps, SessionManager,
    SessionOptions, WatchConnectivity,
};
use tm_store::MemoryProfileStore;
use tokio::sync::watch;

pub const WAIT_TIMEOUT: Duration = Duration::from_secs(5);
pub const SETTLE: Duration = Duration::from_millis(100);

/// Analytics sink that keeps every event in memory
#[derive(Default)]
pub struct RecordingAnalyticsSink {
    events: Mutex<Vec<(String, EventParams)>>,
}

impl RecordingAnalyticsSink {
    pub fn events(&self) -> Vec<(String, EventParams)> {
        self.events.lock().unwrap().clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.events().into_iter().map(|(name, _)| name).collect()
    }

    pub fn last(&self, name: &str) -> Option<EventParams> {
        self.events()
            .into_iter()
            .rev()
            .find(|(event, _)| event == name)
            .map(|(_, params)| params)
    }
}

impl AnalyticsSink for RecordingAnalyticsSink {
    fn log_event(&self, name: &str, params: &EventParams) -> Result<(), AnalyticsError> {
        self.events
            .lock()
            .unwrap()
            .push((name.to_string(), params.clone()));
        Ok(())
    }
}

pub struct Harness {
    pub auth: Arc<MemoryAuthProvider>,
    pub store: Arc<MemoryProfileStore>,
    pub connectivity: Arc<WatchConnectivity>,
    pub sink: Arc<RecordingAnalyticsSink>,
    pub manager: SessionManager,
}

impl Harness {
    pub fn new(environment: Environment) -> Self {
        Self::with_options(environment, SessionOptions::default())
    }

    pub fn with_options(environment: Environment, options: SessionOptions) -> Self {
        let auth = Arc::new(MemoryAuthProvider::new());
        let store = Arc::new(MemoryProfileStore::new());
        let connectivity = Arc::new(WatchConnectivity::new(environment));
        let sink = Arc::new(RecordingAnalyticsSink::default());

        let deps = SessionDeps::new(auth.clone(), store.clone(), connectivity.clone())
            .with_analytics(Analytics::new(sink.clone()));
        let manager = SessionManager::new(deps, options);

        Self {
            auth,
            store,
            connectivity,
            sink,
            manager,
        }
    }

    /// Start the manager and wait for the initial notification to settle.
    pub async fn started(self) -> Self {
        self.manager.start().unwrap();
        let mut states = self.manager.subscribe();
        wait_for(&mut states, |state| !state.is_loading()).await;
        self
    }
}

pub fn identity(id: &str) -> Identity {
    Identity::new(id)
}

/// Wait until the published state satisfies `predicate`.
pub async fn wait_for(
    states: &mut watch::Receiver<SessionState>,
    predicate: impl FnMut(&SessionState) -> bool,
) -> SessionState {
    tokio::time::timeout(WAIT_TIMEOUT, states.wait_for(predicate))
        .await
        .expect("timed out waiting for session state")
        .expect("session state channel closed")
        .clone()
}
