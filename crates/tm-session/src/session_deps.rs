use crate::{Analytics, ConnectivityObserver};

use std::sync::Arc;

use tm_auth::AuthProvider;
use tm_store::ProfileStore;

/// External capabilities a session manager is built from.
#[derive(Clone)]
pub struct SessionDeps {
    pub auth: Arc<dyn AuthProvider>,
    pub store: Arc<dyn ProfileStore>,
    pub connectivity: Arc<dyn ConnectivityObserver>,
    pub analytics: Analytics,
}

impl SessionDeps {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        store: Arc<dyn ProfileStore>,
        connectivity: Arc<dyn ConnectivityObserver>,
    ) -> Self {
        Self {
            auth,
            store,
            connectivity,
            analytics: Analytics::disabled(),
        }
    }

    pub fn with_analytics(mut self, analytics: Analytics) -> Self {
        self.analytics = analytics;
        self
    }
}
