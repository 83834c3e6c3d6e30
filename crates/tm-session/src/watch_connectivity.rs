use crate::ConnectivityObserver;

use log::info;
use tm_core::Environment;
use tokio::sync::{broadcast, watch};

const RESTORED_CHANNEL_CAPACITY: usize = 16;

/// Connectivity observer driven by explicit updates from the host.
pub struct WatchConnectivity {
    environment: watch::Sender<Environment>,
    restored: broadcast::Sender<()>,
}

impl WatchConnectivity {
    pub fn new(environment: Environment) -> Self {
        let (restored, _) = broadcast::channel(RESTORED_CHANNEL_CAPACITY);
        Self {
            environment: watch::Sender::new(environment),
            restored,
        }
    }

    pub fn online() -> Self {
        Self::new(Environment::Online)
    }

    pub fn offline() -> Self {
        Self::new(Environment::Offline)
    }

    pub fn server() -> Self {
        Self::new(Environment::Server)
    }

    pub fn set_online(&self, online: bool) {
        self.set_environment(if online {
            Environment::Online
        } else {
            Environment::Offline
        });
    }

    /// Returns whether the classification changed.
    pub fn set_environment(&self, environment: Environment) -> bool {
        let mut was_online = false;
        let changed = self.environment.send_if_modified(|current| {
            if *current == environment {
                return false;
            }
            was_online = *current == Environment::Online;
            *current = environment;
            true
        });

        if changed && environment == Environment::Online && !was_online {
            info!("Connectivity restored");
            // No receivers means nothing is waiting for the transition.
            let _ = self.restored.send(());
        }

        changed
    }
}

impl ConnectivityObserver for WatchConnectivity {
    fn environment(&self) -> Environment {
        *self.environment.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<Environment> {
        self.environment.subscribe()
    }

    fn on_restored(&self) -> broadcast::Receiver<()> {
        self.restored.subscribe()
    }
}
