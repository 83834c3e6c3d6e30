use tm_core::Environment;
use tokio::sync::{broadcast, watch};

/// Source of the connectivity classification used by the resolver.
pub trait ConnectivityObserver: Send + Sync {
    /// Current classification.
    fn environment(&self) -> Environment;

    /// Every classification change.
    fn subscribe(&self) -> watch::Receiver<Environment>;

    /// Fires once per transition into `Online` that happens after the call.
    fn on_restored(&self) -> broadcast::Receiver<()>;
}
