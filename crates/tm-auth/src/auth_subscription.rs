use crate::AuthEvent;

use tokio::sync::mpsc;

/// Live subscription to authentication state changes.
///
/// Dropping the subscription unsubscribes; the provider prunes the closed
/// channel on its next notification.
pub struct AuthSubscription {
    receiver: mpsc::UnboundedReceiver<AuthEvent>,
}

impl AuthSubscription {
    pub fn new(receiver: mpsc::UnboundedReceiver<AuthEvent>) -> Self {
        Self { receiver }
    }

    /// Next notification, or `None` once the provider has gone away.
    pub async fn next(&mut self) -> Option<AuthEvent> {
        self.receiver.recv().await
    }

    pub fn unsubscribe(mut self) {
        self.receiver.close();
    }
}
