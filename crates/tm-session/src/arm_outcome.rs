use crate::ReconciliationOutcome;

use tokio::task::JoinHandle;

/// Result of asking the scheduler for a deferred write.
#[derive(Debug)]
pub enum ArmOutcome {
    /// A new one-shot write is waiting for connectivity
    Armed(JoinHandle<ReconciliationOutcome>),
    /// A write for the identity was already waiting; its profile was replaced
    AlreadyPending,
}

impl ArmOutcome {
    pub fn is_armed(&self) -> bool {
        matches!(self, Self::Armed(_))
    }

    pub fn into_handle(self) -> Option<JoinHandle<ReconciliationOutcome>> {
        match self {
            Self::Armed(handle) => Some(handle),
            Self::AlreadyPending => None,
        }
    }
}
