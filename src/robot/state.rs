use super::models::RobotStatus;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::watch;

/// The status/error pair the control screen renders from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlSnapshot {
    pub status: Option<RobotStatus>,
    pub error: Option<String>,
    /// Time of the last successful status poll
    pub updated_at: Option<DateTime<Utc>>,
}

/// Single owner of the current [`ControlSnapshot`].
///
/// Cloning shares the same snapshot. Every update goes through one
/// `send_modify`, so readers never see a fresh status next to a stale error.
#[derive(Debug, Clone)]
pub struct SharedControlState {
    sender: Arc<watch::Sender<ControlSnapshot>>,
}

impl SharedControlState {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(ControlSnapshot::default());
        Self {
            sender: Arc::new(tx),
        }
    }

    pub fn snapshot(&self) -> ControlSnapshot {
        self.sender.borrow().clone()
    }

    pub fn status(&self) -> Option<RobotStatus> {
        self.sender.borrow().status.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.sender.borrow().error.clone()
    }

    /// Receiver that is notified on every snapshot change.
    pub fn subscribe(&self) -> watch::Receiver<ControlSnapshot> {
        self.sender.subscribe()
    }

    /// Returns true if no status poll succeeded within `max_age`
    pub fn is_stale(&self, max_age: Duration) -> bool {
        match self.sender.borrow().updated_at {
            Some(t) => Utc::now() - t >= max_age,
            None => true,
        }
    }

    pub(crate) fn apply_status(&self, status: RobotStatus) {
        self.sender.send_modify(|snapshot| {
            snapshot.status = Some(status);
            snapshot.error = None;
            snapshot.updated_at = Some(Utc::now());
        });
    }

    pub(crate) fn set_error(&self, message: &str) {
        self.sender.send_modify(|snapshot| {
            snapshot.error = Some(message.to_string());
        });
    }

    pub(crate) fn clear_error(&self) {
        self.sender.send_if_modified(|snapshot| snapshot.error.take().is_some());
    }
}

impl Default for SharedControlState {
    fn default() -> Self {
        Self::new()
    }
}
