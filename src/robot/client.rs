use super::error::{RobotError, FETCH_FAILED_MESSAGE, SEND_FAILED_MESSAGE};
use super::models::{Command, RobotRequest, RobotStatus};
use super::state::SharedControlState;
use super::transport::{HttpTransport, RobotTransport};
use crate::Config;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// How long to wait after a command before reading the status back
pub const DEFAULT_REFRESH_DELAY: Duration = Duration::from_millis(200);

/// Issues commands and status polls against one robot and keeps the
/// resulting [`SharedControlState`] up to date.
#[derive(Clone)]
pub struct RobotClient {
    transport: Arc<dyn RobotTransport>,
    state: SharedControlState,
    refresh_delay: Duration,
}

impl RobotClient {
    pub fn new(transport: Arc<dyn RobotTransport>) -> Self {
        Self {
            transport,
            state: SharedControlState::new(),
            refresh_delay: DEFAULT_REFRESH_DELAY,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, RobotError> {
        let transport = HttpTransport::from_config(config)?;
        Ok(Self::new(Arc::new(transport)).with_refresh_delay(config.refresh_delay()))
    }

    pub fn with_refresh_delay(mut self, delay: Duration) -> Self {
        self.refresh_delay = delay;
        self
    }

    pub fn state(&self) -> &SharedControlState {
        &self.state
    }

    pub fn refresh_delay(&self) -> Duration {
        self.refresh_delay
    }

    /// Sends one command request. Does not touch the shared state.
    pub async fn send(&self, command: Command) -> Result<(), RobotError> {
        let request = command.to_request();
        self.transport.execute(&request).await?;
        tracing::info!(request = %request, "Sent command");
        Ok(())
    }

    /// Reads the current status. Does not touch the shared state.
    pub async fn fetch_status(&self) -> Result<RobotStatus, RobotError> {
        let body = self.transport.execute(&RobotRequest::Status).await?;
        serde_json::from_str(&body).map_err(|e| RobotError::Decode(e.to_string()))
    }

    /// Polls the status and stores the outcome.
    ///
    /// On failure the previous status is kept and only the error is set.
    pub async fn refresh(&self) {
        match self.fetch_status().await {
            Ok(status) => {
                tracing::debug!(
                    mode     = status.mode,
                    speed    = status.speed,
                    distance = status.distance,
                    status   = %status.status,
                    "Fetched robot status"
                );
                self.state.apply_status(status);
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching status");
                self.state.set_error(FETCH_FAILED_MESSAGE);
            }
        }
    }

    /// Sends `command`, records the outcome and schedules one status refresh
    /// after the refresh delay, whether or not the send succeeded.
    ///
    /// The returned handle resolves once that refresh has run. Dropping it
    /// does not cancel the refresh.
    pub async fn dispatch(&self, command: Command) -> JoinHandle<()> {
        match self.send(command).await {
            Ok(()) => self.state.clear_error(),
            Err(e) => {
                tracing::error!(command = ?command, error = %e, "Error sending command");
                self.state.set_error(SEND_FAILED_MESSAGE);
            }
        }

        let client = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(client.refresh_delay).await;
            client.refresh().await;
        })
    }
}
