use async_trait::async_trait;
use robot_remote::robot::{HttpTransport, RobotError, RobotRequest, RobotTransport};
use robot_remote::RobotClient;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

#[allow(dead_code)]
pub const STATUS_JSON: &str = r#"{"mode":1,"mode_name":"WiFi Control","distance":12.34,"speed":5,"status":"Moving Forward"}"#;

#[allow(dead_code)]
pub fn status_json(mode: u8, status: &str) -> String {
    serde_json::json!({
        "mode": mode,
        "mode_name": "any",
        "distance": 10.0,
        "speed": 3,
        "status": status,
    })
    .to_string()
}

/// Client pointed at a wiremock server, with the regular 200 ms refresh delay.
#[allow(dead_code)]
pub fn http_client(base_url: &str) -> RobotClient {
    let transport = HttpTransport::new(base_url, Duration::from_secs(2))
        .expect("Failed to create HTTP transport");
    RobotClient::new(Arc::new(transport))
}

/// In-memory robot that records every request with the (tokio) time it
/// arrived. Works with a paused clock.
#[allow(dead_code)]
pub struct RecordingTransport {
    calls: Mutex<Vec<(RobotRequest, Instant)>>,
    status_replies: Mutex<VecDeque<(Duration, String)>>,
    default_status: String,
    pub fail_commands: AtomicBool,
    pub fail_status: AtomicBool,
}

#[allow(dead_code)]
impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            status_replies: Mutex::new(VecDeque::new()),
            default_status: STATUS_JSON.to_string(),
            fail_commands: AtomicBool::new(false),
            fail_status: AtomicBool::new(false),
        })
    }

    /// Queue a status reply that arrives after `delay`.
    pub fn push_status(&self, delay: Duration, body: impl Into<String>) {
        self.status_replies
            .lock()
            .unwrap()
            .push_back((delay, body.into()));
    }

    pub fn calls(&self) -> Vec<(RobotRequest, Instant)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn requests(&self) -> Vec<RobotRequest> {
        self.calls().into_iter().map(|(r, _)| r).collect()
    }

    pub fn status_polls(&self) -> usize {
        self.requests()
            .iter()
            .filter(|r| **r == RobotRequest::Status)
            .count()
    }

    pub fn client(self: &Arc<Self>) -> RobotClient {
        RobotClient::new(self.clone())
    }
}

#[async_trait]
impl RobotTransport for RecordingTransport {
    async fn execute(&self, request: &RobotRequest) -> Result<String, RobotError> {
        self.calls
            .lock()
            .unwrap()
            .push((request.clone(), Instant::now()));

        match request {
            RobotRequest::Status => {
                if self.fail_status.load(Ordering::SeqCst) {
                    return Err(RobotError::Status(503));
                }
                let next = self.status_replies.lock().unwrap().pop_front();
                let (delay, body) = next.unwrap_or((Duration::ZERO, self.default_status.clone()));
                tokio::time::sleep(delay).await;
                Ok(body)
            }
            _ => {
                if self.fail_commands.load(Ordering::SeqCst) {
                    return Err(RobotError::Status(500));
                }
                Ok(String::new())
            }
        }
    }
}
