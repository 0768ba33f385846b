use thiserror::Error;

/// Shown after any failed command request.
pub const SEND_FAILED_MESSAGE: &str = "Failed to send command. Check connection.";
/// Shown after any failed status poll.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch status. Check connection.";

#[derive(Debug, Error)]
pub enum RobotError {
    #[error("speed level {0} is outside 0..=9")]
    InvalidSpeed(u8),

    #[error("mode {0} is outside 1..=3")]
    InvalidMode(u8),

    #[error("invalid robot base url `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("request to robot failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("robot answered with HTTP {0}")]
    Status(u16),

    #[error("could not decode robot status: {0}")]
    Decode(String),
}
