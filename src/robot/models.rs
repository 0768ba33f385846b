use super::error::RobotError;
use serde::Deserialize;
use std::fmt;

/// Lowest speed the robot accepts
pub const MIN_SPEED: u8 = 0;
/// Highest speed the robot accepts
pub const MAX_SPEED: u8 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
    ForwardLeft,
    ForwardRight,
    BackwardLeft,
    BackwardRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Forward,
        Direction::Backward,
        Direction::Left,
        Direction::Right,
        Direction::ForwardLeft,
        Direction::ForwardRight,
        Direction::BackwardLeft,
        Direction::BackwardRight,
    ];

    /// Single-character state token understood by the firmware.
    pub fn state_token(self) -> char {
        match self {
            Direction::Forward => 'F',
            Direction::Backward => 'B',
            Direction::Left => 'L',
            Direction::Right => 'R',
            Direction::ForwardLeft => 'G',
            Direction::ForwardRight => 'I',
            Direction::BackwardLeft => 'H',
            Direction::BackwardRight => 'J',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Forward => "Forward",
            Direction::Backward => "Backward",
            Direction::Left => "Left",
            Direction::Right => "Right",
            Direction::ForwardLeft => "Forward Left",
            Direction::ForwardRight => "Forward Right",
            Direction::BackwardLeft => "Back Left",
            Direction::BackwardRight => "Back Right",
        }
    }
}

/// Speed setting in the range `0..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpeedLevel(u8);

impl SpeedLevel {
    pub fn new(level: u8) -> Result<Self, RobotError> {
        if level > MAX_SPEED {
            return Err(RobotError::InvalidSpeed(level));
        }
        Ok(SpeedLevel(level))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for SpeedLevel {
    fn default() -> Self {
        SpeedLevel(5)
    }
}

impl TryFrom<u8> for SpeedLevel {
    type Error = RobotError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        SpeedLevel::new(level)
    }
}

impl fmt::Display for SpeedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RobotMode {
    WifiControl = 1,
    ObstacleAvoidance = 2,
    Follow = 3,
}

impl RobotMode {
    pub const ALL: [RobotMode; 3] = [
        RobotMode::WifiControl,
        RobotMode::ObstacleAvoidance,
        RobotMode::Follow,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            RobotMode::WifiControl => "WiFi Control",
            RobotMode::ObstacleAvoidance => "Obstacle Avoidance",
            RobotMode::Follow => "Follow",
        }
    }
}

impl TryFrom<u8> for RobotMode {
    type Error = RobotError;

    fn try_from(mode: u8) -> Result<Self, Self::Error> {
        match mode {
            1 => Ok(RobotMode::WifiControl),
            2 => Ok(RobotMode::ObstacleAvoidance),
            3 => Ok(RobotMode::Follow),
            other => Err(RobotError::InvalidMode(other)),
        }
    }
}

impl fmt::Display for RobotMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single user intent. Built on an input event and consumed right away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Stop,
    SetSpeed(SpeedLevel),
    SetMode(RobotMode),
}

impl Command {
    pub fn to_request(self) -> RobotRequest {
        match self {
            Command::Move(direction) => RobotRequest::State(direction.state_token().to_string()),
            Command::Stop => RobotRequest::State("S".to_string()),
            Command::SetSpeed(level) => RobotRequest::State(level.to_string()),
            Command::SetMode(mode) => RobotRequest::Mode(mode.number()),
        }
    }
}

/// Wire form of an exchange with the robot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RobotRequest {
    /// `GET /?State=<token>`
    State(String),
    /// `GET /mode?mode=<n>`
    Mode(u8),
    /// `GET /status`
    Status,
}

impl RobotRequest {
    /// Path relative to the configured base URL.
    pub fn path(&self) -> &'static str {
        match self {
            RobotRequest::State(_) => "",
            RobotRequest::Mode(_) => "mode",
            RobotRequest::Status => "status",
        }
    }

    pub fn query(&self) -> Option<(&'static str, String)> {
        match self {
            RobotRequest::State(token) => Some(("State", token.clone())),
            RobotRequest::Mode(mode) => Some(("mode", mode.to_string())),
            RobotRequest::Status => None,
        }
    }
}

impl fmt::Display for RobotRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.query() {
            Some((key, value)) => write!(f, "GET /{}?{}={}", self.path(), key, value),
            None => write!(f, "GET /{}", self.path()),
        }
    }
}

/// Snapshot returned by `GET /status`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RobotStatus {
    pub mode: u8,
    pub mode_name: String,
    pub distance: f64, // cm
    pub speed: u8,
    pub status: String,
}

impl RobotStatus {
    pub fn robot_mode(&self) -> Option<RobotMode> {
        RobotMode::try_from(self.mode).ok()
    }
}
