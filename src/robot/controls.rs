use super::client::RobotClient;
use super::error::RobotError;
use super::models::{Command, Direction, RobotMode, SpeedLevel};
use super::state::ControlSnapshot;
use tokio::task::JoinHandle;

/// Rendered in place of a value the robot has not reported yet
pub const NOT_AVAILABLE: &str = "N/A";

/// A button on the control screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Direction(Direction),
    Stop,
    Mode(RobotMode),
}

impl Control {
    /// Mode buttons are the only controls that do not send a stop on release.
    pub fn is_mode_change(self) -> bool {
        matches!(self, Control::Mode(_))
    }

    pub fn command(self) -> Command {
        match self {
            Control::Direction(direction) => Command::Move(direction),
            Control::Stop => Command::Stop,
            Control::Mode(mode) => Command::SetMode(mode),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Control::Direction(direction) => direction.label(),
            Control::Stop => "Stop",
            Control::Mode(mode) => mode.name(),
        }
    }
}

/// Direction pad, top row first.
pub const DIRECTION_PAD: [[Control; 3]; 3] = [
    [
        Control::Direction(Direction::ForwardLeft),
        Control::Direction(Direction::Forward),
        Control::Direction(Direction::ForwardRight),
    ],
    [
        Control::Direction(Direction::Left),
        Control::Stop,
        Control::Direction(Direction::Right),
    ],
    [
        Control::Direction(Direction::BackwardLeft),
        Control::Direction(Direction::Backward),
        Control::Direction(Direction::BackwardRight),
    ],
];

/// What the control screen shows for a given snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub active_mode: Option<RobotMode>,
    pub show_speed_slider: bool,
    pub show_direction_pad: bool,
    pub distance_text: String,
    pub status_text: String,
    pub error: Option<String>,
    pub speed: SpeedLevel,
}

impl PanelView {
    pub fn from_snapshot(snapshot: &ControlSnapshot, speed: SpeedLevel) -> Self {
        let active_mode = snapshot.status.as_ref().and_then(|s| s.robot_mode());
        let manual = active_mode == Some(RobotMode::WifiControl);

        Self {
            active_mode,
            show_speed_slider: manual,
            show_direction_pad: manual,
            distance_text: snapshot
                .status
                .as_ref()
                .map(|s| format!("{:.2} cm", s.distance))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            status_text: snapshot
                .status
                .as_ref()
                .map(|s| s.status.clone())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            error: snapshot.error.clone(),
            speed,
        }
    }
}

/// Turns control screen input into dispatched commands.
pub struct ControlPanel {
    client: RobotClient,
    speed: SpeedLevel,
}

impl ControlPanel {
    pub fn new(client: RobotClient) -> Self {
        Self {
            client,
            speed: SpeedLevel::default(),
        }
    }

    pub fn client(&self) -> &RobotClient {
        &self.client
    }

    /// Slider position. Local to the panel, never read back from the robot.
    pub fn speed(&self) -> SpeedLevel {
        self.speed
    }

    /// Initial status poll when the screen opens.
    pub async fn mount(&self) {
        self.client.refresh().await;
    }

    pub async fn press(&self, control: Control) -> JoinHandle<()> {
        self.client.dispatch(control.command()).await
    }

    /// Sends a stop for every control except mode buttons.
    pub async fn release(&self, control: Control) -> Option<JoinHandle<()>> {
        if control.is_mode_change() {
            return None;
        }
        Some(self.client.dispatch(Command::Stop).await)
    }

    /// Moves the slider. Out-of-range values are rejected without a request.
    pub async fn set_speed(&mut self, value: u8) -> Result<JoinHandle<()>, RobotError> {
        let level = SpeedLevel::new(value)?;
        self.speed = level;
        Ok(self.client.dispatch(Command::SetSpeed(level)).await)
    }

    pub async fn select_mode(&self, mode: RobotMode) -> JoinHandle<()> {
        self.press(Control::Mode(mode)).await
    }

    pub fn view(&self) -> PanelView {
        PanelView::from_snapshot(&self.client.state().snapshot(), self.speed)
    }
}
