pub mod client;
pub mod controls;
pub mod error;
pub mod models;
pub mod state;
pub mod transport;

pub use client::{RobotClient, DEFAULT_REFRESH_DELAY};
pub use controls::{Control, ControlPanel, PanelView, DIRECTION_PAD};
pub use error::{RobotError, FETCH_FAILED_MESSAGE, SEND_FAILED_MESSAGE};
pub use models::{Command, Direction, RobotMode, RobotRequest, RobotStatus, SpeedLevel};
pub use state::{ControlSnapshot, SharedControlState};
pub use transport::{HttpTransport, RobotTransport};
