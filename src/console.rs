//! Line-based input for the `robot-remote` terminal front-end.

use crate::robot::controls::{Control, ControlPanel, PanelView};
use crate::robot::models::{Direction, RobotMode};
use std::future::Future;
use std::pin::Pin;
use tokio::task::JoinHandle;

pub const HELP: &str = "\
commands:
  f b l r fl fr bl br   move briefly (press, then release)
  hold <dir>            keep moving until `stop`
  stop                  stop
  speed <0-9>           set speed
  mode <1-3>            1 WiFi Control, 2 Obstacle Avoidance, 3 Follow
  status                poll the robot
  help | quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleInput {
    /// Press and release, like a tap on a pad button.
    Tap(Control),
    /// Press without release.
    Hold(Control),
    Speed(u8),
    Mode(RobotMode),
    Status,
    Help,
    Quit,
}

impl ConsoleInput {
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let head = words
            .next()
            .ok_or_else(|| "empty input".to_string())?
            .to_ascii_lowercase();
        let arg = words.next();

        if words.next().is_some() {
            return Err(format!("too many arguments for `{head}`"));
        }

        match (head.as_str(), arg) {
            ("stop" | "s", None) => Ok(ConsoleInput::Hold(Control::Stop)),
            ("hold", Some(dir)) => {
                parse_direction(dir).map(|d| ConsoleInput::Hold(Control::Direction(d)))
            }
            ("speed", Some(value)) => value
                .parse()
                .map(ConsoleInput::Speed)
                .map_err(|_| format!("`{value}` is not a speed")),
            ("mode", Some(value)) => value
                .parse::<u8>()
                .map_err(|_| format!("`{value}` is not a mode"))
                .and_then(|m| RobotMode::try_from(m).map_err(|e| e.to_string()))
                .map(ConsoleInput::Mode),
            ("status", None) => Ok(ConsoleInput::Status),
            ("help" | "?", None) => Ok(ConsoleInput::Help),
            ("quit" | "exit" | "q", None) => Ok(ConsoleInput::Quit),
            (dir, None) => {
                parse_direction(dir).map(|d| ConsoleInput::Tap(Control::Direction(d)))
            }
            _ => Err(format!("unknown command `{}`", line.trim())),
        }
    }

    /// Runs the input against `panel`, returning the scheduled refreshes.
    pub async fn apply(self, panel: &mut ControlPanel) -> Result<Vec<JoinHandle<()>>, String> {
        let handles = match self {
            ConsoleInput::Tap(control) => {
                let mut handles = vec![panel.press(control).await];
                handles.extend(panel.release(control).await);
                handles
            }
            ConsoleInput::Hold(control) => vec![panel.press(control).await],
            ConsoleInput::Speed(value) => {
                vec![panel.set_speed(value).await.map_err(|e| e.to_string())?]
            }
            ConsoleInput::Mode(mode) => vec![panel.select_mode(mode).await],
            ConsoleInput::Status => {
                panel.client().refresh().await;
                Vec::new()
            }
            ConsoleInput::Help | ConsoleInput::Quit => Vec::new(),
        };
        Ok(handles)
    }
}

/// Runs `work` unless `interrupt` resolves first, in which case `None` is
/// returned and `work` is dropped.
///
/// Pass the same pinned interrupt to every call. Once it has been polled it
/// keeps its registration, so an interrupt that arrives between two calls is
/// seen by the next one.
pub async fn interruptible<I, F>(interrupt: Pin<&mut I>, work: F) -> Option<F::Output>
where
    I: Future,
    F: Future,
{
    tokio::select! {
        biased;
        _ = interrupt => None,
        output = work => Some(output),
    }
}

fn parse_direction(word: &str) -> Result<Direction, String> {
    match word.to_ascii_lowercase().as_str() {
        "f" | "forward" => Ok(Direction::Forward),
        "b" | "backward" => Ok(Direction::Backward),
        "l" | "left" => Ok(Direction::Left),
        "r" | "right" => Ok(Direction::Right),
        "fl" => Ok(Direction::ForwardLeft),
        "fr" => Ok(Direction::ForwardRight),
        "bl" => Ok(Direction::BackwardLeft),
        "br" => Ok(Direction::BackwardRight),
        other => Err(format!("unknown command `{other}` (try `help`)")),
    }
}

pub fn render(view: &PanelView) -> String {
    let mode = view
        .active_mode
        .map(|m| format!("{} ({})", m.name(), m.number()))
        .unwrap_or_else(|| "N/A".to_string());

    let mut out = format!(
        "mode: {mode} | distance: {} | status: {}",
        view.distance_text, view.status_text
    );
    if view.show_speed_slider {
        out.push_str(&format!(" | speed: {}", view.speed));
    }
    if let Some(error) = &view.error {
        out.push_str(&format!("\n! {error}"));
    }
    out
}
