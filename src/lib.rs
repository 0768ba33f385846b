pub mod config;
pub mod console;
pub mod logging;
pub mod robot;

pub use config::Config;
pub use robot::client::RobotClient;
pub use robot::controls::ControlPanel;
pub use robot::state::SharedControlState;
