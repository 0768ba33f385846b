use std::env;
use std::time::Duration;

pub const DEFAULT_ROBOT_API_URL: &str = "http://192.168.4.1";

#[derive(Clone, Debug)]
pub struct Config {
    pub robot_api_url: String,
    pub refresh_delay_ms: u64,
    pub request_timeout_secs: u64,
}

impl Config {
    /// Reads the configuration from the environment (and `.env`, if present).
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Config {
            robot_api_url: env::var("ROBOT_API_URL")
                .unwrap_or_else(|_| DEFAULT_ROBOT_API_URL.to_string()),
            refresh_delay_ms: env::var("ROBOT_REFRESH_DELAY_MS")
                .unwrap_or_else(|_| "200".to_string())
                .parse()
                .unwrap_or(200),
            request_timeout_secs: env::var("ROBOT_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
        }
    }

    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            robot_api_url: DEFAULT_ROBOT_API_URL.to_string(),
            refresh_delay_ms: 200,
            request_timeout_secs: 5,
        }
    }
}
