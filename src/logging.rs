// Logging initialisation.
//
// Writes structured logs to both stderr and `./logs/robot-remote.log`.
//
// The log level is controlled by the `RUST_LOG` environment variable
// (defaults to `info`, with the HTTP stack kept at `warn`).
//
// To see every request URL:  `RUST_LOG=robot_remote=debug`

use tracing_appender::non_blocking;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Initialise the global tracing subscriber.
//
// Returns a [`WorkerGuard`] that must be kept alive for the whole run,
// otherwise buffered file output is lost.
pub fn init() -> non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::never("./logs", "robot-remote.log");
    let (file_writer, guard) = non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn,hyper_util=warn"));

    // Console layer on stderr; stdout belongs to the panel output.
    let console_layer = fmt::layer()
        .with_target(true)
        .with_ansi(true)
        .with_writer(std::io::stderr);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(file_writer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}
