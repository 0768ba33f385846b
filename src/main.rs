use futures::future::join_all;
use robot_remote::console::{self, ConsoleInput};
use robot_remote::robot::models::Command;
use robot_remote::{logging, Config, ControlPanel, RobotClient};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _guard = logging::init();
    let config = Config::from_env();

    let client = match RobotClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Failed to create robot client");
            std::process::exit(1);
        }
    };

    info!(
        url           = %config.robot_api_url,
        refresh_delay = ?config.refresh_delay(),
        "Connecting to robot"
    );

    let mut panel = ControlPanel::new(client);
    panel.mount().await;
    println!("{}", console::render(&panel.view()));
    println!("{}", console::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    // One listener for the whole session; a SIGINT between polls stays pending.
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        let Some(line) = console::interruptible(ctrl_c.as_mut(), lines.next_line()).await else {
            info!("Interrupted");
            break;
        };

        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!(error = %e, "Failed to read from stdin");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let input = match ConsoleInput::parse(&line) {
            Ok(ConsoleInput::Quit) => break,
            Ok(ConsoleInput::Help) => {
                println!("{}", console::HELP);
                continue;
            }
            Ok(input) => input,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        let Some(applied) = console::interruptible(ctrl_c.as_mut(), input.apply(&mut panel)).await
        else {
            info!("Interrupted while sending a command");
            break;
        };

        match applied {
            Ok(refreshes) => {
                if console::interruptible(ctrl_c.as_mut(), join_all(refreshes))
                    .await
                    .is_none()
                {
                    info!("Interrupted while refreshing status");
                    break;
                }
                println!("{}", console::render(&panel.view()));
            }
            Err(message) => println!("{message}"),
        }
    }

    // A held direction keeps the robot moving, so stop it on the way out.
    if let Err(e) = panel.client().send(Command::Stop).await {
        error!(error = %e, "Failed to stop robot on exit");
    }
}
