use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use chart_console_backend::io::console::{run_command, ConsoleCommand, ConsoleOutput, HELP_TEXT};
use chart_console_backend::{Backend, ChartConsoleConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr, stdout is the console
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = ChartConsoleConfig::from_env()?;
    let backend = Backend::new(config);
    let output = ConsoleOutput::default();

    info!("Chart console ready");
    println!("{}", HELP_TEXT);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match ConsoleCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                warn!("Rejected input {:?}", line);
                println!("{}", e);
                continue;
            }
        };

        let keep_going = run_command(&backend, command, &output).await?;
        for line in output.drain() {
            println!("{}", line);
        }
        if !keep_going {
            break;
        }
    }

    info!("Chart console closed");
    Ok(())
}
