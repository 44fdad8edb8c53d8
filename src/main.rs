//! # RecordBoard Main Entry Point
//!
//! Reads commands from stdin and renders the dashboard to stdout.

use anyhow::Result;
use recordboard::cmd_args::CommandLineArgs;
use recordboard::config::{self, LOG_LEVEL_ENV_VAR};
use recordboard::{AppController, DashboardViewModel, HttpRecordService};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();
    init_tracing(cmd_args.verbose());

    let profile = config::load_profile(cmd_args.profile(), &config::get_profile_path())?;
    let server = cmd_args
        .server()
        .cloned()
        .unwrap_or_else(|| profile.server.clone());
    tracing::info!("Using record store at {}", server);

    let service = HttpRecordService::new(&server)?;
    let view_model = DashboardViewModel::new(service, profile.page_size, profile.resource_kind)?;

    // Piped input is replayed one command at a time
    let interactive = atty::is(atty::Stream::Stdin);
    if interactive {
        println!("RecordBoard - {server}");
        println!("Type 'help' for commands, 'quit' to exit\n");
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let mut app = AppController::new(view_model, stdin, std::io::stdout())
        .with_settle_after_command(!interactive);
    app.run().await?;

    if interactive {
        println!("Bye");
    }
    Ok(())
}
