use anyhow::{Context, Result};
use clap::Parser;

use resumo::cli::Cli;
use resumo::{commands, logging, App};
use resumo_auth::Settings;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Held until exit so buffered log lines get flushed
    let (log_path, _guard) = logging::init_logging()?;
    tracing::debug!(log_path = %log_path.display(), "Logging initialized");

    let mut settings = Settings::new().context("Failed to load configuration")?;
    if let Some(server_url) = cli.server_url {
        settings.server_url = server_url;
    }
    settings.validate().map_err(anyhow::Error::msg)?;

    let app = App::from_settings(&settings)?;
    let mut stdout = std::io::stdout();
    commands::execute(cli.command, &app, &mut stdout).await
}
