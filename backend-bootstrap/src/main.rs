use anyhow::Result;
use clap::{Parser, Subcommand};

use backend_infrastructure::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "phish-trainer")]
#[command(about = "Phishing awareness training tracker", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the training site and admin dashboard (default)
    Serve,
    /// Create the participant and event log tables
    InitDb,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(config) = args.config {
        std::env::set_var("PHISHTRACK_CONFIG", config);
    }
    let config = AppConfig::load().await?;
    backend_bootstrap::logging::init(config.log_format);

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => backend_bootstrap::run_standalone(config).await,
        Command::InitDb => {
            backend_bootstrap::init_database(&config).await?;
            println!("DB initialized.");
            Ok(())
        }
    }
}
