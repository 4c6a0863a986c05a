//! toctoc CLI binary entry point.

use clap::Parser;
use toctoc::cli::chat::{handle_chat, handle_classify};
use toctoc::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "toctoc=debug" } else { "toctoc=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::Chat(args) => handle_chat(args, config_path).await,
        Commands::Classify(args) => handle_classify(args, config_path).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
