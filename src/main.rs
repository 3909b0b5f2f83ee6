use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use borealis_pg::cli::{Cli, Commands, UpgradeCommands};
use borealis_pg::client::Context;
use borealis_pg::{commands, config};

#[tokio::main]
async fn main() {
    // Diagnostics go to stderr with everything else; stdout carries only
    // command output.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "borealis_pg=warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(err) = run().await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let args = Cli::parse();
    let ctx = Context::new(config::load()?);

    let Commands::Upgrade { command } = args.command;
    match command {
        UpgradeCommands::Execute { target } => {
            commands::execute::run(&ctx, target.addon.as_deref(), target.app.as_deref()).await?
        }
        UpgradeCommands::Cancel { target } => {
            commands::cancel::run(&ctx, target.addon.as_deref(), target.app.as_deref()).await?
        }
        UpgradeCommands::Info { target } => {
            commands::info::run(&ctx, target.addon.as_deref(), target.app.as_deref()).await?
        }
    }

    Ok(())
}
