//! Covenant CLI - build a policy catalog from a tree of insurer brochures.

use clap::Parser;
use covenant_cli::commands;
use covenant_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> covenant_cli::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Run(args) => commands::execute_run(args, config, &formatter).await?,
        Command::Extract(args) => commands::execute_extract(args, config, &formatter).await?,
        Command::Categories => commands::execute_categories(&formatter)?,
    }

    Ok(())
}

/// Log to stderr so stdout carries only command output. `RUST_LOG` wins.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "covenant=debug" } else { "covenant=info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
