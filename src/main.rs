mod age;
mod analysis;
mod cli;
mod commands;
mod config;
mod form;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};
use config::Settings;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn init_tracing() {
    // stdout carries the rendered page; logs go to stderr.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(env_filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let settings = Settings::resolve(cli.today, cli.no_color);

    match cli.command {
        Commands::Age(args) => commands::age(&settings, args)?,
        Commands::Analyze(args) => commands::analyze(&settings, args).await?,
    }

    Ok(())
}
