use std::{io::Write, path::PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod orchestration;
mod root;
mod script;
mod session;

#[derive(Parser, Debug)]
#[command(about = "Replay a scripted board gesture session through the move controller")]
struct Args {
    #[arg(long)]
    script: PathBuf,
    #[arg(long, default_value = "replay.toml")]
    config: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = config::load_settings(&args.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let script = script::load(&args.script)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = session::run(script, &settings, &mut out)?;
    writeln!(out, "{}", serde_json::to_string(&summary)?)?;

    if !summary.status.is_empty() {
        tracing::warn!(status = %summary.status, "some root commands were dropped");
    }
    Ok(())
}
