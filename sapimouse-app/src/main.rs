mod app;
mod render;
mod summary;

pub use app::App;

use anyhow::Result;
use clap::Parser;
use sapimouse_core::SessionLabel;
use sapimouse_recorder::SessionConfig;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Task-based mouse dynamics data logger
#[derive(Parser, Debug)]
#[command(name = "sapimouse", version)]
struct Args {
    /// Participant username embedded in every saved block
    #[arg(long, default_value = "user1")]
    username: String,

    /// Ground-truth label: genuine or imposter
    #[arg(long, default_value = "genuine")]
    label: SessionLabel,

    /// Session duration in minutes
    #[arg(long, default_value_t = 3)]
    duration_min: u64,

    /// Directory the output folder is created under
    #[arg(long, default_value = ".")]
    output_root: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sapimouse=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = SessionConfig {
        username: args.username,
        label: args.label,
        duration_min: args.duration_min,
    };

    let app = App::new(config, args.output_root)?;
    app.run()
}
