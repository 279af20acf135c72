//! Sealbox server binary.
//!
//! # Usage
//!
//! ```bash
//! # Start with an ephemeral key ring (development)
//! sealbox-server --bind 0.0.0.0:8080
//!
//! # Start with a provisioned key ring (production)
//! sealbox-server --bind 0.0.0.0:8080 --key-file keys.json
//! ```

use std::path::PathBuf;

use clap::Parser;
use sealbox_server::{ServiceConfig, ephemeral_key_ring, load_key_ring, run_server};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Sealbox data protection service
#[derive(Parser, Debug)]
#[command(name = "sealbox-server")]
#[command(about = "Purpose-scoped data protection over HTTP")]
#[command(version)]
struct Args {
    /// Address to bind to
    #[arg(short, long, default_value = "0.0.0.0:8080")]
    bind: String,

    /// Path to a JSON key-ring file
    #[arg(short, long)]
    key_file: Option<PathBuf>,

    /// Purpose string isolating this service's protected data
    #[arg(long, default_value = "SamplePurpose")]
    purpose: String,

    /// Serve plain HTTP without redirecting to HTTPS
    #[arg(long)]
    no_https_redirect: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    tracing::info!("Sealbox server starting");
    tracing::info!("Binding to {}", args.bind);

    let ring = match &args.key_file {
        Some(path) => {
            let ring = load_key_ring(path)?;
            tracing::info!("Loaded {} key(s) from {}", ring.len(), path.display());
            ring
        },
        None => {
            tracing::warn!("No key file provided - using an ephemeral key ring");
            tracing::warn!("Data protected by this instance is lost on restart!");
            ephemeral_key_ring()
        },
    };

    let config = ServiceConfig {
        bind_address: args.bind,
        purpose: args.purpose,
        https_redirect: !args.no_https_redirect,
    };

    run_server(config, ring).await?;

    Ok(())
}
