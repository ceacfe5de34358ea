//! free@home command-line tool
//!
//! Loads the project of a SysAP and prints its floors, rooms and channels.
//!
//! ```text
//! fathome [CONFIG] [--json]
//! ```

mod report;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use fah_client::{DumpSource, IdentityResolver, Session};
use fah_config::FahConfig;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// free@home topology viewer
#[derive(Parser, Debug)]
#[command(name = "fathome", version)]
#[command(about = "Print the floors, rooms and channels of a free@home SysAP", long_about = None)]
struct Args {
    /// Path to the YAML configuration
    #[arg(default_value = "fathome.yaml")]
    config: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

async fn load_session(config: &FahConfig) -> Result<Session> {
    if let Some(project_file) = &config.project_file {
        info!("Loading project from {:?}", project_file);
        return Session::load(&DumpSource::new(project_file))
            .await
            .with_context(|| format!("failed to load project from {:?}", project_file));
    }

    // Resolving the identity is as far as we get without an RPC transport
    let resolver = IdentityResolver::new(
        &config.host,
        Duration::from_secs(config.http_timeout_secs),
    )?;
    let identity = resolver
        .resolve(&config.username)
        .await
        .with_context(|| format!("failed to resolve user on {}", config.host))?;
    info!("{} logs in as {}", config.username, identity);

    bail!(
        "no RPC transport available for {}; set project_file to load a saved project description",
        config.host
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let config = FahConfig::load(&args.config)
        .with_context(|| format!("failed to load {:?}", args.config))?;

    let session = load_session(&config).await?;
    let project = session.project();

    if args.json {
        println!("{}", report::render_json(&project)?);
    } else {
        print!("{}", report::render_text(&project));
    }

    Ok(())
}
