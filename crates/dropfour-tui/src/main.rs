//! dropfour TUI entry point.
//!
//! # Usage
//!
//! ```bash
//! # Log in interactively against a local server
//! dropfour-tui
//!
//! # Skip the login form and let the client pick moves
//! dropfour-tui --server https://dropfour.example.com --user alice --auto
//! ```

use std::{fs::File, io, path::Path, path::PathBuf, sync::Arc};

use clap::Parser;
use dropfour_client::Endpoint;
use dropfour_tui::{App, Runtime, TerminalDriver};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// dropfour terminal client
#[derive(Parser, Debug)]
#[command(name = "dropfour-tui")]
#[command(about = "Terminal client for dropfour, a two-player connect-four game")]
#[command(version)]
struct Args {
    /// Base HTTP URL of the game server
    ///
    /// The game socket is opened at the same host under `/ws`.
    #[arg(short, long, env = "DROPFOUR_SERVER", default_value = "http://localhost:9090")]
    server: String,

    /// Play as this user, skipping the login form
    #[arg(short, long)]
    user: Option<String>,

    /// Submit moves automatically, centre columns first
    #[arg(long)]
    auto: bool,

    /// Write logs to this file (filtered by `RUST_LOG`, default `info`)
    ///
    /// Nothing is logged without it: the terminal belongs to the UI.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Arc::new(file)).with_ansi(false))
        .with(filter)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let endpoint = Endpoint::parse(&args.server)?;
    tracing::info!(server = %endpoint.base(), auto = args.auto, "dropfour starting");

    let mut app = App::new(args.auto);
    if let Some(user) = &args.user {
        app = app.with_username(user);
    }

    let driver = TerminalDriver::new(endpoint)?;
    Runtime::new(driver, app).run().await?;

    tracing::info!("dropfour exiting");
    Ok(())
}
