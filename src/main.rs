//! Tetris game server (default binary).
//!
//! Reads configuration from the environment, lets command-line flags
//! override it, then serves clients until Ctrl+C.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use tetris_server::adapter::{check_tcp_listen_available, run_server, ServerConfig};
use tetris_server::session::SessionManager;

#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Address to bind to (overrides TETRIS_HOST)
    #[clap(short = 'H', long)]
    host: Option<String>,
    /// Port to listen on (overrides PORT / TETRIS_PORT)
    #[clap(short, long)]
    port: Option<u16>,
    /// Board width in cells
    #[clap(long)]
    board_width: Option<usize>,
    /// Board height in cells
    #[clap(long)]
    board_height: Option<usize>,
}

impl Args {
    fn apply(self, mut config: ServerConfig) -> ServerConfig {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(w) = self.board_width.filter(|&w| w > 0) {
            config.board_width = w;
        }
        if let Some(h) = self.board_height.filter(|&h| h > 0) {
            config.board_height = h;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Args::parse().apply(ServerConfig::from_env());
    check_tcp_listen_available(&config.host, config.port)
        .with_context(|| format!("cannot listen on {}:{}", config.host, config.port))?;

    info!(
        "Starting Tetris server on {}:{} with a {}x{} board",
        config.host, config.port, config.board_width, config.board_height
    );

    let manager = Arc::new(SessionManager::new(config.session_config()));

    tokio::select! {
        result = run_server(config, manager, None) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
            Ok(())
        }
    }
}
