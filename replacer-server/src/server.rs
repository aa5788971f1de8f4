use anyhow::Context;
use log::{info, warn};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;

use replacer_core::config::Config;

use crate::{routes::app, state::AppState};

pub const PORT_ENV_VAR: &str = "PORT";

/// Port from the command line, then the `PORT` environment variable, then the config file
pub fn resolve_port(
    flag: Option<u16>,
    env_port: Option<&str>,
    config: &Config,
) -> anyhow::Result<u16> {
    if let Some(port) = flag {
        return Ok(port);
    }
    match env_port {
        Some(port) => port
            .trim()
            .parse()
            .with_context(|| format!("Invalid {PORT_ENV_VAR} value: {port:?}")),
        None => Ok(config.server.port),
    }
}

pub async fn serve(state: AppState, port: u16) -> anyhow::Result<()> {
    if !state.store.base_dir().is_dir() {
        warn!(
            "Files directory {} does not exist; requests will fail until it is created",
            state.store.base_dir().display()
        );
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    info!("Listening on {addr}, serving {}", state.store.base_dir().display());
    println!("Replacer is serving at http://localhost:{port}");

    axum::serve(listener, app(Arc::new(state)))
        .await
        .context("Server error")
}
