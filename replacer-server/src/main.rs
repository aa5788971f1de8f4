use clap::Parser;
use log::LevelFilter;
use std::{env, path::PathBuf, str::FromStr};

use replacer_core::{
    config::{load_config, set_config_dir_override},
    logging::{DEFAULT_LOG_LEVEL, setup_logging},
};
use replacer_server::{
    AppState,
    server::{PORT_ENV_VAR, resolve_port, serve},
};

const BIN_NAME: &str = "replacer-server";

#[derive(Parser, Debug)]
#[command(about = "HTTP API for finding and replacing text in a directory of files.")]
#[command(version)]
struct Args {
    /// Directory holding the files (default: `files.directory` from the config file, or ./files)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Port to listen on (default: $PORT, then `server.port` from the config file, then 5000)
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        long,
        value_parser = parse_log_level,
        default_value = DEFAULT_LOG_LEVEL
    )]
    log_level: LevelFilter,

    /// Override the config directory (default: ~/.config/replacer on Linux, %AppData%\replacer on Windows)
    #[arg(long)]
    config_dir: Option<PathBuf>,
}

fn parse_log_level(s: &str) -> Result<LevelFilter, String> {
    LevelFilter::from_str(s).map_err(|_| format!("Invalid log level: {s}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(config_dir) = &args.config_dir {
        set_config_dir_override(config_dir);
    }
    setup_logging(BIN_NAME, args.log_level)?;

    let mut config = load_config()?;
    if let Some(dir) = args.dir {
        config.files.directory = dir;
    }
    let port = resolve_port(
        args.port,
        env::var(PORT_ENV_VAR).ok().as_deref(),
        &config,
    )?;

    serve(AppState::from_config(&config), port).await
}
