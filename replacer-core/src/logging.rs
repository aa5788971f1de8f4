use etcetera::base_strategy::{BaseStrategy, choose_base_strategy};
use log::{LevelFilter, info};
use std::path::{Path, PathBuf};

use crate::config::APP_NAME;

pub const DEFAULT_LOG_LEVEL: &str = "error";

pub fn cache_dir() -> anyhow::Result<PathBuf> {
    let strategy = choose_base_strategy()?;
    let mut path = strategy.cache_dir();
    path.push(APP_NAME);
    Ok(path)
}

/// Log file for the given binary, e.g. `~/.cache/replacer/replacer-server.log`
pub fn default_log_file(bin_name: &str) -> anyhow::Result<PathBuf> {
    Ok(cache_dir()?.join(format!("{bin_name}.log")))
}

fn make_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

pub fn setup_logging(bin_name: &str, level: LevelFilter) -> anyhow::Result<()> {
    let log_path = default_log_file(bin_name)?;
    make_parent_dir(&log_path)?;

    let _ = simple_log::file(log_path.to_string_lossy(), level.as_str(), 100, 10);

    info!("Logging initialized at {}", log_path.display());
    Ok(())
}
