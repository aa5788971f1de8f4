use std::path::PathBuf;

use replacer_core::{FileStore, config::Config};

/// Shared, read-only state handed to every handler
#[derive(Clone, Debug)]
pub struct AppState {
    pub store: FileStore,
    pub report_path: PathBuf,
}

impl AppState {
    pub fn new(store: FileStore, report_path: PathBuf) -> Self {
        Self { store, report_path }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            FileStore::new(config.files.directory.clone()),
            config.report_path(),
        )
    }
}
