use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors surfaced by the file store and substitution engine
#[derive(Debug, Error)]
pub enum ReplacerError {
    #[error("no file named {name}")]
    FileNotFound { name: String },

    #[error("could not read directory {}: {source}", path.display())]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("couldn't parse regex: {0}")]
    PatternError(String),

    #[error("failed to read {name}: {source}")]
    ReadError {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {name}: {source}")]
    WriteError {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("{name} is not valid UTF-8 text")]
    NotText { name: String },

    #[error("invalid file name {0:?}: names must be a single path component")]
    InvalidName(String),

    #[error("no report found at {}", path.display())]
    ReportUnavailable { path: PathBuf },

    #[error("failed to read report at {}", path.display())]
    ReportReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("report at {} is not valid JSON: {source}", path.display())]
    ReportInvalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<regex::Error> for ReplacerError {
    fn from(err: regex::Error) -> Self {
        Self::PatternError(err.to_string())
    }
}

impl From<fancy_regex::Error> for ReplacerError {
    fn from(err: fancy_regex::Error) -> Self {
        Self::PatternError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ReplacerError>;
