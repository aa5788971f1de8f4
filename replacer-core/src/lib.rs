pub mod config;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod report;
pub mod store;

pub use engine::{SearchMode, Substitution, substitute};
pub use errors::{ReplacerError, Result};
pub use store::{FileStore, ReplaceStep, ReplaceSummary};
