use std::{
    fmt, io,
    path::{Path, PathBuf},
};

use log::debug;
use tokio::fs;

use crate::{
    engine::{SearchMode, Substitution},
    errors::{ReplacerError, Result},
};

/// The step a read-modify-write is about to perform
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplaceStep {
    Reading,
    Replacing,
    Writing,
}

impl fmt::Display for ReplaceStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReplaceStep::Reading => "Reading..",
            ReplaceStep::Replacing => "Replacing..",
            ReplaceStep::Writing => "Writing..",
        };
        write!(f, "{s}")
    }
}

/// Outcome of a successful `replace_into`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplaceSummary {
    pub source: String,
    pub target: String,
    pub num_replacements: usize,
}

/// A flat directory of named UTF-8 text files.
///
/// Names are single path components, so no operation can reach outside the base directory.
/// Writes go straight to the target path: there is no locking and no atomic rename, so
/// concurrent writers to the same name are last-writer-wins.
#[derive(Clone, Debug)]
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn path_for(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.base_dir.join(name))
    }

    /// Names of the regular files in the base directory, sorted
    pub async fn list(&self) -> Result<Vec<String>> {
        let dir_err = |source| ReplacerError::DirectoryUnavailable {
            path: self.base_dir.clone(),
            source,
        };

        let mut entries = fs::read_dir(&self.base_dir).await.map_err(dir_err)?;
        let mut names = vec![];
        while let Some(entry) = entries.next_entry().await.map_err(dir_err)? {
            // Follows symlinks; dangling ones are skipped
            let metadata = match fs::metadata(entry.path()).await {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(dir_err(e)),
            };
            if !metadata.is_file() {
                continue;
            }
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();

        debug!("Listed {} files in {}", names.len(), self.base_dir.display());
        Ok(names)
    }

    pub async fn read(&self, name: &str) -> Result<String> {
        let path = self.path_for(name)?;
        let bytes = fs::read(&path).await.map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ReplacerError::FileNotFound {
                    name: name.to_owned(),
                }
            } else {
                ReplacerError::ReadError {
                    name: name.to_owned(),
                    source,
                }
            }
        })?;

        String::from_utf8(bytes).map_err(|_| ReplacerError::NotText {
            name: name.to_owned(),
        })
    }

    /// Create `name`, or replace its content entirely if it already exists
    pub async fn write(&self, name: &str, text: &str) -> Result<()> {
        let path = self.path_for(name)?;
        fs::write(&path, text)
            .await
            .map_err(|source| ReplacerError::WriteError {
                name: name.to_owned(),
                source,
            })?;

        debug!("Wrote {} bytes to {}", text.len(), path.display());
        Ok(())
    }

    /// Read `source`, replace every match of `pattern` (a regular expression) and write the
    /// result to `target`. `source` and `target` may be the same file.
    pub async fn replace_into(
        &self,
        source: &str,
        pattern: &str,
        replacement: &str,
        target: &str,
    ) -> Result<ReplaceSummary> {
        let substitution = Substitution::new(pattern, replacement, SearchMode::Regex)?;
        self.replace_into_with(source, &substitution, target, |_| {})
            .await
    }

    /// As `replace_into`, calling `on_step` before each stage. Nothing is written if the source
    /// cannot be read.
    pub async fn replace_into_with<F>(
        &self,
        source: &str,
        substitution: &Substitution,
        target: &str,
        mut on_step: F,
    ) -> Result<ReplaceSummary>
    where
        F: FnMut(ReplaceStep),
    {
        validate_name(target)?;

        on_step(ReplaceStep::Reading);
        let content = self.read(source).await?;

        on_step(ReplaceStep::Replacing);
        let num_replacements = substitution.count_matches(&content);
        let replaced = substitution.apply(&content)?;

        on_step(ReplaceStep::Writing);
        self.write(target, &replaced).await?;

        Ok(ReplaceSummary {
            source: source.to_owned(),
            target: target.to_owned(),
            num_replacements,
        })
    }
}

pub fn validate_name(name: &str) -> Result<()> {
    let is_single_component = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0']);
    if is_single_component {
        Ok(())
    } else {
        Err(ReplacerError::InvalidName(name.to_owned()))
    }
}
