use std::{io, path::Path};

use log::debug;
use serde_json::Value;
use tokio::fs;

use crate::errors::{ReplacerError, Result};

/// Load the `stats` section of a JSON test report.
///
/// Returns `Value::Null` if the report has no `stats` key.
pub async fn load_report_stats(path: &Path) -> Result<Value> {
    let contents = fs::read(path).await.map_err(|source| {
        debug!("Failed to read report at {}: {source}", path.display());
        if source.kind() == io::ErrorKind::NotFound {
            ReplacerError::ReportUnavailable {
                path: path.to_path_buf(),
            }
        } else {
            ReplacerError::ReportReadError {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let mut report: Value =
        serde_json::from_slice(&contents).map_err(|source| ReplacerError::ReportInvalid {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(report
        .get_mut("stats")
        .map(Value::take)
        .unwrap_or(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_report_stats() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.json");
        std::fs::write(
            &path,
            r#"{"stats": {"suites": 1, "tests": 3, "passes": 3}, "tests": []}"#,
        )
        .unwrap();

        let stats = load_report_stats(&path).await.unwrap();
        assert_eq!(stats, json!({"suites": 1, "tests": 3, "passes": 3}));
    }

    #[tokio::test]
    async fn test_load_report_without_stats() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.json");
        std::fs::write(&path, r#"{"tests": []}"#).unwrap();

        assert_eq!(load_report_stats(&path).await.unwrap(), Value::Null);
    }

    #[tokio::test]
    async fn test_load_missing_report() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_report_stats(&temp_dir.path().join("report.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, ReplacerError::ReportUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_load_unreadable_report() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.json");
        std::fs::create_dir(&path).unwrap();

        let err = load_report_stats(&path).await.unwrap_err();
        assert!(matches!(err, ReplacerError::ReportReadError { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[tokio::test]
    async fn test_load_invalid_report() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.json");
        std::fs::write(&path, "not json").unwrap();

        let err = load_report_stats(&path).await.unwrap_err();
        assert!(matches!(err, ReplacerError::ReportInvalid { .. }));
    }
}
