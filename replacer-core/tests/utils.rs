#![allow(dead_code)]

use std::{fs, path::Path};

#[macro_export]
macro_rules! create_test_files {
    () => {
        {
            use tempfile::TempDir;
            TempDir::new().unwrap()
        }
    };

    ($($name:expr => $content:expr),+ $(,)?) => {
        {
            use tempfile::TempDir;
            use tokio::fs::File;
            use tokio::io::AsyncWriteExt;

            let temp_dir = TempDir::new().unwrap();

            $(
                let path = temp_dir.path().join($name);
                let mut file = File::create(&path).await.unwrap();
                let content: &[u8] = $content;
                file.write_all(content).await.unwrap();
                file.sync_all().await.unwrap();
            )+

            temp_dir
        }
    };
}

#[macro_export]
macro_rules! text {
    ($($line:expr),+ $(,)?) => {
        concat!($($line, "\n"),+).as_bytes()
    };
}

pub fn collect_files(dir: &Path) -> Vec<String> {
    let mut files: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.is_file())
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    files.sort();
    files
}

#[macro_export]
macro_rules! assert_test_files {
    ($temp_dir:expr) => {
        {
            let actual_files = utils::collect_files($temp_dir.path());
            assert!(
                actual_files.is_empty(),
                "Directory should be empty but contains files: {:?}",
                actual_files
            );
        }
    };

    ($temp_dir:expr, $($name:expr => $content:expr),+ $(,)?) => {
        {
            use std::fs;

            $(
                let expected_contents: &[u8] = $content;
                let path = $temp_dir.path().join($name);

                assert!(path.exists(), "File {} does not exist", $name);

                let actual_contents = fs::read(&path)
                    .unwrap_or_else(|e| panic!("Failed to read file {}: {}", $name, e));
                assert_eq!(
                    String::from_utf8_lossy(&actual_contents),
                    String::from_utf8_lossy(expected_contents),
                    "Contents mismatch for file {}",
                    $name,
                );
            )+

            let mut expected_files: Vec<String> = vec![$($name.to_string()),+];
            expected_files.sort();

            let actual_files = utils::collect_files($temp_dir.path());

            assert_eq!(
                actual_files,
                expected_files,
                "Directory contains unexpected files.\nExpected files: {:?}\nActual files: {:?}",
                expected_files,
                actual_files
            );
        }
    };
}

#[macro_export]
macro_rules! test_with_regex_modes {
    ($name:ident, $test_fn:expr) => {
        mod $name {
            use super::*;

            #[tokio::test]
            async fn with_regex() -> anyhow::Result<()> {
                ($test_fn)(SearchMode::Regex).await
            }

            #[tokio::test]
            async fn with_advanced_regex() -> anyhow::Result<()> {
                ($test_fn)(SearchMode::AdvancedRegex).await
            }
        }
    };
}
