use etcetera::base_strategy::{BaseStrategy, choose_base_strategy};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

pub const APP_NAME: &str = "replacer";

pub const DEFAULT_FILES_DIR: &str = "./files";

pub const DEFAULT_PORT: u16 = 5000;

static CONFIG_DIR_OVERRIDE: OnceLock<PathBuf> = OnceLock::new();

pub fn set_config_dir_override(dir: &Path) {
    CONFIG_DIR_OVERRIDE
        .set(dir.to_path_buf())
        .expect("Config dir override should only be set once");
}

fn config_dir() -> anyhow::Result<PathBuf> {
    if let Some(dir) = CONFIG_DIR_OVERRIDE.get() {
        return Ok(dir.clone());
    }
    let strategy = choose_base_strategy()?;
    Ok(strategy.config_dir().join(APP_NAME))
}

fn config_file() -> anyhow::Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub files: FilesConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct FilesConfig {
    /// The directory holding the text files that can be listed, read and replaced into.
    /// Defaults to `./files`.
    pub directory: PathBuf,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_FILES_DIR),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ServerConfig {
    /// Port to listen on. The `PORT` environment variable takes precedence. Defaults to `5000`.
    pub port: u16,
    /// JSON test report served by `GET /report`. Defaults to `../test/report.json`, relative to
    /// the files directory.
    pub report_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            report_path: None,
        }
    }
}

impl Config {
    pub fn report_path(&self) -> PathBuf {
        match &self.server.report_path {
            Some(path) => path.clone(),
            None => self.files.directory.join("../test/report.json"),
        }
    }
}

pub fn load_config() -> anyhow::Result<Config> {
    let config_file = &config_file()?;
    if fs::exists(config_file)? {
        let contents = fs::read_to_string(config_file)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    } else {
        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_empty_config_file() -> anyhow::Result<()> {
        let config: Config = toml::from_str("")?;
        assert_eq!(config, Config::default());
        assert_eq!(config.files.directory, PathBuf::from("./files"));
        assert_eq!(config.server.port, 5000);

        Ok(())
    }

    #[test]
    fn test_partial_config_files_only() -> anyhow::Result<()> {
        let config: Config = toml::from_str(indoc! {r#"
            [files]
            directory = "/srv/texts"
        "#})?;

        assert_eq!(config.files.directory, PathBuf::from("/srv/texts"));
        assert_eq!(config.server, ServerConfig::default());

        Ok(())
    }

    #[test]
    fn test_full_config() -> anyhow::Result<()> {
        let config: Config = toml::from_str(indoc! {r#"
            [files]
            directory = "data"

            [server]
            port = 8080
            report_path = "reports/latest.json"
        "#})?;

        assert_eq!(
            config,
            Config {
                files: FilesConfig {
                    directory: PathBuf::from("data"),
                },
                server: ServerConfig {
                    port: 8080,
                    report_path: Some(PathBuf::from("reports/latest.json")),
                },
            }
        );
        assert_eq!(config.report_path(), PathBuf::from("reports/latest.json"));

        Ok(())
    }

    #[test]
    fn test_default_report_path_is_beside_files_dir() {
        let config = Config::default();
        assert_eq!(
            config.report_path(),
            PathBuf::from("./files").join("../test/report.json")
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Config, _> = toml::from_str(indoc! {r#"
            [server]
            host = "0.0.0.0"
        "#});
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("unknown field `host`")
        );
    }
}
