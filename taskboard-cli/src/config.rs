//! Layered configuration
//!
//! Sources, later ones override earlier ones:
//! 1. Built-in defaults
//! 2. `taskboard.toml` / `taskboard.yaml` in the working directory, or the
//!    file given with `--config`
//! 3. `PORT`, then `TASKBOARD_*` environment variables
//! 4. Command line flags

use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use taskboard_client::FileLocalStore;

/// Config files looked up in the working directory
pub const CONFIG_FILES: [&str; 3] = ["taskboard.toml", "taskboard.yaml", "taskboard.yml"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub data_file: PathBuf,
    pub host: String,
    pub port: u16,
    pub server_url: String,
    /// Falls back to the platform data directory when unset
    pub local_store_dir: Option<PathBuf>,
    pub poll_interval_secs: u64,
    pub static_dir: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data.json"),
            host: "127.0.0.1".to_string(),
            port: taskboard_server::DEFAULT_PORT,
            server_url: taskboard_client::DEFAULT_SERVER_URL.to_string(),
            local_store_dir: None,
            poll_interval_secs: taskboard_client::DEFAULT_POLL_INTERVAL.as_secs(),
            static_dir: None,
            log_level: "info".to_string(),
        }
    }
}

/// Values given on the command line; unset fields leave the config alone
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_store_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll_interval_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
}

impl Config {
    /// Build the figment for `dir`, honouring an explicit config file
    pub fn figment(dir: &Path, explicit: Option<&Path>, overrides: &Overrides) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        match explicit {
            Some(path) => figment = merge_file(figment, path),
            None => {
                for name in CONFIG_FILES {
                    let path = dir.join(name);
                    if path.exists() {
                        tracing::debug!("loading config from {}", path.display());
                        figment = merge_file(figment, &path);
                    }
                }
            }
        }

        figment
            .merge(Env::raw().only(&["port"]))
            .merge(Env::prefixed("TASKBOARD_").map(|key| key.as_str().to_lowercase().into()))
            .merge(Serialized::defaults(overrides))
    }

    /// Load configuration for the current directory
    pub fn load(explicit: Option<&Path>, overrides: &Overrides) -> Result<Self, figment::Error> {
        let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::figment(&dir, explicit, overrides).extract()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    /// Where the offline store lives
    pub fn resolved_local_store_dir(&self) -> PathBuf {
        self.local_store_dir
            .clone()
            .or_else(FileLocalStore::default_dir)
            .unwrap_or_else(|| PathBuf::from(".taskboard"))
    }
}

fn merge_file(figment: Figment, path: &Path) -> Figment {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => figment.merge(Yaml::file(path)),
        _ => figment.merge(Toml::file(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn load_in(dir: &Path, overrides: &Overrides) -> Config {
        Config::figment(dir, None, overrides).extract().unwrap()
    }

    #[test]
    #[serial]
    fn test_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_in(temp.path(), &Overrides::default());

        assert_eq!(config, Config::default());
        assert_eq!(config.port, 3000);
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
    }

    #[test]
    #[serial]
    fn test_toml_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("taskboard.toml"),
            "data_file = \"board.json\"\nport = 8080\n",
        )
        .unwrap();

        let config = load_in(temp.path(), &Overrides::default());
        assert_eq!(config.data_file, PathBuf::from("board.json"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    #[serial]
    fn test_explicit_yaml_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.yaml");
        std::fs::write(&path, "server_url: http://board.local:9000\n").unwrap();

        let config: Config = Config::figment(temp.path(), Some(&path), &Overrides::default())
            .extract()
            .unwrap();
        assert_eq!(config.server_url, "http://board.local:9000");
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("taskboard.toml"), "port = 8080\n").unwrap();

        std::env::set_var("PORT", "4000");
        let from_port = load_in(temp.path(), &Overrides::default());
        std::env::set_var("TASKBOARD_PORT", "5000");
        std::env::set_var("TASKBOARD_LOG_LEVEL", "debug");
        let from_prefixed = load_in(temp.path(), &Overrides::default());
        std::env::remove_var("PORT");
        std::env::remove_var("TASKBOARD_PORT");
        std::env::remove_var("TASKBOARD_LOG_LEVEL");

        assert_eq!(from_port.port, 4000);
        assert_eq!(from_prefixed.port, 5000);
        assert_eq!(from_prefixed.log_level, "debug");
    }

    #[test]
    #[serial]
    fn test_flags_win() {
        let temp = TempDir::new().unwrap();
        std::env::set_var("TASKBOARD_PORT", "5000");
        let overrides = Overrides {
            port: Some(0),
            data_file: Some(PathBuf::from("other.json")),
            ..Overrides::default()
        };
        let config = load_in(temp.path(), &overrides);
        std::env::remove_var("TASKBOARD_PORT");

        assert_eq!(config.port, 0);
        assert_eq!(config.data_file, PathBuf::from("other.json"));
    }

    #[test]
    fn test_local_store_dir_explicit() {
        let config = Config {
            local_store_dir: Some(PathBuf::from("/tmp/store")),
            ..Config::default()
        };
        assert_eq!(config.resolved_local_store_dir(), PathBuf::from("/tmp/store"));
    }
}
