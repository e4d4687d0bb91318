use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub dbdir: Option<String>,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(skip)]
    pub debug_logs: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub sqlite: Option<SqliteConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SqliteConfig {
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Answer a successful delete with 201 instead of 204.
    #[serde(default = "default_true")]
    pub legacy_delete_status: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            legacy_delete_status: true,
        }
    }
}

fn default_port() -> String {
    "8080".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        Self::from_str(&content).map_err(|e| match e {
            ConfigError::ParseError(_, e) => ConfigError::ParseError(path.to_string(), e),
            e => e,
        })
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError("<string>".to_string(), e))
    }

    pub fn database_path(&self) -> Option<String> {
        if let Some(ref sqlite) = self.database.sqlite {
            return Some(sqlite.filename.clone());
        }

        if let Some(ref dbdir) = self.dbdir {
            let path = PathBuf::from(dbdir).join("movies.db");
            return Some(path.to_string_lossy().to_string());
        }

        None
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_str("{}").unwrap();
        assert_eq!(config.listen.port, "8080");
        assert!(config.listen.address.is_none());
        assert!(config.api.legacy_delete_status);
        assert_eq!(config.database_path(), None);
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_str(
            r#"
listen:
  address: 127.0.0.1
  port: "9000"
database:
  sqlite:
    filename: /var/lib/movies/movies.db
api:
  legacy_delete_status: false
"#,
        )
        .unwrap();
        assert_eq!(config.listen.address.as_deref(), Some("127.0.0.1"));
        assert_eq!(config.listen.port, "9000");
        assert!(!config.api.legacy_delete_status);
        assert_eq!(
            config.database_path().as_deref(),
            Some("/var/lib/movies/movies.db")
        );
    }

    #[test]
    fn test_dbdir() {
        let config = Config::from_str("dbdir: /tmp/movies\n").unwrap();
        assert_eq!(
            config.database_path().as_deref(),
            Some("/tmp/movies/movies.db")
        );
    }

    #[test]
    fn test_sqlite_wins_over_dbdir() {
        let config = Config::from_str(
            "dbdir: /tmp/movies\ndatabase:\n  sqlite:\n    filename: other.db\n",
        )
        .unwrap();
        assert_eq!(config.database_path().as_deref(), Some("other.db"));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file("/nonexistent/movie-directory.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(ref p, _) if p == "/nonexistent/movie-directory.yaml"));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            Config::from_str("listen: [1, 2"),
            Err(ConfigError::ParseError(_, _))
        ));
    }
}
