use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;
use thiserror::Error;

use crate::localization::manager::Language;

pub const CONFIG_PATH_VAR: &str = "COLORMATE_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid configuration")]
    Parse(#[from] serde_yaml::Error),
    #[error("token file {0} is empty")]
    EmptyToken(PathBuf),
}

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Receives reports about unexpected command failures.
    pub owner_id: u64,
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,
    #[serde(default = "default_database_path")]
    pub database_path: String,
    #[serde(default)]
    pub language: Language,
}

fn default_token_file() -> PathBuf {
    PathBuf::from("token.txt")
}

fn default_database_path() -> String {
    "colors.db".to_string()
}

impl Config {
    /// Reads `config.yaml`, or the file named by `COLORMATE_CONFIG`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var_os(CONFIG_PATH_VAR).map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
        Self::from_yaml(&read(&path)?)
    }

    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// The bot token is the first line of the token file.
    pub fn read_token(&self) -> Result<String, ConfigError> {
        let contents = read(&self.token_file)?;
        let token = contents.lines().next().unwrap_or_default().trim();
        if token.is_empty() {
            return Err(ConfigError::EmptyToken(self.token_file.clone()));
        }
        Ok(token.to_string())
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn defaults_fill_in_optional_fields() {
        let config = Config::from_yaml("owner_id: 398440299627544577\n").unwrap();
        assert_eq!(config.owner_id, 398440299627544577);
        assert_eq!(config.token_file, PathBuf::from("token.txt"));
        assert_eq!(config.database_path, "colors.db");
        assert_eq!(config.language, Language::English);
    }

    #[test]
    fn every_field_can_be_set() {
        let config = Config::from_yaml(
            "owner_id: 1\ntoken_file: /run/secrets/token\ndatabase_path: /data/colors.db\nlanguage: de\n",
        )
        .unwrap();
        assert_eq!(config.token_file, PathBuf::from("/run/secrets/token"));
        assert_eq!(config.database_path, "/data/colors.db");
        assert_eq!(config.language, Language::German);
    }

    #[test]
    fn owner_is_required() {
        assert_matches!(Config::from_yaml("language: en\n"), Err(ConfigError::Parse(_)));
    }

    #[test]
    fn token_is_first_trimmed_line() {
        let path = env::temp_dir().join(format!("colormate-token-{}", std::process::id()));
        fs::write(&path, "  secret-token \nsecond line\n").unwrap();
        let config = Config {
            owner_id: 1,
            token_file: path.clone(),
            database_path: default_database_path(),
            language: Language::English,
        };

        let token = config.read_token();
        fs::remove_file(&path).unwrap();

        assert_eq!(token.unwrap(), "secret-token");
    }

    #[test]
    fn missing_or_empty_token_file_is_an_error() {
        let mut config = Config::from_yaml("owner_id: 1\ntoken_file: /nonexistent/token.txt\n").unwrap();
        assert_matches!(config.read_token(), Err(ConfigError::Read { .. }));

        let path = env::temp_dir().join(format!("colormate-empty-token-{}", std::process::id()));
        fs::write(&path, "\n").unwrap();
        config.token_file = path.clone();
        let token = config.read_token();
        fs::remove_file(&path).unwrap();

        assert_matches!(token, Err(ConfigError::EmptyToken(_)));
    }
}
