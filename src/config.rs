use serde::Deserialize;
use thiserror::Error;

use std::fs;
use std::path::Path;

#[derive(Debug, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pretty-print JSON written by `normalize` and `unpack`
    pub pretty: bool,
    /// gzip level used by `pack`, 0 (none) through 9 (best)
    pub compression_level: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            pretty: false,
            compression_level: 9,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config file: {err}")]
    Read {
        #[from]
        err: std::io::Error,
    },
    #[error("unable to parse config: {err}")]
    Parse {
        #[from]
        err: serde_json::Error,
    },
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let conf_str = fs::read_to_string(path)?;
        Config::from_json(&conf_str)
    }

    pub fn from_json(conf_str: &str) -> Result<Self, ConfigError> {
        let conf: Config = serde_json::from_str(conf_str)?;
        Ok(conf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_keys() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
        assert_eq!(
            Config::from_json(r#"{"pretty": true}"#).unwrap(),
            Config {
                pretty: true,
                compression_level: 9,
            }
        );
    }

    #[test]
    fn test_bad_config() {
        assert!(matches!(
            Config::from_json(r#"{"compression_level": "max"}"#),
            Err(ConfigError::Parse { .. })
        ));
    }
}
