use crate::domain::HELLO_PHRASE;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub phrase: String,
    pub eager_load: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let database_path = env_map
            .get("DATABASE_PATH")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("DATABASE_PATH".to_string()))?;

        let phrase = env_map
            .get("PHRASE")
            .cloned()
            .unwrap_or_else(|| HELLO_PHRASE.to_string());
        if phrase.is_empty() {
            return Err(ConfigError::InvalidValue(
                "PHRASE".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let eager_load = match env_map
            .get("EAGER_LOAD")
            .map(|s| s.as_str())
            .unwrap_or("true")
        {
            "true" | "1" => true,
            "false" | "0" => false,
            other => {
                return Err(ConfigError::InvalidValue(
                    "EAGER_LOAD".to_string(),
                    format!("must be true, false, 1, or 0, got {}", other),
                ))
            }
        };

        Ok(Config {
            database_path,
            phrase,
            eager_load,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_required_env() -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("DATABASE_PATH".to_string(), "/tmp/test.db".to_string());
        map
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_env_map(setup_required_env()).unwrap();
        assert_eq!(config.database_path, "/tmp/test.db");
        assert_eq!(config.phrase, "hello");
        assert!(config.eager_load);
    }

    #[test]
    fn test_missing_database_path() {
        let mut env_map = setup_required_env();
        env_map.remove("DATABASE_PATH");
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::MissingEnv(s)) => assert_eq!(s, "DATABASE_PATH"),
            _ => panic!("Expected MissingEnv error"),
        }
    }

    #[test]
    fn test_phrase_override() {
        let mut env_map = setup_required_env();
        env_map.insert("PHRASE".to_string(), "bye".to_string());
        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(config.phrase, "bye");
    }

    #[test]
    fn test_empty_phrase_rejected() {
        let mut env_map = setup_required_env();
        env_map.insert("PHRASE".to_string(), String::new());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "PHRASE"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_eager_load_flag_values() {
        for (raw, expected) in [("true", true), ("1", true), ("false", false), ("0", false)] {
            let mut env_map = setup_required_env();
            env_map.insert("EAGER_LOAD".to_string(), raw.to_string());
            let config = Config::from_env_map(env_map).unwrap();
            assert_eq!(config.eager_load, expected, "EAGER_LOAD={}", raw);
        }
    }

    #[test]
    fn test_invalid_eager_load() {
        let mut env_map = setup_required_env();
        env_map.insert("EAGER_LOAD".to_string(), "sometimes".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "EAGER_LOAD"),
            _ => panic!("Expected InvalidValue error"),
        }
    }
}
