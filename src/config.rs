use std::collections::HashMap;
use thiserror::Error;

const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// Immutable process configuration, read from the environment once at
/// startup and passed explicitly to the poller and sinks.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub poll_interval_secs: u64,
    pub wallet_address: String,
    pub rpc_url: String,
    pub telegram_bot_token: String,
    pub telegram_allowed_users: Vec<i64>,
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
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("3000")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let poll_interval_secs = env_map
            .get("POLL_INTERVAL_SECONDS")
            .map(|s| s.as_str())
            .unwrap_or("30")
            .parse::<u64>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "POLL_INTERVAL_SECONDS".to_string(),
                    "must be a valid u64".to_string(),
                )
            })?;
        if poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "POLL_INTERVAL_SECONDS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let wallet_address = env_map
            .get("WALLET_ADDRESS")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("WALLET_ADDRESS".to_string()))?;

        let rpc_url = env_map
            .get("SOLANA_RPC_URL")
            .cloned()
            .unwrap_or_else(|| DEFAULT_RPC_URL.to_string());

        let telegram_bot_token = env_map
            .get("TELEGRAM_BOT_TOKEN")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("TELEGRAM_BOT_TOKEN".to_string()))?;

        let telegram_allowed_users = parse_allowed_users(&env_map)?;

        Ok(Config {
            port,
            poll_interval_secs,
            wallet_address,
            rpc_url,
            telegram_bot_token,
            telegram_allowed_users,
        })
    }
}

fn parse_allowed_users(env_map: &HashMap<String, String>) -> Result<Vec<i64>, ConfigError> {
    let Some(users_str) = env_map.get("TELEGRAM_ALLOWED_USERS") else {
        return Ok(Vec::new());
    };

    users_str
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>().map_err(|_| {
                ConfigError::InvalidValue(
                    "TELEGRAM_ALLOWED_USERS".to_string(),
                    format!("{} is not a valid chat id", s),
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_required_env() -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert(
            "WALLET_ADDRESS".to_string(),
            "BxmSEddwE1jBFVSXnsvDsujgjBh2GK2jhrzpZLJJidrG".to_string(),
        );
        map.insert("TELEGRAM_BOT_TOKEN".to_string(), "123:abc".to_string());
        map
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_env_map(setup_required_env()).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.poll_interval_secs, 30);
        assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
        assert!(config.telegram_allowed_users.is_empty());
    }

    #[test]
    fn test_missing_wallet_address() {
        let mut env_map = setup_required_env();
        env_map.remove("WALLET_ADDRESS");
        match Config::from_env_map(env_map) {
            Err(ConfigError::MissingEnv(s)) => assert_eq!(s, "WALLET_ADDRESS"),
            _ => panic!("Expected MissingEnv error"),
        }
    }

    #[test]
    fn test_missing_bot_token() {
        let mut env_map = setup_required_env();
        env_map.remove("TELEGRAM_BOT_TOKEN");
        match Config::from_env_map(env_map) {
            Err(ConfigError::MissingEnv(s)) => assert_eq!(s, "TELEGRAM_BOT_TOKEN"),
            _ => panic!("Expected MissingEnv error"),
        }
    }

    #[test]
    fn test_invalid_port() {
        let mut env_map = setup_required_env();
        env_map.insert("PORT".to_string(), "not_a_number".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "PORT"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_invalid_interval() {
        let mut env_map = setup_required_env();
        env_map.insert("POLL_INTERVAL_SECONDS".to_string(), "0".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "POLL_INTERVAL_SECONDS"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_allowed_users_parsing() {
        let mut env_map = setup_required_env();
        env_map.insert(
            "TELEGRAM_ALLOWED_USERS".to_string(),
            "123, 456 ,789,".to_string(),
        );
        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(config.telegram_allowed_users, vec![123, 456, 789]);
    }

    #[test]
    fn test_invalid_allowed_users() {
        let mut env_map = setup_required_env();
        env_map.insert("TELEGRAM_ALLOWED_USERS".to_string(), "123,abc".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "TELEGRAM_ALLOWED_USERS"),
            _ => panic!("Expected InvalidValue error"),
        }
    }
}
