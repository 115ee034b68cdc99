use shared::repositories::solver_repository::DataSources;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} environment variable must be set", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_sources: DataSources,
    /// DynamoDB table for archived matches. Matches are kept in memory when unset.
    pub archive_table: Option<String>,
    pub bind_address: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let one_player_api = required("SOLVER_ONE_PLAYER_API")?;
        let two_player_api = required("SOLVER_TWO_PLAYER_API")?;

        Ok(Config {
            data_sources: DataSources::new(&one_player_api, &two_player_api),
            archive_table: lookup("MATCH_ARCHIVE_TABLE").filter(|value| !value.is_empty()),
            bind_address: lookup("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
        })
    }
}
