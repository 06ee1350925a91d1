use thiserror::Error;

/// Names the table a function reads and writes.
pub const TABLE_NAME_VAR: &str = "DYNAMODB_TABLE_NAME";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
}

pub fn table_name() -> Result<String, ConfigError> {
    std::env::var(TABLE_NAME_VAR)
        .ok()
        .filter(|name| !name.is_empty())
        .ok_or(ConfigError::Missing(TABLE_NAME_VAR))
}
