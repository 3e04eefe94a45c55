use thiserror::Error;

pub const BUFFER_SIZE_VAR: &str = "CATALOG_BUFFER_SIZE";
pub const ID_PREFIX_VAR: &str = "CATALOG_ID_PREFIX";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Runtime settings for the catalog system.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    /// Capacity of the store actor's mailbox. Must be non-zero.
    pub buffer_size: usize,
    /// Prefix of generated product ids (`<prefix>_<n>`).
    pub id_prefix: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            buffer_size: 32,
            id_prefix: "product".to_string(),
        }
    }
}

impl CatalogConfig {
    /// Reads `CATALOG_BUFFER_SIZE` and `CATALOG_ID_PREFIX`, falling back to
    /// the defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(BUFFER_SIZE_VAR) {
            config.buffer_size = match raw.trim().parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: BUFFER_SIZE_VAR,
                        value: raw,
                    })
                }
            };
        }

        if let Some(prefix) = lookup(ID_PREFIX_VAR) {
            let prefix = prefix.trim();
            if prefix.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: ID_PREFIX_VAR,
                    value: prefix.to_string(),
                });
            }
            config.id_prefix = prefix.to_string();
        }

        Ok(config)
    }
}
