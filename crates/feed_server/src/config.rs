use std::net::SocketAddr;

use crate::{ConfigError, REFERENCE_SIZE};

pub const BIND_ADDR_VAR: &str = "FEED_BIND_ADDR";
pub const COLLECTION_SIZE_VAR: &str = "FEED_COLLECTION_SIZE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub collection_size: usize,
    /// Advisory shared-cache policy sent with every page.
    pub cache_control: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            collection_size: REFERENCE_SIZE,
            cache_control: "s-maxage=60, stale-while-revalidate=30".to_string(),
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by `FEED_BIND_ADDR` and `FEED_COLLECTION_SIZE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = lookup(BIND_ADDR_VAR) {
            config.bind_addr = value.parse().map_err(|err: std::net::AddrParseError| {
                ConfigError::Invalid {
                    name: BIND_ADDR_VAR,
                    value: value.clone(),
                    reason: err.to_string(),
                }
            })?;
        }
        if let Some(value) = lookup(COLLECTION_SIZE_VAR) {
            config.collection_size =
                value
                    .parse()
                    .map_err(|err: std::num::ParseIntError| ConfigError::Invalid {
                        name: COLLECTION_SIZE_VAR,
                        value: value.clone(),
                        reason: err.to_string(),
                    })?;
        }
        Ok(config)
    }
}
