//! Server configuration from environment variables.
//!
//! | variable | default |
//! |---|---|
//! | `BIND_ADDR` | `0.0.0.0` |
//! | `PORT` | `3000` |
//! | `SOIL_RECS_CATALOG` | `extended` |
//! | `SOIL_RECS_MAX_RECORDS` | `1000` |
//! | `SOIL_RECS_STRICT` | off |
//!
//! Unparseable values fall back to the default with a warning rather than
//! aborting startup.

use engine::CatalogVariant;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub catalog: CatalogVariant,
    /// Capacity of the in-memory assessment log
    pub max_records: usize,
    /// Reject out-of-domain measurements with 422 instead of evaluating them
    pub strict_validation: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            catalog: CatalogVariant::Extended,
            max_records: 1000,
            strict_validation: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            bind_addr: parse_or("BIND_ADDR", lookup("BIND_ADDR"), defaults.bind_addr),
            port: parse_or("PORT", lookup("PORT"), defaults.port),
            catalog: parse_or("SOIL_RECS_CATALOG", lookup("SOIL_RECS_CATALOG"), defaults.catalog),
            max_records: parse_or(
                "SOIL_RECS_MAX_RECORDS",
                lookup("SOIL_RECS_MAX_RECORDS"),
                defaults.max_records,
            ),
            strict_validation: lookup("SOIL_RECS_STRICT")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.strict_validation),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
{
    match raw {
        None => default,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, using {:?}", key, value, default);
            default
        }),
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(config_from(&[]), ServerConfig::default());
    }

    #[test]
    fn test_reads_all_variables() {
        let config = config_from(&[
            ("BIND_ADDR", "127.0.0.1"),
            ("PORT", "8080"),
            ("SOIL_RECS_CATALOG", "basic"),
            ("SOIL_RECS_MAX_RECORDS", "50"),
            ("SOIL_RECS_STRICT", "true"),
        ]);

        assert_eq!(config.socket_addr(), "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.catalog, CatalogVariant::Basic);
        assert_eq!(config.max_records, 50);
        assert!(config.strict_validation);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("PORT", "eighty"),
            ("SOIL_RECS_CATALOG", "everything"),
            ("SOIL_RECS_STRICT", "maybe"),
        ]);

        assert_eq!(config.port, 3000);
        assert_eq!(config.catalog, CatalogVariant::Extended);
        assert!(!config.strict_validation);
    }
}
