//! Connection settings for the search service.

use std::env;

/// Default search service host, as named in the exam's container setup.
pub const DEFAULT_HOST: &str = "elasticsearch";

/// Default search service HTTP port.
pub const DEFAULT_PORT: u16 = 9200;

/// Default URL scheme.
pub const DEFAULT_SCHEME: &str = "http";

/// Where the search service lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub host: String,
    pub port: u16,
    pub scheme: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            scheme: DEFAULT_SCHEME.to_string(),
        }
    }
}

impl SearchConfig {
    /// Build the configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ELASTICSEARCH_HOST`: service host name (default: elasticsearch)
    /// - `ELASTICSEARCH_PORT`: service port (default: 9200)
    /// - `ELASTICSEARCH_SCHEME`: `http` or `https` (default: http)
    ///
    /// An unparseable port falls back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("ELASTICSEARCH_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = lookup("ELASTICSEARCH_PORT")
            .and_then(|p| p.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let scheme = lookup("ELASTICSEARCH_SCHEME").unwrap_or_else(|| DEFAULT_SCHEME.to_string());

        Self { host, port, scheme }
    }

    /// Base URL of the service, e.g. `http://elasticsearch:9200`.
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = SearchConfig::from_lookup(|_| None);

        assert_eq!(config, SearchConfig::default());
        assert_eq!(config.url(), "http://elasticsearch:9200");
    }

    #[test]
    fn test_overrides_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("ELASTICSEARCH_HOST", "localhost"),
            ("ELASTICSEARCH_PORT", "9201"),
            ("ELASTICSEARCH_SCHEME", "https"),
        ]
        .into_iter()
        .collect();

        let config = SearchConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.url(), "https://localhost:9201");
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let config = SearchConfig::from_lookup(|key| {
            (key == "ELASTICSEARCH_PORT").then(|| "not-a-port".to_string())
        });

        assert_eq!(config.port, DEFAULT_PORT);
    }
}
