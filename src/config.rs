//! Configuration management for the OSS exporter

use serde::Deserialize;
use std::env;
use std::net::SocketAddr;

use crate::error::ConfigError;

/// Routes served regardless of configuration
const RESERVED_PATHS: [&str; 2] = ["/", "/health"];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub web: WebConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Address to listen on, either `host:port` or `:port`
    pub listen_address: String,
    /// Path under which process metrics are exposed
    pub metrics_path: String,
    /// Path under which the probe endpoint is exposed
    pub probe_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub endpoint: String,
    /// Bucket probed when a request does not name one
    pub bucket: String,
    pub access_key_id: String,
    pub access_key_secret: String,
    pub region: Option<String>,
    pub force_path_style: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        WebConfig {
            listen_address: ":9340".to_string(),
            metrics_path: "/metrics".to_string(),
            probe_path: "/probe".to_string(),
        }
    }
}

impl WebConfig {
    /// Resolve the listen address, binding all interfaces for the `:port` form
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let address = if self.listen_address.starts_with(':') {
            format!("0.0.0.0{}", self.listen_address)
        } else {
            self.listen_address.clone()
        };

        address
            .parse()
            .map_err(|e| ConfigError::InvalidListenAddress(self.listen_address.clone(), e))
    }

    /// Reject paths that would collide with each other or with the fixed routes
    fn check_paths(&self) -> Result<(), ConfigError> {
        for path in [&self.metrics_path, &self.probe_path] {
            if RESERVED_PATHS.contains(&path.as_str()) {
                return Err(ConfigError::ConflictingPath(path.clone()));
            }
        }
        if self.metrics_path == self.probe_path {
            return Err(ConfigError::ConflictingPath(self.probe_path.clone()));
        }
        Ok(())
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let required = |name: &'static str| optional(name).ok_or(ConfigError::Missing(name));

        let defaults = WebConfig::default();
        let web = WebConfig {
            listen_address: optional("WEB_LISTEN_ADDRESS").unwrap_or(defaults.listen_address),
            metrics_path: route_path(
                optional("WEB_METRICS_PATH").unwrap_or(defaults.metrics_path),
            )?,
            probe_path: route_path(optional("WEB_PROBE_PATH").unwrap_or(defaults.probe_path))?,
        };
        web.socket_addr()?;
        web.check_paths()?;

        let force_path_style = match optional("OSS_FORCE_PATH_STYLE") {
            None => false,
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "OSS_FORCE_PATH_STYLE",
                        value,
                    })
                }
            },
        };

        let storage = StorageConfig {
            endpoint: required("OSS_ENDPOINT")?,
            bucket: required("OSS_BUCKET")?,
            access_key_id: required("OSS_ACCESS_KEY_ID")?,
            access_key_secret: required("OSS_ACCESS_KEY_SECRET")?,
            region: optional("OSS_REGION"),
            force_path_style,
        };

        Ok(Config { web, storage })
    }
}

fn route_path(path: String) -> Result<String, ConfigError> {
    if path.starts_with('/') {
        Ok(path)
    } else {
        Err(ConfigError::InvalidPath(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn required_vars() -> HashMap<String, String> {
        vars(&[
            ("OSS_ENDPOINT", "https://oss-eu-central-1.aliyuncs.com"),
            ("OSS_BUCKET", "backups"),
            ("OSS_ACCESS_KEY_ID", "id"),
            ("OSS_ACCESS_KEY_SECRET", "secret"),
        ])
    }

    #[test]
    fn test_defaults_applied() {
        let env = required_vars();
        let config = Config::from_lookup(|name| env.get(name).cloned()).unwrap();

        assert_eq!(config.web.listen_address, ":9340");
        assert_eq!(config.web.metrics_path, "/metrics");
        assert_eq!(config.web.probe_path, "/probe");
        assert_eq!(config.storage.bucket, "backups");
        assert_eq!(config.storage.region, None);
        assert!(!config.storage.force_path_style);
        assert_eq!(
            config.web.socket_addr().unwrap(),
            "0.0.0.0:9340".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_missing_endpoint_is_fatal() {
        let mut env = required_vars();
        env.remove("OSS_ENDPOINT");
        let err = Config::from_lookup(|name| env.get(name).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("OSS_ENDPOINT")));
    }

    #[test]
    fn test_empty_credentials_count_as_missing() {
        let mut env = required_vars();
        env.insert("OSS_ACCESS_KEY_SECRET".to_string(), String::new());
        let err = Config::from_lookup(|name| env.get(name).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("OSS_ACCESS_KEY_SECRET")));
    }

    #[test]
    fn test_web_overrides() {
        let mut env = required_vars();
        env.extend(vars(&[
            ("WEB_LISTEN_ADDRESS", "127.0.0.1:9000"),
            ("WEB_PROBE_PATH", "/scrape"),
            ("OSS_FORCE_PATH_STYLE", "true"),
            ("OSS_REGION", "oss-eu-central-1"),
        ]));
        let config = Config::from_lookup(|name| env.get(name).cloned()).unwrap();

        assert_eq!(config.web.probe_path, "/scrape");
        assert_eq!(config.web.socket_addr().unwrap().port(), 9000);
        assert!(config.storage.force_path_style);
        assert_eq!(config.storage.region.as_deref(), Some("oss-eu-central-1"));
    }

    #[test]
    fn test_invalid_web_values_rejected() {
        let mut env = required_vars();
        env.insert("WEB_METRICS_PATH".to_string(), "metrics".to_string());
        let err = Config::from_lookup(|name| env.get(name).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPath(_)));

        let mut env = required_vars();
        env.insert("WEB_LISTEN_ADDRESS".to_string(), "not-an-address".to_string());
        let err = Config::from_lookup(|name| env.get(name).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidListenAddress(..)));
    }

    #[test]
    fn test_conflicting_paths_rejected() {
        let mut env = required_vars();
        env.insert("WEB_PROBE_PATH".to_string(), "/metrics".to_string());
        let err = Config::from_lookup(|name| env.get(name).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::ConflictingPath(_)));

        let mut env = required_vars();
        env.insert("WEB_METRICS_PATH".to_string(), "/health".to_string());
        let err = Config::from_lookup(|name| env.get(name).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::ConflictingPath(_)));
    }
}
