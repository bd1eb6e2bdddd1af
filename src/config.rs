//! Advisor configuration: reasoning service endpoint and data file location

use log::warn;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3.2";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub const ENV_ENDPOINT: &str = "LOAN_ADVISOR_ENDPOINT";
pub const ENV_MODEL: &str = "LOAN_ADVISOR_MODEL";
pub const ENV_TIMEOUT_SECS: &str = "LOAN_ADVISOR_TIMEOUT_SECS";
pub const ENV_DATA: &str = "LOAN_ADVISOR_DATA";

/// Settings for a run of the advisor
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisorConfig {
    /// Base URL of the reasoning service
    pub endpoint: String,

    /// Model identifier sent with each request
    pub model: String,

    /// Request timeout; an expired request counts as a service failure
    pub timeout: Duration,

    /// Loan collection JSON file
    pub data_file: PathBuf,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            data_file: default_data_file(),
        }
    }
}

impl AdvisorConfig {
    /// Defaults overridden by any `LOAN_ADVISOR_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by values from `lookup`
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENV_ENDPOINT).filter(|v| !v.trim().is_empty()) {
            config.endpoint = endpoint;
        }
        if let Some(model) = lookup(ENV_MODEL).filter(|v| !v.trim().is_empty()) {
            config.model = model;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => warn!("{}={:?} is not a positive number of seconds, keeping {} s",
                    ENV_TIMEOUT_SECS, raw, config.timeout.as_secs()),
            }
        }
        if let Some(path) = lookup(ENV_DATA).filter(|v| !v.trim().is_empty()) {
            config.data_file = PathBuf::from(path);
        }

        config
    }

    /// URL of the non-streaming completion endpoint
    pub fn generate_url(&self) -> String {
        format!("{}/api/generate", self.endpoint.trim_end_matches('/'))
    }
}

/// `<user data dir>/loan-advisor/loans.json`, or `loans.json` in the working directory
pub fn default_data_file() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("loan-advisor").join("loans.json"))
        .unwrap_or_else(|| PathBuf::from("loans.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AdvisorConfig::from_lookup(|_| None);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(config.generate_url(), "http://localhost:11434/api/generate");
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_ENDPOINT, "http://gpu-box:11434/"),
            (ENV_MODEL, "mistral"),
            (ENV_TIMEOUT_SECS, "30"),
            (ENV_DATA, "/tmp/my-loans.json"),
        ]
        .into_iter()
        .collect();
        let config = AdvisorConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.model, "mistral");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.data_file, PathBuf::from("/tmp/my-loans.json"));
        assert_eq!(config.generate_url(), "http://gpu-box:11434/api/generate");
    }

    #[test]
    fn test_bad_timeout_keeps_default() {
        let config = AdvisorConfig::from_lookup(|key| {
            (key == ENV_TIMEOUT_SECS).then(|| "soon".to_string())
        });
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }
}
