// Copyright (c) 2025 - Cowboy AI, Inc.

//! Equinix Metal API configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.equinix.com/metal/v1";

pub const ENV_API_URL: &str = "METAL_API_URL";
pub const ENV_API_KEY: &str = "METAL_API_KEY";
pub const ENV_PROJECT_ID: &str = "METAL_PROJECT_ID";
pub const ENV_TIMEOUT_SECS: &str = "METAL_TIMEOUT_SECS";

/// Configuration loading error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Connection settings for the Metal device directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetalConfig {
    /// API base URL (e.g., "https://api.equinix.com/metal/v1")
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// API token sent as `X-Auth-Token`
    pub auth_token: String,

    /// Project whose devices back the cluster's nodes
    pub project_id: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for MetalConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            auth_token: String::new(),
            project_id: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

impl MetalConfig {
    pub fn new(auth_token: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            project_id: project_id.into(),
            ..Self::default()
        }
    }

    /// Load configuration from `METAL_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let timeout_secs = match lookup(ENV_TIMEOUT_SECS) {
            Some(value) => value
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid {
                    name: ENV_TIMEOUT_SECS,
                    value,
                })?,
            None => default_timeout(),
        };

        Ok(Self {
            api_url: lookup(ENV_API_URL)
                .filter(|url| !url.is_empty())
                .unwrap_or_else(default_api_url),
            auth_token: required(ENV_API_KEY)?,
            project_id: required(ENV_PROJECT_ID)?,
            timeout_secs,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}
