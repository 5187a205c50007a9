// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Process-level settings read from the environment.
//!
//! These control how the engine talks to the network, not what it
//! collects. Per-call behaviour lives in [`crate::config::CollectionConfig`].

use std::collections::HashMap;
use std::env;
use std::time::Duration;

/// Per-attempt timeout in milliseconds.
const ENV_REQUEST_TIMEOUT_MS: &str = "COLLECTOR_REQUEST_TIMEOUT_MS";
/// Dedicated HTTPS proxy for collection requests.
const ENV_HTTPS_PROXY: &str = "COLLECTOR_HTTPS_PROXY";
/// Generic HTTPS proxy, used when the dedicated one is unset.
const ENV_HTTPS_PROXY_FALLBACK: &str = "HTTPS_PROXY";
/// User-Agent sent unless a collection config overrides it.
const ENV_USER_AGENT: &str = "COLLECTOR_USER_AGENT";
/// Log level filter, consumed by the binary.
const ENV_LOG_LEVEL: &str = "COLLECTOR_LOG_LEVEL";

const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorSettings {
    pub request_timeout: Duration,
    pub https_proxy: Option<String>,
    pub user_agent: String,
    pub log_level: String,
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            https_proxy: None,
            user_agent: default_user_agent(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl CollectorSettings {
    pub fn from_os_env() -> Self {
        Self::from_env_iter(env::vars())
    }

    /// Builds settings from key/value pairs. Blank values are ignored and
    /// unparsable numbers fall back to their defaults.
    pub fn from_env_iter<I, K, V>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: HashMap<String, String> = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let lookup = |key: &str| map.get(key).and_then(|value| non_empty(value));

        let request_timeout = lookup(ENV_REQUEST_TIMEOUT_MS)
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS));
        let https_proxy = lookup(ENV_HTTPS_PROXY).or_else(|| lookup(ENV_HTTPS_PROXY_FALLBACK));
        let user_agent = lookup(ENV_USER_AGENT).unwrap_or_else(default_user_agent);
        let log_level = lookup(ENV_LOG_LEVEL)
            .map(|value| value.to_lowercase())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Self {
            request_timeout,
            https_proxy,
            user_agent,
            log_level,
        }
    }
}

fn default_user_agent() -> String {
    format!("data-collector/{}", env!("CARGO_PKG_VERSION"))
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
