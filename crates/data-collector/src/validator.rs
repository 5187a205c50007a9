// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Structural validation of a [`CollectionConfig`] before any network I/O.

use serde::Serialize;
use url::Url;

use crate::config::CollectionConfig;
use crate::error::ValidationErrors;

/// Outcome of [`validate`]. `valid` is true iff `errors` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.valid {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}

/// Checks the configuration and collects every violation found.
///
/// Checks run in a fixed order: url, method, retryTimes, retryInterval.
/// Only `http` and `https` URLs are accepted.
/// This never fails; callers decide what to do with the report.
pub fn validate(config: &CollectionConfig) -> ValidationReport {
    let mut errors = Vec::new();

    match config.url.as_deref().map(str::trim) {
        None | Some("") => errors.push("url is required".to_string()),
        Some(raw) => match Url::parse(raw) {
            Err(e) => errors.push(format!("url must be an absolute URI: {e}")),
            Ok(url) if !matches!(url.scheme(), "http" | "https") => errors.push(format!(
                "url scheme must be http or https, got '{}'",
                url.scheme()
            )),
            Ok(_) => {}
        },
    }

    match config.method.as_deref() {
        None => errors.push("method is required".to_string()),
        Some(_) if config.http_method().is_some() => {}
        Some(other) => errors.push(format!("method must be GET or POST, got '{other}'")),
    }

    if let Some(times) = &config.retry_times {
        match times.as_u64() {
            None => errors.push("retryTimes must be a non-negative integer".to_string()),
            Some(n) if u32::try_from(n).is_err() => {
                errors.push(format!("retryTimes must be at most {}", u32::MAX))
            }
            Some(_) => {}
        }
    }

    if config.retry_interval.is_some() && config.interval().is_none() {
        errors.push("retryInterval must be a non-negative integer".to_string());
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}
