// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Per-call collection configuration.
//!
//! Field names follow the camelCase wire shape of the request body. Fields
//! that the validator has to inspect (`url`, `method`, `retryTimes`,
//! `retryInterval`) are kept loosely typed so a malformed value becomes a
//! validation message rather than a deserialization failure.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::time::Duration;

pub const DEFAULT_RETRY_TIMES: u32 = 3;
pub const DEFAULT_RETRY_INTERVAL_MS: u64 = 1000;

/// HTTP methods a collection may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    /// Parses the exact upper-case spelling; anything else is rejected.
    pub fn parse(method: &str) -> Option<Self> {
        match method {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }
}

/// How the response body should be decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    #[default]
    Json,
    Text,
}

/// Declarative description of one endpoint fetch and its field mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionConfig {
    /// Absolute URI of the endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// `"GET"` or `"POST"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Merged over the default `Content-Type: application/json`.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, String>,
    /// Appended to the query component of `url`.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub query_params: IndexMap<String, String>,
    /// Sent as JSON text for non-GET requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(default)]
    pub response_type: ResponseType,
    /// Output field name to dot-separated path. A repeated field name in the
    /// source document keeps the last path given for it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_mapping: Option<IndexMap<String, String>>,
    /// Total number of attempts. Defaults to [`DEFAULT_RETRY_TIMES`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_times: Option<Number>,
    /// Delay between attempts in milliseconds. Defaults to
    /// [`DEFAULT_RETRY_INTERVAL_MS`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_interval: Option<Number>,
}

impl CollectionConfig {
    pub fn new(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: Some(url.into()),
            method: Some(method.as_str().to_string()),
            ..Default::default()
        }
    }

    /// The parsed method, if it is one of the supported spellings.
    pub fn http_method(&self) -> Option<HttpMethod> {
        self.method.as_deref().and_then(HttpMethod::parse)
    }

    /// Attempt count with the default applied. `None` when the configured
    /// value is not a non-negative integer that fits in `u32`.
    pub fn attempts(&self) -> Option<u32> {
        match &self.retry_times {
            None => Some(DEFAULT_RETRY_TIMES),
            Some(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        }
    }

    /// Inter-attempt delay with the default applied. `None` when the
    /// configured value is not a non-negative integer.
    pub fn interval(&self) -> Option<Duration> {
        match &self.retry_interval {
            None => Some(Duration::from_millis(DEFAULT_RETRY_INTERVAL_MS)),
            Some(n) => n.as_u64().map(Duration::from_millis),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(key.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    pub fn with_mapping(mut self, field: impl Into<String>, path: impl Into<String>) -> Self {
        self.output_mapping
            .get_or_insert_with(IndexMap::new)
            .insert(field.into(), path.into());
        self
    }

    pub fn with_retry(mut self, times: u32, interval_ms: u64) -> Self {
        self.retry_times = Some(times.into());
        self.retry_interval = Some(interval_ms.into());
        self
    }
}
