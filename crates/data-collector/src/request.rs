// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Turns a validated [`CollectionConfig`] into a concrete outbound request.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use url::Url;

use crate::config::{CollectionConfig, HttpMethod};
use crate::error::BuildError;

/// Outbound request ready to hand to a transport.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub url: Url,
    pub method: HttpMethod,
    pub headers: HeaderMap,
    /// JSON text of the configured body. Always `None` for GET.
    pub body: Option<String>,
}

/// Builds the request for `config`.
///
/// Query parameters are appended after any already present on the URL,
/// so duplicate keys appear twice. Configured headers replace the default
/// `Content-Type` on a case-insensitive name match.
pub fn build(config: &CollectionConfig) -> Result<PreparedRequest, BuildError> {
    let raw_url = config.url.as_deref().unwrap_or_default().trim();
    let mut url = Url::parse(raw_url).map_err(|e| BuildError::InvalidUrl {
        url: raw_url.to_string(),
        reason: e.to_string(),
    })?;

    if !config.query_params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &config.query_params {
            pairs.append_pair(key, value);
        }
    }

    let method = config.http_method().ok_or_else(|| {
        BuildError::UnsupportedMethod(config.method.clone().unwrap_or_default())
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    for (name, value) in &config.headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| BuildError::InvalidHeader(name.clone()))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|_| BuildError::InvalidHeader(name.clone()))?;
        headers.insert(header_name, header_value);
    }

    let body = match (method, &config.body) {
        (HttpMethod::Get, _) | (_, None) => None,
        (_, Some(body)) => Some(serde_json::to_string(body)?),
    };

    Ok(PreparedRequest {
        url,
        method,
        headers,
        body,
    })
}
