// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Deserializer, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::mapper::MappedData;
use crate::path_value::PathValue;

/// Envelope returned by every collection, successful or not.
///
/// `mappedData` is omitted entirely when the config had no
/// `outputMapping`; when present, unresolved fields serialize as `null`.
///
/// A successful result always carries `data`, even when the body was a
/// JSON `null`, so on deserialization `data: null` means
/// `Some(PathValue::Null)` for a success and `None` for a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "WireResult")]
pub struct CollectionResult {
    pub success: bool,
    pub data: Option<PathValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapped_data: Option<MappedData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Epoch milliseconds at which the result was produced.
    pub timestamp: u64,
}

impl CollectionResult {
    pub fn success(data: PathValue, mapped_data: Option<MappedData>) -> Self {
        Self {
            success: true,
            data: Some(data),
            mapped_data,
            error: None,
            timestamp: now_millis(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            mapped_data: None,
            error: Some(error.into()),
            timestamp: now_millis(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireResult {
    success: bool,
    #[serde(default, deserialize_with = "present_value")]
    data: Option<PathValue>,
    #[serde(default)]
    mapped_data: Option<MappedData>,
    #[serde(default)]
    error: Option<String>,
    timestamp: u64,
}

impl From<WireResult> for CollectionResult {
    fn from(wire: WireResult) -> Self {
        Self {
            success: wire.success,
            data: if wire.success { wire.data } else { None },
            mapped_data: wire.mapped_data,
            error: wire.error,
            timestamp: wire.timestamp,
        }
    }
}

/// Keeps a present `null` as `PathValue::Null` instead of `None`.
fn present_value<'de, D>(deserializer: D) -> Result<Option<PathValue>, D::Error>
where
    D: Deserializer<'de>,
{
    PathValue::deserialize(deserializer).map(Some)
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}
