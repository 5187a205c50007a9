// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Resolution of dot-separated path expressions against a [`PathValue`].

use crate::error::PathNotFound;
use crate::path_value::PathValue;

/// Resolves `path` against `root`.
///
/// Each `.`-separated segment names a mapping member. A segment that is a
/// non-negative integer also indexes into a sequence, so `items.0.id`
/// works on `{"items": [{"id": 1}]}`. Descending into a null or scalar
/// value, a missing key, an out of range index, or an empty path all yield
/// [`PathNotFound`].
///
/// # Examples
///
/// ```
/// use data_collector::extractor::resolve;
/// use data_collector::path_value::PathValue;
///
/// let root = PathValue::from(serde_json::json!({"a": {"b": {"c": 5}}}));
/// assert_eq!(resolve(&root, "a.b.c").unwrap().as_i64(), Some(5));
/// assert!(resolve(&root, "a.x").is_err());
/// ```
pub fn resolve<'a>(root: &'a PathValue, path: &str) -> Result<&'a PathValue, PathNotFound> {
    if path.is_empty() {
        return Err(PathNotFound(path.to_string()));
    }

    path.split('.').try_fold(root, |current, segment| {
        descend(current, segment).ok_or_else(|| PathNotFound(path.to_string()))
    })
}

fn descend<'a>(current: &'a PathValue, segment: &str) -> Option<&'a PathValue> {
    match current {
        PathValue::Mapping(members) => members.get(segment),
        PathValue::Sequence(items) => segment
            .parse::<usize>()
            .ok()
            .and_then(|index| items.get(index)),
        PathValue::Null | PathValue::Bool(_) | PathValue::Number(_) | PathValue::String(_) => None,
    }
}
