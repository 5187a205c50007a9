// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Projection of a decoded body into a flat, named record.

use indexmap::IndexMap;
use tracing::debug;

use crate::extractor::resolve;
use crate::path_value::PathValue;

/// One slot per mapping rule. `None` is the null slot: the path could not
/// be resolved, or it resolved to a JSON null. Both serialize as `null`, so
/// the in-memory value always survives a serialize/deserialize cycle.
pub type MappedData = IndexMap<String, Option<PathValue>>;

/// Applies every `(field, path)` rule to `root`.
///
/// Rules are independent: a path that cannot be resolved leaves `None` in
/// its own slot and the remaining rules still run. The output has exactly
/// the keys of `mapping`, in the same order.
pub fn map_output(root: &PathValue, mapping: &IndexMap<String, String>) -> MappedData {
    mapping
        .iter()
        .fold(MappedData::with_capacity(mapping.len()), |mut out, (field, path)| {
            let slot = match resolve(root, path) {
                Ok(PathValue::Null) => None,
                Ok(value) => Some(value.clone()),
                Err(e) => {
                    debug!("Mapped field '{field}' set to null: {e}");
                    None
                }
            };
            out.insert(field.clone(), slot);
            out
        })
}
