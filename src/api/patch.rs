//! JSON Merge Patch
//!
//! RFC 7386 merge used as the update function for PATCH /cache/:key.

use serde_json::Value;

/// Returns `target` with `patch` merged into it.
///
/// Object members set to null are removed; any non-object patch replaces the
/// target outright.
pub fn merge_patch(target: &Value, patch: &Value) -> Value {
    let Value::Object(patch_members) = patch else {
        return patch.clone();
    };

    let mut merged = match target {
        Value::Object(members) => members.clone(),
        _ => serde_json::Map::new(),
    };

    for (name, value) in patch_members {
        if value.is_null() {
            merged.remove(name);
        } else {
            let current = merged.get(name).cloned().unwrap_or(Value::Null);
            merged.insert(name.clone(), merge_patch(&current, value));
        }
    }

    Value::Object(merged)
}
