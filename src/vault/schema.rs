//! Structural schema validation
//!
//! A database file is trusted only if the set of nested key-paths in its
//! JSON exactly matches the canonical envelope template. Values are free to
//! differ; keys are not. Arrays and scalars are treated as leaves, so alias
//! definitions and blob contents do not participate in the comparison.

use std::collections::BTreeSet;

use serde_json::Value;

use super::envelope::Envelope;

/// Compare the key-paths of a parsed database file against the template.
///
/// Returns `true` only when neither side has a path the other lacks.
pub fn validate_schema(candidate: &Value) -> bool {
    let template = serde_json::to_value(Envelope::template())
        .expect("envelope template always serializes");
    key_paths(candidate) == key_paths(&template)
}

/// Collect every nested object key-path in dotted form.
fn key_paths(value: &Value) -> BTreeSet<String> {
    let mut paths = BTreeSet::new();
    collect(value, "", &mut paths);
    paths
}

fn collect(value: &Value, prefix: &str, out: &mut BTreeSet<String>) {
    if let Value::Object(map) = value {
        for (key, child) in map {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", prefix, key)
            };
            collect(child, &path, out);
            out.insert(path);
        }
    }
}
