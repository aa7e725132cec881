//! Tree → flat map direction of the transform.

use serde_json::Value;

use crate::{error::Error, path::join, types::FlatMap};

/// Flattens a nested tree into a map from dotted paths to scalar values.
///
/// Object children append their key as a path segment; array elements append
/// their zero-based position. `null` leaves are normalized to the empty
/// string so every key survives a round trip. Empty containers contribute no
/// entries: the flat representation only knows about leaves.
///
/// The root must itself be a container; a bare scalar has no path to hang it
/// on and is rejected with [`Error::UnsupportedValue`].
///
/// # Example
/// ```rust
/// use keynest::flatten;
/// use serde_json::json;
///
/// let flat = flatten(&json!({"a": {"b": 1, "c": [1, 2]}}))?;
/// assert_eq!(flat["a.b"], json!(1));
/// assert_eq!(flat["a.c.0"], json!(1));
/// assert_eq!(flat["a.c.1"], json!(2));
/// # Ok::<(), keynest::Error>(())
/// ```
pub fn flatten(tree: &Value) -> Result<FlatMap, Error> {
    if !matches!(tree, Value::Object(_) | Value::Array(_)) {
        return Err(Error::unsupported_value(
            "the root of a document must be an object or array",
        ));
    }
    let mut flat = FlatMap::new();
    flatten_into(tree, "", &mut flat);
    Ok(flat)
}

fn flatten_into(tree: &Value, prefix: &str, flat: &mut FlatMap) {
    match tree {
        Value::Object(children) => {
            for (name, child) in children {
                flatten_into(child, &join(prefix, name), flat);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                flatten_into(child, &join(prefix, &i.to_string()), flat);
            }
        }
        Value::Null => {
            flat.insert(prefix.to_string(), Value::String(String::new()));
        }
        scalar => {
            flat.insert(prefix.to_string(), scalar.clone());
        }
    }
}
