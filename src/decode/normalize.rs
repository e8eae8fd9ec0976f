//! JSON array decoding and record flattening

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};

/// Separator joining nested keys
pub const NESTED_SEPARATOR: char = '.';

/// Decode a response body into flat rows
///
/// The body must be a JSON array whose elements are all objects; anything
/// else is an error and no rows are produced.
pub fn decode_records(body: &str) -> Result<Vec<JsonObject>> {
    let value: JsonValue = serde_json::from_str(body).map_err(|e| Error::Decode {
        message: format!("Failed to parse JSON: {e}"),
    })?;

    let items = match value {
        JsonValue::Array(items) => items,
        other => {
            return Err(Error::decode(format!(
                "Expected a JSON array, got {}",
                type_name(&other)
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            JsonValue::Object(obj) => Ok(flatten_record(obj)),
            other => Err(Error::decode(format!(
                "Element {idx} is {}, expected an object",
                type_name(&other)
            ))),
        })
        .collect()
}

/// Flatten nested objects into dotted keys
///
/// Arrays and scalars are kept as they are. An empty nested object
/// disappears, matching `json_normalize`.
pub fn flatten_record(record: JsonObject) -> JsonObject {
    let mut flat = JsonObject::new();
    flatten_into(&mut flat, None, record);
    flat
}

fn flatten_into(out: &mut JsonObject, prefix: Option<&str>, obj: JsonObject) {
    for (key, value) in obj {
        let name = match prefix {
            Some(p) => format!("{p}{NESTED_SEPARATOR}{key}"),
            None => key,
        };
        match value {
            JsonValue::Object(nested) => flatten_into(out, Some(&name), nested),
            other => {
                out.insert(name, other);
            }
        }
    }
}

fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
