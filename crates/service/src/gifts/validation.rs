//! Request body validation.
//!
//! Bodies arrive as untyped JSON so that wrong types are reported per field
//! instead of failing deserialization as a whole. Unknown fields are ignored.

use serde_json::{Map, Value};

use crate::errors::FieldViolation;
use crate::gifts::domain::{GiftItem, GiftPatch};

const NAME_REQUIRED: &str = "Name is required";
const GIFT_REQUIRED: &str = "Gift description is required";

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, Vec<FieldViolation>> {
    body.as_object().ok_or_else(|| {
        vec![FieldViolation::invalid_type("", format!("Expected object, received {}", kind(body)))]
    })
}

/// Reads a string field. Returns `None` when absent or invalid; invalid
/// values and missing required fields are pushed onto `out`.
fn string_field(
    obj: &Map<String, Value>,
    field: &str,
    required: bool,
    empty_message: Option<&str>,
    out: &mut Vec<FieldViolation>,
) -> Option<String> {
    match obj.get(field) {
        None => {
            if required {
                out.push(FieldViolation::invalid_type(field, "Required"));
            }
            None
        }
        Some(Value::String(s)) => match empty_message {
            Some(msg) if s.is_empty() => {
                out.push(FieldViolation::too_small(field, msg));
                None
            }
            _ => Some(s.clone()),
        },
        Some(other) => {
            out.push(FieldViolation::invalid_type(
                field,
                format!("Expected string, received {}", kind(other)),
            ));
            None
        }
    }
}

fn bool_field(obj: &Map<String, Value>, field: &str, out: &mut Vec<FieldViolation>) -> Option<bool> {
    match obj.get(field) {
        None => None,
        Some(Value::Bool(b)) => Some(*b),
        Some(other) => {
            out.push(FieldViolation::invalid_type(
                field,
                format!("Expected boolean, received {}", kind(other)),
            ));
            None
        }
    }
}

/// Full schema for add: `id`, non-empty `name` and `gift`, optional `purchased` (default false).
pub fn validate_new(body: &Value) -> Result<GiftItem, Vec<FieldViolation>> {
    let obj = as_object(body)?;
    let mut violations = Vec::new();

    let id = string_field(obj, "id", true, None, &mut violations);
    let name = string_field(obj, "name", true, Some(NAME_REQUIRED), &mut violations);
    let gift = string_field(obj, "gift", true, Some(GIFT_REQUIRED), &mut violations);
    let purchased = bool_field(obj, "purchased", &mut violations).unwrap_or(false);

    match (id, name, gift) {
        (Some(id), Some(name), Some(gift)) if violations.is_empty() => {
            Ok(GiftItem { id, name, gift, purchased })
        }
        _ => Err(violations),
    }
}

/// Partial schema for update. Every field is optional but must be valid when present.
/// A present `id` is type-checked and then dropped; the path id is authoritative.
pub fn validate_patch(body: &Value) -> Result<GiftPatch, Vec<FieldViolation>> {
    let obj = as_object(body)?;
    let mut violations = Vec::new();

    let _ = string_field(obj, "id", false, None, &mut violations);
    let name = string_field(obj, "name", false, Some(NAME_REQUIRED), &mut violations);
    let gift = string_field(obj, "gift", false, Some(GIFT_REQUIRED), &mut violations);
    let purchased = bool_field(obj, "purchased", &mut violations);

    if violations.is_empty() {
        Ok(GiftPatch { name, gift, purchased })
    } else {
        Err(violations)
    }
}
