//! Structural validation of raw model output.
//!
//! The validator walks an untyped JSON tree alongside a [`DocumentSchema`],
//! collecting one [`FieldError`] per violated constraint. Only a tree with
//! no errors is deserialized into its typed document.

use serde_json::{Map, Value as JsonValue};

use crate::documents::Document;
use crate::outcome::{FieldError, ValidationOutcome};
use crate::schema::{DocumentSchema, Field, FieldType};

/// Path used for errors on the top-level value itself
pub const ROOT_PATH: &str = "$";

/// Validate `raw` against `D`'s schema and produce the typed document.
pub fn validate<D: Document>(raw: &JsonValue) -> ValidationOutcome<D> {
    let checked = match check(D::SCHEMA, raw) {
        Ok(value) => value,
        Err(errors) => return ValidationOutcome::Failure(errors),
    };

    match serde_json::from_value::<D>(checked) {
        Ok(document) => ValidationOutcome::Success(document),
        Err(e) => ValidationOutcome::Failure(vec![FieldError::new(ROOT_PATH, e.to_string())]),
    }
}

/// Check `raw` against `schema`, returning the normalized tree.
///
/// The normalized tree contains only declared fields, with decimal-string
/// coercion applied. `raw` itself is never modified.
pub fn check(schema: &DocumentSchema, raw: &JsonValue) -> Result<JsonValue, Vec<FieldError>> {
    let mut errors = Vec::new();
    let value = match raw {
        JsonValue::Object(map) => check_object(schema.fields, map, "", &mut errors),
        other => {
            errors.push(FieldError::new(
                ROOT_PATH,
                format!("expected object, found {}", kind(other)),
            ));
            JsonValue::Null
        }
    };

    if errors.is_empty() {
        Ok(value)
    } else {
        Err(errors)
    }
}

fn check_object(
    fields: &[Field],
    map: &Map<String, JsonValue>,
    path: &str,
    errors: &mut Vec<FieldError>,
) -> JsonValue {
    let mut out = Map::new();
    for field in fields {
        let field_path = join(path, field.name);
        match map.get(field.name) {
            Some(value) => {
                let checked = check_value(&field.ty, value, &field_path, errors);
                out.insert(field.name.to_string(), checked);
            }
            None => errors.push(FieldError::new(field_path, "required field is missing")),
        }
    }
    JsonValue::Object(out)
}

fn check_value(
    ty: &FieldType,
    value: &JsonValue,
    path: &str,
    errors: &mut Vec<FieldError>,
) -> JsonValue {
    match (ty, value) {
        (FieldType::Nullable(_), JsonValue::Null) => JsonValue::Null,
        (FieldType::Nullable(inner), _) => check_value(inner, value, path, errors),
        (FieldType::String, JsonValue::String(_)) => value.clone(),
        (FieldType::DecimalString, JsonValue::String(_)) => value.clone(),
        (FieldType::DecimalString, JsonValue::Number(n)) => JsonValue::String(n.to_string()),
        (FieldType::Integer { min, max }, JsonValue::Number(n)) if !n.is_f64() => {
            let in_range = n.as_i64().is_some_and(|v| (*min..=*max).contains(&v));
            if !in_range {
                errors.push(FieldError::new(
                    path,
                    format!("expected integer between {min} and {max}, found {n}"),
                ));
            }
            value.clone()
        }
        (FieldType::Number, JsonValue::Number(_)) => value.clone(),
        (FieldType::Boolean, JsonValue::Bool(_)) => value.clone(),
        (FieldType::Enum(allowed), JsonValue::String(s)) => {
            if !allowed.iter().any(|a| a == s) {
                errors.push(FieldError::new(
                    path,
                    format!("expected one of [{}], found \"{}\"", allowed.join(", "), s),
                ));
            }
            value.clone()
        }
        (FieldType::Object(fields), JsonValue::Object(map)) => {
            check_object(fields, map, path, errors)
        }
        (FieldType::Array(item), JsonValue::Array(items)) => JsonValue::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, v)| check_value(item, v, &format!("{path}[{i}]"), errors))
                .collect(),
        ),
        _ => {
            errors.push(FieldError::new(
                path,
                format!("expected {}, found {}", expected(ty), kind(value)),
            ));
            value.clone()
        }
    }
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}

fn expected(ty: &FieldType) -> &'static str {
    match ty {
        FieldType::String | FieldType::Enum(_) => "string",
        FieldType::DecimalString => "decimal string",
        FieldType::Integer { .. } => "integer",
        FieldType::Number => "number",
        FieldType::Boolean => "boolean",
        FieldType::Object(_) => "object",
        FieldType::Array(_) => "array",
        FieldType::Nullable(inner) => expected(inner),
    }
}

fn kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(n) if n.is_f64() => "number",
        JsonValue::Number(_) => "integer",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
