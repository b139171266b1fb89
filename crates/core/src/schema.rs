//! Declarative document schemas.
//!
//! A [`DocumentSchema`] is a static description of the JSON shape a model
//! must produce for one document type. Schemas are built from `const` field
//! tables so they live for the whole process and never change.

use serde_json::{Map, Value as JsonValue, json};

/// Type of a single schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    /// Decimal amount carried as text. A numeric literal is coerced to its
    /// decimal representation; this is the only coercion the validator makes.
    DecimalString,
    /// Whole number within `min..=max`
    Integer { min: i64, max: i64 },
    Number,
    Boolean,
    Object(&'static [Field]),
    Array(&'static FieldType),
    Nullable(&'static FieldType),
    Enum(&'static [&'static str]),
}

impl FieldType {
    /// Integer that fits a `u32` field
    pub const U32: FieldType = FieldType::Integer {
        min: 0,
        max: u32::MAX as i64,
    };
    /// Integer that fits an `i32` field
    pub const I32: FieldType = FieldType::Integer {
        min: i32::MIN as i64,
        max: i32::MAX as i64,
    };
}

/// A named, required field of an object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub ty: FieldType,
}

impl Field {
    pub const fn new(name: &'static str, ty: FieldType) -> Self {
        Self { name, ty }
    }
}

/// Named set of top-level fields for one document type
#[derive(Debug, PartialEq, Eq)]
pub struct DocumentSchema {
    pub name: &'static str,
    pub fields: &'static [Field],
}

impl DocumentSchema {
    pub const fn new(name: &'static str, fields: &'static [Field]) -> Self {
        Self { name, fields }
    }

    /// Render as a JSON Schema object, suitable for a structured
    /// response-format hint.
    pub fn json_schema(&self) -> JsonValue {
        object_schema(self.fields)
    }
}

fn object_schema(fields: &[Field]) -> JsonValue {
    let mut properties = Map::new();
    for field in fields {
        properties.insert(field.name.to_string(), type_schema(&field.ty));
    }
    let required: Vec<&str> = fields.iter().map(|f| f.name).collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false
    })
}

fn type_schema(ty: &FieldType) -> JsonValue {
    match ty {
        FieldType::String | FieldType::DecimalString => json!({ "type": "string" }),
        FieldType::Integer { min, max } => {
            json!({ "type": "integer", "minimum": min, "maximum": max })
        }
        FieldType::Number => json!({ "type": "number" }),
        FieldType::Boolean => json!({ "type": "boolean" }),
        FieldType::Object(fields) => object_schema(fields),
        FieldType::Array(item) => json!({ "type": "array", "items": type_schema(item) }),
        FieldType::Nullable(inner) => json!({ "anyOf": [type_schema(inner), { "type": "null" }] }),
        FieldType::Enum(values) => json!({ "type": "string", "enum": values }),
    }
}
