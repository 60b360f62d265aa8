//! Schema validation adapter.
//!
//! JSON Schema evaluation is delegated to the `jsonschema` crate, pinned to
//! draft 4 (the draft Swagger 2.0 schemas are written against) with format
//! assertions enabled. Raised errors are mapped into [`SchemaViolations`]
//! entries phrased against the body, e.g. `.id in body is required`.

use jsonschema::error::{TypeKind, ValidationErrorKind};
use jsonschema::{Draft, JSONSchema, ValidationError};
use serde_json::Value;

use crate::error::SchemaViolations;

/// Validates a decoded body against an expanded schema.
pub fn validate(schema: &Value, instance: &Value) -> Result<(), SchemaViolations> {
    let compiled = JSONSchema::options()
        .with_draft(Draft::Draft4)
        .should_validate_formats(true)
        .compile(schema)
        .map_err(|err| SchemaViolations {
            errors: vec![format!("schema cannot be compiled: {err}")],
        })?;

    let result = match compiled.validate(instance) {
        Ok(()) => Ok(()),
        Err(errors) => Err(SchemaViolations {
            errors: errors.map(|error| render(&error)).collect(),
        }),
    };
    result
}

fn render(error: &ValidationError<'_>) -> String {
    let pointer = error.instance_path.to_string();
    match &error.kind {
        ValidationErrorKind::Required { property } => {
            let property = property
                .as_str()
                .map_or_else(|| property.to_string(), str::to_string);
            format!("{}.{property} in body is required", dotted(&pointer))
        }
        ValidationErrorKind::Type { kind } => {
            let expected = match kind {
                TypeKind::Single(primitive) => primitive.to_string(),
                TypeKind::Multiple(primitives) => (*primitives)
                    .into_iter()
                    .map(|primitive| primitive.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            };
            format!("{} in body must be of type {expected}", field_label(&pointer))
        }
        _ => format!("{} in body: {error}", field_label(&pointer)),
    }
}

fn dotted(pointer: &str) -> String {
    pointer.replace('/', ".")
}

fn field_label(pointer: &str) -> String {
    let label = dotted(pointer);
    let label = label.trim_start_matches('.');
    if label.is_empty() {
        "body".to_string()
    } else {
        label.to_string()
    }
}
