use jsonschema::Validator;
use serde_json::{Map, Value};

use crate::config::RegistryConfig;
use crate::descriptor::{SchemaDescriptor, ValidationFailure, ValidationIssue};
use crate::error::{Result, SchemaError};

/// Schema binding over compiled JSON Schema 2020-12.
///
/// Acceptance yields the input value unchanged: JSON Schema validates but
/// does not transform. Rejection collects one issue per violated constraint.
#[derive(Debug)]
pub struct JsonSchema {
    validator: Validator,
}

impl JsonSchema {
    /// Compile a schema from a JSON string.
    pub fn compile(event: &str, schema_json: &str, config: RegistryConfig) -> Result<Self> {
        let schema: Value =
            serde_json::from_str(schema_json).map_err(|source| SchemaError::InvalidJson {
                event: event.to_string(),
                source,
            })?;
        Self::compile_value(event, &schema, config)
    }

    /// Compile a schema from a JSON value.
    pub fn compile_value(event: &str, schema: &Value, config: RegistryConfig) -> Result<Self> {
        let mut schema_to_compile = schema.clone();
        if config.strict_mode {
            apply_strict_mode(&mut schema_to_compile);
        }

        let validator = jsonschema::validator_for(&schema_to_compile).map_err(|err| {
            SchemaError::CompileFailed {
                event: event.to_string(),
                message: err.to_string(),
            }
        })?;

        Ok(Self { validator })
    }
}

impl SchemaDescriptor for JsonSchema {
    fn validate(&self, value: &Value) -> std::result::Result<Value, ValidationFailure> {
        let issues: Vec<ValidationIssue> = self
            .validator
            .iter_errors(value)
            .map(|err| ValidationIssue::new(err.to_string()))
            .collect();

        if issues.is_empty() {
            Ok(value.clone())
        } else {
            Err(ValidationFailure::new(issues))
        }
    }
}

/// Inject `"additionalProperties": false` into every object schema that does
/// not set it, recursing through the subschema keywords the bus's contracts
/// use.
fn apply_strict_mode(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if is_object_schema(map) && !map.contains_key("additionalProperties") {
                map.insert("additionalProperties".to_string(), Value::Bool(false));
            }

            for key in ["properties", "$defs", "definitions"] {
                if let Some(Value::Object(children)) = map.get_mut(key) {
                    for child in children.values_mut() {
                        apply_strict_mode(child);
                    }
                }
            }
            for key in ["items", "additionalProperties", "not", "if", "then", "else"] {
                if let Some(child) = map.get_mut(key) {
                    apply_strict_mode(child);
                }
            }
            for key in ["prefixItems", "allOf", "anyOf", "oneOf"] {
                if let Some(Value::Array(children)) = map.get_mut(key) {
                    for child in children {
                        apply_strict_mode(child);
                    }
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                apply_strict_mode(item);
            }
        }
        _ => {}
    }
}

fn is_object_schema(map: &Map<String, Value>) -> bool {
    match map.get("type") {
        Some(Value::String(kind)) => kind == "object",
        Some(Value::Array(kinds)) => kinds
            .iter()
            .any(|kind| matches!(kind, Value::String(k) if k == "object")),
        _ => map.contains_key("properties") || map.contains_key("required"),
    }
}
