use serde_json::{json, Value};

use crate::error::{PromptKitError, Result};

use super::json_schema::{JsonSchema, SchemaRewrite};
use super::{JsonSchemaTransformerKind, ModelProfile};

/// Google（Gemini / Gemma）模型
pub fn google_model_profile(_model_name: &str) -> Option<ModelProfile> {
    Some(ModelProfile {
        json_schema_transformer: Some(JsonSchemaTransformerKind::Google),
        supports_json_schema_output: true,
        supports_json_object_output: true,
        ..ModelProfile::default()
    })
}

const UNSUPPORTED_KEYS: [&str; 6] = [
    "title",
    "$schema",
    "discriminator",
    "examples",
    "exclusiveMaximum",
    "exclusiveMinimum",
];

/// 将 JSON Schema 改写为 Gemini 可接受的形式
///
/// Gemini 只支持 OpenAPI 3.0.3 的子集：
/// - 不支持 `title`、`$defs`、`const`、`additionalProperties` 等关键字
/// - `enum` 只能是字符串
/// - 不支持 `prefixItems`，转换为 `items`
pub struct GoogleSchemaRewrite {
    root: Value,
}

impl GoogleSchemaRewrite {
    pub fn new(root: &JsonSchema) -> Self {
        Self {
            root: Value::Object(root.clone()),
        }
    }
}

impl SchemaRewrite for GoogleSchemaRewrite {
    fn rewrite(&self, mut schema: JsonSchema) -> Result<JsonSchema> {
        if let Some(additional) = schema.shift_remove("additionalProperties") {
            if is_truthy(&additional) {
                let mut source = schema.clone();
                source.insert("additionalProperties".to_string(), additional);
                let source = Value::Object(source);
                tracing::warn!(
                    schema = %self.root,
                    source = %source,
                    "`additionalProperties` is not supported by Gemini; it will be removed from the tool JSON schema, fields typed as maps will always be empty"
                );
            }
        }

        for key in UNSUPPORTED_KEYS {
            schema.shift_remove(key);
        }
        if let Some(constant) = schema.shift_remove("const") {
            if !constant.is_null() {
                schema.insert("enum".to_string(), json!([constant]));
            }
        }

        // Gemini 只支持字符串枚举
        let enum_members = match schema.get("enum") {
            Some(Value::Array(members)) if !members.is_empty() => Some(
                members
                    .iter()
                    .map(|member| Value::String(stringify(member)))
                    .collect::<Vec<_>>(),
            ),
            _ => None,
        };
        if let Some(members) = enum_members {
            schema.insert("type".to_string(), json!("string"));
            schema.insert("enum".to_string(), Value::Array(members));
        }

        let is_string = schema.get("type").and_then(Value::as_str) == Some("string");
        if schema.contains_key("oneOf") && !schema.contains_key("type") {
            if let Some(one_of) = schema.shift_remove("oneOf") {
                schema.insert("anyOf".to_string(), one_of);
            }
        }

        if is_string {
            if let Some(format) = take_non_empty_str(&mut schema, "format") {
                let description = match schema.get("description").and_then(Value::as_str) {
                    Some(description) if !description.is_empty() => {
                        format!("{description} (format: {format})")
                    }
                    _ => format!("Format: {format}"),
                };
                schema.insert("description".to_string(), Value::String(description));
            }
        }

        if let Some(reference) = schema.get("$ref") {
            return Err(PromptKitError::Schema(format!(
                "Recursive `$ref`s in JSON Schema are not supported by Gemini: {}",
                reference.as_str().unwrap_or_default()
            )));
        }

        if let Some(prefix_items) = schema.shift_remove("prefixItems") {
            let prefix_items = match prefix_items {
                Value::Array(items) => items,
                other => vec![other],
            };
            let items = schema.get("items").cloned();

            let mut unique_items: Vec<Value> = Vec::new();
            if let Some(items) = &items {
                unique_items.push(items.clone());
            }
            for item in &prefix_items {
                if !unique_items.contains(item) {
                    unique_items.push(item.clone());
                }
            }

            match unique_items.len() {
                0 => {}
                1 => {
                    schema.insert("items".to_string(), unique_items.remove(0));
                }
                _ => {
                    schema.insert("items".to_string(), json!({ "anyOf": unique_items }));
                }
            }
            schema
                .entry("minItems")
                .or_insert_with(|| json!(prefix_items.len()));
            if items.is_none() {
                schema
                    .entry("maxItems")
                    .or_insert_with(|| json!(prefix_items.len()));
            }
        }

        Ok(schema)
    }
}

fn take_non_empty_str(schema: &mut JsonSchema, key: &str) -> Option<String> {
    match schema.shift_remove(key) {
        Some(Value::String(value)) if !value.is_empty() => Some(value),
        _ => None,
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(schema: Value) -> Result<Value> {
        let schema = schema.as_object().cloned().unwrap();
        GoogleSchemaRewrite::new(&schema)
            .rewrite(schema)
            .map(Value::Object)
    }

    #[test]
    fn const_becomes_string_enum() {
        assert_eq!(
            rewrite(json!({"const": 3, "title": "Three"})).unwrap(),
            json!({"enum": ["3"], "type": "string"})
        );
    }

    #[test]
    fn format_moves_into_description() {
        assert_eq!(
            rewrite(json!({"type": "string", "format": "date-time", "description": "When"}))
                .unwrap(),
            json!({"type": "string", "description": "When (format: date-time)"})
        );
        assert_eq!(
            rewrite(json!({"type": "string", "format": "email"})).unwrap(),
            json!({"type": "string", "description": "Format: email"})
        );
    }

    #[test]
    fn one_of_without_type_becomes_any_of() {
        assert_eq!(
            rewrite(json!({"oneOf": [{"type": "string"}, {"type": "integer"}]})).unwrap(),
            json!({"anyOf": [{"type": "string"}, {"type": "integer"}]})
        );
    }

    #[test]
    fn additional_properties_are_dropped() {
        assert_eq!(
            rewrite(json!({"type": "object", "additionalProperties": {"type": "integer"}}))
                .unwrap(),
            json!({"type": "object"})
        );
        assert_eq!(
            rewrite(json!({"type": "object", "additionalProperties": false})).unwrap(),
            json!({"type": "object"})
        );
    }

    #[test]
    fn remaining_ref_is_rejected() {
        let err = rewrite(json!({"$ref": "#/$defs/Node"})).unwrap_err();
        assert!(matches!(err, PromptKitError::Schema(msg) if msg.contains("#/$defs/Node")));
    }

    #[test]
    fn prefix_items_collapse() {
        assert_eq!(
            rewrite(json!({
                "type": "array",
                "prefixItems": [{"type": "integer"}, {"type": "integer"}],
            }))
            .unwrap(),
            json!({
                "type": "array",
                "items": {"type": "integer"},
                "minItems": 2,
                "maxItems": 2,
            })
        );

        assert_eq!(
            rewrite(json!({
                "type": "array",
                "prefixItems": [{"type": "integer"}, {"type": "string"}],
                "items": {"type": "boolean"},
            }))
            .unwrap(),
            json!({
                "type": "array",
                "items": {"anyOf": [{"type": "boolean"}, {"type": "integer"}, {"type": "string"}]},
                "minItems": 2,
            })
        );
    }
}
