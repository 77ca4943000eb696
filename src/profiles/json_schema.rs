//! JSON Schema 遍历与转换
//!
//! [`JsonSchemaWalker`] 负责递归遍历（内联 `$defs`、处理联合类型），
//! 每个节点的子节点处理完后交给 [`SchemaRewrite`] 做具体改写。

use serde_json::{json, Map, Value};

use crate::error::{PromptKitError, Result};

pub type JsonSchema = Map<String, Value>;

const DEFS_REF_PREFIX: &str = "#/$defs/";

/// 单个节点的改写逻辑
pub trait SchemaRewrite {
    fn rewrite(&self, schema: JsonSchema) -> Result<JsonSchema>;
}

/// 只内联定义，不修改节点
pub struct InlineDefsRewrite;

impl SchemaRewrite for InlineDefsRewrite {
    fn rewrite(&self, schema: JsonSchema) -> Result<JsonSchema> {
        Ok(schema)
    }
}

pub struct JsonSchemaWalker<'a, R: SchemaRewrite + ?Sized> {
    rewrite: &'a R,
    prefer_inlined_defs: bool,
    simplify_nullable_unions: bool,
    defs: JsonSchema,
    refs_stack: Vec<String>,
    recursive_refs: Vec<String>,
}

impl<'a, R: SchemaRewrite + ?Sized> JsonSchemaWalker<'a, R> {
    pub fn new(rewrite: &'a R) -> Self {
        Self {
            rewrite,
            prefer_inlined_defs: false,
            simplify_nullable_unions: false,
            defs: JsonSchema::new(),
            refs_stack: Vec::new(),
            recursive_refs: Vec::new(),
        }
    }

    pub fn prefer_inlined_defs(mut self, enabled: bool) -> Self {
        self.prefer_inlined_defs = enabled;
        self
    }

    pub fn simplify_nullable_unions(mut self, enabled: bool) -> Self {
        self.simplify_nullable_unions = enabled;
        self
    }

    pub fn walk(mut self, schema: &JsonSchema) -> Result<JsonSchema> {
        let mut root = schema.clone();
        self.defs = match root.shift_remove("$defs") {
            Some(Value::Object(defs)) => defs,
            _ => JsonSchema::new(),
        };

        let mut handled = self.handle(root)?;

        if !self.prefer_inlined_defs && !self.defs.is_empty() {
            let mut walked = JsonSchema::new();
            for (key, def) in self.defs.clone() {
                walked.insert(key, self.handle_value(def)?);
            }
            handled.insert("$defs".to_string(), Value::Object(walked));
            return Ok(handled);
        }

        if self.recursive_refs.is_empty() {
            return Ok(handled);
        }

        // 存在递归引用时只能保留 $defs + $ref 结构
        let mut defs = JsonSchema::new();
        for key in &self.recursive_refs {
            if let Some(def) = self.defs.get(key) {
                defs.insert(key.clone(), def.clone());
            }
        }
        let root_key = match schema.get("$ref").and_then(Value::as_str) {
            Some(reference) => ref_key(reference).to_string(),
            None => {
                let mut key = schema
                    .get("title")
                    .and_then(Value::as_str)
                    .unwrap_or("root")
                    .to_string();
                while defs.contains_key(&key) {
                    key.push_str("_root");
                }
                key
            }
        };
        defs.insert(root_key.clone(), Value::Object(handled));

        let mut result = JsonSchema::new();
        result.insert("$defs".to_string(), Value::Object(defs));
        result.insert(
            "$ref".to_string(),
            Value::String(format!("{DEFS_REF_PREFIX}{root_key}")),
        );
        Ok(result)
    }

    fn handle_value(&mut self, value: Value) -> Result<Value> {
        match value {
            Value::Object(schema) => Ok(Value::Object(self.handle(schema)?)),
            other => Ok(other),
        }
    }

    fn handle(&mut self, mut schema: JsonSchema) -> Result<JsonSchema> {
        let mut nested_refs = 0;
        if self.prefer_inlined_defs {
            while let Some(reference) = schema.get("$ref").and_then(Value::as_str) {
                let key = ref_key(reference).to_string();
                if self.refs_stack.contains(&key) {
                    if !self.recursive_refs.contains(&key) {
                        self.recursive_refs.push(key);
                    }
                    break;
                }
                let def = match self.defs.get(&key) {
                    Some(Value::Object(def)) => def.clone(),
                    _ => {
                        return Err(PromptKitError::Schema(format!(
                            "could not find $ref definition for {key}"
                        )))
                    }
                };
                self.refs_stack.push(key);
                nested_refs += 1;
                schema = def;
            }
        }

        let kind = match schema.get("type") {
            None | Some(Value::Null) => None,
            Some(other) => Some(other.as_str().unwrap_or_default().to_string()),
        };
        let schema = match kind.as_deref() {
            Some("object") => self.handle_object(schema)?,
            Some("array") => self.handle_array(schema)?,
            None => {
                let schema = self.handle_union(schema, "anyOf")?;
                self.handle_union(schema, "oneOf")?
            }
            Some(_) => schema,
        };

        let schema = self.rewrite.rewrite(schema)?;

        let remaining = self.refs_stack.len().saturating_sub(nested_refs);
        self.refs_stack.truncate(remaining);
        Ok(schema)
    }

    fn handle_object(&mut self, mut schema: JsonSchema) -> Result<JsonSchema> {
        for key in ["properties", "patternProperties"] {
            if let Some(Value::Object(members)) = schema.get_mut(key) {
                for (_, value) in members.iter_mut() {
                    *value = self.handle_value(value.take())?;
                }
            }
        }

        if let Some(additional) = schema.get_mut("additionalProperties") {
            *additional = self.handle_value(additional.take())?;
        }

        Ok(schema)
    }

    fn handle_array(&mut self, mut schema: JsonSchema) -> Result<JsonSchema> {
        if let Some(Value::Array(prefix_items)) = schema.get_mut("prefixItems") {
            for item in prefix_items.iter_mut() {
                *item = self.handle_value(item.take())?;
            }
        }

        if let Some(items) = schema.get_mut("items") {
            *items = self.handle_value(items.take())?;
        }

        Ok(schema)
    }

    fn handle_union(&mut self, mut schema: JsonSchema, union_kind: &str) -> Result<JsonSchema> {
        let members = match schema.get(union_kind) {
            Some(Value::Array(members)) if !members.is_empty() => members.clone(),
            _ => return Ok(schema),
        };

        let mut handled = members
            .into_iter()
            .map(|member| self.handle_value(member))
            .collect::<Result<Vec<_>>>()?;
        if self.simplify_nullable_unions {
            handled = simplify_nullable_union(handled);
        }

        if handled.len() == 1 {
            if let Value::Object(single) = &handled[0] {
                return Ok(single.clone());
            }
        }

        schema.insert(union_kind.to_string(), Value::Array(handled));
        Ok(schema)
    }
}

fn ref_key(reference: &str) -> &str {
    reference.strip_prefix(DEFS_REF_PREFIX).unwrap_or(reference)
}

/// `anyOf: [X, {"type": "null"}]` 简化为带 `nullable: true` 的 X
fn simplify_nullable_union(cases: Vec<Value>) -> Vec<Value> {
    let null_schema = json!({"type": "null"});
    if cases.len() != 2 || !cases.contains(&null_schema) {
        return cases;
    }

    match cases.iter().find(|case| **case != null_schema) {
        Some(non_null) => {
            let mut schema = non_null.clone();
            if let Value::Object(map) = &mut schema {
                map.insert("nullable".to_string(), Value::Bool(true));
            }
            vec![schema]
        }
        None => vec![null_schema],
    }
}
