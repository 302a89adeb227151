// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema-guided conversion between JSON and [`CodecValue`] trees.
//!
//! JSON numbers carry no width, so the declared field type decides which
//! [`CodecValue`] variant a number becomes. Objects are emitted with keys in
//! declared field order.

use serde_json::{Map, Number, Value};

use crate::core::{CodecError, CodecValue, DecodedMessage, Result};
use crate::schema::{FieldType, Schema};

/// Converts between JSON documents and [`DecodedMessage`] values for one schema.
#[derive(Debug, Clone, Copy)]
pub struct JsonConverter<'a> {
    schema: &'a Schema,
}

impl<'a> JsonConverter<'a> {
    /// Create a converter for `schema`.
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Parse JSON text as a message of type `type_name`.
    pub fn parse_str(&self, type_name: &str, json: &str) -> Result<DecodedMessage> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| CodecError::parse("json", format!("{e}")))?;
        self.from_json(type_name, &value)
    }

    /// Convert a JSON object to a message of type `type_name`.
    ///
    /// Every declared field must be present; keys the schema does not name
    /// are ignored.
    pub fn from_json(&self, type_name: &str, value: &Value) -> Result<DecodedMessage> {
        self.object_to_message(type_name, value, "")
    }

    /// Convert a message of type `type_name` to a JSON object.
    pub fn to_json(&self, type_name: &str, message: &DecodedMessage) -> Result<Value> {
        self.message_to_object(type_name, message, "")
    }

    fn object_to_message(&self, type_name: &str, value: &Value, path: &str) -> Result<DecodedMessage> {
        let def = self.schema.require(type_name)?;
        let object = value.as_object().ok_or_else(|| {
            let field = if path.is_empty() { type_name } else { path };
            CodecError::type_mismatch(field, type_name, json_kind(value))
        })?;

        let mut message = DecodedMessage::with_capacity(def.fields.len());
        for field in &def.fields {
            let raw = object
                .get(&field.name)
                .ok_or_else(|| CodecError::missing_field(&def.name, &field.name))?;
            let field_path = join(path, &field.name);
            let converted = self.json_to_value(raw, &field.field_type, &field_path)?;
            message.insert(field.name.clone(), converted);
        }
        Ok(message)
    }

    fn json_to_value(&self, value: &Value, field_type: &FieldType, path: &str) -> Result<CodecValue> {
        let mismatch = || CodecError::type_mismatch(path, field_type.to_string(), json_kind(value));
        Ok(match field_type {
            FieldType::Int32 => {
                let v = value.as_i64().and_then(|v| i32::try_from(v).ok());
                CodecValue::Int32(v.ok_or_else(mismatch)?)
            }
            FieldType::Int64 => CodecValue::Int64(value.as_i64().ok_or_else(mismatch)?),
            FieldType::Float32 => CodecValue::Float32(value.as_f64().ok_or_else(mismatch)? as f32),
            FieldType::Float64 => CodecValue::Float64(value.as_f64().ok_or_else(mismatch)?),
            FieldType::Bool => CodecValue::Bool(value.as_bool().ok_or_else(mismatch)?),
            FieldType::String => CodecValue::String(value.as_str().ok_or_else(mismatch)?.to_string()),
            FieldType::Repeated(inner) => {
                let items = value.as_array().ok_or_else(mismatch)?;
                let converted = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.json_to_value(item, inner, &format!("{path}[{i}]")))
                    .collect::<Result<Vec<_>>>()?;
                CodecValue::Array(converted)
            }
            FieldType::Message(name) => CodecValue::Struct(self.object_to_message(name, value, path)?),
        })
    }

    fn message_to_object(&self, type_name: &str, message: &DecodedMessage, path: &str) -> Result<Value> {
        let def = self.schema.require(type_name)?;
        let mut object = Map::with_capacity(def.fields.len());
        for field in &def.fields {
            let value = message
                .get(&field.name)
                .ok_or_else(|| CodecError::missing_field(&def.name, &field.name))?;
            let field_path = join(path, &field.name);
            object.insert(
                field.name.clone(),
                self.value_to_json(value, &field.field_type, &field_path)?,
            );
        }
        Ok(Value::Object(object))
    }

    fn value_to_json(&self, value: &CodecValue, field_type: &FieldType, path: &str) -> Result<Value> {
        let converted = match (field_type, value) {
            (FieldType::Repeated(inner), CodecValue::Array(items)) => Some(Value::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.value_to_json(item, inner, &format!("{path}[{i}]")))
                    .collect::<Result<Vec<_>>>()?,
            )),
            (FieldType::Message(name), CodecValue::Struct(fields)) => {
                Some(self.message_to_object(name, fields, path)?)
            }
            (FieldType::Bool, CodecValue::Bool(v)) => Some(Value::Bool(*v)),
            (FieldType::String, CodecValue::String(v)) => Some(Value::String(v.clone())),
            // Shortest decimal form, so 1.2345f32 prints as 1.2345
            (FieldType::Float32, CodecValue::Float32(v)) => {
                Some(float_to_json(v.to_string().parse().unwrap_or(f64::NAN)))
            }
            // Same widening the encoder accepts
            (FieldType::Int32, v) => v.as_i32().map(Value::from),
            (FieldType::Int64, v) => v.as_i64().map(Value::from),
            (FieldType::Float32 | FieldType::Float64, v) => v.as_f64().map(float_to_json),
            _ => None,
        };
        converted.ok_or_else(|| {
            CodecError::type_mismatch(path, field_type.to_string(), value.type_name())
        })
    }
}

fn join(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{path}.{field}")
    }
}

fn float_to_json(v: f64) -> Value {
    Number::from_f64(v).map_or(Value::Null, Value::Number)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "number (fractional)",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::parse_schema;
    use serde_json::json;

    fn schema() -> Schema {
        parse_schema(
            "version = 1
             class Item { int id; string name; float weight; long stamp; double ratio; bool ok; }
             class Bag { Item[] items; int[][] grid; }",
        )
        .unwrap()
    }

    #[test]
    fn test_from_json_typed_by_schema() {
        let schema = schema();
        let message = JsonConverter::new(&schema)
            .from_json(
                "Item",
                &json!({"id": 1, "name": "sword", "weight": 2, "stamp": 5, "ratio": 0.5, "ok": true}),
            )
            .unwrap();
        assert_eq!(message["id"], CodecValue::Int32(1));
        assert_eq!(message["weight"], CodecValue::Float32(2.0));
        assert_eq!(message["stamp"], CodecValue::Int64(5));
        assert_eq!(message["ratio"], CodecValue::Float64(0.5));
    }

    #[test]
    fn test_from_json_missing_field() {
        let schema = schema();
        let err = JsonConverter::new(&schema)
            .from_json("Item", &json!({"id": 1}))
            .unwrap_err();
        assert_eq!(err, CodecError::missing_field("Item", "name"));
    }

    #[test]
    fn test_from_json_int_range_and_fraction() {
        let schema = schema();
        let converter = JsonConverter::new(&schema);
        let err = converter
            .from_json("Bag", &json!({"items": [], "grid": [[1, 4294967296_i64]]}))
            .unwrap_err();
        assert_eq!(err, CodecError::type_mismatch("grid[0][1]", "int", "number"));

        let err = converter
            .from_json("Bag", &json!({"items": [], "grid": [[1.5]]}))
            .unwrap_err();
        assert_eq!(
            err,
            CodecError::type_mismatch("grid[0][0]", "int", "number (fractional)")
        );
    }

    #[test]
    fn test_from_json_nested_not_object() {
        let schema = schema();
        let err = JsonConverter::new(&schema)
            .from_json("Bag", &json!({"items": [3], "grid": []}))
            .unwrap_err();
        assert_eq!(err, CodecError::type_mismatch("items[0]", "Item", "number"));
    }

    #[test]
    fn test_from_str_invalid() {
        let schema = schema();
        let err = JsonConverter::new(&schema).parse_str("Bag", "{").unwrap_err();
        assert!(matches!(err, CodecError::ParseError { .. }));
    }

    #[test]
    fn test_to_json_keeps_declared_order() {
        let schema = schema();
        let converter = JsonConverter::new(&schema);
        let input = json!({"ok": false, "ratio": 1.25, "stamp": -3, "weight": 1.2345, "name": "x", "id": 7});
        let message = converter.from_json("Item", &input).unwrap();
        let out = converter.to_json("Item", &message).unwrap();
        let keys: Vec<&str> = out.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["id", "name", "weight", "stamp", "ratio", "ok"]);
        assert_eq!(out["weight"], json!(1.2345));
    }

    #[test]
    fn test_to_json_nested() {
        let schema = schema();
        let converter = JsonConverter::new(&schema);
        let input = json!({
            "items": [{"id": 1, "name": "a", "weight": 0.5, "stamp": 0, "ratio": 0.0, "ok": true}],
            "grid": [[1, 2], []]
        });
        let message = converter.from_json("Bag", &input).unwrap();
        assert_eq!(converter.to_json("Bag", &message).unwrap(), input);
    }

    #[test]
    fn test_to_json_rejects_value_of_wrong_type() {
        let schema = schema();
        let converter = JsonConverter::new(&schema);
        let input = json!({"id": 7, "name": "x", "weight": 0.5, "stamp": 1, "ratio": 0.0, "ok": true});
        let mut message = converter.from_json("Item", &input).unwrap();
        message.insert("name".to_string(), CodecValue::Int32(5));

        let err = converter.to_json("Item", &message).unwrap_err();
        assert_eq!(err, CodecError::type_mismatch("name", "string", "int"));

        message.insert("name".to_string(), CodecValue::from("x"));
        message.insert("ok".to_string(), CodecValue::Float64(1.0));
        let err = converter.to_json("Item", &message).unwrap_err();
        assert_eq!(err, CodecError::type_mismatch("ok", "bool", "double"));
    }

    #[test]
    fn test_to_json_widens_like_encoder() {
        let schema = schema();
        let converter = JsonConverter::new(&schema);
        let input = json!({"id": 7, "name": "x", "weight": 0.5, "stamp": 1, "ratio": 0.0, "ok": true});
        let mut message = converter.from_json("Item", &input).unwrap();
        message.insert("stamp".to_string(), CodecValue::Int32(-4));
        message.insert("ratio".to_string(), CodecValue::Int64(2));
        message.insert("id".to_string(), CodecValue::Int64(9));

        let out = converter.to_json("Item", &message).unwrap();
        assert_eq!(out["stamp"], json!(-4));
        assert_eq!(out["ratio"], json!(2.0));
        assert_eq!(out["id"], json!(9));

        message.insert("id".to_string(), CodecValue::Int64(i64::MAX));
        assert!(converter.to_json("Item", &message).is_err());
    }
}
