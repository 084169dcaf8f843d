//! Structural JSON validation against a small JSON-Schema subset.
//!
//! Supported keywords: `type`, `enum`, `minLength`, `pattern`, `minItems`,
//! `items`, `required`, `properties`, `additionalProperties: false`.
//! Unknown keywords are ignored. Paths in messages use `$`, `$.key` and
//! `$[index]`.

use regex::Regex;
use serde_json::{Map, Value};

/// Validate `value` against `schema`, returning every error found.
pub fn validate(schema: &Value, value: &Value, path: &str) -> Vec<String> {
    let mut errors = Vec::new();
    check(schema, value, path, &mut errors);
    errors
}

fn check(schema: &Value, value: &Value, path: &str, errors: &mut Vec<String>) {
    let expected = schema.get("type").and_then(Value::as_str);
    if let Some(expected) = expected
        && !type_matches(expected, value)
    {
        errors.push(format!("{}: expected {}", path, expected));
        return;
    }

    if let Some(allowed) = schema.get("enum").and_then(Value::as_array)
        && !allowed.contains(value)
    {
        errors.push(format!(
            "{}: value {} not in enum {}",
            path,
            value,
            Value::Array(allowed.clone())
        ));
        return;
    }

    match (expected, value) {
        (Some("string"), Value::String(text)) => check_string(schema, text, path, errors),
        (Some("array"), Value::Array(items)) => check_array(schema, items, path, errors),
        (Some("object"), Value::Object(object)) => check_object(schema, object, path, errors),
        _ => {}
    }
}

fn type_matches(expected: &str, value: &Value) -> bool {
    match expected {
        "string" => value.is_string(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "boolean" => value.is_boolean(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn check_string(schema: &Value, text: &str, path: &str, errors: &mut Vec<String>) {
    if let Some(min) = schema.get("minLength").and_then(Value::as_u64)
        && (text.chars().count() as u64) < min
    {
        errors.push(format!("{}: minLength {} not met", path, min));
    }

    if let Some(pattern) = schema.get("pattern").and_then(Value::as_str)
        && !pattern.is_empty()
    {
        match Regex::new(&format!("^(?:{})$", pattern)) {
            Ok(regex) if regex.is_match(text) => {}
            Ok(_) => errors.push(format!("{}: pattern {:?} not matched", path, pattern)),
            Err(e) => errors.push(format!("{}: invalid pattern {:?}: {}", path, pattern, e)),
        }
    }
}

fn check_array(schema: &Value, items: &[Value], path: &str, errors: &mut Vec<String>) {
    if let Some(min) = schema.get("minItems").and_then(Value::as_u64)
        && (items.len() as u64) < min
    {
        errors.push(format!("{}: minItems {} not met", path, min));
    }

    if let Some(item_schema) = schema.get("items") {
        for (idx, item) in items.iter().enumerate() {
            check(item_schema, item, &format!("{}[{}]", path, idx), errors);
        }
    }
}

fn check_object(schema: &Value, object: &Map<String, Value>, path: &str, errors: &mut Vec<String>) {
    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for key in required.iter().filter_map(Value::as_str) {
            if !object.contains_key(key) {
                errors.push(format!("{}: missing required property {:?}", path, key));
            }
        }
    }

    let properties = schema.get("properties").and_then(Value::as_object);
    if let Some(properties) = properties {
        for (key, item) in object {
            if let Some(property_schema) = properties.get(key) {
                check(property_schema, item, &format!("{}.{}", path, key), errors);
            }
        }
    }

    if schema.get("additionalProperties") == Some(&Value::Bool(false))
        && let Some(properties) = properties.filter(|p| !p.is_empty())
    {
        let extras: Vec<&str> = object
            .keys()
            .filter(|key| !properties.contains_key(*key))
            .map(String::as_str)
            .collect();
        if !extras.is_empty() {
            errors.push(format!(
                "{}: additional properties not allowed: {:?}",
                path, extras
            ));
        }
    }
}
