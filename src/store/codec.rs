//! Conversion between plain JSON and Firestore's typed value encoding

use serde_json::{json, Map, Number, Value};

/// Encode a JSON object as a Firestore `fields` map
pub fn encode_fields(map: &Map<String, Value>) -> Value {
    let fields: Map<String, Value> = map
        .iter()
        .map(|(k, v)| (k.clone(), encode_value(v)))
        .collect();
    Value::Object(fields)
}

pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            // Firestore carries 64-bit integers as strings
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

/// Decode a Firestore `fields` map back to a JSON object
pub fn decode_fields(fields: &Value) -> Value {
    let Some(fields) = fields.as_object() else {
        return Value::Object(Map::new());
    };
    let map: Map<String, Value> = fields
        .iter()
        .map(|(k, v)| (k.clone(), decode_value(v)))
        .collect();
    Value::Object(map)
}

pub fn decode_value(value: &Value) -> Value {
    let Some(typed) = value.as_object() else {
        return Value::Null;
    };
    let Some((kind, inner)) = typed.iter().next() else {
        return Value::Null;
    };

    match kind.as_str() {
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner.clone(),
        "booleanValue" => inner.clone(),
        "integerValue" => match inner {
            Value::String(s) => s
                .parse::<i64>()
                .map(|i| Value::Number(i.into()))
                .unwrap_or(Value::Null),
            other => other.clone(),
        },
        "doubleValue" => inner
            .as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        "arrayValue" => {
            let values = inner
                .get("values")
                .and_then(Value::as_array)
                .map(|items| items.iter().map(decode_value).collect())
                .unwrap_or_default();
            Value::Array(values)
        }
        "mapValue" => decode_fields(inner.get("fields").unwrap_or(&Value::Null)),
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_interview_shape() {
        let doc = json!({
            "role": "Backend Engineer",
            "finalized": true,
            "techstack": ["Rust", "Postgres"],
        });

        let fields = encode_fields(doc.as_object().unwrap());
        assert_eq!(fields["role"], json!({"stringValue": "Backend Engineer"}));
        assert_eq!(fields["finalized"], json!({"booleanValue": true}));
        assert_eq!(
            fields["techstack"],
            json!({"arrayValue": {"values": [
                {"stringValue": "Rust"},
                {"stringValue": "Postgres"}
            ]}})
        );
    }

    #[test]
    fn test_integers_are_strings_on_the_wire() {
        assert_eq!(encode_value(&json!(42)), json!({"integerValue": "42"}));
        assert_eq!(decode_value(&json!({"integerValue": "42"})), json!(42));
        assert_eq!(encode_value(&json!(0.5)), json!({"doubleValue": 0.5}));
    }

    #[test]
    fn test_decode_nested_document() {
        let fields = json!({
            "categoryScores": {"arrayValue": {"values": [
                {"mapValue": {"fields": {
                    "name": {"stringValue": "Problem Solving"},
                    "score": {"integerValue": "70"}
                }}}
            ]}},
            "createdAt": {"timestampValue": "2025-01-01T00:00:00Z"},
            "notes": {"nullValue": null}
        });

        let doc = decode_fields(&fields);
        assert_eq!(
            doc,
            json!({
                "categoryScores": [{"name": "Problem Solving", "score": 70}],
                "createdAt": "2025-01-01T00:00:00Z",
                "notes": null
            })
        );
    }

    #[test]
    fn test_empty_array_and_map_decode() {
        assert_eq!(decode_value(&json!({"arrayValue": {}})), json!([]));
        assert_eq!(decode_value(&json!({"mapValue": {}})), json!({}));
    }
}
