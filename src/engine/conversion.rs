//! Conversion between [`RuleValue`] and CEL values.

use crate::value::{Number, RuleValue};
use cel_interpreter::Value;
use cel_interpreter::objects::{Key, Map};
use chrono::SecondsFormat;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// A CEL value with no data representation, such as a function reference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("value cannot be used as data: {0}")]
pub struct UnsupportedValue(String);

#[must_use]
pub fn to_cel_value(value: &RuleValue) -> Value {
    match value {
        RuleValue::Null => Value::Null,
        RuleValue::Boolean(b) => Value::Bool(*b),
        RuleValue::Number(Number::Int(i)) => Value::Int(*i),
        RuleValue::Number(Number::UInt(u)) => Value::UInt(*u),
        RuleValue::Number(Number::Float(f)) => Value::Float(*f),
        RuleValue::String(s) => Value::String(Arc::new(s.clone())),
        RuleValue::Sequence(items) => Value::List(Arc::new(items.iter().map(to_cel_value).collect())),
        RuleValue::Mapping(map) => {
            let fields: HashMap<Arc<String>, Value> = map.iter().map(|(k, v)| (Arc::new(k.clone()), to_cel_value(v))).collect();
            Value::Map(Map::from(fields))
        }
    }
}

/// Converts a CEL value back into the rule value model.
///
/// Timestamps become RFC 3339 strings and durations become their ISO 8601 text.
pub fn to_rule_value(value: &Value) -> Result<RuleValue, UnsupportedValue> {
    Ok(match value {
        Value::Null => RuleValue::Null,
        Value::Bool(b) => RuleValue::Boolean(*b),
        Value::Int(i) => RuleValue::Number(Number::Int(*i)),
        Value::UInt(u) => RuleValue::Number(Number::UInt(*u)),
        Value::Float(f) => RuleValue::Number(Number::Float(*f)),
        Value::String(s) => RuleValue::String(s.to_string()),
        Value::Bytes(bytes) => RuleValue::String(String::from_utf8_lossy(bytes).into_owned()),
        Value::Timestamp(ts) => RuleValue::String(ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        Value::Duration(duration) => RuleValue::String(duration.to_string()),
        Value::List(items) => RuleValue::Sequence(items.iter().map(to_rule_value).collect::<Result<_, _>>()?),
        Value::Map(map) => {
            let mut fields = BTreeMap::new();
            for (key, value) in map.map.iter() {
                let _ = fields.insert(key_to_string(key), to_rule_value(value)?);
            }
            RuleValue::Mapping(fields)
        }
        other => return Err(UnsupportedValue(format!("{other:?}"))),
    })
}

fn key_to_string(key: &Key) -> String {
    match key {
        Key::String(s) => s.to_string(),
        Key::Int(i) => i.to_string(),
        Key::Uint(u) => u.to_string(),
        Key::Bool(b) => b.to_string(),
    }
}
