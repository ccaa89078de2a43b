use super::RuleValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;

/// Named values that rule expressions can reference.
///
/// Each top-level entry becomes a variable in the expression engine. The
/// context is supplied fresh for each evaluation call and is never mutated by
/// the evaluator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvaluationContext(BTreeMap<String, RuleValue>);

impl EvaluationContext {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style insert, used when assembling a context from request sections.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<RuleValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<RuleValue>) {
        let _ = self.0.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RuleValue> {
        self.0.get(name)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, RuleValue> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a EvaluationContext {
    type Item = (&'a String, &'a RuleValue);
    type IntoIter = btree_map::Iter<'a, String, RuleValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<RuleValue>> FromIterator<(K, V)> for EvaluationContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<BTreeMap<String, RuleValue>> for EvaluationContext {
    fn from(map: BTreeMap<String, RuleValue>) -> Self {
        Self(map)
    }
}

impl From<EvaluationContext> for RuleValue {
    fn from(context: EvaluationContext) -> Self {
        Self::Mapping(context.0)
    }
}

impl TryFrom<serde_json::Value> for EvaluationContext {
    type Error = crate::value::NotAnObject;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(crate::value::NotAnObject(RuleValue::from(other).kind())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueKind;
    use serde_json::json;

    #[test]
    fn test_builder_and_lookup() {
        let ctx = EvaluationContext::new().with("a", 1_i64).with("b", "two");
        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.get("b").and_then(RuleValue::as_str), Some("two"));
        assert!(ctx.get("c").is_none());
    }

    #[test]
    fn test_insert_replaces() {
        let mut ctx = EvaluationContext::new();
        ctx.insert("a", true);
        ctx.insert("a", false);
        assert_eq!(ctx.len(), 1);
        assert_eq!(ctx.get("a"), Some(&RuleValue::Boolean(false)));
    }

    #[test]
    fn test_try_from_json_object() {
        let ctx = EvaluationContext::try_from(json!({"context": {"id": 1}, "flag": true})).unwrap();
        let names: Vec<_> = ctx.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, ["context", "flag"]);
    }

    #[test]
    fn test_try_from_json_rejects_non_object() {
        let err = EvaluationContext::try_from(json!([1, 2])).unwrap_err();
        assert_eq!(err.0, ValueKind::Sequence);
        assert_eq!(err.to_string(), "evaluation context must be a Mapping, got Sequence");
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let ctx = EvaluationContext::new().with("x", RuleValue::Null);
        assert_eq!(serde_json::to_string(&ctx).unwrap(), r#"{"x":null}"#);
    }
}
