//! Interaction payloads: the transient data an incoming move brings along.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Payload supplied with a single evaluation call.
///
/// The only field evaluators rely on is `reply`, a mapping of move content
/// field to value. Anything else is passed through to external arbitration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct InteractionData(Value);

impl InteractionData {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Payload holding only a reply mapping.
    pub fn from_reply<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let reply: Map<String, Value> = fields
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let mut root = Map::new();
        root.insert("reply".to_string(), Value::Object(reply));
        Self(Value::Object(root))
    }

    /// The reply mapping, if the payload carries one.
    pub fn reply(&self) -> Option<&Map<String, Value>> {
        self.0.get("reply").and_then(Value::as_object)
    }

    /// A reply field rendered as text.
    pub fn reply_field(&self, field: &str) -> Option<String> {
        self.reply()?.get(field).map(value_text)
    }

    /// All reply values rendered as text, in payload order.
    pub fn reply_values(&self) -> Option<Vec<String>> {
        self.reply().map(|reply| reply.values().map(value_text).collect())
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for InteractionData {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Strings compare by their content, everything else by its JSON text.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
