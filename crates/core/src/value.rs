//! Runtime answer values and the per-session answer/error maps.

use std::collections::BTreeMap;

// ──────────────────────────────────────────────
// AnswerValue
// ──────────────────────────────────────────────

/// One respondent answer.
///
/// `Many` holds a multi-select's chosen option values in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Many(Vec<String>),
}

impl AnswerValue {
    /// Returns a human-readable type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            AnswerValue::Text(_) => "Text",
            AnswerValue::Number(_) => "Number",
            AnswerValue::Bool(_) => "Bool",
            AnswerValue::Many(_) => "Many",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// True when this value is the empty string. Only text answers can be
    /// empty in this sense; the progress rule treats everything else as
    /// answered once present.
    pub fn is_empty_text(&self) -> bool {
        matches!(self, AnswerValue::Text(s) if s.is_empty())
    }

    /// Decode from plain JSON. Strings, numbers, booleans, and arrays of
    /// strings map to the four variants; anything else is `None`.
    pub fn from_json(v: &serde_json::Value) -> Option<AnswerValue> {
        match v {
            serde_json::Value::String(s) => Some(AnswerValue::Text(s.clone())),
            serde_json::Value::Number(n) => n.as_f64().map(AnswerValue::Number),
            serde_json::Value::Bool(b) => Some(AnswerValue::Bool(*b)),
            serde_json::Value::Array(arr) => {
                let items: Option<Vec<String>> = arr
                    .iter()
                    .map(|x| x.as_str().map(|s| s.to_string()))
                    .collect();
                items.map(AnswerValue::Many)
            }
            _ => None,
        }
    }

    /// Encode to plain JSON.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            AnswerValue::Text(s) => serde_json::Value::String(s.clone()),
            AnswerValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            AnswerValue::Bool(b) => serde_json::Value::Bool(*b),
            AnswerValue::Many(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(|s| serde_json::Value::String(s.clone()))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        AnswerValue::Text(s)
    }
}

impl From<f64> for AnswerValue {
    fn from(n: f64) -> Self {
        AnswerValue::Number(n)
    }
}

impl From<bool> for AnswerValue {
    fn from(b: bool) -> Self {
        AnswerValue::Bool(b)
    }
}

// ──────────────────────────────────────────────
// AnswerMap
// ──────────────────────────────────────────────

/// Respondent input keyed by field key.
///
/// Owned exclusively by one engine instance for the lifetime of one
/// form-fill session; handed to the caller atomically on successful submit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerMap(pub BTreeMap<String, AnswerValue>);

impl AnswerMap {
    pub fn new() -> Self {
        AnswerMap(BTreeMap::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: AnswerValue) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&AnswerValue> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut AnswerValue> {
        self.0.get_mut(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<AnswerValue> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.0.iter()
    }

    /// The progress rule's notion of "answered": an entry exists and is
    /// not the empty string.
    pub fn is_answered(&self, key: &str) -> bool {
        match self.0.get(key) {
            None => false,
            Some(v) => !v.is_empty_text(),
        }
    }

    /// Decode from a JSON object, skipping entries whose value has no
    /// `AnswerValue` representation (null, nested objects).
    pub fn from_json(v: &serde_json::Value) -> AnswerMap {
        let mut map = AnswerMap::new();
        if let Some(obj) = v.as_object() {
            for (k, val) in obj {
                if let Some(answer) = AnswerValue::from_json(val) {
                    map.insert(k.clone(), answer);
                }
            }
        }
        map
    }

    /// Encode to a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        for (k, v) in &self.0 {
            obj.insert(k.clone(), v.to_json());
        }
        serde_json::Value::Object(obj)
    }
}

// ──────────────────────────────────────────────
// ErrorMap
// ──────────────────────────────────────────────

/// Current validation failures keyed by field key.
///
/// Cleared per key whenever that key's answer changes; fully recomputed on
/// each submit attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap(pub BTreeMap<String, String>);

impl ErrorMap {
    pub fn new() -> Self {
        ErrorMap(BTreeMap::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.0.insert(key.into(), message.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|s| s.as_str())
    }

    pub fn clear_key(&mut self, key: &str) {
        self.0.remove(key);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
