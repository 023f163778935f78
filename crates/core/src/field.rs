//! Field-level schema types: the closed field-type set, per-field
//! constraints, and selection options.

use crate::error::DecodeError;

// ──────────────────────────────────────────────
// Field types
// ──────────────────────────────────────────────

/// The closed set of field types a schema can declare.
///
/// Wire names are the kebab-case strings emitted by the schema-generation
/// service. An unrecognized wire name degrades to [`FieldType::Text`] (the
/// renderer's documented default control) rather than failing the decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Email,
    Number,
    Phone,
    Date,
    LongText,
    SingleSelect,
    MultiSelect,
    Boolean,
    SingleChoiceList,
}

impl FieldType {
    /// Parse a wire name. Returns `None` for unknown names; callers decide
    /// whether to degrade or reject.
    pub fn from_wire(s: &str) -> Option<FieldType> {
        match s {
            "text" => Some(FieldType::Text),
            "email" => Some(FieldType::Email),
            "number" => Some(FieldType::Number),
            "phone" => Some(FieldType::Phone),
            "date" => Some(FieldType::Date),
            "long-text" => Some(FieldType::LongText),
            "single-select" => Some(FieldType::SingleSelect),
            "multi-select" => Some(FieldType::MultiSelect),
            "boolean" => Some(FieldType::Boolean),
            "single-choice-list" => Some(FieldType::SingleChoiceList),
            _ => None,
        }
    }

    /// The kebab-case wire name for this type.
    pub fn wire_name(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Number => "number",
            FieldType::Phone => "phone",
            FieldType::Date => "date",
            FieldType::LongText => "long-text",
            FieldType::SingleSelect => "single-select",
            FieldType::MultiSelect => "multi-select",
            FieldType::Boolean => "boolean",
            FieldType::SingleChoiceList => "single-choice-list",
        }
    }

    /// True for types that bind to an option list.
    pub fn is_selection(&self) -> bool {
        matches!(
            self,
            FieldType::SingleSelect | FieldType::MultiSelect | FieldType::SingleChoiceList
        )
    }

    /// True for types whose value is free-form text (length and pattern
    /// constraints apply).
    pub fn is_text_like(&self) -> bool {
        matches!(
            self,
            FieldType::Text | FieldType::Email | FieldType::Phone | FieldType::LongText
        )
    }

    /// True for the numeric type (min/max bounds apply).
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Number)
    }
}

// ──────────────────────────────────────────────
// Options and constraints
// ──────────────────────────────────────────────

/// One `(value, label)` pair of a selection field's option list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

/// Optional per-field constraint set.
///
/// `min`/`max` are only meaningful for numeric fields; the length bounds
/// and `pattern` only for text-like fields. The validator enforces that
/// split; the decoder stores whatever the schema declared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldValidation {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    /// Regular expression source string, matched against the whole value.
    pub pattern: Option<String>,
}

impl FieldValidation {
    /// True when no constraint is declared.
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
            && self.max.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.pattern.is_none()
    }
}

// ──────────────────────────────────────────────
// FieldSpec
// ──────────────────────────────────────────────

/// One form field as declared by the schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Unique within the schema, stable across renders.
    pub key: String,
    pub field_type: FieldType,
    pub label: String,
    pub placeholder: Option<String>,
    pub description: Option<String>,
    pub required: bool,
    pub validation: FieldValidation,
    /// Option list for selection types. Empty for everything else -- and,
    /// degenerately, for a malformed selection field that declared none.
    pub options: Vec<FieldOption>,
}

impl FieldSpec {
    /// Decode one field from external JSON.
    ///
    /// Structural requirements: the value must be an object carrying `key`
    /// and `label` strings. Everything else is tolerated: an unknown
    /// `type` degrades to `text`, a missing/garbled `options` array
    /// becomes empty, a non-object `validation` is ignored.
    pub fn from_json(v: &serde_json::Value) -> Result<FieldSpec, DecodeError> {
        let obj = v
            .as_object()
            .ok_or_else(|| DecodeError::shape("field must be a JSON object"))?;

        let key = obj
            .get("key")
            .and_then(|k| k.as_str())
            .ok_or_else(|| DecodeError::missing("key", "field"))?
            .to_string();
        let label = obj
            .get("label")
            .and_then(|l| l.as_str())
            .ok_or_else(|| DecodeError::missing("label", "field"))?
            .to_string();

        let field_type = obj
            .get("type")
            .and_then(|t| t.as_str())
            .and_then(FieldType::from_wire)
            .unwrap_or(FieldType::Text);

        let placeholder = obj
            .get("placeholder")
            .and_then(|p| p.as_str())
            .map(|s| s.to_string());
        let description = obj
            .get("description")
            .and_then(|d| d.as_str())
            .map(|s| s.to_string());
        let required = obj
            .get("required")
            .and_then(|r| r.as_bool())
            .unwrap_or(false);

        let validation = obj
            .get("validation")
            .map(decode_validation)
            .unwrap_or_default();

        let options = obj
            .get("options")
            .and_then(|o| o.as_array())
            .map(|arr| arr.iter().filter_map(decode_option).collect())
            .unwrap_or_default();

        Ok(FieldSpec {
            key,
            field_type,
            label,
            placeholder,
            description,
            required,
            validation,
            options,
        })
    }

    /// Encode this field back to the wire shape.
    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        obj.insert("key".to_string(), self.key.clone().into());
        obj.insert("type".to_string(), self.field_type.wire_name().into());
        obj.insert("label".to_string(), self.label.clone().into());
        if let Some(p) = &self.placeholder {
            obj.insert("placeholder".to_string(), p.clone().into());
        }
        if let Some(d) = &self.description {
            obj.insert("description".to_string(), d.clone().into());
        }
        obj.insert("required".to_string(), self.required.into());
        if !self.validation.is_empty() {
            obj.insert("validation".to_string(), validation_to_json(&self.validation));
        }
        if !self.options.is_empty() {
            let opts: Vec<serde_json::Value> = self
                .options
                .iter()
                .map(|o| {
                    serde_json::json!({ "value": o.value, "label": o.label })
                })
                .collect();
            obj.insert("options".to_string(), opts.into());
        }
        serde_json::Value::Object(obj)
    }
}

fn decode_validation(v: &serde_json::Value) -> FieldValidation {
    let Some(obj) = v.as_object() else {
        return FieldValidation::default();
    };
    FieldValidation {
        min: obj.get("min").and_then(|n| n.as_f64()),
        max: obj.get("max").and_then(|n| n.as_f64()),
        min_length: obj
            .get("minLength")
            .and_then(|n| n.as_u64())
            .map(|n| n as usize),
        max_length: obj
            .get("maxLength")
            .and_then(|n| n.as_u64())
            .map(|n| n as usize),
        pattern: obj
            .get("pattern")
            .and_then(|p| p.as_str())
            .map(|s| s.to_string()),
    }
}

fn validation_to_json(v: &FieldValidation) -> serde_json::Value {
    let mut obj = serde_json::Map::new();
    if let Some(min) = v.min {
        obj.insert("min".to_string(), min.into());
    }
    if let Some(max) = v.max {
        obj.insert("max".to_string(), max.into());
    }
    if let Some(n) = v.min_length {
        obj.insert("minLength".to_string(), (n as u64).into());
    }
    if let Some(n) = v.max_length {
        obj.insert("maxLength".to_string(), (n as u64).into());
    }
    if let Some(p) = &v.pattern {
        obj.insert("pattern".to_string(), p.clone().into());
    }
    serde_json::Value::Object(obj)
}

fn decode_option(v: &serde_json::Value) -> Option<FieldOption> {
    // Two wire shapes: {"value": "a", "label": "A"} or a bare string.
    if let Some(s) = v.as_str() {
        return Some(FieldOption {
            value: s.to_string(),
            label: s.to_string(),
        });
    }
    let obj = v.as_object()?;
    let value = obj.get("value")?.as_str()?.to_string();
    let label = obj
        .get("label")
        .and_then(|l| l.as_str())
        .unwrap_or(&value)
        .to_string();
    Some(FieldOption { value, label })
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
