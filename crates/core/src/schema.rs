//! Form-level schema types and the boundary decode for whole schemas.

use crate::error::DecodeError;
use crate::field::FieldSpec;

/// Display settings attached to a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSettings {
    pub allow_anonymous: bool,
    pub show_progress: bool,
    pub submit_text: String,
}

impl Default for FormSettings {
    fn default() -> Self {
        FormSettings {
            allow_anonymous: false,
            show_progress: true,
            submit_text: "Enviar".to_string(),
        }
    }
}

/// One form definition.
///
/// Constructed externally (AI generation or a storage fetch) and treated as
/// an immutable value for the duration of one render session. Field order
/// is display order and the progress denominator order.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSchema {
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<FieldSpec>,
    pub settings: FormSettings,
}

impl FormSchema {
    /// Decode a schema from external JSON.
    ///
    /// The payload must be an object with a `fields` array; each field is
    /// decoded by [`FieldSpec::from_json`]. Missing `title` becomes the
    /// empty string, missing `settings` the defaults.
    pub fn from_json(v: &serde_json::Value) -> Result<FormSchema, DecodeError> {
        let obj = v
            .as_object()
            .ok_or_else(|| DecodeError::shape("schema must be a JSON object"))?;

        let title = obj
            .get("title")
            .and_then(|t| t.as_str())
            .unwrap_or_default()
            .to_string();
        let description = obj
            .get("description")
            .and_then(|d| d.as_str())
            .map(|s| s.to_string());

        let fields_val = obj
            .get("fields")
            .ok_or_else(|| DecodeError::missing("fields", "schema"))?;
        let fields_arr = fields_val
            .as_array()
            .ok_or_else(|| DecodeError::shape("'fields' must be an array"))?;
        let mut fields = Vec::with_capacity(fields_arr.len());
        for f in fields_arr {
            fields.push(FieldSpec::from_json(f)?);
        }

        let settings = obj
            .get("settings")
            .map(decode_settings)
            .unwrap_or_default();

        Ok(FormSchema {
            title,
            description,
            fields,
            settings,
        })
    }

    /// Encode this schema back to the wire shape.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "title": self.title,
            "description": self.description,
            "fields": self.fields.iter().map(|f| f.to_json()).collect::<Vec<_>>(),
            "settings": {
                "allowAnonymous": self.settings.allow_anonymous,
                "showProgress": self.settings.show_progress,
                "submitText": self.settings.submit_text,
            },
        })
    }

    /// Look up a field by key.
    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }
}

fn decode_settings(v: &serde_json::Value) -> FormSettings {
    let Some(obj) = v.as_object() else {
        return FormSettings::default();
    };
    let defaults = FormSettings::default();
    FormSettings {
        allow_anonymous: obj
            .get("allowAnonymous")
            .and_then(|b| b.as_bool())
            .unwrap_or(defaults.allow_anonymous),
        show_progress: obj
            .get("showProgress")
            .and_then(|b| b.as_bool())
            .unwrap_or(defaults.show_progress),
        submit_text: obj
            .get("submitText")
            .and_then(|s| s.as_str())
            .map(|s| s.to_string())
            .unwrap_or(defaults.submit_text),
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;

    #[test]
    fn decode_schema_with_settings() {
        let v = serde_json::json!({
            "title": "Pesquisa de satisfação",
            "description": "Nos conte sua experiência",
            "fields": [
                { "key": "name", "type": "text", "label": "Nome", "required": true },
                { "key": "rating", "type": "number", "label": "Nota" }
            ],
            "settings": { "allowAnonymous": true, "showProgress": false, "submitText": "Concluir" }
        });
        let schema = FormSchema::from_json(&v).unwrap();
        assert_eq!(schema.title, "Pesquisa de satisfação");
        assert_eq!(schema.fields.len(), 2);
        assert_eq!(schema.fields[0].field_type, FieldType::Text);
        assert!(schema.settings.allow_anonymous);
        assert!(!schema.settings.show_progress);
        assert_eq!(schema.settings.submit_text, "Concluir");
    }

    #[test]
    fn decode_schema_defaults() {
        let v = serde_json::json!({ "fields": [] });
        let schema = FormSchema::from_json(&v).unwrap();
        assert_eq!(schema.title, "");
        assert!(schema.description.is_none());
        assert!(schema.fields.is_empty());
        assert_eq!(schema.settings, FormSettings::default());
        assert_eq!(schema.settings.submit_text, "Enviar");
    }

    #[test]
    fn decode_schema_missing_fields_is_error() {
        let v = serde_json::json!({ "title": "x" });
        assert!(matches!(
            FormSchema::from_json(&v),
            Err(DecodeError::MissingField { .. })
        ));
    }

    #[test]
    fn decode_schema_non_array_fields_is_error() {
        let v = serde_json::json!({ "fields": "oops" });
        assert!(matches!(
            FormSchema::from_json(&v),
            Err(DecodeError::UnexpectedShape { .. })
        ));
    }

    #[test]
    fn field_order_is_preserved() {
        let v = serde_json::json!({
            "fields": [
                { "key": "b", "type": "text", "label": "B" },
                { "key": "a", "type": "text", "label": "A" },
                { "key": "c", "type": "text", "label": "C" }
            ]
        });
        let schema = FormSchema::from_json(&v).unwrap();
        let keys: Vec<_> = schema.fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn schema_json_round_trip() {
        let v = serde_json::json!({
            "title": "Cadastro",
            "fields": [
                {
                    "key": "plan",
                    "type": "single-select",
                    "label": "Plano",
                    "options": [{ "value": "free", "label": "Grátis" }]
                }
            ]
        });
        let schema = FormSchema::from_json(&v).unwrap();
        let back = FormSchema::from_json(&schema.to_json()).unwrap();
        assert_eq!(schema, back);
    }

    #[test]
    fn field_lookup_by_key() {
        let v = serde_json::json!({
            "fields": [{ "key": "a", "type": "text", "label": "A" }]
        });
        let schema = FormSchema::from_json(&v).unwrap();
        assert!(schema.field("a").is_some());
        assert!(schema.field("z").is_none());
    }
}
