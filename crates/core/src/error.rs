/// Structural errors raised while decoding external JSON payloads.
///
/// Only shape-level problems are errors (a schema that is not an object,
/// a field without a key). Value-level oddities -- an unknown field type,
/// a selection field without options -- degrade instead of failing, per
/// the trust-the-caller stance of the schema contract.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DecodeError {
    /// The payload is not the expected JSON shape.
    #[error("unexpected payload shape: {message}")]
    UnexpectedShape { message: String },

    /// A required structural field is missing.
    #[error("missing required field '{field}' in {context}")]
    MissingField { field: String, context: String },
}

impl DecodeError {
    pub(crate) fn shape(message: impl Into<String>) -> Self {
        DecodeError::UnexpectedShape {
            message: message.into(),
        }
    }

    pub(crate) fn missing(field: &str, context: &str) -> Self {
        DecodeError::MissingField {
            field: field.to_string(),
            context: context.to_string(),
        }
    }
}
