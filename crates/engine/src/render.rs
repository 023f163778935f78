//! Field-to-control dispatch.
//!
//! A [`Control`] describes the input widget a UI layer should mount for a
//! field; it carries no widget-toolkit types and owns no state. Dispatch is
//! a pure function of the field spec -- value-change events flow back into
//! the engine through [`FormEvent`](crate::FormEvent), not through the
//! control itself.

use formant_core::{FieldOption, FieldSpec, FieldType};

/// Native input hint for single-line text controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputHint {
    Plain,
    Email,
    Phone,
}

/// Declarative description of the control to render for one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    /// Single-line input; value = string.
    TextInput { hint: InputHint },
    /// Numeric input; display clamps to the declared bounds when present.
    NumberInput { min: Option<f64>, max: Option<f64> },
    /// Date picker; value = ISO date string.
    DatePicker,
    /// Multi-line input; value = string.
    TextArea,
    /// One-of-N dropdown bound to the option list; value = option value.
    Dropdown { options: Vec<FieldOption> },
    /// N independent checkboxes over the option list; value = ordered
    /// sequence of option values.
    Checklist { options: Vec<FieldOption> },
    /// Single toggle; value = boolean.
    Toggle,
    /// Mutually exclusive radio set; value = option value.
    RadioGroup { options: Vec<FieldOption> },
}

/// Map a field spec to its control description.
///
/// The type set is closed at decode time, so every variant has an explicit
/// arm. A selection field that declared no options gets an empty option
/// list -- degenerate, but rendered rather than rejected.
pub fn control_for(field: &FieldSpec) -> Control {
    match field.field_type {
        FieldType::Text => Control::TextInput {
            hint: InputHint::Plain,
        },
        FieldType::Email => Control::TextInput {
            hint: InputHint::Email,
        },
        FieldType::Phone => Control::TextInput {
            hint: InputHint::Phone,
        },
        FieldType::Number => Control::NumberInput {
            min: field.validation.min,
            max: field.validation.max,
        },
        FieldType::Date => Control::DatePicker,
        FieldType::LongText => Control::TextArea,
        FieldType::SingleSelect => Control::Dropdown {
            options: field.options.clone(),
        },
        FieldType::MultiSelect => Control::Checklist {
            options: field.options.clone(),
        },
        FieldType::Boolean => Control::Toggle,
        FieldType::SingleChoiceList => Control::RadioGroup {
            options: field.options.clone(),
        },
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
