//! Per-field validation rules.
//!
//! Rules run in a fixed order with first-failure-wins semantics inside a
//! field; across fields, submit validation never short-circuits. Messages
//! embed the field's display label and, where applicable, the threshold,
//! in the product's locale (pt-BR).

use formant_core::{AnswerMap, AnswerValue, ErrorMap, FieldSpec, FormSchema};
use regex::Regex;

/// Validate one field against its declared constraints.
///
/// Rule order (first failing rule wins):
/// 1. required + empty value -> error
/// 2. absent optional value -> valid, remaining rules skipped
/// 3. minLength (text) 4. maxLength (text) 5. min (number)
/// 6. max (number) 7. pattern (text)
///
/// Purely synchronous; no side effects beyond the returned message.
pub fn validate_field(field: &FieldSpec, value: Option<&AnswerValue>) -> Option<String> {
    if field.required && is_blank(value) {
        return Some(format!("{} é obrigatório", field.label));
    }

    // Absent optional fields are always valid.
    let value = value?;

    if let AnswerValue::Text(s) = value {
        if let Some(min_len) = field.validation.min_length {
            if s.chars().count() < min_len {
                return Some(format!(
                    "{} deve ter pelo menos {} caracteres",
                    field.label, min_len
                ));
            }
        }
        if let Some(max_len) = field.validation.max_length {
            if s.chars().count() > max_len {
                return Some(format!(
                    "{} deve ter no máximo {} caracteres",
                    field.label, max_len
                ));
            }
        }
    }

    if let AnswerValue::Number(n) = value {
        if let Some(min) = field.validation.min {
            if *n < min {
                return Some(format!(
                    "{} deve ser maior ou igual a {}",
                    field.label,
                    format_bound(min)
                ));
            }
        }
        if let Some(max) = field.validation.max {
            if *n > max {
                return Some(format!(
                    "{} deve ser menor ou igual a {}",
                    field.label,
                    format_bound(max)
                ));
            }
        }
    }

    if let (AnswerValue::Text(s), Some(pattern)) = (value, field.validation.pattern.as_deref()) {
        // An unparseable pattern skips the rule: degrade, never crash.
        if let Ok(re) = Regex::new(pattern) {
            if !re.is_match(s) {
                return Some(format!("{} está em um formato inválido", field.label));
            }
        }
    }

    None
}

/// Validate every field in schema order, unconditionally.
///
/// All fields are checked even after the first failure, producing the
/// complete error map a submit attempt surfaces at once.
pub fn validate_all(schema: &FormSchema, answers: &AnswerMap) -> ErrorMap {
    let mut errors = ErrorMap::new();
    for field in &schema.fields {
        if let Some(message) = validate_field(field, answers.get(&field.key)) {
            errors.insert(field.key.clone(), message);
        }
    }
    errors
}

/// Empty for the required check: absent, empty or whitespace-only string,
/// or a multi-select with everything toggled off.
fn is_blank(value: Option<&AnswerValue>) -> bool {
    match value {
        None => true,
        Some(AnswerValue::Text(s)) => s.trim().is_empty(),
        Some(AnswerValue::Many(items)) => items.is_empty(),
        Some(_) => false,
    }
}

/// Render a numeric threshold without a trailing `.0` for whole numbers.
fn format_bound(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
