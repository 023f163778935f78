//! Completion-progress calculation.

use formant_core::{AnswerMap, FormSchema};

/// Percentage of fields answered, rounded to the nearest integer.
///
/// "Answered" means the answer map has an entry for the field's key and
/// that entry is not the empty string. A schema with zero fields reports
/// 0 -- never a division by zero. Purely derived; recompute on demand.
pub fn completion_percent(schema: &FormSchema, answers: &AnswerMap) -> u8 {
    let total = schema.fields.len();
    if total == 0 {
        return 0;
    }
    let answered = schema
        .fields
        .iter()
        .filter(|f| answers.is_answered(&f.key))
        .count();
    ((answered as f64 / total as f64) * 100.0).round() as u8
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
