//! The form-fill state machine.
//!
//! All engine behavior is expressed as a pure transition function
//! `(schema, state, event) -> (state', effect?)`. The UI layer is a thin
//! adapter: it feeds keystrokes/clicks in as events and executes the one
//! effect -- handing the finished answer map to the submission callback --
//! when the engine emits it.
//!
//! Key invariants:
//! - changing a value clears that key's error unconditionally, even when
//!   no error existed and even when the new value is still invalid
//! - submit validates every field in schema order and either emits the
//!   answers verbatim (error map empty) or stores the complete error map
//! - `submitting` latches for the duration of exactly one outstanding
//!   submission; a second `SubmitRequested` while latched is a no-op, and
//!   `SubmitSettled` unlatches unconditionally on success or failure

use formant_core::{AnswerMap, AnswerValue, ErrorMap, FormSchema};

use crate::progress::completion_percent;
use crate::validate::validate_all;

/// Mutable per-session engine state. One instance per form-fill session;
/// nothing is shared across sessions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub answers: AnswerMap,
    pub errors: ErrorMap,
    /// True while exactly one submission is outstanding.
    pub submitting: bool,
}

impl FormState {
    pub fn new() -> Self {
        FormState::default()
    }

    /// Current completion percentage for this state.
    pub fn progress(&self, schema: &FormSchema) -> u8 {
        completion_percent(schema, &self.answers)
    }
}

/// An interaction event fed into the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// A control reported a new value for its field.
    ValueChanged { key: String, value: AnswerValue },
    /// A multi-select checkbox was toggled for one option value.
    OptionToggled { key: String, option: String },
    /// The respondent pressed submit.
    SubmitRequested,
    /// The in-flight submission resolved, successfully or not.
    SubmitSettled,
}

/// The one side effect the engine requests of its caller.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEffect {
    /// Hand the finished answers to the submission callback. Emitted
    /// exactly once per successful validation pass.
    Submit(AnswerMap),
}

/// Apply one event to the state, returning the next state and an optional
/// effect for the caller to execute.
pub fn apply(
    schema: &FormSchema,
    mut state: FormState,
    event: FormEvent,
) -> (FormState, Option<FormEffect>) {
    match event {
        FormEvent::ValueChanged { key, value } => {
            state.answers.insert(key.clone(), value);
            state.errors.clear_key(&key);
            (state, None)
        }
        FormEvent::OptionToggled { key, option } => {
            toggle_option(&mut state.answers, &key, option);
            state.errors.clear_key(&key);
            (state, None)
        }
        FormEvent::SubmitRequested => {
            if state.submitting {
                // One outstanding submission at a time.
                return (state, None);
            }
            let errors = validate_all(schema, &state.answers);
            if errors.is_empty() {
                state.errors = ErrorMap::new();
                state.submitting = true;
                let answers = state.answers.clone();
                (state, Some(FormEffect::Submit(answers)))
            } else {
                state.errors = errors;
                (state, None)
            }
        }
        FormEvent::SubmitSettled => {
            state.submitting = false;
            (state, None)
        }
    }
}

/// Toggle `option` within the field's `Many` value: add if absent
/// (first-seen order preserved), remove if present. A non-`Many` value
/// under the key is replaced by a fresh list.
fn toggle_option(answers: &mut AnswerMap, key: &str, option: String) {
    match answers.get_mut(key) {
        Some(AnswerValue::Many(items)) => {
            if let Some(pos) = items.iter().position(|v| *v == option) {
                items.remove(pos);
            } else {
                items.push(option);
            }
        }
        _ => {
            answers.insert(key.to_string(), AnswerValue::Many(vec![option]));
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn email_schema() -> FormSchema {
        FormSchema::from_json(&serde_json::json!({
            "fields": [
                { "key": "email", "type": "email", "label": "E-mail", "required": true }
            ]
        }))
        .unwrap()
    }

    fn multi_schema() -> FormSchema {
        FormSchema::from_json(&serde_json::json!({
            "fields": [{
                "key": "tags",
                "type": "multi-select",
                "label": "Tags",
                "options": [
                    { "value": "a", "label": "A" },
                    { "value": "b", "label": "B" }
                ]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn value_change_stores_answer_and_clears_error() {
        let schema = email_schema();
        let state = FormState::new();

        // Failed submit leaves an error behind.
        let (state, effect) = apply(&schema, state, FormEvent::SubmitRequested);
        assert!(effect.is_none());
        assert_eq!(state.errors.get("email"), Some("E-mail é obrigatório"));

        // Editing the field clears the error even though "x" is non-empty
        // but the error only reappears on the next validation pass.
        let (state, _) = apply(
            &schema,
            state,
            FormEvent::ValueChanged {
                key: "email".to_string(),
                value: "x".into(),
            },
        );
        assert_eq!(state.errors.get("email"), None);
        assert_eq!(state.answers.get("email"), Some(&"x".into()));
    }

    #[test]
    fn error_cleared_even_when_new_value_still_invalid() {
        let schema = email_schema();
        let (state, _) = apply(&schema, FormState::new(), FormEvent::SubmitRequested);
        assert!(!state.errors.is_empty());

        let (state, _) = apply(
            &schema,
            state,
            FormEvent::ValueChanged {
                key: "email".to_string(),
                value: "".into(),
            },
        );
        assert!(state.errors.is_empty());

        // Next validation pass brings it back.
        let (state, effect) = apply(&schema, state, FormEvent::SubmitRequested);
        assert!(effect.is_none());
        assert_eq!(state.errors.get("email"), Some("E-mail é obrigatório"));
    }

    #[test]
    fn submit_with_missing_required_yields_error_and_no_effect() {
        let schema = email_schema();
        let (state, effect) = apply(&schema, FormState::new(), FormEvent::SubmitRequested);
        assert!(effect.is_none());
        assert!(!state.submitting);
        assert_eq!(state.errors.len(), 1);
        assert_eq!(state.errors.get("email"), Some("E-mail é obrigatório"));
    }

    #[test]
    fn submit_with_valid_answers_emits_answers_verbatim_once() {
        let schema = email_schema();
        let (state, _) = apply(
            &schema,
            FormState::new(),
            FormEvent::ValueChanged {
                key: "email".to_string(),
                value: "a@b.com".into(),
            },
        );

        let (state, effect) = apply(&schema, state, FormEvent::SubmitRequested);
        assert!(state.submitting);
        assert!(state.errors.is_empty());
        let Some(FormEffect::Submit(answers)) = effect else {
            panic!("expected Submit effect");
        };
        assert_eq!(answers.get("email"), Some(&"a@b.com".into()));
        assert_eq!(answers.len(), 1);
    }

    #[test]
    fn second_submit_while_outstanding_is_noop() {
        let schema = email_schema();
        let (state, _) = apply(
            &schema,
            FormState::new(),
            FormEvent::ValueChanged {
                key: "email".to_string(),
                value: "a@b.com".into(),
            },
        );
        let (state, first) = apply(&schema, state, FormEvent::SubmitRequested);
        assert!(first.is_some());

        let (state, second) = apply(&schema, state, FormEvent::SubmitRequested);
        assert!(second.is_none());
        assert!(state.submitting);
    }

    #[test]
    fn settle_reenables_submit_unconditionally() {
        let schema = email_schema();
        let (state, _) = apply(
            &schema,
            FormState::new(),
            FormEvent::ValueChanged {
                key: "email".to_string(),
                value: "a@b.com".into(),
            },
        );
        let (state, _) = apply(&schema, state, FormEvent::SubmitRequested);
        let (state, effect) = apply(&schema, state, FormEvent::SubmitSettled);
        assert!(effect.is_none());
        assert!(!state.submitting);

        // A retry after failure emits again.
        let (_, retry) = apply(&schema, state, FormEvent::SubmitRequested);
        assert!(retry.is_some());
    }

    #[test]
    fn answers_retained_after_successful_submit() {
        let schema = email_schema();
        let (state, _) = apply(
            &schema,
            FormState::new(),
            FormEvent::ValueChanged {
                key: "email".to_string(),
                value: "a@b.com".into(),
            },
        );
        let (state, _) = apply(&schema, state, FormEvent::SubmitRequested);
        let (state, _) = apply(&schema, state, FormEvent::SubmitSettled);
        assert_eq!(state.answers.get("email"), Some(&"a@b.com".into()));
    }

    #[test]
    fn multi_select_toggle_preserves_order_no_duplicates() {
        let schema = multi_schema();
        let mut state = FormState::new();
        for (key, option) in [("tags", "a"), ("tags", "b"), ("tags", "a")] {
            let (next, _) = apply(
                &schema,
                state,
                FormEvent::OptionToggled {
                    key: key.to_string(),
                    option: option.to_string(),
                },
            );
            state = next;
        }
        assert_eq!(
            state.answers.get("tags"),
            Some(&AnswerValue::Many(vec!["b".to_string()]))
        );
    }

    #[test]
    fn toggle_same_option_twice_is_identity_on_membership() {
        let schema = multi_schema();
        let mut state = FormState::new();
        for _ in 0..2 {
            let (next, _) = apply(
                &schema,
                state,
                FormEvent::OptionToggled {
                    key: "tags".to_string(),
                    option: "a".to_string(),
                },
            );
            state = next;
        }
        assert_eq!(
            state.answers.get("tags"),
            Some(&AnswerValue::Many(vec![]))
        );
    }

    #[test]
    fn toggle_over_non_list_value_starts_fresh_list() {
        let schema = multi_schema();
        let (state, _) = apply(
            &schema,
            FormState::new(),
            FormEvent::ValueChanged {
                key: "tags".to_string(),
                value: "stray".into(),
            },
        );
        let (state, _) = apply(
            &schema,
            state,
            FormEvent::OptionToggled {
                key: "tags".to_string(),
                option: "a".to_string(),
            },
        );
        assert_eq!(
            state.answers.get("tags"),
            Some(&AnswerValue::Many(vec!["a".to_string()]))
        );
    }

    #[test]
    fn progress_tracks_state_answers() {
        let schema = FormSchema::from_json(&serde_json::json!({
            "fields": [
                { "key": "a", "type": "text", "label": "A" },
                { "key": "b", "type": "text", "label": "B" }
            ]
        }))
        .unwrap();
        let state = FormState::new();
        assert_eq!(state.progress(&schema), 0);
        let (state, _) = apply(
            &schema,
            state,
            FormEvent::ValueChanged {
                key: "a".to_string(),
                value: "x".into(),
            },
        );
        assert_eq!(state.progress(&schema), 50);
    }
}
