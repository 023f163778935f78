//! formant-engine: the form rendering and validation engine.
//!
//! Given a declarative [`FormSchema`](formant_core::FormSchema), the engine
//! maps each field to an input-control description, accumulates respondent
//! input into an [`AnswerMap`](formant_core::AnswerMap), validates fields
//! against their declared constraints on submit (clearing per-field errors
//! on edit), computes a completion percentage, and hands the finished
//! answer map to the caller exactly once per successful validation pass.
//!
//! The core is a pure state-transition function -- see [`apply`] -- so it
//! unit-tests without any UI harness. The optional `adapter` feature adds
//! the HTTP client for the two AI-backed edge functions.

pub mod progress;
pub mod render;
pub mod state;
pub mod validate;

#[cfg(feature = "adapter")]
pub mod adapter;

pub use progress::completion_percent;
pub use render::{Control, InputHint, control_for};
pub use state::{apply, FormEffect, FormEvent, FormState};
pub use validate::{validate_all, validate_field};

#[cfg(feature = "adapter")]
pub use adapter::{ClientError, EdgeClient, NluOutcome};
