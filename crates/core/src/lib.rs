//! formant-core: form schema data model.
//!
//! External collaborators (the schema-generation service, the hosted store)
//! hand us loosely-typed JSON. This crate narrows those payloads into
//! tagged-variant Rust types at the boundary and keeps everything after
//! that boundary strongly typed.
//!
//! # Public API
//!
//! - [`FormSchema`] / [`FieldSpec`] / [`FieldType`] -- the declarative form
//!   definition, immutable for the duration of one render session
//! - [`AnswerMap`] / [`AnswerValue`] -- respondent input, keyed by field key
//! - [`ErrorMap`] -- current validation failures, keyed by field key
//! - [`DecodeError`] -- structural decoding failures at the JSON boundary

pub mod error;
pub mod field;
pub mod schema;
pub mod value;

pub use error::DecodeError;
pub use field::{FieldOption, FieldSpec, FieldType, FieldValidation};
pub use schema::{FormSchema, FormSettings};
pub use value::{AnswerMap, AnswerValue, ErrorMap};
