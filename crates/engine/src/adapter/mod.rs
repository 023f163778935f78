//! HTTP client for the AI-backed edge functions.
//!
//! Two hosted functions sit behind this client: `generate-schema` turns a
//! natural-language description into a form schema, and `nlu-map` maps a
//! free-form respondent message onto partial answers (reserved for a
//! conversational responder; the rendering engine itself never calls it).
//!
//! Uses `ureq` (sync) wrapped in `tokio::task::spawn_blocking` to avoid
//! blocking the async runtime. Failures are terminal at this boundary:
//! one call, one error, no retry -- the caller surfaces a single message
//! and leaves prior state untouched.

use formant_core::{AnswerMap, DecodeError, FormSchema};

/// Errors from an edge-function call.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (connect, TLS, timeout, task join).
    #[error("edge function transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("edge function returned status {status}")]
    Service { status: u16 },

    /// The response body did not decode into the expected shape.
    #[error("edge function response did not decode: {0}")]
    Decode(#[from] DecodeError),
}

/// Outcome of an `nlu-map` call: either partial answers to merge, or a
/// recognized non-answer intent (e.g. "skip", "go back").
#[derive(Debug, Clone, PartialEq)]
pub enum NluOutcome {
    Answers(AnswerMap),
    Intent(String),
}

/// Client for the hosted edge functions.
#[derive(Debug, Clone)]
pub struct EdgeClient {
    base_url: String,
    api_key: Option<String>,
}

impl EdgeClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        EdgeClient {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Generate a form schema from a natural-language description.
    pub async fn generate_schema(&self, description: &str) -> Result<FormSchema, ClientError> {
        let body = serde_json::json!({ "description": description });
        let response = self.post("generate-schema", body).await?;
        Ok(FormSchema::from_json(&response)?)
    }

    /// Map a free-form message onto the schema's fields.
    ///
    /// The current answers, when given, let the service fill only what is
    /// still missing. Response shape: `{"answers": {…}}` or
    /// `{"intent": "…"}`.
    pub async fn map_answers(
        &self,
        message: &str,
        schema: &FormSchema,
        current: Option<&AnswerMap>,
    ) -> Result<NluOutcome, ClientError> {
        let mut body = serde_json::json!({
            "message": message,
            "schema": schema.to_json(),
        });
        if let Some(answers) = current {
            body["currentAnswers"] = answers.to_json();
        }
        let response = self.post("nlu-map", body).await?;

        if let Some(answers) = response.get("answers") {
            return Ok(NluOutcome::Answers(AnswerMap::from_json(answers)));
        }
        if let Some(intent) = response.get("intent").and_then(|i| i.as_str()) {
            return Ok(NluOutcome::Intent(intent.to_string()));
        }
        Err(ClientError::Decode(DecodeError::UnexpectedShape {
            message: "nlu-map response carries neither 'answers' nor 'intent'".to_string(),
        }))
    }

    /// POST a JSON body to `{base_url}/functions/v1/{function}` and read
    /// the JSON response.
    async fn post(
        &self,
        function: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, ClientError> {
        let url = format!("{}/functions/v1/{}", self.base_url, function);
        let api_key = self.api_key.clone();

        tokio::task::spawn_blocking(move || {
            let agent = ureq::Agent::new_with_defaults();
            let mut request = agent.post(&url);
            if let Some(ref key) = api_key {
                request = request.header("Authorization", &format!("Bearer {}", key));
            }

            let response = request.send_json(&body).map_err(|e| match e {
                ureq::Error::StatusCode(status) => ClientError::Service { status },
                other => ClientError::Transport(other.to_string()),
            })?;

            response
                .into_body()
                .read_json::<serde_json::Value>()
                .map_err(|e| ClientError::Transport(format!("failed to parse response: {}", e)))
        })
        .await
        .map_err(|e| ClientError::Transport(format!("task join error: {}", e)))?
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
