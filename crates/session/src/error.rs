/// All errors that can be returned by a SessionStore implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No session record with the given session id.
    #[error("session not found: {session_id}")]
    SessionNotFound { session_id: String },

    /// No response record with the given response id.
    #[error("response not found: {response_id}")]
    ResponseNotFound { response_id: String },

    /// A backend-specific storage error (connection, serialization, etc.).
    #[error("session store backend error: {0}")]
    Backend(String),
}
