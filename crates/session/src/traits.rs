use async_trait::async_trait;

use crate::error::StoreError;

/// The storage contract for session liveness records.
///
/// Implementations front the hosted backend's session and response tables.
/// Every method here is best-effort from the tracker's point of view:
/// errors are logged by the caller and never propagated into the form
/// engine.
///
/// Must be `Send + Sync + 'static` so the tracker task can hold it across
/// await points.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Create-or-update the session record keyed by `response_id`.
    /// Returns the session id, which subsequent heartbeats write against.
    async fn upsert_session(
        &self,
        form_id: &str,
        response_id: &str,
    ) -> Result<String, StoreError>;

    /// Write a liveness timestamp against the session record.
    async fn touch_session(&self, session_id: &str) -> Result<(), StoreError>;

    /// Mark the associated response abandoned.
    async fn mark_abandoned(&self, response_id: &str) -> Result<(), StoreError>;

    /// Mark the associated response submitted. Independent of any earlier
    /// abandoned mark; never resets it retroactively.
    async fn mark_submitted(&self, response_id: &str) -> Result<(), StoreError>;
}
