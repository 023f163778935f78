//! In-memory session store for tests and local development.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::record::{now_rfc3339, ResponseStatus, SessionRecord};
use crate::traits::SessionStore;

#[derive(Default)]
struct Inner {
    /// Keyed by response id -- the upsert key.
    sessions: HashMap<String, SessionRecord>,
    /// Heartbeat writes per session id.
    touches: HashMap<String, usize>,
    /// Abandoned-mark writes per response id.
    abandon_marks: HashMap<String, usize>,
    next_id: u64,
}

/// A `SessionStore` backed by a mutex-guarded map.
///
/// Counts heartbeat and abandonment writes so tests can assert on the
/// tracker's exact write behavior.
#[derive(Default)]
pub struct MemorySessionStore {
    inner: Mutex<Inner>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        MemorySessionStore::default()
    }

    /// The current record for a response, if one was upserted.
    pub fn session(&self, response_id: &str) -> Option<SessionRecord> {
        self.inner
            .lock()
            .expect("session store poisoned")
            .sessions
            .get(response_id)
            .cloned()
    }

    /// Number of liveness writes observed for a session.
    pub fn touch_count(&self, session_id: &str) -> usize {
        self.inner
            .lock()
            .expect("session store poisoned")
            .touches
            .get(session_id)
            .copied()
            .unwrap_or(0)
    }

    /// Number of abandoned-mark writes observed for a response.
    pub fn abandon_mark_count(&self, response_id: &str) -> usize {
        self.inner
            .lock()
            .expect("session store poisoned")
            .abandon_marks
            .get(response_id)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn upsert_session(
        &self,
        form_id: &str,
        response_id: &str,
    ) -> Result<String, StoreError> {
        let mut inner = self.inner.lock().map_err(|_| {
            StoreError::Backend("session store poisoned".to_string())
        })?;

        if let Some(existing) = inner.sessions.get_mut(response_id) {
            existing.last_activity_at = now_rfc3339();
            return Ok(existing.id.clone());
        }

        inner.next_id += 1;
        let id = format!("sess-{}", inner.next_id);
        inner.sessions.insert(
            response_id.to_string(),
            SessionRecord {
                id: id.clone(),
                form_id: form_id.to_string(),
                response_id: response_id.to_string(),
                last_activity_at: now_rfc3339(),
                status: ResponseStatus::InProgress,
            },
        );
        Ok(id)
    }

    async fn touch_session(&self, session_id: &str) -> Result<(), StoreError> {
        let mut guard = self.inner.lock().map_err(|_| {
            StoreError::Backend("session store poisoned".to_string())
        })?;
        let inner = &mut *guard;

        let record = inner
            .sessions
            .values_mut()
            .find(|r| r.id == session_id)
            .ok_or_else(|| StoreError::SessionNotFound {
                session_id: session_id.to_string(),
            })?;
        record.last_activity_at = now_rfc3339();
        *inner.touches.entry(session_id.to_string()).or_insert(0) += 1;
        Ok(())
    }

    async fn mark_abandoned(&self, response_id: &str) -> Result<(), StoreError> {
        let mut guard = self.inner.lock().map_err(|_| {
            StoreError::Backend("session store poisoned".to_string())
        })?;
        let inner = &mut *guard;

        let record = inner.sessions.get_mut(response_id).ok_or_else(|| {
            StoreError::ResponseNotFound {
                response_id: response_id.to_string(),
            }
        })?;
        record.status = ResponseStatus::Abandoned;
        *inner
            .abandon_marks
            .entry(response_id.to_string())
            .or_insert(0) += 1;
        Ok(())
    }

    async fn mark_submitted(&self, response_id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().map_err(|_| {
            StoreError::Backend("session store poisoned".to_string())
        })?;

        let record = inner.sessions.get_mut(response_id).ok_or_else(|| {
            StoreError::ResponseNotFound {
                response_id: response_id.to_string(),
            }
        })?;
        record.status = ResponseStatus::Submitted;
        Ok(())
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
