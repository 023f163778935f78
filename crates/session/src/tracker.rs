//! Heartbeat and inactivity timers for one form-fill session.
//!
//! The tracker owns two scheduled activities: a periodic liveness write
//! (heartbeat) and an inactivity deadline that, if it elapses
//! uninterrupted, marks the response abandoned exactly once. Both are
//! driven by a single spawned task and cancelled together when the
//! session ends -- explicitly via [`SessionTracker::stop`], with
//! abort-on-drop as a backstop. Leaking either timer past the session is
//! a defect.
//!
//! Store failures are warned and ignored; nothing here can interrupt the
//! respondent.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::traits::SessionStore;

/// Timer configuration. Defaults match the product: a 30-second heartbeat
/// and a 5-minute inactivity window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    pub heartbeat: Duration,
    pub inactivity: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            heartbeat: Duration::from_secs(30),
            inactivity: Duration::from_secs(5 * 60),
        }
    }
}

/// Observable tracker state.
///
/// `Uninitialized -> Tracked -> Abandoned`, with no transition out of
/// `Abandoned`. A failed initial upsert leaves the tracker
/// `Uninitialized`, idling until stopped: no heartbeats without a session
/// record, and no abandonment mark for a session that was never recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    Uninitialized,
    Tracked,
    Abandoned,
}

/// Handle to the background liveness task for one session.
pub struct SessionTracker {
    stop_tx: watch::Sender<bool>,
    state_rx: watch::Receiver<TrackerState>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl SessionTracker {
    /// Upsert the session record and start both timers.
    ///
    /// Captures `form_id` and `response_id` once; the tracker has no other
    /// channel into the engine.
    pub fn start(
        store: Arc<dyn SessionStore>,
        form_id: impl Into<String>,
        response_id: impl Into<String>,
        config: TrackerConfig,
    ) -> SessionTracker {
        let (stop_tx, stop_rx) = watch::channel(false);
        let (state_tx, state_rx) = watch::channel(TrackerState::Uninitialized);
        let handle = tokio::spawn(run(
            store,
            form_id.into(),
            response_id.into(),
            config,
            stop_rx,
            state_tx,
        ));
        SessionTracker {
            stop_tx,
            state_rx,
            handle: Some(handle),
        }
    }

    /// Current tracker state.
    pub fn state(&self) -> TrackerState {
        *self.state_rx.borrow()
    }

    /// Cancel both timers and wait for the task to finish. No writes occur
    /// after this returns.
    pub async fn stop(mut self) {
        let _ = self.stop_tx.send(true);
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for SessionTracker {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

async fn run(
    store: Arc<dyn SessionStore>,
    form_id: String,
    response_id: String,
    config: TrackerConfig,
    mut stop_rx: watch::Receiver<bool>,
    state_tx: watch::Sender<TrackerState>,
) {
    let session_id = tokio::select! {
        _ = stop_rx.changed() => return,
        result = store.upsert_session(&form_id, &response_id) => match result {
            Ok(id) => {
                let _ = state_tx.send(TrackerState::Tracked);
                id
            }
            Err(error) => {
                tracing::warn!(%error, %form_id, %response_id, "session upsert failed, tracker idle");
                let _ = stop_rx.changed().await;
                return;
            }
        },
    };

    // The upsert itself counts as activity; first heartbeat one interval out.
    let mut heartbeat = interval_at(Instant::now() + config.heartbeat, config.heartbeat);
    heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut deadline = Instant::now() + config.inactivity;
    let mut abandoned = false;

    loop {
        // Biased so a heartbeat due at the same instant as the deadline
        // counts as activity and rearms the window.
        tokio::select! {
            biased;
            _ = stop_rx.changed() => return,
            _ = heartbeat.tick() => {
                if let Err(error) = store.touch_session(&session_id).await {
                    tracing::warn!(%error, %session_id, "heartbeat write failed");
                }
                // Every heartbeat rearms the inactivity deadline, whether
                // or not the write landed.
                deadline = Instant::now() + config.inactivity;
            }
            _ = tokio::time::sleep_until(deadline), if !abandoned => {
                abandoned = true;
                let _ = state_tx.send(TrackerState::Abandoned);
                if let Err(error) = store.mark_abandoned(&response_id).await {
                    tracing::warn!(%error, %response_id, "abandoned mark failed");
                }
            }
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::memory::MemorySessionStore;
    use crate::record::ResponseStatus;
    use async_trait::async_trait;

    /// Let the paused clock move forward and the tracker task run.
    async fn pass_time(duration: Duration) {
        tokio::time::advance(duration).await;
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    fn config(heartbeat_secs: u64, inactivity_secs: u64) -> TrackerConfig {
        TrackerConfig {
            heartbeat: Duration::from_secs(heartbeat_secs),
            inactivity: Duration::from_secs(inactivity_secs),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn heartbeat_touches_session_on_schedule() {
        let store = Arc::new(MemorySessionStore::new());
        let tracker =
            SessionTracker::start(store.clone(), "form-1", "resp-1", config(30, 300));
        pass_time(Duration::from_millis(1)).await;
        assert_eq!(tracker.state(), TrackerState::Tracked);
        let session_id = store.session("resp-1").unwrap().id;

        for expected in 1..=3 {
            pass_time(Duration::from_secs(31)).await;
            assert_eq!(store.touch_count(&session_id), expected);
        }

        tracker.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn heartbeat_prevents_abandonment_and_rearms() {
        // Heartbeat fires well inside the inactivity window, so the
        // deadline keeps moving and no abandoned mark is ever written.
        let store = Arc::new(MemorySessionStore::new());
        let tracker =
            SessionTracker::start(store.clone(), "form-1", "resp-1", config(10, 30));
        pass_time(Duration::from_millis(1)).await;

        pass_time(Duration::from_secs(120)).await;
        assert_eq!(store.abandon_mark_count("resp-1"), 0);
        assert_eq!(
            store.session("resp-1").unwrap().status,
            ResponseStatus::InProgress
        );
        assert_eq!(tracker.state(), TrackerState::Tracked);

        tracker.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn inactivity_marks_abandoned_exactly_once() {
        // Heartbeat slower than the window: the deadline fires first.
        let store = Arc::new(MemorySessionStore::new());
        let tracker =
            SessionTracker::start(store.clone(), "form-1", "resp-1", config(100, 40));
        pass_time(Duration::from_millis(1)).await;

        pass_time(Duration::from_secs(45)).await;
        assert_eq!(store.abandon_mark_count("resp-1"), 1);
        assert_eq!(tracker.state(), TrackerState::Abandoned);

        // The deadline is not rearmed after firing -- later heartbeats
        // keep touching but never produce a second mark.
        pass_time(Duration::from_secs(400)).await;
        assert_eq!(store.abandon_mark_count("resp-1"), 1);

        tracker.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_both_timers() {
        let store = Arc::new(MemorySessionStore::new());
        let tracker =
            SessionTracker::start(store.clone(), "form-1", "resp-1", config(10, 30));
        pass_time(Duration::from_millis(1)).await;
        let session_id = store.session("resp-1").unwrap().id;

        tracker.stop().await;
        let touches_at_stop = store.touch_count(&session_id);

        pass_time(Duration::from_secs(600)).await;
        assert_eq!(store.touch_count(&session_id), touches_at_stop);
        assert_eq!(store.abandon_mark_count("resp-1"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn submit_status_written_independently_of_abandoned_mark() {
        let store = Arc::new(MemorySessionStore::new());
        let tracker =
            SessionTracker::start(store.clone(), "form-1", "resp-1", config(100, 40));
        pass_time(Duration::from_secs(45)).await;
        assert_eq!(
            store.session("resp-1").unwrap().status,
            ResponseStatus::Abandoned
        );

        // A late submit updates status on its own; the tracker does not
        // transition back to Tracked.
        store.mark_submitted("resp-1").await.unwrap();
        assert_eq!(
            store.session("resp-1").unwrap().status,
            ResponseStatus::Submitted
        );
        assert_eq!(tracker.state(), TrackerState::Abandoned);

        tracker.stop().await;
    }

    struct FailingStore;

    #[async_trait]
    impl SessionStore for FailingStore {
        async fn upsert_session(&self, _: &str, _: &str) -> Result<String, StoreError> {
            Err(StoreError::Backend("connection refused".to_string()))
        }
        async fn touch_session(&self, _: &str) -> Result<(), StoreError> {
            Err(StoreError::Backend("connection refused".to_string()))
        }
        async fn mark_abandoned(&self, _: &str) -> Result<(), StoreError> {
            Err(StoreError::Backend("connection refused".to_string()))
        }
        async fn mark_submitted(&self, _: &str) -> Result<(), StoreError> {
            Err(StoreError::Backend("connection refused".to_string()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn failed_upsert_leaves_tracker_idle_and_stoppable() {
        let tracker =
            SessionTracker::start(Arc::new(FailingStore), "form-1", "resp-1", config(10, 30));
        pass_time(Duration::from_secs(120)).await;
        assert_eq!(tracker.state(), TrackerState::Uninitialized);
        tracker.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn drop_aborts_the_task() {
        let store = Arc::new(MemorySessionStore::new());
        let tracker =
            SessionTracker::start(store.clone(), "form-1", "resp-1", config(10, 30));
        pass_time(Duration::from_millis(1)).await;
        let session_id = store.session("resp-1").unwrap().id;

        drop(tracker);
        pass_time(Duration::from_secs(600)).await;
        assert_eq!(store.touch_count(&session_id), 0);
    }
}
