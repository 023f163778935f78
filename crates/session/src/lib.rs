//! formant-session: best-effort session liveness tracking.
//!
//! A [`SessionTracker`] writes a periodic heartbeat against an external
//! session record while a respondent keeps a form open, and marks the
//! response abandoned after an uninterrupted inactivity window. Everything
//! here is a side channel: store failures are logged and ignored, and no
//! path through this crate can block or fail the render/validate/submit
//! pipeline -- the tracker shares nothing with the engine beyond the two
//! identifiers captured at start.

mod error;
mod memory;
mod record;
mod tracker;
mod traits;

pub use error::StoreError;
pub use memory::MemorySessionStore;
pub use record::{ResponseStatus, SessionRecord};
pub use tracker::{SessionTracker, TrackerConfig, TrackerState};
pub use traits::SessionStore;
