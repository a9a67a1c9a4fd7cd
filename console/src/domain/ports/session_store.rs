//! Driven port for durable session persistence.
//!
//! The console persists exactly one value: the `{token, actor}` pair. Store
//! implementations keep the pair in a single slot so it can never be saved
//! or cleared half-way.

use std::sync::{Mutex, PoisonError};

use crate::domain::SessionSnapshot;

use super::define_port_error;

define_port_error! {
    /// Failures surfaced by session store implementations.
    pub enum SessionStoreError {
        /// The backing storage could not be read or written.
        Io { message: String } => "session storage failed: {message}",
        /// The stored snapshot exists but no longer decodes.
        Corrupt { message: String } => "stored session is corrupt: {message}",
    }
}

/// Durable persistence for the session snapshot.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore: Send + Sync {
    /// Persist the token/actor pair, replacing any previous snapshot.
    fn save(&self, snapshot: &SessionSnapshot) -> Result<(), SessionStoreError>;

    /// Read the persisted snapshot, if any.
    fn load(&self) -> Result<Option<SessionSnapshot>, SessionStoreError>;

    /// Remove the persisted snapshot. Idempotent.
    fn clear(&self) -> Result<(), SessionStoreError>;
}

/// In-memory store used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    slot: Mutex<Option<SessionSnapshot>>,
}

impl InMemorySessionStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a snapshot.
    pub fn seeded(snapshot: SessionSnapshot) -> Self {
        Self {
            slot: Mutex::new(Some(snapshot)),
        }
    }
}

impl SessionStore for InMemorySessionStore {
    fn save(&self, snapshot: &SessionSnapshot) -> Result<(), SessionStoreError> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(snapshot.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<SessionSnapshot>, SessionStoreError> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(slot.clone())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
        Ok(())
    }
}
