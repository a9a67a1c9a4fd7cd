//! Session state: the bearer token, the persisted snapshot, and the
//! single-owner context shared by the HTTP client and the route guards.
//!
//! The token and the actor travel together as one [`SessionSnapshot`] value
//! through one store slot, so the pair is set and cleared atomically — never
//! one without the other.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::domain::ports::{SessionStore, SessionStoreError};
use crate::domain::Actor;

/// Validation errors for session values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionValidationError {
    /// The bearer token was empty or whitespace.
    EmptyToken,
}

impl fmt::Display for SessionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyToken => write!(f, "session token must not be empty"),
        }
    }
}

impl std::error::Error for SessionValidationError {}

/// Opaque bearer token issued by the login endpoint.
///
/// Deliberately has no `Display` implementation so the secret does not leak
/// into log output by accident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionToken(String);

impl SessionToken {
    /// Validate and construct a token.
    pub fn new(raw: impl Into<String>) -> Result<Self, SessionValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(SessionValidationError::EmptyToken);
        }
        Ok(Self(raw))
    }

    /// The raw credential, for the `Authorization` header.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<SessionToken> for String {
    fn from(value: SessionToken) -> Self {
        value.0
    }
}

impl TryFrom<String> for SessionToken {
    type Error = SessionValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// The persisted `{token, actor}` pair.
///
/// ## Invariants
/// - Constructed only as a pair; there is no way to persist a token without
///   its actor or vice versa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    token: SessionToken,
    actor: Actor,
}

impl SessionSnapshot {
    /// Pair a token with its actor.
    pub fn new(token: SessionToken, actor: Actor) -> Self {
        Self { token, actor }
    }

    /// Bearer token for outgoing requests.
    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    /// The authenticated identity.
    pub fn actor(&self) -> &Actor {
        &self.actor
    }
}

/// Single owner of the live session, layered over a [`SessionStore`].
///
/// The store is read exactly once, at initialisation; afterwards every
/// consumer (guards, HTTP client, resolver) sees the in-memory state, and
/// writes go through [`SessionContext::establish`] and
/// [`SessionContext::invalidate`] only.
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    current: Mutex<Option<SessionSnapshot>>,
}

impl SessionContext {
    /// Hydrate the context from the store.
    ///
    /// A corrupt snapshot is logged and treated as an absent session rather
    /// than failing startup; storage-level failures propagate.
    pub fn initialise(store: Arc<dyn SessionStore>) -> Result<Self, SessionStoreError> {
        let current = match store.load() {
            Ok(snapshot) => snapshot,
            Err(SessionStoreError::Corrupt { message }) => {
                tracing::warn!(%message, "discarding corrupt session snapshot");
                None
            }
            Err(err) => return Err(err),
        };
        Ok(Self {
            store,
            current: Mutex::new(current),
        })
    }

    /// The live snapshot, if a session is active.
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The live actor, if a session is active.
    pub fn actor(&self) -> Option<Actor> {
        self.snapshot().map(|snapshot| snapshot.actor().clone())
    }

    /// The live bearer token, if a session is active.
    pub fn token(&self) -> Option<SessionToken> {
        self.snapshot().map(|snapshot| snapshot.token().clone())
    }

    /// True when an actor is logged in.
    pub fn is_authenticated(&self) -> bool {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Persist a fresh snapshot and adopt it in memory.
    ///
    /// The store write happens first; when it fails the in-memory state is
    /// left untouched, so memory never claims a session the store lost.
    pub fn establish(&self, snapshot: SessionSnapshot) -> Result<(), SessionStoreError> {
        self.store.save(&snapshot)?;
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        *current = Some(snapshot);
        Ok(())
    }

    /// Drop the session from memory and the store. Idempotent, never fails:
    /// a store failure during invalidation is logged and swallowed because
    /// the caller is already on its way to the login screen.
    pub fn invalidate(&self) {
        {
            let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
            *current = None;
        }
        if let Err(err) = self.store.clear() {
            tracing::warn!(error = %err, "failed to clear persisted session");
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{InMemorySessionStore, SessionStore as _};
    use crate::domain::AdminRole;
    use rstest::rstest;

    fn snapshot() -> SessionSnapshot {
        SessionSnapshot::new(
            SessionToken::new("t1").expect("fixture token"),
            Actor::Admin {
                id: 1,
                email: "a@x.com".to_owned(),
                role: AdminRole::SuperAdmin,
            },
        )
    }

    #[rstest]
    fn empty_tokens_are_rejected() {
        assert_eq!(
            SessionToken::new("  ").expect_err("blank token"),
            SessionValidationError::EmptyToken,
        );
    }

    #[rstest]
    fn initialise_reads_the_store_once() {
        let store = Arc::new(InMemorySessionStore::seeded(snapshot()));
        let context = SessionContext::initialise(store.clone()).expect("initialise");
        assert!(context.is_authenticated());

        // Later store mutations are invisible until re-initialisation.
        store.clear().expect("clear");
        assert!(context.is_authenticated());
    }

    #[rstest]
    fn establish_persists_and_adopts_the_pair() {
        let store = Arc::new(InMemorySessionStore::new());
        let context = SessionContext::initialise(store.clone()).expect("initialise");
        context.establish(snapshot()).expect("establish");

        assert_eq!(context.snapshot(), Some(snapshot()));
        assert_eq!(store.load().expect("load"), Some(snapshot()));
    }

    #[rstest]
    fn invalidate_clears_memory_and_store() {
        let store = Arc::new(InMemorySessionStore::seeded(snapshot()));
        let context = SessionContext::initialise(store.clone()).expect("initialise");

        context.invalidate();
        context.invalidate();

        assert!(!context.is_authenticated());
        assert_eq!(store.load().expect("load"), None);
    }
}
