//! Actor resolution: login, logout, and the role flags derived from the
//! live session.
//!
//! The resolver is the only writer of session state in normal use. Login
//! validates the form fields before any request leaves the process, then
//! persists whatever pair the unified login endpoint returns; logout clears
//! the pair and forces navigation to the login route synchronously.

use std::sync::Arc;

use crate::domain::ports::{LoginService, Navigator};
use crate::domain::{Actor, Error, LoginCredentials, Route, SessionContext};

/// Login/logout operations plus role projections over the session context.
pub struct AuthResolver {
    session: Arc<SessionContext>,
    login_service: Arc<dyn LoginService>,
    navigator: Arc<dyn Navigator>,
}

impl AuthResolver {
    /// Wire the resolver over the shared session context.
    pub fn new(
        session: Arc<SessionContext>,
        login_service: Arc<dyn LoginService>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            session,
            login_service,
            navigator,
        }
    }

    /// The live actor, if any.
    pub fn actor(&self) -> Option<Actor> {
        self.session.actor()
    }

    /// True when an actor is logged in.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// True when the live actor is a back-office admin.
    pub fn is_admin(&self) -> bool {
        self.actor().is_some_and(|actor| actor.is_admin())
    }

    /// True when the live actor is a super admin.
    pub fn is_super_admin(&self) -> bool {
        self.actor().is_some_and(|actor| actor.is_super_admin())
    }

    /// True when the live actor is a sales staff user.
    pub fn is_user(&self) -> bool {
        self.actor().is_some_and(|actor| actor.is_user())
    }

    /// Role string for the live actor: the admin role, or the fixed staff
    /// tag.
    pub fn role(&self) -> Option<&'static str> {
        self.actor().map(|actor| actor.role_label())
    }

    /// Authenticate against the unified login endpoint and persist the
    /// resulting pair.
    ///
    /// A missing email or password fails validation here and never reaches
    /// the wire. Endpoint failures propagate to the caller unchanged so the
    /// login screen can show them.
    pub async fn login(&self, email: &str, password: &str) -> Result<Actor, Error> {
        let credentials = LoginCredentials::try_from_parts(email, password)
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        let snapshot = self.login_service.login(&credentials).await?;
        let actor = snapshot.actor().clone();
        self.session
            .establish(snapshot)
            .map_err(|err| Error::internal(format!("failed to persist session: {err}")))?;

        tracing::info!(actor = %actor.display_name(), "login succeeded");
        Ok(actor)
    }

    /// Clear the session and force navigation to the login route.
    ///
    /// Safe to call any number of times, logged in or not.
    pub fn logout(&self) {
        self.session.invalidate();
        self.navigator.redirect(Route::Login);
    }
}
