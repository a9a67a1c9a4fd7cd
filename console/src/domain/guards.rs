//! Route guards evaluated before a screen runs.
//!
//! Two gate types, mirroring the two gates the product grew: a plain
//! authenticated gate, and a role-restricted gate that happens to behave
//! like the plain one when no allow-list is supplied. Both decide
//! synchronously from whatever the session context currently holds — there
//! is no loading state — and a role failure never clears the session.

use crate::domain::routes::{Access, LANDING, Route};
use crate::domain::{Actor, AdminRole, SessionContext};

/// Result of evaluating a guard for one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Let the nested screen render.
    Render,
    /// Send the actor elsewhere instead of rendering.
    Redirect(Route),
}

/// Gate requiring any authenticated actor.
#[derive(Debug, Default, Clone, Copy)]
pub struct AuthenticatedGuard;

impl AuthenticatedGuard {
    /// No actor redirects to login; anything else renders.
    pub fn evaluate(session: &SessionContext) -> GuardOutcome {
        if session.is_authenticated() {
            GuardOutcome::Render
        } else {
            GuardOutcome::Redirect(Route::Login)
        }
    }
}

/// Gate requiring an admin whose role appears in the allow-list.
#[derive(Debug, Clone)]
pub struct RoleRestrictedGuard {
    allowed_roles: Option<Vec<AdminRole>>,
}

impl RoleRestrictedGuard {
    /// Gate that admits any authenticated actor (no allow-list).
    pub fn any_authenticated() -> Self {
        Self {
            allowed_roles: None,
        }
    }

    /// Gate restricted to the given admin roles.
    pub fn allowing(roles: impl Into<Vec<AdminRole>>) -> Self {
        Self {
            allowed_roles: Some(roles.into()),
        }
    }

    /// Evaluate the gate against the current session.
    pub fn evaluate(&self, session: &SessionContext) -> GuardOutcome {
        let Some(actor) = session.actor() else {
            return GuardOutcome::Redirect(Route::Login);
        };

        let Some(allowed) = &self.allowed_roles else {
            return GuardOutcome::Render;
        };

        match actor {
            Actor::User { .. } => GuardOutcome::Redirect(LANDING),
            Actor::Admin { role, .. } if !allowed.contains(&role) => {
                GuardOutcome::Redirect(LANDING)
            }
            Actor::Admin { .. } => GuardOutcome::Render,
        }
    }
}

/// Evaluate a route's access policy against the current session.
pub fn evaluate_access(access: Access, session: &SessionContext) -> GuardOutcome {
    match access {
        Access::Public => GuardOutcome::Render,
        Access::Authenticated => AuthenticatedGuard::evaluate(session),
        Access::AdminRoles(roles) => {
            RoleRestrictedGuard::allowing(roles.to_vec()).evaluate(session)
        }
    }
}
