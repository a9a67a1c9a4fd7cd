//! Console routes and their access policy.
//!
//! Every screen the console can show maps to one route. The access policy
//! here is the single source of truth the guards evaluate before a screen
//! runs.

use crate::domain::AdminRole;

/// Default landing route after login and after role-denied redirects.
pub const LANDING: Route = Route::Dashboard;

/// A navigable console screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Login form.
    Login,
    /// Password-reset request form.
    ForgotPassword,
    /// Password-reset / invite-acceptance completion form.
    SetPassword,
    /// KPI dashboard; the default landing screen.
    Dashboard,
    /// Weekly meeting reports.
    Meetings,
    /// Sales pipeline funnel and summary.
    Pipeline,
    /// Deal/opportunity list and editing.
    Opportunities,
    /// Customer directory.
    Customers,
    /// Staff user management.
    Users,
    /// Admin management and invites.
    Admins,
    /// Audit trail.
    AuditLogs,
}

/// Who may open a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Open to anyone, logged in or not.
    Public,
    /// Any authenticated actor.
    Authenticated,
    /// Admins only, restricted to the listed roles.
    AdminRoles(&'static [AdminRole]),
}

impl Route {
    /// Browser-style path for the route, used in redirect hints.
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::ForgotPassword => "/forgot-password",
            Self::SetPassword => "/set-password",
            Self::Dashboard => "/kpi",
            Self::Meetings => "/meetings",
            Self::Pipeline => "/pipeline",
            Self::Opportunities => "/opportunities",
            Self::Customers => "/customers",
            Self::Users => "/users",
            Self::Admins => "/admins",
            Self::AuditLogs => "/audit-logs",
        }
    }

    /// Access policy for the route.
    pub fn access(self) -> Access {
        match self {
            Self::Login | Self::ForgotPassword | Self::SetPassword => Access::Public,
            Self::Dashboard
            | Self::Meetings
            | Self::Pipeline
            | Self::Opportunities
            | Self::Customers => Access::Authenticated,
            Self::Users => Access::AdminRoles(&[AdminRole::SuperAdmin, AdminRole::Admin]),
            Self::Admins | Self::AuditLogs => Access::AdminRoles(&[AdminRole::SuperAdmin]),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
