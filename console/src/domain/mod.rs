//! Domain primitives and services.
//!
//! Purpose: strongly typed session, actor, and guard logic shared by the
//! API layer and the console screens. Types stay immutable where they can;
//! invariants and serialisation contracts live in each type's Rustdoc.
//!
//! Public surface, leaf-first:
//! - [`Error`]/[`ErrorCode`] — client error taxonomy.
//! - [`Actor`]/[`AdminRole`] — the authenticated identity sum type.
//! - [`LoginCredentials`] — validated login form values.
//! - [`SessionToken`]/[`SessionSnapshot`]/[`SessionContext`] — the paired
//!   session state and its single owner.
//! - [`Route`]/[`Access`] and the guards — navigation policy.
//! - [`AuthResolver`] — login/logout plus role projections.
//! - [`ListController`] — list view state with request generations.
//! - pipeline and money helpers for the funnel screens.

pub mod actor;
pub mod auth;
pub mod error;
pub mod guards;
pub mod listing;
pub mod money;
pub mod pipeline;
pub mod ports;
pub mod resolver;
pub mod routes;
pub mod session;

pub use self::actor::{Actor, AdminRole, STAFF_ROLE_LABEL};
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::guards::{AuthenticatedGuard, GuardOutcome, RoleRestrictedGuard, evaluate_access};
pub use self::listing::{Generation, ListController, ListPhase};
pub use self::money::{format_compact_money, format_money};
pub use self::pipeline::{
    PipelineSummary, RawStageTotals, STAGE_ORDER, StageKey, StageTotals, normalize_stages,
};
pub use self::resolver::AuthResolver;
pub use self::routes::{Access, LANDING, Route};
pub use self::session::{
    SessionContext, SessionSnapshot, SessionToken, SessionValidationError,
};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
