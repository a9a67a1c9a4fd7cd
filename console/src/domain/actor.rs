//! Authenticated actor model.
//!
//! The server authenticates either a back-office admin or a sales staff
//! user; the `type` tag on the wire decides which. Every authorisation
//! decision in the console derives from this sum type, so consumption sites
//! match exhaustively — adding a third actor kind is a compile-checked
//! change.

use serde::{Deserialize, Serialize};

/// Back-office admin role carried by [`Actor::Admin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminRole {
    /// Full control, including admin and audit management.
    SuperAdmin,
    /// Day-to-day operations admin.
    Admin,
}

impl AdminRole {
    /// Wire spelling of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated identity driving the session.
///
/// ## Invariants
/// - At most one actor is active per session; the session layer enforces
///   that the actor is only ever stored alongside its bearer token.
///
/// # Examples
/// ```
/// use console::domain::{Actor, AdminRole};
///
/// let actor = Actor::Admin {
///     id: 1,
///     email: "a@x.com".to_owned(),
///     role: AdminRole::Admin,
/// };
/// assert!(actor.is_admin());
/// assert!(!actor.is_super_admin());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all_fields = "camelCase")]
pub enum Actor {
    /// A back-office admin.
    Admin {
        /// Server-assigned identifier.
        id: i64,
        /// Login email.
        email: String,
        /// Admin role deciding which gated screens open.
        role: AdminRole,
    },
    /// A sales staff user.
    User {
        /// Server-assigned identifier.
        id: i64,
        /// Login email.
        email: String,
        /// Given name.
        first_name: String,
        /// Family name.
        last_name: String,
        /// Owning department, e.g. `SALES` or `PRE_SALES`.
        department: String,
    },
}

/// Fixed role tag reported for staff users.
pub const STAFF_ROLE_LABEL: &str = "USER";

impl Actor {
    /// Server-assigned identifier, whichever kind the actor is.
    pub fn id(&self) -> i64 {
        match self {
            Self::Admin { id, .. } | Self::User { id, .. } => *id,
        }
    }

    /// Login email, whichever kind the actor is.
    pub fn email(&self) -> &str {
        match self {
            Self::Admin { email, .. } | Self::User { email, .. } => email.as_str(),
        }
    }

    /// True for any back-office admin.
    pub fn is_admin(&self) -> bool {
        match self {
            Self::Admin { .. } => true,
            Self::User { .. } => false,
        }
    }

    /// True only for super admins.
    pub fn is_super_admin(&self) -> bool {
        match self {
            Self::Admin { role, .. } => *role == AdminRole::SuperAdmin,
            Self::User { .. } => false,
        }
    }

    /// True for sales staff users.
    pub fn is_user(&self) -> bool {
        match self {
            Self::Admin { .. } => false,
            Self::User { .. } => true,
        }
    }

    /// Admin role when the actor is an admin.
    pub fn admin_role(&self) -> Option<AdminRole> {
        match self {
            Self::Admin { role, .. } => Some(*role),
            Self::User { .. } => None,
        }
    }

    /// Role string shown in the console: the admin role, or the fixed
    /// staff tag.
    pub fn role_label(&self) -> &'static str {
        match self {
            Self::Admin { role, .. } => role.as_str(),
            Self::User { .. } => STAFF_ROLE_LABEL,
        }
    }

    /// Display name: admins go by email, staff users by full name.
    pub fn display_name(&self) -> String {
        match self {
            Self::Admin { email, .. } => email.clone(),
            Self::User {
                first_name,
                last_name,
                ..
            } => format!("{first_name} {last_name}"),
        }
    }

    /// Rep name used when substituting the staff user's own identity for
    /// filters an admin would pick by hand.
    pub fn rep_name(&self) -> Option<String> {
        match self {
            Self::Admin { .. } => None,
            Self::User {
                first_name,
                last_name,
                ..
            } => Some(format!("{first_name} {last_name}")),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn admin(role: AdminRole) -> Actor {
        Actor::Admin {
            id: 1,
            email: "a@x.com".to_owned(),
            role,
        }
    }

    fn staff() -> Actor {
        Actor::User {
            id: 7,
            email: "ben@x.com".to_owned(),
            first_name: "Ben".to_owned(),
            last_name: "Okafor".to_owned(),
            department: "SALES".to_owned(),
        }
    }

    #[rstest]
    fn admin_wire_shape_round_trips() {
        let json = r#"{"type":"ADMIN","id":1,"email":"a@x.com","role":"ADMIN"}"#;
        let actor: Actor = serde_json::from_str(json).expect("admin should decode");
        assert_eq!(actor, admin(AdminRole::Admin));

        let encoded = serde_json::to_value(&actor).expect("admin should encode");
        assert_eq!(encoded["type"], "ADMIN");
        assert_eq!(encoded["role"], "ADMIN");
    }

    #[rstest]
    fn staff_wire_shape_round_trips() {
        let json = r#"{
            "type": "USER",
            "id": 7,
            "email": "ben@x.com",
            "firstName": "Ben",
            "lastName": "Okafor",
            "department": "SALES"
        }"#;
        let actor: Actor = serde_json::from_str(json).expect("user should decode");
        assert_eq!(actor, staff());

        let encoded = serde_json::to_value(&actor).expect("user should encode");
        assert_eq!(encoded["firstName"], "Ben");
    }

    #[rstest]
    #[case(admin(AdminRole::Admin), true, false, false, "ADMIN")]
    #[case(admin(AdminRole::SuperAdmin), true, true, false, "SUPER_ADMIN")]
    #[case(staff(), false, false, true, "USER")]
    fn role_projections_follow_the_tag(
        #[case] actor: Actor,
        #[case] is_admin: bool,
        #[case] is_super_admin: bool,
        #[case] is_user: bool,
        #[case] label: &str,
    ) {
        assert_eq!(actor.is_admin(), is_admin);
        assert_eq!(actor.is_super_admin(), is_super_admin);
        assert_eq!(actor.is_user(), is_user);
        assert_eq!(actor.role_label(), label);
    }

    #[rstest]
    fn staff_rep_name_joins_first_and_last() {
        assert_eq!(staff().rep_name().as_deref(), Some("Ben Okafor"));
        assert_eq!(admin(AdminRole::Admin).rep_name(), None);
    }
}
