//! Endpoint paths for the Ops360 REST API.
//!
//! Paths are relative; the transport joins them onto the configured origin.
//! The auth-exempt predicate decides which endpoints escape the global
//! authentication-failure interception: a 401 from these is a normal,
//! locally handled outcome (bad credentials, expired invite), not a dead
//! session.

/// Unified login endpoint.
pub const LOGIN: &str = "/auth/login";
/// Password-reset request endpoint.
pub const REQUEST_PASSWORD_RESET: &str = "/auth/request-password-reset";
/// Password-reset completion endpoint.
pub const RESET_PASSWORD: &str = "/auth/reset-password";
/// Admin invite-acceptance endpoint; used before a session exists.
pub const ACCEPT_INVITE: &str = "/admins/accept-invite";

/// Meetings list.
pub const MEETINGS: &str = "/meetings";
/// Weekly meeting report upload.
pub const UPLOAD_MEETINGS: &str = "/upload/meetings";
/// Pipeline spreadsheet upload.
pub const UPLOAD_PIPELINE: &str = "/upload/pipeline";
/// Pipeline overview (stage totals and summary).
pub const PIPELINE: &str = "/pipeline";
/// Deal stage reference data.
pub const PIPELINE_STAGES: &str = "/pipeline/stages";
/// Opportunity collection.
pub const PIPELINE_DEALS: &str = "/pipeline/deals";
/// Staff user collection.
pub const USERS: &str = "/users";
/// Customer collection.
pub const CUSTOMERS: &str = "/customers";
/// Admin collection.
pub const ADMINS: &str = "/admins";
/// Admin invite endpoint.
pub const ADMINS_INVITE: &str = "/admins/invite";
/// Audit log collection.
pub const AUDIT_LOGS: &str = "/audit-logs";
/// Available-months filter source.
pub const FILTER_MONTHS: &str = "/filters/months";
/// Available-weeks filter source.
pub const FILTER_WEEKS: &str = "/filters/weeks";
/// Available-quarters filter source.
pub const FILTER_QUARTERS: &str = "/filters/quarters";
/// Calendar months reference data.
pub const CALENDAR_MONTHS: &str = "/calendar/months";
/// Calendar weeks reference data.
pub const CALENDAR_WEEKS: &str = "/calendar/weeks";

/// KPI snapshot for one rep.
pub fn kpi(rep_name: &str) -> String {
    format!("/kpi/{}", encode_segment(rep_name))
}

/// One staff user.
pub fn user(id: i64) -> String {
    format!("{USERS}/{id}")
}

/// One customer.
pub fn customer(id: i64) -> String {
    format!("{CUSTOMERS}/{id}")
}

/// A customer's contact collection.
pub fn customer_contacts(customer_id: i64) -> String {
    format!("{CUSTOMERS}/{customer_id}/contacts")
}

/// One contact of a customer.
pub fn customer_contact(customer_id: i64, contact_id: i64) -> String {
    format!("{CUSTOMERS}/{customer_id}/contacts/{contact_id}")
}

/// One opportunity, addressed by its external deal id.
pub fn pipeline_deal(external_deal_id: &str) -> String {
    format!("{PIPELINE_DEALS}/{}", encode_segment(external_deal_id))
}

/// One audit log entry.
pub fn audit_log(id: i64) -> String {
    format!("{AUDIT_LOGS}/{id}")
}

/// True when a 401 from this path is handled locally instead of tearing
/// down the session.
pub fn is_auth_exempt(path: &str) -> bool {
    path.starts_with("/auth/") || path == ACCEPT_INVITE
}

/// Percent-encode a single path segment (rep names contain spaces).
fn encode_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
