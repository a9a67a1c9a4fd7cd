//! Behavioural coverage for the route guards.

use std::sync::Arc;

use rstest::rstest;
use rstest_bdd_macros::{given, then, when};

use console::domain::ports::InMemorySessionStore;
use console::domain::{
    Actor, AdminRole, GuardOutcome, LANDING, Route, SessionContext, SessionSnapshot,
    SessionToken, evaluate_access,
};

#[given("an empty session store")]
fn empty_session() -> SessionContext {
    SessionContext::initialise(Arc::new(InMemorySessionStore::new()))
        .expect("empty store initialises")
}

#[given("a signed-in plain admin")]
fn plain_admin_session() -> SessionContext {
    let snapshot = SessionSnapshot::new(
        SessionToken::new("t1").expect("fixture token"),
        Actor::Admin {
            id: 1,
            email: "a@x.com".to_owned(),
            role: AdminRole::Admin,
        },
    );
    SessionContext::initialise(Arc::new(InMemorySessionStore::seeded(snapshot)))
        .expect("seeded store initialises")
}

#[when("navigation to a super-admin screen runs")]
fn navigate_super_admin_screen(session: SessionContext) -> (SessionContext, GuardOutcome) {
    let outcome = evaluate_access(Route::Admins.access(), &session);
    (session, outcome)
}

#[when("navigation to an authenticated screen runs")]
fn navigate_authenticated_screen(session: SessionContext) -> (SessionContext, GuardOutcome) {
    let outcome = evaluate_access(Route::Meetings.access(), &session);
    (session, outcome)
}

#[then("the console redirects to the login screen")]
fn redirected_to_login(outcome: GuardOutcome) {
    assert_eq!(outcome, GuardOutcome::Redirect(Route::Login));
}

#[then("the console redirects to the landing screen")]
fn redirected_to_landing(outcome: GuardOutcome) {
    assert_eq!(outcome, GuardOutcome::Redirect(LANDING));
}

#[rstest]
fn unauthenticated_navigation_never_renders() {
    let session = empty_session();
    let (_, outcome) = navigate_authenticated_screen(session);
    redirected_to_login(outcome);
}

#[rstest]
fn unauthenticated_navigation_to_gated_screens_also_lands_on_login() {
    let session = empty_session();
    let (_, outcome) = navigate_super_admin_screen(session);
    redirected_to_login(outcome);
}

#[rstest]
fn an_under_privileged_admin_keeps_its_session_on_a_role_redirect() {
    let session = plain_admin_session();
    let (session, outcome) = navigate_super_admin_screen(session);
    redirected_to_landing(outcome);
    assert!(
        session.is_authenticated(),
        "a role failure must not clear the session",
    );
}

#[rstest]
fn an_admin_still_renders_ordinary_authenticated_screens() {
    let session = plain_admin_session();
    let (_, outcome) = navigate_authenticated_screen(session);
    assert_eq!(outcome, GuardOutcome::Render);
}
