//! End-to-end session lifecycle over scripted transports: login persistence,
//! forced logout on a stray 401, and idempotent logout.

use std::sync::Arc;

use rstest::rstest;
use serde_json::json;

use console::domain::ports::{
    InMemorySessionStore, RecordingNavigator, SessionStore as _, StaticTransport,
};
use console::domain::Route;
use console::inbound::cli::commands::{Command, CustomersCommand};
use console::inbound::cli::App;

fn scripted_app(
    store: Arc<InMemorySessionStore>,
) -> (App, Arc<StaticTransport>, Arc<RecordingNavigator>) {
    let transport = Arc::new(StaticTransport::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let app = App::assemble(transport.clone(), store, navigator.clone())
        .expect("assemble app");
    (app, transport, navigator)
}

#[rstest]
#[tokio::test]
async fn a_login_survives_a_simulated_reload() {
    let store = Arc::new(InMemorySessionStore::new());
    let (app, transport, _) = scripted_app(store.clone());
    transport.plan_json(
        200,
        &json!({
            "accessToken": "t1",
            "actor": { "type": "ADMIN", "id": 1, "email": "a@x.com", "role": "ADMIN" }
        }),
    );

    let ok = app
        .run(Command::Login {
            email: "a@x.com".to_owned(),
            password: "pw".to_owned(),
        })
        .await;
    assert!(ok, "login should succeed");

    // Reload: a fresh app over the same store reconstructs the same actor.
    let (reloaded, _, _) = scripted_app(store);
    let actor = reloaded
        .session()
        .actor()
        .expect("actor survives the reload");
    assert_eq!(actor.email(), "a@x.com");
    assert!(actor.is_admin());
    assert!(!actor.is_super_admin());
}

#[rstest]
#[tokio::test]
async fn a_stray_401_empties_the_store_and_lands_on_login() {
    let store = Arc::new(InMemorySessionStore::new());
    let (app, transport, _) = scripted_app(store.clone());
    transport.plan_json(
        200,
        &json!({
            "accessToken": "t1",
            "actor": { "type": "ADMIN", "id": 1, "email": "a@x.com", "role": "SUPER_ADMIN" }
        }),
    );
    assert!(
        app.run(Command::Login {
            email: "a@x.com".to_owned(),
            password: "pw".to_owned(),
        })
        .await,
    );

    // The next screen's request comes back 401: the server dropped the
    // session.
    let (app, transport, navigator) = scripted_app(store.clone());
    transport.plan_json(401, &json!({ "message": "Token expired" }));

    let ok = app
        .run(Command::Customers(CustomersCommand::List { page: 1, limit: 15 }))
        .await;

    assert!(!ok, "the original rejection stays observable");
    assert_eq!(store.load().expect("load"), None, "store must be empty");
    assert!(!app.session().is_authenticated());
    assert_eq!(navigator.last(), Some(Route::Login));
}

#[rstest]
#[tokio::test]
async fn logout_twice_leaves_the_store_empty_both_times() {
    let store = Arc::new(InMemorySessionStore::new());
    let (app, transport, navigator) = scripted_app(store.clone());
    transport.plan_json(
        200,
        &json!({
            "accessToken": "t1",
            "actor": {
                "type": "USER",
                "id": 7,
                "email": "ben@x.com",
                "firstName": "Ben",
                "lastName": "Okafor",
                "department": "SALES"
            }
        }),
    );
    assert!(
        app.run(Command::Login {
            email: "ben@x.com".to_owned(),
            password: "pw".to_owned(),
        })
        .await,
    );

    assert!(app.run(Command::Logout).await);
    assert_eq!(store.load().expect("load"), None);

    assert!(app.run(Command::Logout).await, "second logout must not fail");
    assert_eq!(store.load().expect("load"), None);
    assert_eq!(navigator.last(), Some(Route::Login));
}
