//! Driving port for the unified login use-case.
//!
//! The resolver authenticates through this port without knowing the backing
//! transport, which keeps its tests deterministic: a test double stands in
//! for the login endpoint. The server decides admin versus staff identity
//! from the credentials alone; there is no per-kind endpoint probing.

use async_trait::async_trait;

use crate::domain::{Actor, AdminRole, Error, LoginCredentials, SessionSnapshot, SessionToken};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Exchange credentials for a token/actor pair.
    async fn login(&self, credentials: &LoginCredentials) -> Result<SessionSnapshot, Error>;
}

/// In-memory authenticator used by tests and offline demos.
///
/// `ops@ops360.example` / `password` authenticates as a fixed admin.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn login(&self, credentials: &LoginCredentials) -> Result<SessionSnapshot, Error> {
        if credentials.email() == "ops@ops360.example" && credentials.password() == "password" {
            let token = SessionToken::new("fixture-token")
                .map_err(|err| Error::internal(format!("invalid fixture token: {err}")))?;
            Ok(SessionSnapshot::new(
                token,
                Actor::Admin {
                    id: 1,
                    email: "ops@ops360.example".to_owned(),
                    role: AdminRole::Admin,
                },
            ))
        } else {
            Err(Error::unauthorized("Invalid login credentials"))
        }
    }
}
