//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod navigator;
mod session_store;
mod transport;

pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use navigator::{Navigator, RecordingNavigator};
#[cfg(test)]
pub use session_store::MockSessionStore;
pub use session_store::{InMemorySessionStore, SessionStore, SessionStoreError};
#[cfg(test)]
pub use transport::MockApiTransport;
pub use transport::{
    ApiRequest, ApiResponse, ApiTransport, FileUpload, Method, RequestBody, StaticTransport,
    TransportError,
};
