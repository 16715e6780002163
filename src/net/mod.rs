//! Network helpers: the JSON request client and the logout flow.

pub mod request;
pub mod session;

pub use request::{FailureKind, RequestClient, RequestError, RequestOptions};
pub use session::{LogoutOutcome, SessionTerminator};
