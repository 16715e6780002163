//! Session termination (logout).
//!
//! DESIGN
//! ======
//! Logout is fail-open on transport errors: if the endpoint cannot be
//! reached, or answers with something that is not JSON, the user is sent to
//! the application root anyway. A well-formed answer with `success: false`
//! is different: the server refused, so the user stays on the page and sees
//! one error toast.
//!
//! This path does not go through the generic request bridge, so a refused
//! logout raises its own message rather than the generic failure toast.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use reqwest::Method;
use serde::Deserialize;
use tracing::{info, warn};

use super::request::{RequestClient, RequestError, RequestOptions, decode};
use crate::config::UiConfig;
use crate::dom::Document;
use crate::notify::Severity;

/// What `logout` ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// The server confirmed; navigated to the root.
    SignedOut,
    /// The request failed at transport level; navigated to the root anyway.
    FailedOpen,
    /// The server answered `success: false`; stayed on the page.
    Refused,
}

#[derive(Debug, Deserialize)]
struct LogoutResponse {
    #[serde(default)]
    success: bool,
}

#[derive(Clone)]
pub struct SessionTerminator {
    client: RequestClient,
    document: Document,
    logout_path: String,
    root_path: String,
    failure_message: String,
}

impl SessionTerminator {
    #[must_use]
    pub fn new(client: RequestClient, document: Document, config: &UiConfig) -> Self {
        Self {
            client,
            document,
            logout_path: config.logout_path.clone(),
            root_path: config.root_path.clone(),
            failure_message: config.logout_failure_message.clone(),
        }
    }

    /// End the session and navigate per the outcome.
    pub async fn logout(&self) -> LogoutOutcome {
        match self.end_session().await {
            Ok(true) => {
                info!("session ended");
                self.document.navigate(&self.root_path);
                LogoutOutcome::SignedOut
            }
            Ok(false) => {
                warn!("logout refused by server");
                self.client.notifications().notify(self.failure_message.clone(), Severity::Error);
                LogoutOutcome::Refused
            }
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "logout request failed, leaving anyway");
                self.document.navigate(&self.root_path);
                LogoutOutcome::FailedOpen
            }
        }
    }

    async fn end_session(&self) -> Result<bool, RequestError> {
        let options = RequestOptions::get().with_method(Method::POST);
        let response = self.client.execute(&self.logout_path, options).await?;
        let body: LogoutResponse = decode(response).await?;
        Ok(body.success)
    }
}
