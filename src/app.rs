//! Page-level façade.
//!
//! [`SindicUi`] owns one instance of every component, all bound to the same
//! [`Document`], and routes page events to them. Hosts call
//! [`on_ready`](SindicUi::on_ready) once the page is loaded and forward every
//! document click to [`handle_click`](SindicUi::handle_click).

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::UiConfig;
use crate::dom::Document;
use crate::net::{LogoutOutcome, RequestClient, RequestError, SessionTerminator};
use crate::notify::{NotificationId, NotificationManager, schedule_flash_expiry};
use crate::panels::{MobileMenuIds, VisibilityController};

/// What a routed click did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickEffects {
    /// Toast dismissed through its close button.
    pub dismissed: Option<NotificationId>,
    /// Dropdowns closed by the outside-click rule.
    pub closed_dropdowns: Vec<String>,
}

#[derive(Clone)]
pub struct SindicUi {
    document: Document,
    config: UiConfig,
    notifications: NotificationManager,
    panels: VisibilityController,
    client: RequestClient,
    session: SessionTerminator,
}

impl SindicUi {
    /// # Errors
    ///
    /// Fails if the request client cannot be built from `config`.
    pub fn new(document: Document, config: UiConfig) -> Result<Self, RequestError> {
        let notifications = NotificationManager::new(document.clone(), config.toast_timing);
        let panels = VisibilityController::new(document.clone());
        let client = RequestClient::new(&config, notifications.clone())?;
        let session = SessionTerminator::new(client.clone(), document.clone(), &config);
        Ok(Self { document, config, notifications, panels, client, session })
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    #[must_use]
    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    #[must_use]
    pub fn panels(&self) -> &VisibilityController {
        &self.panels
    }

    #[must_use]
    pub fn client(&self) -> &RequestClient {
        &self.client
    }

    /// Page-loaded hook: bind dropdowns and the mobile menu, then start the
    /// expiry timers of server-rendered flash messages.
    pub fn on_ready(&self) -> Vec<JoinHandle<()>> {
        let dropdowns = self.panels.bind_dropdowns();
        let menu = self.panels.bind_mobile_menu(MobileMenuIds::default());
        let flashes = schedule_flash_expiry(&self.document, self.config.toast_timing);
        debug!(dropdowns, mobile_menu = menu.is_applied(), flashes = flashes.len(), "page ready");
        flashes
    }

    /// Document-level click observer.
    ///
    /// A toast close button is handled first; the click then goes to the
    /// mobile menu and the dropdown outside-click rule.
    pub fn handle_click(&self, target: &str) -> ClickEffects {
        let dismissed = self.notifications.handle_close_click(target);
        let closed_dropdowns = self.panels.handle_click(target);
        ClickEffects { dismissed, closed_dropdowns }
    }

    /// End the session. See [`SessionTerminator::logout`].
    pub async fn logout(&self) -> LogoutOutcome {
        self.session.logout().await
    }
}
