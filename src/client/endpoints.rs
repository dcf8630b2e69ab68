//! Named backend operations and navigable URL helpers.

use tracing::debug;

use crate::error::Result;
use crate::protocol::{
    LoginResponse, PROVIDER_QUERY_PARAM, Provider, RequestOptions, SessionInfo,
    TAB_ID_QUERY_PARAM,
};
use crate::transport::Transport;

use super::core::{SecureClient, form_options};

// ============================================================================
// Paths
// ============================================================================

/// Lists configured OIDC providers.
pub const PROVIDERS_PATH: &str = "api/providers";

/// Reports the current session.
pub const SESSION_PATH: &str = "api/session";

/// Credential login.
pub const LOGIN_PATH: &str = "api/login";

/// Logout, navigated by the browser.
pub const LOGOUT_PATH: &str = "portal/logout";

/// OIDC login start, navigated by the browser.
pub const OIDC_LOGIN_PATH: &str = "portal/oidc/login";

// ============================================================================
// SecureClient - Endpoints
// ============================================================================

impl<T: Transport> SecureClient<T> {
    /// Fetches the configured OIDC providers.
    ///
    /// # Errors
    ///
    /// See [`SecureClient::send`].
    pub async fn fetch_providers(&self) -> Result<Vec<Provider>> {
        let providers: Vec<Provider> = self
            .request_json(PROVIDERS_PATH, RequestOptions::get())
            .await?;
        debug!(count = providers.len(), "Fetched providers");
        Ok(providers)
    }

    /// Fetches the session bound to this tab.
    ///
    /// # Errors
    ///
    /// See [`SecureClient::send`].
    pub async fn fetch_session(&self) -> Result<SessionInfo> {
        self.request_object(SESSION_PATH, RequestOptions::get()).await
    }

    /// Logs in with local credentials.
    ///
    /// Sends a form-encoded POST; the password is never logged.
    ///
    /// # Errors
    ///
    /// A rejected login is [`Error::Http`](crate::Error::Http) carrying the
    /// backend's message. See [`SecureClient::send`] for the rest.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        debug!(username = %username, tab_id = %self.tab_id(), "Logging in");

        let options = form_options([("username", username), ("password", password)]);
        self.request_object(LOGIN_PATH, options).await
    }
}

// ============================================================================
// SecureClient - Navigable URLs
// ============================================================================

impl<T: Transport> SecureClient<T> {
    /// Returns `portal/logout?tabId=<id>`, relative to the application root.
    ///
    /// Nothing is fetched.
    #[must_use]
    pub fn logout_url(&self) -> String {
        format!(
            "{LOGOUT_PATH}?{TAB_ID_QUERY_PARAM}={}",
            urlencoding::encode(self.tab_id().as_str())
        )
    }

    /// Returns `portal/oidc/login?provider=<provider>&tabId=<id>`.
    ///
    /// `provider` is query-encoded but not validated; pass only names taken
    /// from [`fetch_providers`](Self::fetch_providers) or another trusted
    /// list. Nothing is fetched.
    #[must_use]
    pub fn oidc_login_url(&self, provider: &str) -> String {
        format!(
            "{OIDC_LOGIN_PATH}?{PROVIDER_QUERY_PARAM}={}&{TAB_ID_QUERY_PARAM}={}",
            urlencoding::encode(provider),
            urlencoding::encode(self.tab_id().as_str())
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
