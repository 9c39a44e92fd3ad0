//! Exchanging the authorization code for an access token.

use crate::auth::oauth::{ConfirmationRedirect, OAuthError, SecurityChecks};
use crate::auth::{AccessToken, Credentials};
use crate::clients::{user_agent, HttpError};
use crate::config::{HostUrl, ShopifyConfig};
use tokio_util::sync::CancellationToken;

/// Completes an installation by validating the confirmation redirect and
/// exchanging its code for an [`AccessToken`].
///
/// Every call is independent; one confirmer can serve concurrent callbacks.
/// No retries are attempted: Shopify refuses a reused code, so a second
/// attempt could only fail.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_admin::auth::oauth::{ConfirmationRedirect, InstallationConfirmer};
///
/// let redirect = ConfirmationRedirect::from_query(&query)?;
/// let confirmer = InstallationConfirmer::new(&config);
/// let token = confirmer
///     .request_access_token(&redirect, config.credentials(), Some(stored_nonce.as_ref()))
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct InstallationConfirmer {
    client: reqwest::Client,
    checks: SecurityChecks,
    api_host: Option<HostUrl>,
    user_agent: String,
}

// Verify InstallationConfirmer is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<InstallationConfirmer>();
};

impl InstallationConfirmer {
    /// Creates a confirmer using the config's `api_host` and user agent prefix.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(config: &ShopifyConfig) -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            checks: SecurityChecks::new(),
            api_host: config.api_host().cloned(),
            user_agent: user_agent(config.user_agent_prefix()),
        }
    }

    /// Replaces the security checks, e.g. with [`SecurityChecks::strict`].
    #[must_use]
    pub const fn with_security_checks(mut self, checks: SecurityChecks) -> Self {
        self.checks = checks;
        self
    }

    /// Returns the security checks in use.
    #[must_use]
    pub const fn security_checks(&self) -> &SecurityChecks {
        &self.checks
    }

    /// Validates `redirect` and exchanges its code for an access token.
    ///
    /// The security checks run first; on failure no request is sent.
    ///
    /// # Errors
    ///
    /// - [`OAuthError::SecurityCheckFailed`]: nonce, hostname or HMAC check failed
    /// - [`OAuthError::TokenExchangeFailed`]: Shopify answered with a non-2xx status
    /// - [`OAuthError::MissingExpectedAttribute`]: the response lacks a required field
    /// - [`OAuthError::Http`]: network failure or undecodable body
    pub async fn request_access_token(
        &self,
        redirect: &ConfirmationRedirect,
        credentials: &Credentials,
        expected_nonce: Option<&str>,
    ) -> Result<AccessToken, OAuthError> {
        self.checks
            .check_authorization_code(redirect, credentials, expected_nonce)
            .into_result()?;

        self.exchange(redirect, credentials).await
    }

    /// Like [`request_access_token`](Self::request_access_token), but gives
    /// up when `cancel` fires.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::Cancelled`] if cancelled before the exchange
    /// completes, otherwise the same errors as `request_access_token`.
    pub async fn request_access_token_with_cancellation(
        &self,
        redirect: &ConfirmationRedirect,
        credentials: &Credentials,
        expected_nonce: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<AccessToken, OAuthError> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(OAuthError::Cancelled),
            result = self.request_access_token(redirect, credentials, expected_nonce) => result,
        }
    }

    async fn exchange(
        &self,
        redirect: &ConfirmationRedirect,
        credentials: &Credentials,
    ) -> Result<AccessToken, OAuthError> {
        let origin = self
            .api_host
            .as_ref()
            .map_or_else(|| format!("https://{}", redirect.shop), |h| h.origin().to_string());
        let token_url = format!("{origin}/admin/oauth/access_token");

        tracing::debug!(shop = %redirect.shop, "Requesting access token");

        let form = reqwest::multipart::Form::new()
            .text("client_id", credentials.api_key().as_ref().to_string())
            .text("client_secret", credentials.api_secret_key().as_ref().to_string())
            .text("code", redirect.code.clone());

        let mut request = self
            .client
            .post(&token_url)
            .header("Accept", "application/json")
            .header("User-Agent", &self.user_agent)
            .multipart(form);
        if self.api_host.is_some() {
            request = request.header("Host", &redirect.shop);
        }

        let response = request.send().await.map_err(HttpError::from)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OAuthError::TokenExchangeFailed {
                status: status.as_u16(),
                message,
            });
        }

        let body: serde_json::Value = response.json().await.map_err(HttpError::from)?;
        AccessToken::from_response(&body)
    }
}
