//! Authenticity checks for the confirmation redirect.
//!
//! Three checks run in a fixed order and stop at the first failure:
//!
//! 1. the echoed `state` matches the nonce the app issued
//! 2. `shop` is a `*.myshopify.com` hostname
//! 3. `hmac` matches the signature computed with the app's secret
//!
//! # Example
//!
//! ```rust
//! use shopify_admin::{ApiKey, ApiSecretKey, Credentials};
//! use shopify_admin::auth::oauth::{ConfirmationRedirect, SecurityChecks};
//!
//! let credentials = Credentials::new(
//!     ApiKey::new("key").unwrap(),
//!     ApiSecretKey::new("hush").unwrap(),
//! );
//! let redirect = ConfirmationRedirect::new(
//!     "0907a61c0c8d55e99db179b68161bc00",
//!     "some-shop.myshopify.com",
//!     None,
//!     "1337178173",
//!     "4712bf92ffc2917d15a2f5a273e39f0116667419aa4b6ac0b3baaf26fa3c4d20",
//! );
//!
//! let result = SecurityChecks::new().check_authorization_code(&redirect, &credentials, None);
//! assert!(result.passed());
//! ```

use crate::auth::oauth::hmac::{compute_signature, constant_time_compare};
use crate::auth::oauth::ConfirmationRedirect;
use crate::auth::Credentials;
use thiserror::Error;

const SHOP_SUFFIX: &str = ".myshopify.com";

/// How an absent nonce is treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NonceMatching {
    /// An absent `state` matches an absent expected nonce.
    ///
    /// Suits integrations that never send a nonce, at the cost of CSRF
    /// protection when an attacker strips `state` from a redirect whose
    /// nonce the caller forgot to supply.
    #[default]
    Lenient,

    /// A nonce must be expected and echoed back identically.
    Strict,
}

/// The check that rejected a confirmation redirect.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SecurityCheckFailure {
    /// The echoed `state` differs from the expected nonce.
    #[error("nonce mismatch: expected {expected:?}, received {received:?}")]
    NonceMismatch {
        /// The nonce the caller expected.
        expected: Option<String>,
        /// The `state` carried by the redirect.
        received: Option<String>,
    },

    /// `shop` is not a `*.myshopify.com` hostname.
    #[error("invalid shop hostname '{hostname}'")]
    InvalidHostname {
        /// The rejected hostname.
        hostname: String,
    },

    /// The signature does not match.
    #[error("invalid HMAC: expected '{expected}', received '{received}'")]
    InvalidHmac {
        /// The signature computed with the app's secret.
        expected: String,
        /// The `hmac` carried by the redirect.
        received: String,
    },
}

/// Aggregate outcome of [`SecurityChecks::check_authorization_code`].
///
/// Retains the first failure, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecurityCheckResult {
    failure: Option<SecurityCheckFailure>,
}

impl SecurityCheckResult {
    const fn pass() -> Self {
        Self { failure: None }
    }

    const fn fail(failure: SecurityCheckFailure) -> Self {
        Self {
            failure: Some(failure),
        }
    }

    /// Returns `true` if every check passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.failure.is_none()
    }

    /// Returns the failing check, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<&SecurityCheckFailure> {
        self.failure.as_ref()
    }

    /// Converts into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns the retained failure if a check failed.
    pub fn into_result(self) -> Result<(), SecurityCheckFailure> {
        self.failure.map_or(Ok(()), Err)
    }
}

/// Stateless validator for confirmation redirects.
///
/// The only setting is the [`NonceMatching`] mode; the default is
/// [`NonceMatching::Lenient`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SecurityChecks {
    nonce_matching: NonceMatching,
}

impl SecurityChecks {
    /// Creates checks with lenient nonce matching.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nonce_matching: NonceMatching::Lenient,
        }
    }

    /// Creates checks that require a nonce on both sides.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            nonce_matching: NonceMatching::Strict,
        }
    }

    /// Sets the nonce matching mode.
    #[must_use]
    pub const fn with_nonce_matching(mut self, mode: NonceMatching) -> Self {
        self.nonce_matching = mode;
        self
    }

    /// Returns the nonce matching mode.
    #[must_use]
    pub const fn nonce_matching(&self) -> NonceMatching {
        self.nonce_matching
    }

    /// Compares the redirect's `state` to the expected nonce.
    ///
    /// Empty strings count as absent.
    #[must_use]
    pub fn nonce_is_same(&self, redirect: &ConfirmationRedirect, expected: Option<&str>) -> bool {
        let received = redirect.state.as_deref().filter(|s| !s.is_empty());
        let expected = expected.filter(|s| !s.is_empty());

        match (expected, received) {
            (Some(expected), Some(received)) => constant_time_compare(expected, received),
            (None, None) => self.nonce_matching == NonceMatching::Lenient,
            _ => false,
        }
    }

    /// Returns `true` iff `hostname` matches `^[A-Za-z0-9-.]+\.myshopify\.com$`.
    #[must_use]
    pub fn hostname_is_valid(hostname: &str) -> bool {
        let split = hostname.len().checked_sub(SHOP_SUFFIX.len());
        let Some((name, suffix)) = split
            .filter(|&i| hostname.is_char_boundary(i))
            .map(|i| hostname.split_at(i))
        else {
            return false;
        };

        suffix.eq_ignore_ascii_case(SHOP_SUFFIX)
            && !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
    }

    /// Computes the signature Shopify should have sent for `redirect`.
    #[must_use]
    pub fn generate_hmac(redirect: &ConfirmationRedirect, credentials: &Credentials) -> String {
        compute_signature(
            &redirect.to_signable_string(),
            credentials.api_secret_key().as_ref(),
        )
    }

    /// Returns `true` if the redirect's `hmac` matches, compared in constant time.
    #[must_use]
    pub fn hmac_is_valid(redirect: &ConfirmationRedirect, credentials: &Credentials) -> bool {
        constant_time_compare(&Self::generate_hmac(redirect, credentials), &redirect.hmac)
    }

    /// Runs the nonce, hostname and HMAC checks in order, stopping at the
    /// first failure.
    #[must_use]
    pub fn check_authorization_code(
        &self,
        redirect: &ConfirmationRedirect,
        credentials: &Credentials,
        nonce: Option<&str>,
    ) -> SecurityCheckResult {
        if !self.nonce_is_same(redirect, nonce) {
            tracing::warn!(shop = %redirect.shop, check = "nonce", "Security check failed");
            return SecurityCheckResult::fail(SecurityCheckFailure::NonceMismatch {
                expected: nonce.map(str::to_string),
                received: redirect.state.clone(),
            });
        }

        if !Self::hostname_is_valid(&redirect.shop) {
            tracing::warn!(shop = %redirect.shop, check = "hostname", "Security check failed");
            return SecurityCheckResult::fail(SecurityCheckFailure::InvalidHostname {
                hostname: redirect.shop.clone(),
            });
        }

        let expected = Self::generate_hmac(redirect, credentials);
        if !constant_time_compare(&expected, &redirect.hmac) {
            tracing::warn!(shop = %redirect.shop, check = "hmac", "Security check failed");
            return SecurityCheckResult::fail(SecurityCheckFailure::InvalidHmac {
                expected,
                received: redirect.hmac.clone(),
            });
        }

        SecurityCheckResult::pass()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiKey, ApiSecretKey};

    fn credentials() -> Credentials {
        Credentials::new(ApiKey::new("key").unwrap(), ApiSecretKey::new("hush").unwrap())
    }

    fn redirect_with_state(state: Option<&str>) -> ConfirmationRedirect {
        ConfirmationRedirect::new(
            "code",
            "foo.myshopify.com",
            state.map(str::to_string),
            "1",
            "",
        )
    }

    #[test]
    fn test_nonce_matching_in_lenient_mode() {
        let checks = SecurityChecks::new();

        assert!(checks.nonce_is_same(&redirect_with_state(Some("foo")), Some("foo")));
        assert!(checks.nonce_is_same(&redirect_with_state(None), None));
        assert!(checks.nonce_is_same(&redirect_with_state(None), Some("")));
        assert!(!checks.nonce_is_same(&redirect_with_state(Some("foo")), None));
        assert!(!checks.nonce_is_same(&redirect_with_state(None), Some("foo")));
        assert!(!checks.nonce_is_same(&redirect_with_state(Some("foo")), Some("bar")));
    }

    #[test]
    fn test_strict_mode_rejects_absent_nonce() {
        let checks = SecurityChecks::strict();

        assert!(checks.nonce_is_same(&redirect_with_state(Some("foo")), Some("foo")));
        assert!(!checks.nonce_is_same(&redirect_with_state(None), None));
        assert_eq!(
            SecurityChecks::new()
                .with_nonce_matching(NonceMatching::Strict)
                .nonce_matching(),
            NonceMatching::Strict
        );
    }

    #[test]
    fn test_hostname_validation() {
        assert!(SecurityChecks::hostname_is_valid("foo.bar-3.myshopify.com"));
        assert!(SecurityChecks::hostname_is_valid("Some-Shop.MyShopify.com"));
        assert!(!SecurityChecks::hostname_is_valid("foo:bar.myshopify.com"));
        assert!(!SecurityChecks::hostname_is_valid("foo.myshopify.co.uk"));
        assert!(!SecurityChecks::hostname_is_valid(".myshopify.com"));
        assert!(!SecurityChecks::hostname_is_valid("myshopify.com"));
        assert!(!SecurityChecks::hostname_is_valid("foo.myshopify.com.evil.com"));
        assert!(!SecurityChecks::hostname_is_valid("foo/bar.myshopify.com"));
        assert!(!SecurityChecks::hostname_is_valid("ä.myshopify.com"));
    }

    #[test]
    fn test_failed_nonce_is_reported_before_hostname() {
        let redirect = ConfirmationRedirect::new("c", "evil.example.com", Some("x".into()), "1", "h");
        let result = SecurityChecks::new().check_authorization_code(&redirect, &credentials(), Some("y"));

        assert!(!result.passed());
        assert_eq!(
            result.failure(),
            Some(&SecurityCheckFailure::NonceMismatch {
                expected: Some("y".to_string()),
                received: Some("x".to_string()),
            })
        );
    }

    #[test]
    fn test_failed_hostname_is_reported_before_hmac() {
        let redirect = ConfirmationRedirect::new("c", "evil.example.com", None, "1", "bad");
        let result = SecurityChecks::new().check_authorization_code(&redirect, &credentials(), None);

        assert!(matches!(
            result.into_result(),
            Err(SecurityCheckFailure::InvalidHostname { hostname }) if hostname == "evil.example.com"
        ));
    }

    #[test]
    fn test_invalid_hmac_carries_expected_and_received() {
        let redirect = ConfirmationRedirect::new("c", "foo.myshopify.com", None, "1", "bad");
        let result = SecurityChecks::new().check_authorization_code(&redirect, &credentials(), None);

        match result.into_result() {
            Err(SecurityCheckFailure::InvalidHmac { expected, received }) => {
                assert_eq!(expected, SecurityChecks::generate_hmac(&redirect, &credentials()));
                assert_eq!(received, "bad");
            }
            other => panic!("Expected InvalidHmac, got {other:?}"),
        }
    }

    #[test]
    fn test_all_checks_pass_with_signed_redirect() {
        let mut redirect =
            ConfirmationRedirect::new("c", "foo.myshopify.com", Some("n".into()), "1", "");
        redirect.hmac = SecurityChecks::generate_hmac(&redirect, &credentials());

        assert!(SecurityChecks::hmac_is_valid(&redirect, &credentials()));
        let result = SecurityChecks::strict().check_authorization_code(&redirect, &credentials(), Some("n"));
        assert!(result.passed());
        assert!(result.into_result().is_ok());
    }
}
