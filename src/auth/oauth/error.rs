//! OAuth error types.
//!
//! # Example
//!
//! ```rust
//! use shopify_admin::auth::oauth::{OAuthError, SecurityCheckFailure};
//!
//! let error = OAuthError::SecurityCheckFailed(SecurityCheckFailure::NonceMismatch {
//!     expected: Some("abc123".to_string()),
//!     received: Some("xyz789".to_string()),
//! });
//! assert!(error.to_string().contains("abc123"));
//! ```

use crate::auth::oauth::SecurityCheckFailure;
use crate::clients::HttpError;
use thiserror::Error;

/// Errors that can occur during the OAuth installation flow.
///
/// Usage errors ([`MissingRequiredParameter`](Self::MissingRequiredParameter))
/// and security failures ([`SecurityCheckFailed`](Self::SecurityCheckFailed))
/// are raised before any network call. Everything else comes from the token
/// exchange itself.
///
/// # Example
///
/// ```rust
/// use shopify_admin::auth::oauth::OAuthError;
///
/// fn handle_oauth_error(err: OAuthError) {
///     match err {
///         OAuthError::SecurityCheckFailed(failure) => {
///             eprintln!("Rejected redirect: {failure}");
///         }
///         OAuthError::TokenExchangeFailed { status, message } => {
///             eprintln!("Token exchange failed ({status}): {message}");
///         }
///         other => eprintln!("OAuth error: {other}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum OAuthError {
    /// A required builder parameter was never set.
    #[error("Missing required parameter: {parameter}")]
    MissingRequiredParameter {
        /// Name of the missing parameter (e.g. `redirect_uri`).
        parameter: &'static str,
    },

    /// The confirmation redirect failed a security check.
    ///
    /// Carries the first failing check; later checks were not run.
    #[error("Security check failed: {0}")]
    SecurityCheckFailed(SecurityCheckFailure),

    /// The confirmation redirect is missing a required query parameter.
    #[error("Invalid callback: {reason}")]
    InvalidCallback {
        /// Description of what's invalid about the callback.
        reason: String,
    },

    /// The token endpoint answered with a non-success status.
    #[error("Token exchange failed with status {status}: {message}")]
    TokenExchangeFailed {
        /// The HTTP status code returned.
        status: u16,
        /// The response body.
        message: String,
    },

    /// The token response lacks a field the grant type requires.
    #[error("Token response is missing expected attribute '{attribute}'")]
    MissingExpectedAttribute {
        /// Name of the missing attribute.
        attribute: String,
    },

    /// The exchange was cancelled before it completed.
    #[error("Token exchange was cancelled")]
    Cancelled,

    /// Transport failure.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl From<SecurityCheckFailure> for OAuthError {
    fn from(failure: SecurityCheckFailure) -> Self {
        Self::SecurityCheckFailed(failure)
    }
}

// Verify OAuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OAuthError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{HttpResponseError, InvalidHttpRequestError};

    #[test]
    fn test_missing_parameter_names_parameter() {
        let error = OAuthError::MissingRequiredParameter {
            parameter: "redirect_uri",
        };
        assert_eq!(error.to_string(), "Missing required parameter: redirect_uri");
    }

    #[test]
    fn test_security_failure_formats_both_values() {
        let error: OAuthError = SecurityCheckFailure::InvalidHmac {
            expected: "aaa".to_string(),
            received: "bbb".to_string(),
        }
        .into();

        let message = error.to_string();
        assert!(message.starts_with("Security check failed"));
        assert!(message.contains("aaa"));
        assert!(message.contains("bbb"));
    }

    #[test]
    fn test_token_exchange_failed_includes_status_and_message() {
        let error = OAuthError::TokenExchangeFailed {
            status: 400,
            message: "authorization code was not found or was already used".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("400"));
        assert!(message.contains("already used"));
    }

    #[test]
    fn test_missing_attribute_names_attribute() {
        let error = OAuthError::MissingExpectedAttribute {
            attribute: "associated_user_scope".to_string(),
        };
        assert!(error.to_string().contains("'associated_user_scope'"));
    }

    #[test]
    fn test_from_http_error_conversion() {
        let http_error = HttpError::Response(HttpResponseError {
            code: 500,
            message: "Internal server error".to_string(),
            error_reference: None,
        });
        let oauth_error: OAuthError = http_error.into();
        assert!(matches!(oauth_error, OAuthError::Http(HttpError::Response(_))));

        let oauth_error: OAuthError =
            HttpError::InvalidRequest(InvalidHttpRequestError::ZeroTries).into();
        assert!(matches!(
            oauth_error,
            OAuthError::Http(HttpError::InvalidRequest(_))
        ));
    }
}
