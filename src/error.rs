//! Configuration error types.
//!
//! Every validated constructor in [`crate::config`] and [`crate::auth`] returns
//! `Result<T, ConfigError>`, so invalid values are rejected where they enter
//! the crate instead of at the first network call.
//!
//! # Example
//!
//! ```rust
//! use shopify_admin::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors raised while building configuration values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide the key issued for your Shopify app.")]
    EmptyApiKey,

    /// API secret key cannot be empty.
    #[error("API secret key cannot be empty. Please provide the secret issued for your Shopify app.")]
    EmptyApiSecretKey,

    /// Shop domain is invalid.
    #[error("Invalid shop domain '{domain}'. Expected 'shop-name' or 'shop-name.myshopify.com'.")]
    InvalidShopDomain {
        /// The rejected domain.
        domain: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected 'YYYY-MM' with a quarterly month (01, 04, 07, 10) or 'unstable'.")]
    InvalidApiVersion {
        /// The rejected version string.
        version: String,
    },

    /// A scope string is invalid.
    #[error("Invalid scopes: {reason}")]
    InvalidScopes {
        /// Why the scopes were rejected.
        reason: String,
    },

    /// A required builder field was never set.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// A URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a URL with a scheme (e.g., 'https://myapp.example.com').")]
    InvalidHostUrl {
        /// The rejected URL.
        url: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key_error_message() {
        let message = ConfigError::EmptyApiKey.to_string();
        assert!(message.contains("API key cannot be empty"));
    }

    #[test]
    fn test_invalid_shop_domain_error_message() {
        let error = ConfigError::InvalidShopDomain {
            domain: "bad domain!".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("bad domain!"));
        assert!(message.contains("myshopify.com"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "api_key" };
        let message = error.to_string();
        assert!(message.contains("api_key"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_invalid_api_version_lists_expected_format() {
        let error = ConfigError::InvalidApiVersion {
            version: "2024-02".to_string(),
        };
        assert!(error.to_string().contains("2024-02"));
        assert!(error.to_string().contains("YYYY-MM"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyApiKey;
        let _: &dyn std::error::Error = &error;
    }
}
