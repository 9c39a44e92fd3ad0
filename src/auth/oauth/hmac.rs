//! HMAC-SHA256 primitives for redirect verification.
//!
//! Shopify signs the installation redirect with the app's secret key and
//! sends the lowercase hex digest as the `hmac` query parameter.
//!
//! # Example
//!
//! ```rust
//! use shopify_admin::auth::oauth::hmac::{compute_signature, constant_time_compare};
//!
//! let message = "code=0907a61c0c8d55e99db179b68161bc00&shop=some-shop.myshopify.com&timestamp=1337178173";
//! let signature = compute_signature(message, "hush");
//! assert!(constant_time_compare(
//!     &signature,
//!     "4712bf92ffc2917d15a2f5a273e39f0116667419aa4b6ac0b3baaf26fa3c4d20",
//! ));
//! ```

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Computes the HMAC-SHA256 of `message` keyed by `secret`.
///
/// Returns a 64-character lowercase hex string.
///
/// # Note
///
/// This function uses `expect()` internally but this will never panic because
/// HMAC-SHA256 accepts keys of any length.
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_signature(message: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Compares two strings without leaking the position of the first difference.
#[must_use]
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    // ConstantTimeEq handles different lengths securely
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

// Internal hex encoding since we don't want to add another dependency
mod hex {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        let bytes = bytes.as_ref();
        let mut result = String::with_capacity(bytes.len() * 2);
        for &byte in bytes {
            result.push(HEX_CHARS[(byte >> 4) as usize] as char);
            result.push(HEX_CHARS[(byte & 0x0f) as usize] as char);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_signature_matches_known_value() {
        // HMAC-SHA256("message", "key")
        assert_eq!(
            compute_signature("message", "key"),
            "6e9ef29b75fffc5b7abae527d58fdadb2fe42e7219011976917343065f58ed4a"
        );
    }

    #[test]
    fn test_compute_signature_is_lowercase_hex() {
        let sig = compute_signature("", "secret");
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_compute_signature_depends_on_key() {
        assert_ne!(
            compute_signature("same message", "key-a"),
            compute_signature("same message", "key-b")
        );
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("abc123", "abc123"));
        assert!(constant_time_compare("", ""));
        assert!(!constant_time_compare("abc123", "abc124"));
        assert!(!constant_time_compare("abc", "abcd"));
        assert!(!constant_time_compare("ABC", "abc"));
    }

    #[test]
    fn test_hex_encoding() {
        assert_eq!(hex::encode([0x00, 0xff, 0xab, 0xcd]), "00ffabcd");
        assert_eq!(hex::encode([]), "");
    }
}
