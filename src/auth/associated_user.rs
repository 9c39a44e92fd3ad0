//! The staff member behind an online access token.

use serde::{Deserialize, Serialize};

/// The Shopify staff account that approved an online (per-user) grant.
///
/// Shopify returns this object as `associated_user` in the token-exchange
/// response. Fields beyond the core identity are optional because older API
/// versions omit them.
///
/// # Example
///
/// ```rust
/// use shopify_admin::AssociatedUser;
///
/// let user: AssociatedUser = serde_json::from_str(r#"{
///     "id": 902541635,
///     "first_name": "John",
///     "last_name": "Smith",
///     "email": "john@example.com",
///     "account_owner": true
/// }"#).unwrap();
///
/// assert_eq!(user.id, 902541635);
/// assert!(user.account_owner);
/// assert_eq!(user.locale, None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociatedUser {
    /// The Shopify user ID.
    pub id: u64,

    /// The user's first name.
    pub first_name: String,

    /// The user's last name.
    pub last_name: String,

    /// The user's email address.
    pub email: String,

    /// Whether the user owns the shop account.
    pub account_owner: bool,

    /// Whether the user's email has been verified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,

    /// The user's locale (e.g. `en`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    /// Whether the user is a collaborator account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collaborator: Option<bool>,
}

// Verify AssociatedUser is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AssociatedUser>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_full_payload() {
        let json = r#"{
            "id": 67890,
            "first_name": "Jane",
            "last_name": "Doe",
            "email": "jane@example.com",
            "email_verified": true,
            "account_owner": false,
            "locale": "fr",
            "collaborator": true
        }"#;

        let user: AssociatedUser = serde_json::from_str(json).unwrap();

        assert_eq!(user.id, 67890);
        assert_eq!(user.first_name, "Jane");
        assert_eq!(user.last_name, "Doe");
        assert_eq!(user.email, "jane@example.com");
        assert!(!user.account_owner);
        assert_eq!(user.email_verified, Some(true));
        assert_eq!(user.locale.as_deref(), Some("fr"));
        assert_eq!(user.collaborator, Some(true));
    }

    #[test]
    fn test_rejects_payload_without_identity_fields() {
        let json = r#"{"first_name": "Jane", "last_name": "Doe"}"#;
        assert!(serde_json::from_str::<AssociatedUser>(json).is_err());
    }

    #[test]
    fn test_serialization_omits_absent_optional_fields() {
        let user = AssociatedUser {
            id: 1,
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            email: "a@b.c".to_string(),
            account_owner: true,
            email_verified: None,
            locale: None,
            collaborator: None,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("locale").is_none());
        assert_eq!(json["account_owner"], true);
    }
}
