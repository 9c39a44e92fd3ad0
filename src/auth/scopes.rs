//! OAuth scope lists.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An ordered list of OAuth scopes.
///
/// Scopes are appended with [`with_scope`](Self::with_scope), which consumes
/// the value and returns the extended list; clone first to keep the original.
/// Duplicates are kept as added and only collapsed when read through
/// [`requested`](Self::requested) or `Display`, which preserve the order of
/// first appearance.
///
/// # Example
///
/// ```rust
/// use shopify_admin::Scopes;
///
/// let scopes = Scopes::new()
///     .with_scope("read_content")
///     .with_scope("read_content")
///     .with_scope("read_analytics");
///
/// assert_eq!(scopes.requested(), vec!["read_content", "read_analytics"]);
/// assert_eq!(scopes.to_string(), "read_content,read_analytics");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Scopes {
    scopes: Vec<String>,
}

impl Scopes {
    /// Creates an empty scope list.
    #[must_use]
    pub const fn new() -> Self {
        Self { scopes: Vec::new() }
    }

    /// Returns the list with `scope` appended.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        let scope: String = scope.into();
        let scope = scope.trim();
        if !scope.is_empty() {
            self.scopes.push(scope.to_string());
        }
        self
    }

    /// Returns the list with every scope in `scopes` appended in order.
    #[must_use]
    pub fn with_scopes<I, S>(self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        scopes.into_iter().fold(self, Self::with_scope)
    }

    /// Returns the unique scopes in order of first appearance.
    #[must_use]
    pub fn requested(&self) -> Vec<&str> {
        let mut unique: Vec<&str> = Vec::with_capacity(self.scopes.len());
        for scope in &self.scopes {
            if !unique.contains(&scope.as_str()) {
                unique.push(scope);
            }
        }
        unique
    }

    /// Returns `true` if no scope has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

impl FromStr for Scopes {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut scopes = Self::new();

        for scope in s.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if !scope.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(ConfigError::InvalidScopes {
                    reason: format!("Invalid characters in scope: '{scope}'"),
                });
            }
            scopes = scopes.with_scope(scope);
        }

        Ok(scopes)
    }
}

impl fmt::Display for Scopes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.requested().join(","))
    }
}

impl Serialize for Scopes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Scopes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_scope_leaves_prior_value_untouched() {
        let base = Scopes::new().with_scope("read_content");
        let extended = base.clone().with_scope("write_orders");

        assert_eq!(base.requested(), vec!["read_content"]);
        assert_eq!(extended.requested(), vec!["read_content", "write_orders"]);
    }

    #[test]
    fn test_requested_dedupes_in_first_seen_order() {
        let scopes = Scopes::new().with_scopes([
            "read_analytics",
            "read_content",
            "read_analytics",
            "write_orders",
            "read_content",
        ]);

        assert_eq!(
            scopes.requested(),
            vec!["read_analytics", "read_content", "write_orders"]
        );
    }

    #[test]
    fn test_parses_comma_separated_with_whitespace() {
        let scopes: Scopes = " read_products, write_orders ,,".parse().unwrap();
        assert_eq!(scopes.requested(), vec!["read_products", "write_orders"]);
    }

    #[test]
    fn test_parse_rejects_invalid_characters() {
        let result = "read_products,write-orders".parse::<Scopes>();
        assert!(matches!(result, Err(ConfigError::InvalidScopes { .. })));
    }

    #[test]
    fn test_serializes_as_comma_string() {
        let scopes = Scopes::new().with_scopes(["read_content", "read_content", "read_themes"]);
        let json = serde_json::to_string(&scopes).unwrap();
        assert_eq!(json, r#""read_content,read_themes""#);

        let parsed: Scopes = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.requested(), scopes.requested());
    }

    #[test]
    fn test_empty_scopes_display_as_empty_string() {
        assert!(Scopes::new().is_empty());
        assert_eq!(Scopes::new().to_string(), "");
        assert!(Scopes::new().with_scope("  ").is_empty());
    }
}
