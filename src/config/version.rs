//! Admin API version selection.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// A Shopify Admin API version.
///
/// Shopify releases a stable version every quarter, named after the release
/// month (`2025-01`, `2025-04`, ...). The version becomes part of every REST
/// path: `/admin/api/{version}/customers.json`.
///
/// # Example
///
/// ```rust
/// use shopify_admin::ApiVersion;
///
/// let version: ApiVersion = "2025-07".parse().unwrap();
/// assert_eq!(version.to_string(), "2025-07");
/// assert!(version.is_stable());
///
/// assert!("2025-02".parse::<ApiVersion>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ApiVersion {
    /// A quarterly stable release.
    Stable {
        /// Release year.
        year: u16,
        /// Release month: 1, 4, 7 or 10.
        month: u8,
    },
    /// The `unstable` channel. Sorts after every stable release.
    Unstable,
}

impl ApiVersion {
    const RELEASE_MONTHS: [u8; 4] = [1, 4, 7, 10];

    /// Creates a stable version, rejecting non-quarterly months.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiVersion`] if `month` is not a release month.
    pub fn stable(year: u16, month: u8) -> Result<Self, ConfigError> {
        if !Self::RELEASE_MONTHS.contains(&month) {
            return Err(ConfigError::InvalidApiVersion {
                version: format!("{year:04}-{month:02}"),
            });
        }
        Ok(Self::Stable { year, month })
    }

    /// Returns the most recent stable version known to this crate.
    #[must_use]
    pub const fn latest() -> Self {
        Self::Stable {
            year: 2025,
            month: 10,
        }
    }

    /// Returns `true` for quarterly releases.
    #[must_use]
    pub const fn is_stable(&self) -> bool {
        matches!(self, Self::Stable { .. })
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::latest()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stable { year, month } => write!(f, "{year:04}-{month:02}"),
            Self::Unstable => f.write_str("unstable"),
        }
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        if s == "unstable" {
            return Ok(Self::Unstable);
        }

        let invalid = || ConfigError::InvalidApiVersion { version: s.clone() };

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: u16 = year.parse().map_err(|_| invalid())?;
        let month: u8 = month.parse().map_err(|_| invalid())?;

        Self::stable(year, month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_quarterly_versions() {
        assert_eq!(
            "2024-10".parse::<ApiVersion>().unwrap(),
            ApiVersion::Stable {
                year: 2024,
                month: 10
            }
        );
        assert_eq!(
            "UNSTABLE".parse::<ApiVersion>().unwrap(),
            ApiVersion::Unstable
        );
    }

    #[test]
    fn test_rejects_non_quarterly_and_malformed_versions() {
        assert!("2024-02".parse::<ApiVersion>().is_err());
        assert!("2024-1".parse::<ApiVersion>().is_err());
        assert!("24-01".parse::<ApiVersion>().is_err());
        assert!("latest".parse::<ApiVersion>().is_err());
        assert!("abcd-01".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn test_display_zero_pads_month() {
        let version = ApiVersion::stable(2025, 4).unwrap();
        assert_eq!(version.to_string(), "2025-04");
    }

    #[test]
    fn test_ordering_puts_unstable_last() {
        let older = ApiVersion::stable(2024, 10).unwrap();
        let newer = ApiVersion::stable(2025, 1).unwrap();
        assert!(older < newer);
        assert!(newer < ApiVersion::Unstable);
    }

    #[test]
    fn test_default_is_latest() {
        assert_eq!(ApiVersion::default(), ApiVersion::latest());
        assert!(ApiVersion::latest().is_stable());
    }
}
