//! Graph API version definitions.
//!
//! This module provides the [`GraphApiVersion`] type for specifying which
//! version of the Graph API requests are sent to.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Graph API version.
///
/// Graph versions are `MAJOR.MINOR` pairs (e.g. `15.0`). Requests are sent to
/// `{base}v{MAJOR}.{MINOR}/{path}`.
///
/// # Example
///
/// ```rust
/// use meta_graph_api::GraphApiVersion;
///
/// let version: GraphApiVersion = "v15.0".parse().unwrap();
/// assert_eq!(version, GraphApiVersion::default());
/// assert_eq!(version.to_string(), "15.0");
/// assert_eq!(version.path_segment(), "v15.0");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GraphApiVersion {
    major: u16,
    minor: u16,
}

impl GraphApiVersion {
    /// The version the adapter was built against.
    pub const V15_0: Self = Self::new(15, 0);

    /// Creates a version from its components.
    #[must_use]
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }

    /// Returns the major component.
    #[must_use]
    pub const fn major(&self) -> u16 {
        self.major
    }

    /// Returns the minor component.
    #[must_use]
    pub const fn minor(&self) -> u16 {
        self.minor
    }

    /// Returns the URL path segment for this version, e.g. `v15.0`.
    #[must_use]
    pub fn path_segment(&self) -> String {
        format!("v{self}")
    }
}

impl Default for GraphApiVersion {
    fn default() -> Self {
        Self::V15_0
    }
}

impl fmt::Display for GraphApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for GraphApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ConfigError::InvalidApiVersion {
            version: trimmed.to_string(),
        };

        let digits = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);
        let (major, minor) = digits.split_once('.').ok_or_else(invalid)?;

        let is_number = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit());
        if !is_number(major) || !is_number(minor) {
            return Err(invalid());
        }

        Ok(Self {
            major: major.parse().map_err(|_| invalid())?,
            minor: minor.parse().map_err(|_| invalid())?,
        })
    }
}
