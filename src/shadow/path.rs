//! Explicit paths through nested shadow roots.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// ShadowPath
// ============================================================================

/// Selectors leading through one or more shadow boundaries.
///
/// `hosts[0]` is queried in the light DOM, each later host in the previous
/// host's shadow root, and `target` in the last host's shadow root.
///
/// # Example
///
/// ```ignore
/// let path = ShadowPath::new(["nestedshadow-form", "shadow-form"], "#fname")?;
/// assert_eq!(path.depth(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawShadowPath")]
pub struct ShadowPath {
    hosts: Vec<String>,
    target: String,
}

/// Unchecked wire form, validated through [`ShadowPath::new`].
#[derive(Deserialize)]
struct RawShadowPath {
    hosts: Vec<String>,
    target: String,
}

impl TryFrom<RawShadowPath> for ShadowPath {
    type Error = Error;

    fn try_from(raw: RawShadowPath) -> Result<Self> {
        Self::new(raw.hosts, raw.target)
    }
}

impl ShadowPath {
    /// Creates a path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `hosts` is empty or any selector
    /// is blank.
    pub fn new<I, H>(hosts: I, target: impl Into<String>) -> Result<Self>
    where
        I: IntoIterator<Item = H>,
        H: Into<String>,
    {
        let hosts: Vec<String> = hosts.into_iter().map(Into::into).collect();
        let target = target.into();

        if hosts.is_empty() {
            return Err(Error::invalid_argument(
                "shadow path needs at least one host",
            ));
        }
        if hosts.iter().any(|h| h.trim().is_empty()) || target.trim().is_empty() {
            return Err(Error::invalid_argument("shadow path selectors must not be blank"));
        }

        Ok(Self { hosts, target })
    }

    /// Host selectors, outermost first.
    #[inline]
    #[must_use]
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    /// Selector of the element inside the innermost root.
    #[inline]
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Number of shadow boundaries crossed.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.hosts.len()
    }
}

impl fmt::Display for ShadowPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for host in &self.hosts {
            write!(f, "{host} >>> ")?;
        }
        f.write_str(&self.target)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_matches_hosts() {
        let path = ShadowPath::new(["nestedshadow-form", "shadow-form"], "#fname").unwrap();
        assert_eq!(path.depth(), 2);
        assert_eq!(path.target(), "#fname");
        assert_eq!(path.to_string(), "nestedshadow-form >>> shadow-form >>> #fname");
    }

    #[test]
    fn test_empty_hosts_rejected() {
        let hosts: [&str; 0] = [];
        let err = ShadowPath::new(hosts, "#fname").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn test_blank_target_rejected() {
        assert!(ShadowPath::new(["shadow-form"], " ").is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let empty = serde_json::from_str::<ShadowPath>(r#"{"hosts":[],"target":""}"#);
        assert!(empty.is_err());

        let blank = serde_json::from_str::<ShadowPath>(r##"{"hosts":[" "],"target":"#fname"}"##);
        assert!(blank.is_err());

        let path: ShadowPath =
            serde_json::from_str(r##"{"hosts":["shadow-form"],"target":"#fname"}"##).unwrap();
        assert_eq!(path.depth(), 1);
        assert_eq!(serde_json::to_value(&path).unwrap()["target"], "#fname");
    }
}
