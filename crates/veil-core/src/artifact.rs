//! Artifact identity
//!
//! # Parse-at-Boundaries Pattern
//!
//! [`ArtifactKey`] validates its coordinates on construction and cannot
//! represent invalid states. It is the join key between exclusion rules and
//! the resolved dependency graph: immutable, hashable, and totally ordered
//! (lexicographic over its four segments), so warning output and frozen map
//! iteration are deterministic.
//!
//! # Coordinate Format
//!
//! Keys parse from `"group:name[:classifier[:kind]]"`:
//! - `classifier` defaults to empty,
//! - `kind` defaults to `"jar"` (an empty fourth segment also means `"jar"`),
//! - keys render back in the shortest unambiguous form.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default artifact kind when the fourth coordinate segment is omitted
const DEFAULT_KIND: &str = "jar";

/// Error type for artifact coordinate validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArtifactKeyError {
    /// Coordinates are empty or whitespace-only
    #[error("artifact coordinates cannot be empty")]
    Empty,

    /// Coordinates are missing the group or name segment
    #[error("artifact coordinates `{value}` must contain at least `group:name`")]
    MissingSegments {
        /// The value that was provided
        value: String,
    },

    /// Coordinates contain more than four `:`-separated segments
    #[error("artifact coordinates `{value}` contain too many segments (max group:name:classifier:kind)")]
    TooManySegments {
        /// The value that was provided
        value: String,
    },

    /// The group or name segment is empty
    #[error("artifact {segment} segment cannot be empty in `{value}`")]
    EmptySegment {
        /// Which segment was empty (`"group"` or `"name"`)
        segment: &'static str,
        /// The value that was provided
        value: String,
    },

    /// A segment contains characters outside the allowed set
    #[error("artifact segment `{segment}` contains invalid characters (allowed: ASCII alphanumerics, `.`, `_`, `-`)")]
    InvalidCharacters {
        /// The offending segment
        segment: String,
    },
}

/// A validated artifact key: one resolved dependency, version-independent
///
/// # Construction
///
/// ```rust
/// use veil_core::ArtifactKey;
///
/// let key = ArtifactKey::parse("io.acme:acme-lib")?;
/// assert_eq!(key.kind(), "jar");
/// # Ok::<(), veil_core::ArtifactKeyError>(())
/// ```
///
/// # Guarantees
///
/// - Group and name are non-empty
/// - All segments contain only ASCII alphanumerics, `.`, `_`, `-`
/// - `Display` renders the shortest unambiguous form
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArtifactKey {
    group: String,
    name: String,
    classifier: String,
    kind: String,
}

impl ArtifactKey {
    /// Parse and validate artifact coordinates (trims whitespace first)
    ///
    /// # Errors
    ///
    /// Returns `ArtifactKeyError` if the coordinates are invalid.
    pub fn parse(s: impl AsRef<str>) -> Result<Self, ArtifactKeyError> {
        let trimmed = s.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ArtifactKeyError::Empty);
        }

        let segments: Vec<&str> = trimmed.split(':').collect();
        match segments.as_slice() {
            [_] => Err(ArtifactKeyError::MissingSegments {
                value: trimmed.to_string(),
            }),
            &[group, name] => Self::from_segments(trimmed, group, name, "", DEFAULT_KIND),
            &[group, name, classifier] => {
                Self::from_segments(trimmed, group, name, classifier, DEFAULT_KIND)
            }
            &[group, name, classifier, kind] => {
                let kind = if kind.is_empty() { DEFAULT_KIND } else { kind };
                Self::from_segments(trimmed, group, name, classifier, kind)
            }
            _ => Err(ArtifactKeyError::TooManySegments {
                value: trimmed.to_string(),
            }),
        }
    }

    /// Build a key from group and name alone (empty classifier, `jar` kind)
    ///
    /// # Errors
    ///
    /// Returns `ArtifactKeyError` if either segment is invalid.
    pub fn ga(group: impl AsRef<str>, name: impl AsRef<str>) -> Result<Self, ArtifactKeyError> {
        Self::parse(format!("{}:{}", group.as_ref(), name.as_ref()))
    }

    fn from_segments(
        value: &str,
        group: &str,
        name: &str,
        classifier: &str,
        kind: &str,
    ) -> Result<Self, ArtifactKeyError> {
        if group.is_empty() {
            return Err(ArtifactKeyError::EmptySegment {
                segment: "group",
                value: value.to_string(),
            });
        }
        if name.is_empty() {
            return Err(ArtifactKeyError::EmptySegment {
                segment: "name",
                value: value.to_string(),
            });
        }
        for segment in [group, name, classifier, kind] {
            validate_segment(segment)?;
        }

        Ok(Self {
            group: group.to_string(),
            name: name.to_string(),
            classifier: classifier.to_string(),
            kind: kind.to_string(),
        })
    }

    /// The group coordinate
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// The name coordinate
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The classifier coordinate (empty when unset)
    #[must_use]
    pub fn classifier(&self) -> &str {
        &self.classifier
    }

    /// The kind coordinate (`"jar"` when unset)
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }
}

/// Validate one coordinate segment (empty segments are checked by the caller)
fn validate_segment(segment: &str) -> Result<(), ArtifactKeyError> {
    if segment
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-')
    {
        Ok(())
    } else {
        Err(ArtifactKeyError::InvalidCharacters {
            segment: segment.to_string(),
        })
    }
}

impl std::fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.kind != DEFAULT_KIND {
            write!(
                f,
                "{}:{}:{}:{}",
                self.group, self.name, self.classifier, self.kind
            )
        } else if self.classifier.is_empty() {
            write!(f, "{}:{}", self.group, self.name)
        } else {
            write!(f, "{}:{}:{}", self.group, self.name, self.classifier)
        }
    }
}

impl std::str::FromStr for ArtifactKey {
    type Err = ArtifactKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ArtifactKey {
    type Error = ArtifactKeyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for ArtifactKey {
    type Error = ArtifactKeyError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<ArtifactKey> for String {
    fn from(key: ArtifactKey) -> Self {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn parse_group_and_name_defaults_kind_to_jar() {
        let key = ArtifactKey::parse("io.acme:acme-lib").unwrap();
        assert_eq!(key.group(), "io.acme");
        assert_eq!(key.name(), "acme-lib");
        assert_eq!(key.classifier(), "");
        assert_eq!(key.kind(), "jar");
    }

    #[test]
    fn parse_full_coordinates() {
        let key = ArtifactKey::parse("io.acme:acme-lib:linux-x86_64:so").unwrap();
        assert_eq!(key.classifier(), "linux-x86_64");
        assert_eq!(key.kind(), "so");
    }

    #[test]
    fn parse_empty_fourth_segment_defaults_to_jar() {
        let key = ArtifactKey::parse("io.acme:acme-lib:sources:").unwrap();
        assert_eq!(key.kind(), "jar");
    }

    #[test]
    fn display_renders_shortest_form() {
        let plain = ArtifactKey::parse("io.acme:acme-lib").unwrap();
        assert_eq!(plain.to_string(), "io.acme:acme-lib");

        let classified = ArtifactKey::parse("io.acme:acme-lib:sources").unwrap();
        assert_eq!(classified.to_string(), "io.acme:acme-lib:sources");

        let kinded = ArtifactKey::parse("io.acme:acme-lib::pom").unwrap();
        assert_eq!(kinded.to_string(), "io.acme:acme-lib::pom");
    }

    #[test]
    fn roundtrip_through_display() {
        for input in [
            "io.acme:acme-lib",
            "io.acme:acme-lib:sources",
            "io.acme:acme-lib:sources:pom",
            "io.acme:acme-lib::pom",
        ] {
            let key = ArtifactKey::parse(input).unwrap();
            let reparsed = ArtifactKey::parse(key.to_string()).unwrap();
            assert_eq!(key, reparsed);
        }
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(ArtifactKey::parse("").unwrap_err(), ArtifactKeyError::Empty);
        assert_eq!(
            ArtifactKey::parse("   ").unwrap_err(),
            ArtifactKeyError::Empty
        );
    }

    #[test]
    fn rejects_missing_name() {
        assert!(matches!(
            ArtifactKey::parse("io.acme").unwrap_err(),
            ArtifactKeyError::MissingSegments { .. }
        ));
        assert!(matches!(
            ArtifactKey::parse("io.acme:").unwrap_err(),
            ArtifactKeyError::EmptySegment { segment: "name", .. }
        ));
        assert!(matches!(
            ArtifactKey::parse(":acme-lib").unwrap_err(),
            ArtifactKeyError::EmptySegment {
                segment: "group",
                ..
            }
        ));
    }

    #[test]
    fn rejects_too_many_segments() {
        assert!(matches!(
            ArtifactKey::parse("a:b:c:d:e").unwrap_err(),
            ArtifactKeyError::TooManySegments { .. }
        ));
    }

    #[test]
    fn rejects_invalid_characters() {
        assert!(matches!(
            ArtifactKey::parse("io.acme:acme lib").unwrap_err(),
            ArtifactKeyError::InvalidCharacters { .. }
        ));
        assert!(matches!(
            ArtifactKey::parse("io.acme:acme/lib").unwrap_err(),
            ArtifactKeyError::InvalidCharacters { .. }
        ));
    }

    #[test]
    fn ordering_is_lexicographic_over_segments() {
        let a = ArtifactKey::parse("io.acme:aaa").unwrap();
        let b = ArtifactKey::parse("io.acme:bbb").unwrap();
        let c = ArtifactKey::parse("io.beta:aaa").unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn serde_roundtrips_as_plain_string() {
        let key = ArtifactKey::parse("io.acme:acme-lib:sources").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"io.acme:acme-lib:sources\"");
        let back: ArtifactKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn serde_rejects_invalid_coordinates() {
        let result: Result<ArtifactKey, _> = serde_json::from_str("\"no-colon\"");
        assert!(result.is_err());
    }
}
